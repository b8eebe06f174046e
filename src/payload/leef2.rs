//! IBM QRadar Log Event Extended Format 2.0:
//! `LEEF:2.0|Vendor|Product|Version|EventID[|EventCategory][|DelimChar]|Extension`
//!
//! The event category is optional and recognised by the absence of a `=`
//! in the field. The header may also carry a one-character delimiter slot;
//! it is recognised and skipped, but splitting keeps the tab-else-space
//! fallback rather than honouring the declared character.
use super::{expand_labels, leef1::parse_pairs};
use indexmap::IndexMap;

// A single non-alphanumeric character is a delimiter declaration, not a
// category.
fn is_delimiter_slot(segment: &str) -> bool {
    let mut chars = segment.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(c), None) if !c.is_alphanumeric()
    )
}

fn strip_delimiter_slot(extension: &str) -> &str {
    match extension.split_once('|') {
        Some((first, after)) if is_delimiter_slot(first) => after,
        _ => extension,
    }
}

// Split the post-header remainder into (event category, extension).
fn split_category(rest: &str) -> (Option<&str>, &str) {
    match rest.split_once('|') {
        None => {
            if rest.is_empty() || rest.contains('=') {
                (None, rest)
            } else {
                (Some(rest), "")
            }
        }
        Some((first, after)) => {
            if first.contains('=') {
                // The extension starts immediately; pairs may contain pipes.
                (None, rest)
            } else if first.is_empty() || is_delimiter_slot(first) {
                (None, strip_delimiter_slot(after))
            } else {
                (Some(first), strip_delimiter_slot(after))
            }
        }
    }
}

/// Parse a LEEF 2.0 message into a flat mapping of header fields and
/// extension keys, with user-label aliases expanded. The category, when
/// present, is stored under `event_cat`.
pub fn parse_leef2(message: &str) -> Option<IndexMap<String, String>> {
    if !message.starts_with("LEEF:2.") {
        return None;
    }

    let mut parts = message.splitn(6, '|');
    let leef_version = parts.next()?.strip_prefix("LEEF:")?;
    let vendor = parts.next()?;
    let product = parts.next()?;
    let version = parts.next()?;
    let event_id = parts.next()?;
    let rest = parts.next();

    let mut result = IndexMap::new();
    result.insert("leef_version".to_string(), leef_version.to_string());
    result.insert("vendor".to_string(), vendor.to_string());
    result.insert("product".to_string(), product.to_string());
    result.insert("version".to_string(), version.to_string());
    result.insert("event_id".to_string(), event_id.to_string());

    if let Some(rest) = rest {
        let (category, extension) = split_category(rest);
        if let Some(category) = category {
            result.insert("event_cat".to_string(), category.to_string());
        }
        if !extension.is_empty() {
            parse_pairs(extension, true, &mut result);
            expand_labels(&mut result);
        }
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_without_category() {
        let parsed = parse_leef2("LEEF:2.0|V|P|2.0|600|src=10.0.0.1\tdst=2.1.2.2").unwrap();
        assert_eq!(parsed["leef_version"], "2.0");
        assert_eq!(parsed["vendor"], "V");
        assert_eq!(parsed["product"], "P");
        assert_eq!(parsed["version"], "2.0");
        assert_eq!(parsed["event_id"], "600");
        assert_eq!(parsed.get("event_cat"), None);
        assert_eq!(parsed["src"], "10.0.0.1");
        assert_eq!(parsed["dst"], "2.1.2.2");
    }

    #[test]
    fn category_between_event_id_and_extension() {
        let parsed = parse_leef2("LEEF:2.0|IBM|QRadar|2.0|12345|Intrusion|src=10.0.0.1").unwrap();
        assert_eq!(parsed["event_cat"], "Intrusion");
        assert_eq!(parsed["src"], "10.0.0.1");
    }

    #[test]
    fn delimiter_slot_after_category_is_skipped() {
        let parsed =
            parse_leef2("LEEF:2.0|IBM|QRadar|2.0|12345|Alert|\t|src=10.0.0.1\tdst=2.1.2.2")
                .unwrap();
        assert_eq!(parsed["event_cat"], "Alert");
        assert_eq!(parsed["src"], "10.0.0.1");
        assert_eq!(parsed["dst"], "2.1.2.2");
    }

    #[test]
    fn delimiter_slot_without_category() {
        let parsed = parse_leef2("LEEF:2.0|V|P|2.0|600|^|src=10.0.0.1 dst=2.1.2.2").unwrap();
        assert_eq!(parsed.get("event_cat"), None);
        assert_eq!(parsed["src"], "10.0.0.1");
        assert_eq!(parsed["dst"], "2.1.2.2");
    }

    #[test]
    fn category_only() {
        let parsed = parse_leef2("LEEF:2.0|V|P|2.0|600|Audit").unwrap();
        assert_eq!(parsed["event_cat"], "Audit");
    }

    #[test]
    fn space_fallback_and_escapes() {
        let parsed = parse_leef2("LEEF:2.0|V|P|2.0|600|msg=a\\sb src=1.2.3.4").unwrap();
        assert_eq!(parsed["msg"], "a b");
        assert_eq!(parsed["src"], "1.2.3.4");
    }

    #[test]
    fn leef1_prefix_is_rejected() {
        assert_eq!(parse_leef2("LEEF:1.0|V|P|1.0|42|src=1.2.3.4"), None);
    }

    #[test]
    fn truncated_header_is_rejected() {
        assert_eq!(parse_leef2("LEEF:2.0|V|P"), None);
    }
}
