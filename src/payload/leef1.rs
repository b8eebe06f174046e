//! IBM QRadar Log Event Extended Format 1.0:
//! `LEEF:1.0|Vendor|Product|Version|EventID|Extension`
use super::{split_escaped_pipes, unescape_delimited};
use indexmap::IndexMap;

const HEADER_FIELDS: [&str; 5] = ["leef_version", "vendor", "product", "version", "event_id"];

pub(crate) fn parse_pairs(
    extension: &str,
    s_to_space: bool,
    result: &mut IndexMap<String, String>,
) {
    // Tab is the delimiter; fall back to spaces when none are present.
    let delimiter = if extension.contains('\t') { '\t' } else { ' ' };

    for pair in extension.split(delimiter) {
        if pair.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = pair.split_once('=') else {
            continue;
        };
        if key.is_empty() {
            continue;
        }
        result.insert(
            key.trim().to_string(),
            unescape_delimited(value.trim(), s_to_space),
        );
    }
}

/// Parse a LEEF 1.0 message into a flat mapping of header fields and
/// extension keys.
pub fn parse_leef1(message: &str) -> Option<IndexMap<String, String>> {
    let body = message.strip_prefix("LEEF:")?;

    let parts = split_escaped_pipes(body, 5);
    if parts.len() < 6 {
        return None;
    }

    let mut result = IndexMap::new();
    for (name, value) in HEADER_FIELDS.iter().zip(&parts) {
        result.insert(name.to_string(), value.clone());
    }

    let extension = &parts[5];
    if !extension.is_empty() {
        parse_pairs(extension, false, &mut result);
    }

    Some(result)
}
