//! Pure payload parsers for the well-known message dialects.
//!
//! Each parser accepts a message body and returns a mapping (a list for
//! CSV), or `None` when the body is not structurally valid for that
//! dialect. None of them panic and none of them keep state.
pub mod cef;
pub mod csv;
pub mod json;
pub mod kv;
pub mod leef1;
pub mod leef2;
pub mod xml;

use indexmap::IndexMap;

/// Split a CEF/LEEF header on `|`, honouring `\|` escapes. After
/// `header_pipes` delimiters the remainder is taken verbatim as the final
/// element (the extension may contain unescaped pipes).
pub(crate) fn split_escaped_pipes(text: &str, header_pipes: usize) -> Vec<String> {
    let mut result = Vec::new();
    let mut current = String::new();
    let mut pipes = 0;
    let mut chars = text.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' if text[i + 1..].starts_with('|') => {
                current.push('|');
                chars.next();
            }
            '|' => {
                result.push(std::mem::take(&mut current));
                pipes += 1;
                if pipes == header_pipes {
                    result.push(text[i + 1..].to_string());
                    return result;
                }
            }
            _ => current.push(c),
        }
    }

    result.push(current);
    result
}

/// Resolve the delimited-format escape sequences shared by CEF and LEEF
/// extensions. `s_to_space` additionally maps `\s` to a space (LEEF 2.0);
/// unknown escapes drop the backslash and keep the character.
pub(crate) fn unescape_delimited(value: &str, s_to_space: bool) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('=') => out.push('='),
            Some('|') => out.push('|'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('s') if s_to_space => out.push(' '),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// User-label expansion: a key ending in `Label` names an alias for its
/// base key, so `cs1=x cs1Label=foo` also yields `foo=x`.
pub(crate) fn expand_labels(result: &mut IndexMap<String, String>) {
    let labels: Vec<(String, String)> = result
        .iter()
        .filter_map(|(key, label)| {
            let base = key.strip_suffix("Label")?;
            result
                .get(base)
                .map(|value| (label.clone(), value.clone()))
        })
        .collect();

    for (label, value) in labels {
        result.insert(label, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_respects_escaped_pipes() {
        assert_eq!(
            split_escaped_pipes("a\\|b|c|rest|with|pipes", 2),
            vec!["a|b", "c", "rest|with|pipes"]
        );
    }

    #[test]
    fn split_without_enough_pipes() {
        assert_eq!(split_escaped_pipes("a|b", 5), vec!["a", "b"]);
    }

    #[test]
    fn unescape_known_sequences() {
        assert_eq!(
            unescape_delimited("a\\=b\\|c\\nd\\\\e", false),
            "a=b|c\nd\\e"
        );
        assert_eq!(unescape_delimited("a\\sb", true), "a b");
        assert_eq!(unescape_delimited("a\\sb", false), "asb");
    }

    #[test]
    fn labels_expand_to_aliases() {
        let mut map: IndexMap<String, String> = IndexMap::new();
        map.insert("cs1".into(), "10.0.0.1".into());
        map.insert("cs1Label".into(), "sourceAddress".into());
        expand_labels(&mut map);
        assert_eq!(map.get("sourceAddress").map(String::as_str), Some("10.0.0.1"));
    }
}
