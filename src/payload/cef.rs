//! ArcSight Common Event Format:
//! `CEF:Version|Device Vendor|Device Product|Device Version|Signature ID|Name|Severity|Extension`
use super::{expand_labels, split_escaped_pipes};
use indexmap::IndexMap;

const HEADER_FIELDS: [&str; 7] = [
    "cef_version",
    "device_vendor",
    "device_product",
    "device_version",
    "signature_id",
    "name",
    "severity",
];

// The extension is a space-separated key=value list, but values may
// themselves contain spaces: a space only terminates the value when the
// next token is recognisable as another `key=`.
fn parse_extension(extension: &str, result: &mut IndexMap<String, String>) {
    let chars: Vec<char> = extension.chars().collect();
    let len = chars.len();
    let mut i = 0;

    while i < len {
        while i < len && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= len {
            break;
        }

        let key_start = i;
        while i < len && chars[i] != '=' && !chars[i].is_whitespace() {
            i += 1;
        }
        if i >= len || chars[i] != '=' {
            // Not a key, skip the token.
            while i < len && !chars[i].is_whitespace() {
                i += 1;
            }
            continue;
        }
        let key: String = chars[key_start..i].iter().collect();
        i += 1;

        let mut value = String::new();
        while i < len {
            if chars[i].is_whitespace() {
                let gap_start = i;
                while i < len && chars[i].is_whitespace() {
                    i += 1;
                }
                if i >= len {
                    break;
                }

                let mut lookahead = i;
                let mut next_is_key = false;
                while lookahead < len && !chars[lookahead].is_whitespace() {
                    if chars[lookahead] == '=' {
                        next_is_key = true;
                        break;
                    }
                    lookahead += 1;
                }
                if next_is_key {
                    break;
                }
                value.extend(chars[gap_start..i].iter());
            } else if chars[i] == '\\' && i + 1 < len {
                match chars[i + 1] {
                    '\\' => value.push('\\'),
                    '=' => value.push('='),
                    '|' => value.push('|'),
                    'n' => value.push('\n'),
                    'r' => value.push('\r'),
                    't' => value.push('\t'),
                    's' | ' ' => value.push(' '),
                    other => value.push(other),
                }
                i += 2;
            } else {
                value.push(chars[i]);
                i += 1;
            }
        }

        result.insert(key, value);
    }
}

/// Parse a CEF message into a flat mapping of header fields and extension
/// keys, with user-label aliases expanded.
pub fn parse_cef(message: &str) -> Option<IndexMap<String, String>> {
    let body = message.strip_prefix("CEF:")?;

    let parts = split_escaped_pipes(body, 7);
    if parts.len() < 8 {
        return None;
    }

    let mut result = IndexMap::new();
    for (name, value) in HEADER_FIELDS.iter().zip(&parts) {
        result.insert(name.to_string(), value.clone());
    }

    let extension = &parts[7];
    if !extension.is_empty() {
        parse_extension(extension, &mut result);
        expand_labels(&mut result);
    }

    Some(result)
}
