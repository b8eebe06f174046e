//! Space-separated `key=value` messages (FortiGate and countless other
//! appliance formats).
use indexmap::IndexMap;

/// Parse a `key=value` message into an ordered mapping.
///
/// Values are bare (up to the next whitespace) or double-quoted with `\"`
/// and `\\` escapes. Tokens without a `=` are skipped. Returns `None` when
/// the message contains no `=` at all or nothing parses.
pub fn parse_kv(message: &str) -> Option<IndexMap<String, String>> {
    if message.is_empty() || !message.contains('=') {
        return None;
    }

    let chars: Vec<char> = message.chars().collect();
    let len = chars.len();
    let mut result = IndexMap::new();
    let mut i = 0;

    while i < len {
        while i < len && chars[i].is_whitespace() {
            i += 1;
        }

        let key_start = i;
        while i < len && chars[i] != '=' && !chars[i].is_whitespace() {
            i += 1;
        }
        let key: String = chars[key_start..i].iter().collect();

        if key.is_empty() || i >= len || chars[i] != '=' {
            // Stray token, skip it.
            while i < len && chars[i] != ' ' {
                i += 1;
            }
            continue;
        }
        i += 1;

        let value = if i < len && chars[i] == '"' {
            i += 1;
            let mut value = String::new();
            while i < len && chars[i] != '"' {
                if chars[i] == '\\' && i + 1 < len {
                    value.push(chars[i + 1]);
                    i += 2;
                } else {
                    value.push(chars[i]);
                    i += 1;
                }
            }
            i += 1;
            value
        } else {
            let value_start = i;
            while i < len && !chars[i].is_whitespace() {
                i += 1;
            }
            chars[value_start..i].iter().collect()
        };

        result.insert(key, value);
    }

    if result.is_empty() {
        None
    } else {
        Some(result)
    }
}
