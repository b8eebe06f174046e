//! Native JSON object messages.
use crate::error::DecodeError;
use serde_json::{Map, Value};

fn object(message: &str) -> Result<Map<String, Value>, DecodeError> {
    match serde_json::from_str(message) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(DecodeError::PayloadUnparsable),
    }
}

// Some senders double-escape their payloads; undo the common confusions
// before the retry parse.
fn fix_escapes(message: &str) -> String {
    message
        .replace("\\r\\n", "\r\n")
        .replace("\\n", "\n")
        .replace("\\\"", "\"")
        .replace("\\/", "/")
        .replace("\\\\", "\\")
}

/// Parse a native JSON object into a mapping.
///
/// Only inputs that, after trimming, start with `{` and end with `}` are
/// considered. A strict parse is tried first; on failure the common escape
/// confusions are substituted and the parse retried. Anything else returns
/// `None`.
pub fn parse_json(message: &str) -> Option<Map<String, Value>> {
    let message = message.trim();
    if !(message.starts_with('{') && message.ends_with('}')) {
        return None;
    }

    object(message)
        .or_else(|_| object(&fix_escapes(message)))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_object() {
        let parsed = parse_json(r#"{"event": "login", "user": "admin", "count": 3}"#).unwrap();
        assert_eq!(parsed["event"], "login");
        assert_eq!(parsed["count"], 3);
    }

    #[test]
    fn nested_object() {
        let parsed = parse_json(r#"{"outer": {"inner": [1, 2]}}"#).unwrap();
        assert_eq!(parsed["outer"]["inner"][1], 2);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert!(parse_json("  {\"a\": 1}  ").is_some());
    }

    #[test]
    fn escaped_quotes_are_repaired() {
        let parsed = parse_json(r#"{\"username\": \"admin\", \"mfa\": 0}"#).unwrap();
        assert_eq!(parsed["username"], "admin");
        assert_eq!(parsed["mfa"], 0);
    }

    #[test]
    fn non_objects_are_rejected() {
        assert_eq!(parse_json("[1, 2, 3]"), None);
        assert_eq!(parse_json("\"just a string\""), None);
        assert_eq!(parse_json("not json at all"), None);
        assert_eq!(parse_json(""), None);
    }

    #[test]
    fn broken_json_is_rejected() {
        assert_eq!(parse_json("{\"a\": }"), None);
    }
}
