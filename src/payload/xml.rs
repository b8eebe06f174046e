//! XML messages, flattened into nested mappings.
//!
//! Elements become objects, attributes are stored under `@`-prefixed keys,
//! text mixed with attributes or children lands under `#text`, and repeated
//! sibling elements collapse into ordered lists. When a DOCTYPE declaration
//! is present, its root name is surfaced under the reserved key
//! `_dtd_name`.
use crate::error::DecodeError;
use roxmltree::{Document, Node, ParsingOptions};
use serde_json::{Map, Value};

/// Reserved key carrying the DOCTYPE root name.
pub const DTD_NAME_KEY: &str = "_dtd_name";

fn extract_dtd_name(message: &str) -> Option<String> {
    let at = message.find("<!DOCTYPE")?;
    let rest = message[at + "<!DOCTYPE".len()..].trim_start();
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();

    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

fn element_value(node: Node) -> Value {
    let mut map = Map::new();

    for attribute in node.attributes() {
        map.insert(
            format!("@{}", attribute.name()),
            Value::String(attribute.value().to_string()),
        );
    }

    let children: Vec<(String, Value)> = node
        .children()
        .filter(Node::is_element)
        .map(|child| (child.tag_name().name().to_string(), element_value(child)))
        .collect();

    let text: String = node
        .children()
        .filter(Node::is_text)
        .filter_map(|child| child.text())
        .collect::<String>()
        .trim()
        .to_string();

    if map.is_empty() && children.is_empty() {
        return if text.is_empty() {
            Value::Null
        } else {
            Value::String(text)
        };
    }

    if !text.is_empty() {
        map.insert("#text".to_string(), Value::String(text));
    }

    for (name, value) in children {
        match map.get_mut(&name) {
            None => {
                map.insert(name, value);
            }
            Some(Value::Array(list)) => list.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        }
    }

    Value::Object(map)
}

fn document(text: &str) -> Result<Map<String, Value>, DecodeError> {
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc =
        Document::parse_with_options(text, options).map_err(|_| DecodeError::PayloadUnparsable)?;
    let root = doc.root_element();

    let mut map = Map::new();
    map.insert(root.tag_name().name().to_string(), element_value(root));
    Ok(map)
}

// Escape bare ampersands, then undo the entities that were already fine.
fn repair_entities(message: &str) -> String {
    message
        .replace('&', "&amp;")
        .replace("&amp;amp;", "&amp;")
        .replace("&amp;lt;", "&lt;")
        .replace("&amp;gt;", "&gt;")
        .replace("&amp;quot;", "&quot;")
        .replace("&amp;apos;", "&apos;")
}

/// Parse an XML message into a nested mapping keyed by the root element.
pub fn parse_xml(message: &str) -> Option<Map<String, Value>> {
    let message = message.trim();
    if !(message.starts_with('<') && message.contains('>')) {
        return None;
    }

    let dtd_name = extract_dtd_name(message);
    let mut map = document(message)
        .or_else(|_| document(&repair_entities(message)))
        .ok()?;

    if let Some(name) = dtd_name {
        map.insert(DTD_NAME_KEY.to_string(), Value::String(name));
    }

    Some(map)
}
