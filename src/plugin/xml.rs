//! Generic decoder for XML messages.
use super::cache::ParseCache;
use super::{MessagePlugin, GENERIC_ORGANIZATION};
use crate::message::SyslogMessage;
use crate::payload::xml::DTD_NAME_KEY;
use serde_json::Value;

pub struct GenericXMLDecoderPlugin;

impl MessagePlugin for GenericXMLDecoderPlugin {
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool {
        let message = match event.message() {
            Some(message) if message.trim_start().starts_with('<') => message.to_string(),
            _ => return false,
        };

        let Some(parsed) = cache.xml(&message) else {
            return false;
        };
        if parsed.is_empty() {
            return false;
        }

        // The DTD root name classifies the document; it is meta-data, not
        // event data.
        let mut event_data = parsed.clone();
        let msgclass = match event_data.remove(DTD_NAME_KEY) {
            Some(Value::String(name)) => name,
            _ => "unknown".to_string(),
        };

        self.apply_field_mapping(event, event_data, &msgclass, None);
        self.set_source_producer(event, GENERIC_ORGANIZATION, "unknown_xml");
        true
    }
}
