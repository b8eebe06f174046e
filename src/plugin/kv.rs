//! Generic decoder for `key=value` messages.
use super::cache::ParseCache;
use super::{fields_to_event_data, MessagePlugin, GENERIC_ORGANIZATION};
use crate::message::SyslogMessage;

pub struct GenericKVDecoderPlugin;

impl MessagePlugin for GenericKVDecoderPlugin {
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool {
        let message = match event.message() {
            Some(message) if message.contains('=') => message.to_string(),
            _ => return false,
        };

        let Some(parsed) = cache.kv(&message) else {
            return false;
        };
        if parsed.is_empty() {
            return false;
        }
        let event_data = fields_to_event_data(parsed);

        self.apply_field_mapping(event, event_data, "unknown", None);
        self.set_source_producer(event, GENERIC_ORGANIZATION, "unknown_kv");
        true
    }
}
