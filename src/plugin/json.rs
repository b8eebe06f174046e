//! Generic decoder for native JSON object messages.
use super::cache::ParseCache;
use super::{MessagePlugin, GENERIC_ORGANIZATION};
use crate::message::SyslogMessage;

pub struct GenericJSONDecoderPlugin;

impl MessagePlugin for GenericJSONDecoderPlugin {
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool {
        let Some(message) = event.message().map(str::to_string) else {
            return false;
        };

        let Some(parsed) = cache.json(&message) else {
            return false;
        };
        if parsed.is_empty() {
            return false;
        }
        let event_data = parsed.clone();

        self.apply_field_mapping(event, event_data, "unknown", None);
        self.set_source_producer(event, GENERIC_ORGANIZATION, "unknown_json");
        true
    }
}
