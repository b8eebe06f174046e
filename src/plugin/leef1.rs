//! Generic decoder for LEEF 1.0 messages.
use super::cache::ParseCache;
use super::{fields_to_event_data, MessagePlugin, GENERIC_ORGANIZATION};
use crate::message::SyslogMessage;

pub struct GenericLEEF1DecoderPlugin;

impl MessagePlugin for GenericLEEF1DecoderPlugin {
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool {
        let message = match event.message() {
            Some(message) if message.starts_with("LEEF:1.") => message.to_string(),
            _ => return false,
        };

        let Some(parsed) = cache.leef1(&message) else {
            return false;
        };
        if !(parsed.contains_key("vendor") && parsed.contains_key("product")) {
            return false;
        }

        let organization = parsed
            .get("vendor")
            .map(|vendor| vendor.to_lowercase())
            .unwrap_or_else(|| GENERIC_ORGANIZATION.to_string());
        let product = parsed
            .get("product")
            .map(|product| product.to_lowercase())
            .unwrap_or_else(|| "unknown".to_string());
        let msgclass = parsed
            .get("event_id")
            .map(|event_id| event_id.to_lowercase())
            .unwrap_or_else(|| "unknown".to_string());
        let event_data = fields_to_event_data(parsed);

        self.apply_field_mapping(event, event_data, &msgclass, None);
        self.set_source_producer(event, &organization, &product);
        true
    }
}
