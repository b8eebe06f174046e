//! Generic decoder for LEEF 2.0 messages.
use super::cache::ParseCache;
use super::{fields_to_event_data, MessagePlugin, GENERIC_ORGANIZATION};
use crate::message::SyslogMessage;

pub struct GenericLEEF2DecoderPlugin;

impl MessagePlugin for GenericLEEF2DecoderPlugin {
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool {
        let message = match event.message() {
            Some(message) if message.starts_with("LEEF:2.") => message.to_string(),
            _ => return false,
        };

        let Some(parsed) = cache.leef2(&message) else {
            return false;
        };
        if parsed.is_empty() {
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
        let event_id = parsed
            .get("event_id")
            .map(|event_id| event_id.to_lowercase())
            .unwrap_or_else(|| "unknown".to_string());

        // The category refines the class, except the default "Alert",
        // which carries no information.
        let msgclass = match parsed.get("event_cat") {
            Some(category) if !category.is_empty() && !category.eq_ignore_ascii_case("alert") => {
                format!("{}_{}", category.to_lowercase(), event_id)
            }
            _ => event_id,
        };
        let event_data = fields_to_event_data(parsed);

        self.apply_field_mapping(event, event_data, &msgclass, None);
        self.set_source_producer(event, &organization, &product);
        true
    }
}
