//! Generic decoder for ArcSight Common Event Format messages.
use super::cache::ParseCache;
use super::{fields_to_event_data, MessagePlugin, GENERIC_ORGANIZATION};
use crate::message::SyslogMessage;

pub struct GenericCEFDecoderPlugin;

impl MessagePlugin for GenericCEFDecoderPlugin {
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool {
        let message = match event.message() {
            Some(message) if message.starts_with("CEF:1") => message.to_string(),
            _ => return false,
        };

        let Some(parsed) = cache.cef(&message) else {
            return false;
        };
        if !(parsed.contains_key("device_vendor") && parsed.contains_key("device_product")) {
            return false;
        }

        // Classification comes from the CEF header itself.
        let organization = parsed
            .get("device_vendor")
            .map(|vendor| vendor.to_lowercase())
            .unwrap_or_else(|| GENERIC_ORGANIZATION.to_string());
        let product = parsed
            .get("device_product")
            .map(|product| product.to_lowercase())
            .unwrap_or_else(|| "unknown".to_string());
        let msgclass = parsed
            .get("name")
            .map(|name| name.to_lowercase())
            .unwrap_or_else(|| "unknown".to_string());
        let event_data = fields_to_event_data(parsed);

        self.apply_field_mapping(event, event_data, &msgclass, None);
        self.set_source_producer(event, &organization, &product);
        true
    }
}
