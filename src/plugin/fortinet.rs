//! Fortinet FortiGate `key=value` syslog messages.
//!
//! FortiGate logs ship the whole record as key=value pairs directly after
//! the priority, so this runs in the second pass on base-framed models.
//! See the FortiGate syslog message format documentation:
//! <https://docs.fortinet.com/document/fortigate/latest/administration-guide/333255/log-message-formats>
use super::cache::ParseCache;
use super::{fields_to_event_data, MessagePlugin};
use crate::message::SyslogMessage;

pub struct FortinetFortiGateKVDecoderPlugin;

impl MessagePlugin for FortinetFortiGateKVDecoderPlugin {
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool {
        let message = match event.message() {
            Some(message) if message.contains('=') => message.to_string(),
            _ => return false,
        };

        let Some(parsed) = cache.kv(&message) else {
            return false;
        };

        // FortiGate records always carry these fields, and logid is a
        // fixed ten characters.
        let looks_like_fortigate = parsed.contains_key("eventtime")
            && parsed.contains_key("type")
            && parsed.contains_key("subtype")
            && parsed.get("logid").is_some_and(|logid| logid.len() == 10);
        if !looks_like_fortigate {
            return false;
        }

        let msgclass = format!(
            "{}_{}",
            parsed.get("type").map(String::as_str).unwrap_or(""),
            parsed.get("subtype").map(String::as_str).unwrap_or("")
        );
        let event_data = fields_to_event_data(parsed);

        self.apply_field_mapping(event, event_data, &msgclass, None);
        self.set_source_producer(event, "fortinet", "fortigate");
        true
    }
}
