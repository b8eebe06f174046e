//! The staged message-plugin pipeline.
//!
//! After a framing decoder builds its model, plugins registered for that
//! frame get a chance to decode the residual message body. Stages run in a
//! fixed order and the first plugin to return `true` ends the run for the
//! line; registration order within a stage encodes precedence.
pub mod cache;
pub mod registry;

mod cef;
mod fortinet;
mod json;
mod kv;
mod leef1;
mod leef2;
mod paloalto;
mod xml;

pub use cef::GenericCEFDecoderPlugin;
pub use fortinet::FortinetFortiGateKVDecoderPlugin;
pub use json::GenericJSONDecoderPlugin;
pub use kv::GenericKVDecoderPlugin;
pub use leef1::GenericLEEF1DecoderPlugin;
pub use leef2::GenericLEEF2DecoderPlugin;
pub use paloalto::PaloAltoNGFWCSVDecoder;
pub use xml::GenericXMLDecoderPlugin;

use crate::event::{
    HandlerEntry, MessageClassification, SourceProducer, SOURCE_PRODUCER_KEY,
};
use crate::message::SyslogMessage;
use cache::ParseCache;
use serde_json::{Map, Value};

/// Producer organization for format-recognising plugins that cannot name
/// the real sender.
pub(crate) const GENERIC_ORGANIZATION: &str = "generic";

/// The stage buckets plugins run in, in execution order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Very cheap pre-filters.
    FirstPass,
    /// Vendor dialects that recognise themselves on sight.
    SecondPass,
    /// Format-recognising generics.
    UnprocessedStructured,
    /// Last-resort text heuristics.
    UnprocessedMessages,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::FirstPass,
        Stage::SecondPass,
        Stage::UnprocessedStructured,
        Stage::UnprocessedMessages,
    ];
}

/// Creates a fresh plugin instance for one line.
pub type PluginFactory = fn() -> Box<dyn MessagePlugin>;

/// Derive a plugin identity from a fully qualified type path: the short
/// type name for this crate's own plugins, `package..Type` for plugins
/// registered by other crates.
pub(crate) fn identity_from_type_path(path: &str) -> String {
    let first = path.split("::").next().unwrap_or(path);
    let last = path.rsplit("::").next().unwrap_or(path);

    if first == env!("CARGO_PKG_NAME") {
        last.to_string()
    } else {
        format!("{}..{}", first, last)
    }
}

/// A payload recogniser. On a match it attaches structured fields and
/// producer metadata to the record and returns `true`, ending the plugin
/// run for that line.
pub trait MessagePlugin {
    /// Attempt to decode the record's message. Returns `false` for a
    /// non-match; decoding never fails louder than that.
    fn decode(&self, event: &mut SyslogMessage, cache: &mut ParseCache) -> bool;

    /// The identity this plugin's handler data is stored under.
    fn name(&self) -> String {
        identity_from_type_path(std::any::type_name_of_val(self))
    }

    /// Record this plugin's parse on the model: the parsed fields become
    /// `event_data` and a classification entry is stored under the
    /// plugin's identity.
    fn apply_field_mapping(
        &self,
        event: &mut SyslogMessage,
        event_data: Map<String, Value>,
        msgclass: &str,
        metadata: Option<Map<String, Value>>,
    ) {
        event.envelope.event_data = Some(event_data);
        event.envelope.insert_handler_data(
            self.name(),
            HandlerEntry::Classification(MessageClassification {
                msgclass: msgclass.to_string(),
                metadata,
            }),
        );
        tracing::debug!(plugin = %self.name(), msgclass, "plugin attached event data");
    }

    /// Record the upstream producer under the reserved handler-data key.
    fn set_source_producer(&self, event: &mut SyslogMessage, organization: &str, product: &str) {
        event.envelope.insert_handler_data(
            SOURCE_PRODUCER_KEY.to_string(),
            HandlerEntry::Producer(SourceProducer::new(organization, product)),
        );
    }
}

/// Convert an ordered string mapping into an `event_data` object.
pub(crate) fn fields_to_event_data(
    fields: &indexmap::IndexMap<String, String>,
) -> Map<String, Value> {
    fields
        .iter()
        .map(|(key, value)| (key.clone(), Value::String(value.clone())))
        .collect()
}
