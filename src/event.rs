//! The event envelope and the handler-data records plugins attach to it.
use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Reserved handler-data key for producer metadata.
pub const SOURCE_PRODUCER_KEY: &str = "SourceProducer";

/// Identifies the upstream system that emitted an event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceProducer {
    pub organization: String,
    pub product: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
}

impl SourceProducer {
    pub fn new(organization: impl Into<String>, product: impl Into<String>) -> Self {
        SourceProducer {
            organization: organization.into(),
            product: product.into(),
            module: None,
        }
    }
}

/// The classification a plugin records for the message it decoded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MessageClassification {
    pub msgclass: String,
    /// Extra per-handler metadata, merged into the record when serialized.
    #[serde(flatten)]
    pub metadata: Option<Map<String, Value>>,
}

/// One entry in the handler-data map. Each plugin owns the entry stored
/// under its own identity; the producer entry lives under
/// [`SOURCE_PRODUCER_KEY`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HandlerEntry {
    Classification(MessageClassification),
    Producer(SourceProducer),
}

impl HandlerEntry {
    /// The msgclass, when this entry is a classification.
    pub fn msgclass(&self) -> Option<&str> {
        match self {
            HandlerEntry::Classification(c) => Some(&c.msgclass),
            HandlerEntry::Producer(_) => None,
        }
    }

    /// The producer metadata, when this entry is a producer record.
    pub fn producer(&self) -> Option<&SourceProducer> {
        match self {
            HandlerEntry::Producer(p) => Some(p),
            HandlerEntry::Classification(_) => None,
        }
    }
}

/// Root of every decoded record.
///
/// `courier_timestamp` is fixed at construction and never changes
/// afterwards; everything else is populated by the decoders and the plugin
/// chain for the one line this envelope belongs to.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EventEnvelope {
    /// Wall-clock instant of the event, usually taken from the header.
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// The event's logical time, only when it differs from `timestamp`.
    pub event_time: Option<DateTime<FixedOffset>>,
    courier_timestamp: DateTime<FixedOffset>,
    /// Residual payload after the framing header.
    pub message: Option<String>,
    /// Structured fields attached by the matching plugin.
    pub event_data: Option<Map<String, Value>>,
    /// Per-handler records, keyed by plugin identity.
    pub handler_data: Option<IndexMap<String, HandlerEntry>>,
}

impl EventEnvelope {
    /// A fresh envelope, stamped with the instant of first receipt.
    pub fn new(courier_timestamp: DateTime<FixedOffset>) -> Self {
        EventEnvelope {
            timestamp: None,
            event_time: None,
            courier_timestamp,
            message: None,
            event_data: None,
            handler_data: None,
        }
    }

    /// The instant this line was first received.
    pub fn courier_timestamp(&self) -> DateTime<FixedOffset> {
        self.courier_timestamp
    }

    /// Record the event's logical time. A value equal to `timestamp`
    /// carries no information and is dropped, so adapters never see the
    /// two fields agree.
    pub fn set_event_time(&mut self, event_time: DateTime<FixedOffset>) {
        if self.timestamp != Some(event_time) {
            self.event_time = Some(event_time);
        }
    }

    /// Insert a handler-data entry, creating the map on first use.
    pub(crate) fn insert_handler_data(&mut self, key: String, entry: HandlerEntry) {
        self.handler_data
            .get_or_insert_with(IndexMap::new)
            .insert(key, entry);
    }
}
