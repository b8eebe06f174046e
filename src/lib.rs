#![deny(clippy::all)]
#![allow(clippy::upper_case_acronyms)]

//! A layered decoder for raw log lines, principally syslog traffic of
//! mixed dialects.
//!
//! Decoding runs in two layers. The framing layer recognises the transport
//! dialect - RFC 5424, RFC 3164/BSD, or a bare `<PRI>` prefix - and parses
//! its header fields. The payload layer then dispatches the residual
//! message through a staged plugin pipeline that decodes well-known
//! formats (CEF, LEEF 1.0/2.0, JSON, XML, key=value, quoted CSV) and
//! vendor layouts (Fortinet FortiGate, Palo Alto NGFW), attaching
//! structured fields and producer metadata to the record.
//!
//! Decoding a line is pure: no I/O, no retries, no shared state beyond the
//! append-only plugin registry. [`decode_unknown`] never fails - in the
//! worst case the line comes back as a plain envelope.
//!
//! ```
//! use syslog_courier::{decode_unknown, Frame};
//!
//! let event = decode_unknown("<34>1 2025-05-09T12:30:00Z host app - - - hello");
//! let record = event.syslog().unwrap();
//! assert_eq!(record.frame, Frame::Rfc5424);
//! assert_eq!(record.facility, 4);
//! assert_eq!(record.message(), Some("hello"));
//! ```
mod error;
mod event;
mod message;
mod parsers;
pub mod payload;
pub mod plugin;
mod pri;
mod procid;
mod rfc3164;
mod rfc5424;
mod rfc_base;
mod structured_data;
mod timestamp;
mod unknown;

use chrono::{DateTime, FixedOffset, Local};

pub use error::DecodeError;
pub use event::{
    EventEnvelope, HandlerEntry, MessageClassification, SourceProducer, SOURCE_PRODUCER_KEY,
};
pub use message::{Event, Frame, SyslogMessage};
pub use plugin::cache::ParseCache;
pub use plugin::registry::{register, registered_plugins};
pub use plugin::{MessagePlugin, PluginFactory, Stage};
pub use pri::{compose_pri, decompose_pri, SyslogFacility, SyslogSeverity};
pub use procid::ProcId;

/// Decode a line of unknown framing. Never fails: lines matching no
/// framing come back as a plain envelope carrying the input as message.
///
/// The current local time is used as the reference instant (receipt time,
/// year resolution, nil timestamps). Use [`decode_unknown_at`] to pin it.
pub fn decode_unknown(input: &str) -> Event {
    unknown::decode_unknown_at(input, Local::now().fixed_offset())
}

/// [`decode_unknown`] with an injected reference instant, so embedders and
/// tests control the clock.
pub fn decode_unknown_at(input: &str, now: DateTime<FixedOffset>) -> Event {
    unknown::decode_unknown_at(input, now)
}

/// Decode a line as RFC 5424, or `None` when it does not match.
pub fn decode_rfc5424(input: &str) -> Option<SyslogMessage> {
    decode_rfc5424_at(input, Local::now().fixed_offset(), &mut ParseCache::default())
}

/// [`decode_rfc5424`] with an injected reference instant and a caller-held
/// parse cache for the line.
pub fn decode_rfc5424_at(
    input: &str,
    now: DateTime<FixedOffset>,
    cache: &mut ParseCache,
) -> Option<SyslogMessage> {
    rfc5424::decode(input, now, cache)
}

/// Decode a line as RFC 3164, or `None` when it does not match.
pub fn decode_rfc3164(input: &str) -> Option<SyslogMessage> {
    decode_rfc3164_at(input, Local::now().fixed_offset(), &mut ParseCache::default())
}

/// [`decode_rfc3164`] with an injected reference instant and a caller-held
/// parse cache for the line.
pub fn decode_rfc3164_at(
    input: &str,
    now: DateTime<FixedOffset>,
    cache: &mut ParseCache,
) -> Option<SyslogMessage> {
    rfc3164::decode(input, now, cache)
}
