use crate::event::EventEnvelope;
use crate::pri::{SyslogFacility, SyslogSeverity};
use crate::procid::ProcId;
use indexmap::IndexMap;
use serde::Serialize;

/// The transport framing a line was decoded from. Doubles as the model
/// type the plugin registry is keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Frame {
    /// Bare `<PRI>MESSAGE`, no further header fields.
    Base,
    /// BSD-style syslog, RFC 3164.
    Rfc3164,
    /// RFC 5424.
    Rfc5424,
}

/// A decoded syslog record.
///
/// One struct covers all three framings; `frame` says which header fields
/// are meaningful. `msgid` and `structured_data` are only populated for
/// RFC 5424.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SyslogMessage {
    pub frame: Frame,
    /// Facility code, 0-23 after clamping.
    pub facility: u8,
    /// Severity code, 0-7.
    pub severity: u8,
    /// Originating host, stored lower-cased.
    pub hostname: Option<String>,
    pub appname: Option<String>,
    pub procid: Option<ProcId>,
    pub msgid: Option<String>,
    /// RFC 5424 structured data: identifier -> parameter -> value.
    pub structured_data: Option<IndexMap<String, IndexMap<String, String>>>,
    #[serde(flatten)]
    pub envelope: EventEnvelope,
}

impl SyslogMessage {
    pub(crate) fn new(frame: Frame, facility: u8, severity: u8, envelope: EventEnvelope) -> Self {
        SyslogMessage {
            frame,
            facility,
            severity,
            hostname: None,
            appname: None,
            procid: None,
            msgid: None,
            structured_data: None,
            envelope,
        }
    }

    /// The residual message body, if any.
    pub fn message(&self) -> Option<&str> {
        self.envelope.message.as_deref()
    }

    /// The facility as a typed value, falling back to log audit when out
    /// of range.
    pub fn facility_enum(&self) -> SyslogFacility {
        SyslogFacility::from_int(self.facility as i32).unwrap_or(SyslogFacility::LOG_AUDIT)
    }

    /// The severity as a typed value, falling back to debug when out of
    /// range.
    pub fn severity_enum(&self) -> SyslogSeverity {
        SyslogSeverity::from_int(self.severity as i32).unwrap_or(SyslogSeverity::SEV_DEBUG)
    }

    /// Recompose the wire priority from facility and severity.
    pub fn priority(&self) -> u8 {
        (self.facility << 3) | (self.severity & 0x7)
    }
}

/// Output of the unknown dispatcher: a fully decoded syslog record, or a
/// plain envelope when no framing matched.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Event {
    Envelope(EventEnvelope),
    Syslog(SyslogMessage),
}

impl Event {
    /// The envelope of either variant.
    pub fn envelope(&self) -> &EventEnvelope {
        match self {
            Event::Envelope(envelope) => envelope,
            Event::Syslog(message) => &message.envelope,
        }
    }

    /// The syslog record, when one of the framing decoders matched.
    pub fn syslog(&self) -> Option<&SyslogMessage> {
        match self {
            Event::Syslog(message) => Some(message),
            Event::Envelope(_) => None,
        }
    }
}
