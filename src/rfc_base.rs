//! The base framing decoder: bare `<PRI>MESSAGE` lines.
//!
//! No attempt is made to parse timestamps or hostnames - the residual
//! after the priority becomes the message wholesale. This is also the
//! fallback frame the unknown dispatcher lands on when the stricter
//! decoders pass.
use crate::event::EventEnvelope;
use crate::message::{Frame, SyslogMessage};
use crate::plugin::cache::ParseCache;
use crate::plugin::registry;
use crate::pri::{extract_pri, priority_fields};
use chrono::{DateTime, FixedOffset};

pub(crate) fn decode(
    input: &str,
    now: DateTime<FixedOffset>,
    cache: &mut ParseCache,
) -> Option<SyslogMessage> {
    let (pri, residual) = extract_pri(input).ok()?;
    let (facility, severity) = priority_fields(pri);

    let mut envelope = EventEnvelope::new(now);
    envelope.timestamp = Some(now);
    envelope.message = Some(residual.to_string());

    let mut event = SyslogMessage::new(Frame::Base, facility, severity, envelope);
    registry::run_plugins(&mut event, cache);
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 5, 9, 12, 30, 0)
            .unwrap()
    }

    #[test]
    fn decodes_priority_and_message() {
        let mut cache = ParseCache::default();
        let event = decode("<13>Simple test message", now(), &mut cache).unwrap();
        assert_eq!(event.frame, Frame::Base);
        assert_eq!(event.facility, 1);
        assert_eq!(event.severity, 5);
        assert_eq!(event.message(), Some("Simple test message"));
        assert_eq!(event.envelope.timestamp, Some(now()));
    }

    #[test]
    fn whitespace_after_bracket_is_skipped() {
        let mut cache = ParseCache::default();
        let event = decode("<13>   indented", now(), &mut cache).unwrap();
        assert_eq!(event.message(), Some("indented"));
    }

    #[test]
    fn malformed_framing_is_none() {
        let mut cache = ParseCache::default();
        assert!(decode("no priority here", now(), &mut cache).is_none());
        assert!(decode("< 13>x", now(), &mut cache).is_none());
    }

    #[test]
    fn empty_message_runs_no_plugins() {
        let mut cache = ParseCache::default();
        let event = decode("<13>", now(), &mut cache).unwrap();
        assert_eq!(event.message(), Some(""));
        assert!(event.envelope.handler_data.is_none());
    }
}
