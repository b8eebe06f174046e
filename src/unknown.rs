//! The unknown dispatcher: try each framing in turn, never fail.
use crate::event::EventEnvelope;
use crate::message::Event;
use crate::plugin::cache::ParseCache;
use crate::{rfc3164, rfc5424, rfc_base};
use chrono::{DateTime, FixedOffset};

/// Decode a line of unknown framing against a pinned reference instant.
///
/// The decoders run in fixed order - RFC 5424, RFC 3164, base - sharing one
/// parse cache; the first non-`None` result wins. When all three pass, the
/// line comes back as a plain envelope whose message is the input and whose
/// timestamp is the reference instant.
pub(crate) fn decode_unknown_at(input: &str, now: DateTime<FixedOffset>) -> Event {
    let mut cache = ParseCache::default();

    if let Some(event) = rfc5424::decode(input, now, &mut cache) {
        tracing::trace!("decoded as rfc5424");
        return Event::Syslog(event);
    }
    if let Some(event) = rfc3164::decode(input, now, &mut cache) {
        tracing::trace!("decoded as rfc3164");
        return Event::Syslog(event);
    }
    if let Some(event) = rfc_base::decode(input, now, &mut cache) {
        tracing::trace!("decoded as syslog base");
        return Event::Syslog(event);
    }

    tracing::debug!("no framing matched, returning bare envelope");
    let mut envelope = EventEnvelope::new(now);
    envelope.timestamp = Some(now);
    envelope.message = Some(input.to_string());
    Event::Envelope(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Frame;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 5, 13, 12, 0, 0)
            .unwrap()
    }

    #[test]
    fn rfc5424_wins_first() {
        let event = decode_unknown_at("<34>1 2025-05-09T12:30:00Z host app - - - hi", now());
        assert_eq!(event.syslog().unwrap().frame, Frame::Rfc5424);
    }

    #[test]
    fn rfc3164_wins_second() {
        let event = decode_unknown_at("<13>May 12 23:20:50 myhost su: hello", now());
        assert_eq!(event.syslog().unwrap().frame, Frame::Rfc3164);
    }

    #[test]
    fn base_wins_third() {
        let event = decode_unknown_at("<13>Simple test message", now());
        assert_eq!(event.syslog().unwrap().frame, Frame::Base);
    }

    #[test]
    fn everything_else_is_an_envelope() {
        let event = decode_unknown_at("Completely unknown message format.", now());
        let envelope = event.envelope();
        assert_eq!(event.syslog(), None);
        assert_eq!(
            envelope.message.as_deref(),
            Some("Completely unknown message format.")
        );
        assert_eq!(envelope.timestamp, Some(now()));
        assert_eq!(envelope.courier_timestamp(), now());
    }
}
