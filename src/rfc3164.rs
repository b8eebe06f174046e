//! The RFC 3164 (BSD-style) framing decoder.
//!
//! After the priority the decoder probes for a timestamp in any of the
//! supported families; without one the line is left to the base decoder.
//! The remainder is then split as `[HOST ]{APP[PROCID]: }MESSAGE`.
use crate::event::EventEnvelope;
use crate::message::{Frame, SyslogMessage};
use crate::plugin::cache::ParseCache;
use crate::plugin::registry;
use crate::pri::{extract_pri, priority_fields};
use crate::procid::ProcId;
use crate::timestamp::parse_header_timestamp;
use chrono::{DateTime, FixedOffset};

/// Leading words that are far more likely to start a sentence than to name
/// a host. Only applied when no tag follows the candidate.
const COMMON_WORDS: [&str; 18] = [
    "this",
    "these",
    "that",
    "those",
    "the",
    "test",
    "testing",
    "invalid",
    "error",
    "warning",
    "trace",
    "debug",
    "info",
    "notice",
    "alert",
    "critical",
    "emergency",
    "panic",
];

// A hostname is alphanumerics with dots and hyphens, or a hex/IPv6-shaped
// run of at least six characters.
fn is_hostname_like(token: &str) -> bool {
    if token.len() >= 6
        && token
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == ':')
    {
        return true;
    }

    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

// The tag: an optional app name, an optional `[procid]`, then `: `. The
// colon may sit inside the token, in which case the longest app name that
// still leaves a `: ` separator wins.
fn parse_tag(input: &str) -> Option<(Option<&str>, Option<&str>, &str)> {
    let bytes = input.as_bytes();
    let mut token_end = 0;
    while token_end < bytes.len() && bytes[token_end] != b' ' && bytes[token_end] != b'[' {
        token_end += 1;
    }

    if token_end < bytes.len() && bytes[token_end] == b'[' {
        if let Some(close) = input[token_end..].find(']') {
            let close = token_end + close;
            if close > token_end + 1 && input[close + 1..].starts_with(": ") {
                let app = if token_end > 0 {
                    Some(&input[..token_end])
                } else {
                    None
                };
                let procid = &input[token_end + 1..close];
                return Some((app, Some(procid), &input[close + 3..]));
            }
        }
    }

    for colon in (0..token_end).rev() {
        if bytes[colon] == b':' && bytes.get(colon + 1) == Some(&b' ') {
            let app = if colon > 0 { Some(&input[..colon]) } else { None };
            return Some((app, None, &input[colon + 2..]));
        }
    }

    None
}

fn split_host_and_tag(input: &str) -> (Option<&str>, Option<&str>, Option<&str>, &str) {
    let (host, after_host) = match input.split_once(' ') {
        Some((token, after)) if is_hostname_like(token) => (Some(token), after),
        _ => (None, input),
    };

    if let Some((app, procid, message)) = parse_tag(after_host) {
        return (host, app, procid, message);
    }

    match host {
        Some(host)
            if COMMON_WORDS
                .iter()
                .any(|word| host.eq_ignore_ascii_case(word)) =>
        {
            (None, None, None, input)
        }
        Some(host) => (Some(host), None, None, after_host),
        None => (None, None, None, input),
    }
}

pub(crate) fn decode(
    input: &str,
    reference: DateTime<FixedOffset>,
    cache: &mut ParseCache,
) -> Option<SyslogMessage> {
    let (pri, residual) = extract_pri(input).ok()?;
    let (facility, severity) = priority_fields(pri);

    // Without a recognisable timestamp this is not an RFC 3164 header;
    // leave the line to the base decoder.
    let (timestamp, rest) = parse_header_timestamp(residual, reference)?;
    let (hostname, appname, procid, message) = split_host_and_tag(rest);

    let mut envelope = EventEnvelope::new(reference);
    envelope.timestamp = Some(timestamp);
    envelope.message = Some(message.to_string());

    let mut event = SyslogMessage::new(Frame::Rfc3164, facility, severity, envelope);
    event.hostname = hostname.map(|hostname| hostname.to_lowercase());
    event.appname = appname.map(str::to_string);
    event.procid = procid.map(ProcId::from);

    registry::run_plugins(&mut event, cache);
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 5, 13, 12, 0, 0)
            .unwrap()
    }

    fn ts(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: u32,
    ) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(year, month, day, hour, minute, second)
            .unwrap()
    }

    #[test]
    fn parse_timestamp_host_tag() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<13>May 12 23:20:50 myhost su: This is a BSD syslog message.",
            reference(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.frame, Frame::Rfc3164);
        assert_eq!(event.facility, 1);
        assert_eq!(event.severity, 5);
        assert_eq!(event.envelope.timestamp, Some(ts(2025, 5, 12, 23, 20, 50)));
        assert_eq!(event.hostname.as_deref(), Some("myhost"));
        assert_eq!(event.appname.as_deref(), Some("su"));
        assert_eq!(event.procid, None);
        assert_eq!(event.message(), Some("This is a BSD syslog message."));
    }

    #[test]
    fn parse_tag_with_pid() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<133>Jan 13 16:33:35 haproxy[73411]: Proxy sticky-servers started.",
            reference(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.hostname, None);
        assert_eq!(event.appname.as_deref(), Some("haproxy"));
        assert_eq!(event.procid, Some(ProcId::PID(73411)));
        assert_eq!(event.message(), Some("Proxy sticky-servers started."));
    }

    #[test]
    fn parse_host_and_tag_with_pid() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<34>Oct 11 22:14:15 mymachine app[323]: a message",
            reference(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.hostname.as_deref(), Some("mymachine"));
        assert_eq!(event.appname.as_deref(), Some("app"));
        assert_eq!(event.procid, Some(ProcId::PID(323)));
        assert_eq!(event.message(), Some("a message"));
    }

    #[test]
    fn hostname_is_lowercased() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<46>Jan  5 15:33:03 Plertrood-ThinkPad-X220 rsyslogd: start",
            reference(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.hostname.as_deref(), Some("plertrood-thinkpad-x220"));
        assert_eq!(event.envelope.timestamp, Some(ts(2025, 1, 5, 15, 33, 3)));
    }

    #[test]
    fn bare_tag_without_host() {
        let mut cache = ParseCache::default();
        let event = decode("<34>Oct 11 22:14:15 su: a message", reference(), &mut cache).unwrap();

        assert_eq!(event.hostname, None);
        assert_eq!(event.appname.as_deref(), Some("su"));
        assert_eq!(event.message(), Some("a message"));
    }

    #[test]
    fn lone_colon_separator() {
        let mut cache = ParseCache::default();
        let event = decode("<34>Oct 11 22:14:15 : a message", reference(), &mut cache).unwrap();

        assert_eq!(event.hostname, None);
        assert_eq!(event.appname, None);
        assert_eq!(event.message(), Some("a message"));
    }

    #[test]
    fn common_word_is_not_a_hostname() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<34>Oct 11 22:14:15 This is a test message",
            reference(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.hostname, None);
        assert_eq!(event.message(), Some("This is a test message"));
    }

    #[test]
    fn no_timestamp_defers_to_base() {
        let mut cache = ParseCache::default();
        assert!(decode("<13>Simple test message", reference(), &mut cache).is_none());
        assert!(decode("<13>su: no timestamp here", reference(), &mut cache).is_none());
    }

    #[test]
    fn iso_timestamp_is_accepted() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<34>2020-10-11T22:14:15.00Z mymachine app[323]: a message",
            reference(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.envelope.timestamp, Some(ts(2020, 10, 11, 22, 14, 15)));
        assert_eq!(event.appname.as_deref(), Some("app"));
    }

    #[test]
    fn ipv4_hostname() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<34>Oct 11 22:14:15 192.168.0.1 su: ping",
            reference(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.hostname.as_deref(), Some("192.168.0.1"));
    }

    #[test]
    fn host_without_tag_keeps_rest_as_message() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<34>Oct 11 22:14:15 web01 scheduled job finished",
            reference(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.hostname.as_deref(), Some("web01"));
        assert_eq!(event.message(), Some("scheduled job finished"));
    }
}
