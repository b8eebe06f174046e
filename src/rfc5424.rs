//! The RFC 5424 framing decoder.
//!
//! The residual after the priority must match the fixed grammar
//! `1 TIMESTAMP HOST APP PROCID MSGID SD MSG`; the nil marker `-` empties a
//! field and a nil timestamp means "now". Anything that does not match is
//! left to the other decoders.
use crate::event::EventEnvelope;
use crate::message::{Frame, SyslogMessage};
use crate::parsers::{appname, digits, hostname, msgid, procid};
use crate::plugin::cache::ParseCache;
use crate::plugin::registry;
use crate::pri::{extract_pri, priority_fields};
use crate::procid::ProcId;
use crate::structured_data::{structured_data, StructuredData};
use crate::timestamp::timestamp_3339;
use chrono::{DateTime, FixedOffset};
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{space0, space1},
    combinator::{map, rest, verify},
    sequence::tuple,
    IResult,
};

type Header<'a> = (
    DateTime<FixedOffset>,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
    Option<&'a str>,
    Option<StructuredData>,
    &'a str,
);

/// Parse the version number. Only version 1 exists on the wire.
fn version(input: &str) -> IResult<&str, u32> {
    verify(digits, |version: &u32| *version == 1)(input)
}

fn header(now: DateTime<FixedOffset>) -> impl Fn(&str) -> IResult<&str, Header<'_>> {
    move |input| {
        map(
            tuple((
                version,
                space1,
                alt((map(tag("-"), move |_| now), timestamp_3339)),
                space1,
                hostname,
                space1,
                appname,
                space1,
                procid,
                space1,
                msgid,
                space0,
                structured_data,
                space0,
                rest,
            )),
            |(_, _, timestamp, _, hostname, _, appname, _, procid, _, msgid, _, sd, _, msg)| {
                (timestamp, hostname, appname, procid, msgid, sd, msg)
            },
        )(input)
    }
}

pub(crate) fn decode(
    input: &str,
    now: DateTime<FixedOffset>,
    cache: &mut ParseCache,
) -> Option<SyslogMessage> {
    let (pri, residual) = extract_pri(input).ok()?;
    let (facility, severity) = priority_fields(pri);

    let (_, (timestamp, host, app, proc, msg_id, sd, msg)) = header(now)(residual).ok()?;

    let mut envelope = EventEnvelope::new(now);
    envelope.timestamp = Some(timestamp);
    envelope.message = Some(msg.to_string());

    let mut event = SyslogMessage::new(Frame::Rfc5424, facility, severity, envelope);
    event.hostname = host.map(|host| host.to_lowercase());
    event.appname = app.map(str::to_string);
    event.procid = proc.map(ProcId::from);
    event.msgid = msg_id.map(str::to_string);
    event.structured_data = sd;

    registry::run_plugins(&mut event, cache);
    Some(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 5, 9, 12, 30, 0)
            .unwrap()
    }

    #[test]
    fn parse_full_header() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<34>1 2003-10-11T22:14:15.003Z mymachine.example.com su - ID47 - message",
            now(),
            &mut cache,
        )
        .unwrap();

        assert_eq!(event.frame, Frame::Rfc5424);
        assert_eq!(event.facility, 4);
        assert_eq!(event.severity, 2);
        assert_eq!(
            event.envelope.timestamp,
            Some(
                FixedOffset::east_opt(0)
                    .unwrap()
                    .with_ymd_and_hms(2003, 10, 11, 22, 14, 15)
                    .unwrap()
                    + Duration::milliseconds(3)
            )
        );
        assert_eq!(event.hostname.as_deref(), Some("mymachine.example.com"));
        assert_eq!(event.appname.as_deref(), Some("su"));
        assert_eq!(event.procid, None);
        assert_eq!(event.msgid.as_deref(), Some("ID47"));
        assert_eq!(event.structured_data, None);
        assert_eq!(event.message(), Some("message"));
    }

    #[test]
    fn parse_structured_data_section() {
        let mut cache = ParseCache::default();
        let event = decode(
            "<165>1 2003-10-11T22:14:15.003Z host evntslog - ID47 [exampleSDID@32473 iut=\"3\" eventSource=\"Application\"] an event",
            now(),
            &mut cache,
        )
        .unwrap();

        let sd = event.structured_data.as_ref().unwrap();
        assert_eq!(sd["exampleSDID@32473"]["iut"], "3");
        assert_eq!(sd["exampleSDID@32473"]["eventSource"], "Application");
        assert_eq!(event.message(), Some("an event"));
    }

    #[test]
    fn nil_timestamp_takes_now() {
        let mut cache = ParseCache::default();
        let event = decode("<34>1 - host app 1234 - - late message", now(), &mut cache).unwrap();
        assert_eq!(event.envelope.timestamp, Some(now()));
        assert_eq!(event.procid, Some(ProcId::PID(1234)));
    }

    #[test]
    fn hostname_is_lowercased() {
        let mut cache = ParseCache::default();
        let event = decode("<34>1 - WEB01.Example.COM app - - - x", now(), &mut cache).unwrap();
        assert_eq!(event.hostname.as_deref(), Some("web01.example.com"));
    }

    #[test]
    fn non_matching_residual_is_none() {
        let mut cache = ParseCache::default();
        assert!(decode("<34>May 12 23:20:50 host su: msg", now(), &mut cache).is_none());
        assert!(decode("<34>2 2003-10-11T22:14:15Z h a - - - m", now(), &mut cache).is_none());
        assert!(decode("<34>1 2003-10-11T22:14:15Z h a - -", now(), &mut cache).is_none());
    }
}
