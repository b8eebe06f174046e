//! Timestamp parsing for the many date shapes found in syslog headers.
//!
//! The RFC3164 decoder probes these families in order: ISO-8601, year-first
//! (`YYYY MMM DD hh:mm:ss`), year-last (`MMM DD hh:mm:ss YYYY`), BSD with an
//! optional year (`MMM DD [YYYY] hh:mm:ss`), and unix epoch values in
//! seconds, milliseconds, microseconds or nanoseconds.
use crate::parsers::digits;
use chrono::prelude::*;
use chrono::Duration;
use nom::{
    branch::alt,
    bytes::complete::{tag, take, take_until, take_while_m_n},
    character::complete::{char, digit1, one_of, space1},
    combinator::{map, map_opt, map_res, opt, verify},
    sequence::{preceded, terminated, tuple},
    IResult,
};

/// An incomplete date is a tuple of (month, date, hour, minutes, seconds).
pub type IncompleteDate = (u32, u32, u32, u32, u32);

/// The timestamp for 5424 messages: yyyy-mm-ddThh:mm:ss.mmmmZ
pub(crate) fn timestamp_3339(input: &str) -> IResult<&str, DateTime<FixedOffset>> {
    map_res(take_until(" "), chrono::DateTime::parse_from_rfc3339)(input)
}

/// The month as a three letter string. Returns the number.
fn parse_month(s: &str) -> Result<u32, String> {
    match s.to_lowercase().as_ref() {
        "jan" => Ok(1),
        "feb" => Ok(2),
        "mar" => Ok(3),
        "apr" => Ok(4),
        "may" => Ok(5),
        "jun" => Ok(6),
        "jul" => Ok(7),
        "aug" => Ok(8),
        "sep" => Ok(9),
        "oct" => Ok(10),
        "nov" => Ok(11),
        "dec" => Ok(12),
        _ => Err(format!("Invalid month {}", s)),
    }
}

fn month(input: &str) -> IResult<&str, u32> {
    map_res(take(3_usize), parse_month)(input)
}

/// Textual formats only accept four digit years in this millennium-ish
/// window; anything else is far more likely to be part of the message.
fn year(input: &str) -> IResult<&str, i32> {
    verify(digits, |y: &i32| (2000..3000).contains(y))(input)
}

/// hh:mm:ss
fn time_of_day(input: &str) -> IResult<&str, (u32, u32, u32)> {
    map(
        tuple((digits, tag(":"), digits, tag(":"), digits)),
        |(hour, _, minute, _, seconds)| (hour, minute, seconds),
    )(input)
}

/// Optional fractional seconds, normalized to microseconds.
fn fraction(input: &str) -> IResult<&str, u32> {
    map(opt(preceded(char('.'), digit1)), |frac: Option<&str>| {
        frac.map(fraction_to_micros).unwrap_or(0)
    })(input)
}

fn fraction_to_micros(frac: &str) -> u32 {
    let mut micros = 0;
    for c in frac.chars().take(6) {
        micros = micros * 10 + c.to_digit(10).unwrap_or(0);
    }
    micros * 10_u32.pow(6_u32.saturating_sub(frac.len().min(6) as u32))
}

fn build(
    year: i32,
    (month, day, hour, minute, seconds): IncompleteDate,
    micros: u32,
    tz: FixedOffset,
) -> Option<DateTime<FixedOffset>> {
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_micro_opt(hour, minute, seconds, micros)?
        .and_local_timezone(tz)
        .single()
}

/// Resolve the year of a year-less timestamp against the reference instant.
///
/// The timestamp is first taken to be in the reference year. If that lands
/// strictly after the reference it belongs to the previous year; likewise
/// when its month is ahead of the reference month and the two instants are
/// more than a day apart, which keeps messages arriving moments after
/// midnight on the first of a month in the right year.
fn resolve_incomplete(
    reference: DateTime<FixedOffset>,
    incomplete: IncompleteDate,
    micros: u32,
) -> Option<DateTime<FixedOffset>> {
    let tz = *reference.offset();
    match build(reference.year(), incomplete, micros, tz) {
        Some(candidate) => {
            let last_year = candidate > reference
                || (incomplete.0 > reference.month()
                    && reference - candidate > Duration::hours(24));
            if last_year {
                build(reference.year() - 1, incomplete, micros, tz)
            } else {
                Some(candidate)
            }
        }
        // A date such as Feb 29 that does not exist in the reference year.
        None => build(reference.year() - 1, incomplete, micros, tz),
    }
}

/// YYYY MMM DD hh:mm:ss[.ffffff]
fn timestamp_year_first(
    reference: DateTime<FixedOffset>,
) -> impl Fn(&str) -> IResult<&str, DateTime<FixedOffset>> {
    move |input| {
        map_opt(
            tuple((year, space1, month, space1, digits, space1, time_of_day, fraction)),
            |(year, _, month, _, day, _, (h, m, s), micros)| {
                build(year, (month, day, h, m, s), micros, *reference.offset())
            },
        )(input)
    }
}

/// MMM DD hh:mm:ss[.ffffff] YYYY
fn timestamp_year_last(
    reference: DateTime<FixedOffset>,
) -> impl Fn(&str) -> IResult<&str, DateTime<FixedOffset>> {
    move |input| {
        map_opt(
            tuple((month, space1, digits, space1, time_of_day, fraction, space1, year)),
            |(month, _, day, _, (h, m, s), micros, _, year)| {
                build(year, (month, day, h, m, s), micros, *reference.offset())
            },
        )(input)
    }
}

/// MMM DD [YYYY] hh:mm:ss[.ffffff] - the BSD shape, year optional.
fn timestamp_bsd(
    reference: DateTime<FixedOffset>,
) -> impl Fn(&str) -> IResult<&str, DateTime<FixedOffset>> {
    move |input| {
        map_opt(
            tuple((
                month,
                space1,
                digits,
                opt(preceded(space1, year)),
                space1,
                time_of_day,
                fraction,
            )),
            |(month, _, day, year, _, (h, m, s), micros)| match year {
                Some(year) => build(year, (month, day, h, m, s), micros, *reference.offset()),
                None => resolve_incomplete(reference, (month, day, h, m, s), micros),
            },
        )(input)
    }
}

fn epoch_to_datetime(mut secs: i64, mut micros: u32) -> Option<DateTime<FixedOffset>> {
    if micros >= 1_000_000 {
        secs += 1;
        micros -= 1_000_000;
    }
    DateTime::from_timestamp(secs, micros * 1000).map(|dt| dt.fixed_offset())
}

/// Unix epoch timestamps: 10 digits are seconds, 13 milliseconds, 16
/// microseconds and 19 nanoseconds, with an optional fractional part after
/// `.` or `,`. Nanosecond precision rounds half-up to microseconds.
fn timestamp_epoch(input: &str) -> IResult<&str, DateTime<FixedOffset>> {
    map_opt(
        tuple((
            take_while_m_n(10, 19, |c: char| c.is_ascii_digit()),
            opt(preceded(one_of(".,"), digit1)),
        )),
        |(epoch, frac): (&str, Option<&str>)| {
            let secs: i64 = epoch.get(0..10)?.parse().ok()?;
            match (frac, epoch.len()) {
                (Some(frac), len) if len >= 13 => {
                    // Milliseconds with a fractional part: the fraction is
                    // fractional milliseconds, i.e. microseconds.
                    let millis: u32 = epoch.get(10..13)?.parse().ok()?;
                    let extra = fraction_to_micros(frac) / 1000;
                    epoch_to_datetime(secs, millis * 1000 + extra)
                }
                (Some(frac), _) => {
                    let whole: i64 = epoch.parse().ok()?;
                    epoch_to_datetime(whole, fraction_to_micros(frac))
                }
                (None, len) if len >= 19 => {
                    let mut micros: u32 = epoch.get(10..16)?.parse().ok()?;
                    let nanos: u32 = epoch.get(16..19)?.parse().ok()?;
                    if nanos >= 500 {
                        micros += 1;
                    }
                    epoch_to_datetime(secs, micros)
                }
                (None, len) if len >= 16 => {
                    let micros: u32 = epoch.get(10..16)?.parse().ok()?;
                    epoch_to_datetime(secs, micros)
                }
                (None, len) if len >= 13 => {
                    let millis: u32 = epoch.get(10..13)?.parse().ok()?;
                    epoch_to_datetime(secs, millis * 1000)
                }
                (None, _) => {
                    let whole: i64 = epoch.parse().ok()?;
                    epoch_to_datetime(whole, 0)
                }
            }
        },
    )(input)
}

/// Probe a message header for a timestamp in any supported family.
///
/// On success returns the instant and the remainder after the separating
/// space. A line that matches no family returns `None` and the caller's
/// input stays untouched.
pub(crate) fn parse_header_timestamp(
    input: &str,
    reference: DateTime<FixedOffset>,
) -> Option<(DateTime<FixedOffset>, &str)> {
    let result: IResult<&str, DateTime<FixedOffset>> = alt((
        terminated(timestamp_3339, space1),
        terminated(timestamp_year_first(reference), space1),
        terminated(timestamp_year_last(reference), space1),
        terminated(timestamp_bsd(reference), space1),
        terminated(timestamp_epoch, space1),
    ))(input);

    result.ok().map(|(remaining, timestamp)| (timestamp, remaining))
}
