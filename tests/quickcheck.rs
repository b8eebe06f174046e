use chrono::prelude::*;
use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use syslog_courier::{compose_pri, decode_unknown_at, decompose_pri};

fn reference() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(0)
        .unwrap()
        .with_ymd_and_hms(2025, 5, 13, 12, 0, 0)
        .unwrap()
}

/// Decoding is total: any input yields exactly one record, stamped with
/// the reference instant.
#[quickcheck]
fn decode_never_fails(line: String) -> bool {
    let event = decode_unknown_at(&line, reference());
    event.envelope().courier_timestamp() == reference()
}

/// Valid priorities decompose as `facility = pri >> 3`, `severity = pri & 7`
/// and recompose byte-exactly.
#[quickcheck]
fn valid_priority_round_trips(pri: u8) -> TestResult {
    if pri > 191 {
        return TestResult::discard();
    }

    let line = format!("<{}>probe", pri);
    let event = decode_unknown_at(&line, reference());
    let record = match event.syslog() {
        Some(record) => record,
        None => return TestResult::failed(),
    };

    TestResult::from_bool(
        record.facility == pri >> 3 && record.severity == pri & 0x7 && record.priority() == pri,
    )
}

/// Out-of-range priorities clamp to the audit facility but keep the
/// severity bits.
#[quickcheck]
fn out_of_range_priority_clamps(pri: u16) -> TestResult {
    if pri <= 191 {
        return TestResult::discard();
    }

    let line = format!("<{}>probe", pri);
    let event = decode_unknown_at(&line, reference());
    let record = match event.syslog() {
        Some(record) => record,
        None => return TestResult::failed(),
    };

    TestResult::from_bool(record.facility == 13 && record.severity == (pri & 0x7) as u8)
}

/// The typed facility/severity views recompose the exact wire priority.
#[quickcheck]
fn pri_decomposition_recomposes(pri: u8) -> TestResult {
    if pri > 191 {
        return TestResult::discard();
    }

    match decompose_pri(pri) {
        (Some(facility), Some(severity)) => {
            TestResult::from_bool(compose_pri(facility, severity) == pri as i32)
        }
        _ => TestResult::failed(),
    }
}

/// The residual payload survives base-framed decoding byte for byte.
#[quickcheck]
fn base_decoding_preserves_the_payload(payload: String) -> TestResult {
    if payload.starts_with(char::is_whitespace) || payload.contains(['\r', '\n']) {
        return TestResult::discard();
    }

    let line = format!("<13>{}", payload);
    let event = decode_unknown_at(&line, reference());
    TestResult::from_bool(event.envelope().message.as_deref() == Some(payload.as_str()))
}
