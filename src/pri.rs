//! The `<PRI>` prefix: extraction, decomposition and the default-priority
//! rule for invalid values.
use crate::error::DecodeError;

// Facility and severity tables originally taken from
// https://github.com/Roguelazer/rust-syslog-rfc5424 - many thanks.

#[derive(Copy, Clone, Debug, PartialEq, Eq, Ord, PartialOrd)]
#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
/// Syslog facilities. Taken from RFC 5424, but I've heard that some platforms
/// mix these around. Names are from Linux.
pub enum SyslogFacility {
    LOG_KERN = 0,
    LOG_USER = 1,
    LOG_MAIL = 2,
    LOG_DAEMON = 3,
    LOG_AUTH = 4,
    LOG_SYSLOG = 5,
    LOG_LPR = 6,
    LOG_NEWS = 7,
    LOG_UUCP = 8,
    LOG_CRON = 9,
    LOG_AUTHPRIV = 10,
    LOG_FTP = 11,
    LOG_NTP = 12,
    LOG_AUDIT = 13,
    LOG_ALERT = 14,
    LOG_CLOCKD = 15,
    LOG_LOCAL0 = 16,
    LOG_LOCAL1 = 17,
    LOG_LOCAL2 = 18,
    LOG_LOCAL3 = 19,
    LOG_LOCAL4 = 20,
    LOG_LOCAL5 = 21,
    LOG_LOCAL6 = 22,
    LOG_LOCAL7 = 23,
}

impl SyslogFacility {
    /// Convert an int (as used in the wire serialization) into a `SyslogFacility`
    pub(crate) fn from_int(i: i32) -> Option<Self> {
        match i {
            0 => Some(SyslogFacility::LOG_KERN),
            1 => Some(SyslogFacility::LOG_USER),
            2 => Some(SyslogFacility::LOG_MAIL),
            3 => Some(SyslogFacility::LOG_DAEMON),
            4 => Some(SyslogFacility::LOG_AUTH),
            5 => Some(SyslogFacility::LOG_SYSLOG),
            6 => Some(SyslogFacility::LOG_LPR),
            7 => Some(SyslogFacility::LOG_NEWS),
            8 => Some(SyslogFacility::LOG_UUCP),
            9 => Some(SyslogFacility::LOG_CRON),
            10 => Some(SyslogFacility::LOG_AUTHPRIV),
            11 => Some(SyslogFacility::LOG_FTP),
            12 => Some(SyslogFacility::LOG_NTP),
            13 => Some(SyslogFacility::LOG_AUDIT),
            14 => Some(SyslogFacility::LOG_ALERT),
            15 => Some(SyslogFacility::LOG_CLOCKD),
            16 => Some(SyslogFacility::LOG_LOCAL0),
            17 => Some(SyslogFacility::LOG_LOCAL1),
            18 => Some(SyslogFacility::LOG_LOCAL2),
            19 => Some(SyslogFacility::LOG_LOCAL3),
            20 => Some(SyslogFacility::LOG_LOCAL4),
            21 => Some(SyslogFacility::LOG_LOCAL5),
            22 => Some(SyslogFacility::LOG_LOCAL6),
            23 => Some(SyslogFacility::LOG_LOCAL7),
            _ => None,
        }
    }

    /// Convert a syslog facility into a unique string representation
    pub fn as_str(self) -> &'static str {
        match self {
            SyslogFacility::LOG_KERN => "kern",
            SyslogFacility::LOG_USER => "user",
            SyslogFacility::LOG_MAIL => "mail",
            SyslogFacility::LOG_DAEMON => "daemon",
            SyslogFacility::LOG_AUTH => "auth",
            SyslogFacility::LOG_SYSLOG => "syslog",
            SyslogFacility::LOG_LPR => "lpr",
            SyslogFacility::LOG_NEWS => "news",
            SyslogFacility::LOG_UUCP => "uucp",
            SyslogFacility::LOG_CRON => "cron",
            SyslogFacility::LOG_AUTHPRIV => "authpriv",
            SyslogFacility::LOG_FTP => "ftp",
            SyslogFacility::LOG_NTP => "ntp",
            SyslogFacility::LOG_AUDIT => "audit",
            SyslogFacility::LOG_ALERT => "alert",
            SyslogFacility::LOG_CLOCKD => "clockd",
            SyslogFacility::LOG_LOCAL0 => "local0",
            SyslogFacility::LOG_LOCAL1 => "local1",
            SyslogFacility::LOG_LOCAL2 => "local2",
            SyslogFacility::LOG_LOCAL3 => "local3",
            SyslogFacility::LOG_LOCAL4 => "local4",
            SyslogFacility::LOG_LOCAL5 => "local5",
            SyslogFacility::LOG_LOCAL6 => "local6",
            SyslogFacility::LOG_LOCAL7 => "local7",
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[allow(non_camel_case_types)]
#[allow(clippy::upper_case_acronyms)]
/// Syslog Severities from RFC 5424.
pub enum SyslogSeverity {
    SEV_EMERG = 0,
    SEV_ALERT = 1,
    SEV_CRIT = 2,
    SEV_ERR = 3,
    SEV_WARNING = 4,
    SEV_NOTICE = 5,
    SEV_INFO = 6,
    SEV_DEBUG = 7,
}

impl SyslogSeverity {
    /// Convert an int (as used in the wire serialization) into a `SyslogSeverity`
    pub(crate) fn from_int(i: i32) -> Option<Self> {
        match i {
            0 => Some(SyslogSeverity::SEV_EMERG),
            1 => Some(SyslogSeverity::SEV_ALERT),
            2 => Some(SyslogSeverity::SEV_CRIT),
            3 => Some(SyslogSeverity::SEV_ERR),
            4 => Some(SyslogSeverity::SEV_WARNING),
            5 => Some(SyslogSeverity::SEV_NOTICE),
            6 => Some(SyslogSeverity::SEV_INFO),
            7 => Some(SyslogSeverity::SEV_DEBUG),
            _ => None,
        }
    }

    /// Convert a syslog severity into a unique string representation
    pub fn as_str(self) -> &'static str {
        match self {
            SyslogSeverity::SEV_EMERG => "emerg",
            SyslogSeverity::SEV_ALERT => "alert",
            SyslogSeverity::SEV_CRIT => "crit",
            SyslogSeverity::SEV_ERR => "err",
            SyslogSeverity::SEV_WARNING => "warning",
            SyslogSeverity::SEV_NOTICE => "notice",
            SyslogSeverity::SEV_INFO => "info",
            SyslogSeverity::SEV_DEBUG => "debug",
        }
    }
}

/// Default facility when the priority cannot be trusted: 13, log audit.
pub(crate) const DEFAULT_FACILITY: u8 = SyslogFacility::LOG_AUDIT as u8;

/// Default severity when the priority cannot be parsed at all: 7, debug.
pub(crate) const DEFAULT_SEVERITY: u8 = SyslogSeverity::SEV_DEBUG as u8;

/// The pri field is composed of both the facility and severity values.
/// The bottom three bits are the severity, the remaining bits the facility.
pub fn decompose_pri(pri: u8) -> (Option<SyslogFacility>, Option<SyslogSeverity>) {
    let facility = pri >> 3;
    let severity = pri & 0x7;

    (
        SyslogFacility::from_int(facility as i32),
        SyslogSeverity::from_int(severity as i32),
    )
}

/// Compose the facility and severity as a single integer.
pub fn compose_pri(facility: SyslogFacility, severity: SyslogSeverity) -> i32 {
    ((facility as i32) << 3) + (severity as i32)
}

/// Split the `<PRI>` prefix from the rest of the line.
///
/// Returns the raw priority digits (`None` for an empty `<>`) and the
/// residual with any whitespace directly after the closing bracket skipped.
/// Rejects lines shorter than three characters, lines that do not open with
/// `<`, lines without a closing `>`, and whitespace between the brackets.
pub(crate) fn extract_pri(input: &str) -> Result<(Option<&str>, &str), DecodeError> {
    if input.len() < 3 || !input.starts_with('<') {
        return Err(DecodeError::MalformedFraming);
    }

    let close = input.find('>').ok_or(DecodeError::MalformedFraming)?;
    let pri = &input[1..close];
    if pri.chars().any(char::is_whitespace) {
        return Err(DecodeError::MalformedFraming);
    }

    let residual = input[close + 1..].trim_start();
    let pri = if pri.is_empty() { None } else { Some(pri) };

    Ok((pri, residual))
}

/// Turn the raw priority digits into `(facility, severity)`.
///
/// Valid priorities (0-191) decompose as `facility = pri >> 3`,
/// `severity = pri & 7`. Anything else falls back to facility 13 (log
/// audit); the severity keeps `value & 7` where a numeric value exists and
/// becomes 7 (debug) where nothing could be parsed. Priorities with leading
/// zeros of two or more digits are treated as invalid.
pub(crate) fn priority_fields(pri: Option<&str>) -> (u8, u8) {
    let raw = match pri {
        Some(raw) => raw,
        None => return (DEFAULT_FACILITY, DEFAULT_SEVERITY),
    };

    let value = match raw.parse::<i128>() {
        Ok(value) => value,
        Err(_) => return (DEFAULT_FACILITY, DEFAULT_SEVERITY),
    };

    if value < 0 {
        return (DEFAULT_FACILITY, DEFAULT_SEVERITY);
    }

    let severity = (value & 0x7) as u8;
    if raw.len() > 1 && raw.starts_with('0') {
        return (DEFAULT_FACILITY, severity);
    }

    let facility = value >> 3;
    if facility > 23 {
        return (DEFAULT_FACILITY, severity);
    }

    (facility as u8, severity)
}

#[test]
fn test_pri_composes() {
    assert_eq!(
        compose_pri(SyslogFacility::LOG_LOCAL4, SyslogSeverity::SEV_NOTICE),
        165
    );
}

#[test]
fn test_pri_decomposes() {
    assert_eq!(
        decompose_pri(0),
        (
            Some(SyslogFacility::LOG_KERN),
            Some(SyslogSeverity::SEV_EMERG)
        )
    );

    assert_eq!(
        decompose_pri(165),
        (
            Some(SyslogFacility::LOG_LOCAL4),
            Some(SyslogSeverity::SEV_NOTICE)
        )
    );
}
