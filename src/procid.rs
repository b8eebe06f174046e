use serde::Serialize;
use std::fmt;

/// The process id field of a syslog header. Frequently a pid, but loose
/// senders put names in here too.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
#[allow(clippy::upper_case_acronyms)]
pub enum ProcId {
    PID(i32),
    Name(String),
}

impl fmt::Display for ProcId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcId::PID(pid) => write!(f, "{}", pid),
            ProcId::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<&str> for ProcId {
    fn from(s: &str) -> ProcId {
        match s.parse() {
            Ok(pid) => ProcId::PID(pid),
            Err(_) => ProcId::Name(s.to_string()),
        }
    }
}
