use thiserror::Error;

/// Errors raised inside the decoding core.
///
/// Neither variant escapes the public surface: framing decoders convert
/// `MalformedFraming` into a `None` result, and payload parsers convert
/// `PayloadUnparsable` into a `None` mapping, which plugins treat as a
/// non-match.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The line does not carry a recognisable `<PRI>` prefix.
    #[error("malformed syslog framing")]
    MalformedFraming,

    /// A payload parser rejected the message body.
    #[error("payload could not be parsed")]
    PayloadUnparsable,
}
