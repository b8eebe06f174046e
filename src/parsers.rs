//! Field parsers shared by the framing decoders.
use nom::{
    bytes::complete::take_while1, character::complete::digit1, combinator::map_res, IResult,
};
use std::str::FromStr;

pub(crate) fn digits<T>(input: &str) -> IResult<&str, T>
where
    T: FromStr,
{
    map_res(digit1, FromStr::from_str)(input)
}

/// Parse a whitespace-delimited header field. The nil marker `-` yields an
/// empty value.
fn optional(input: &str) -> IResult<&str, Option<&str>> {
    let (remaining, value) = take_while1(|c: char| !c.is_whitespace())(input)?;

    if value == "-" {
        Ok((remaining, None))
    } else {
        Ok((remaining, Some(value)))
    }
}

/// Parse the host name or ip address.
pub(crate) fn hostname(input: &str) -> IResult<&str, Option<&str>> {
    optional(input)
}

/// Parse the app name
pub(crate) fn appname(input: &str) -> IResult<&str, Option<&str>> {
    optional(input)
}

/// Parse the Process Id
pub(crate) fn procid(input: &str) -> IResult<&str, Option<&str>> {
    optional(input)
}

/// Parse the Message Id
pub(crate) fn msgid(input: &str) -> IResult<&str, Option<&str>> {
    optional(input)
}
