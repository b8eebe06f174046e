//! RFC 5424 structured data: `[id name="value" ...][id2 ...]` or `-`.
use indexmap::IndexMap;
use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::{char, space1},
    combinator::map,
    error::{make_error, ErrorKind},
    multi::{many0, many1},
    sequence::{delimited, pair, preceded, separated_pair},
    Err, IResult,
};

pub(crate) type StructuredData = IndexMap<String, IndexMap<String, String>>;

// Parse a param value: a string delimited by '"'. A backslash escapes '"',
// '\' and ']'; any other escape is kept verbatim.
fn param_value(input: &str) -> IResult<&str, String> {
    let mut value = String::new();
    let mut chars = input.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => return Ok((&input[i..], value)),
            '\\' => match chars.next() {
                Some((_, escaped @ ('"' | '\\' | ']'))) => value.push(escaped),
                Some((_, other)) => {
                    value.push('\\');
                    value.push(other);
                }
                None => break,
            },
            _ => value.push(c),
        }
    }

    Err(Err::Error(make_error(input, ErrorKind::Fail)))
}

// Parse a param name="value"
fn param(input: &str) -> IResult<&str, (&str, String)> {
    separated_pair(
        take_till1(|c: char| c.is_whitespace() || c == '=' || c == ']'),
        tag("="),
        delimited(char('"'), param_value, char('"')),
    )(input)
}

// A single structured data element:
// [exampleSDID@32473 iut="3" eventSource="Application" eventID="1011"]
fn element(input: &str) -> IResult<&str, (String, IndexMap<String, String>)> {
    map(
        delimited(
            char('['),
            pair(
                take_till1(|c: char| c.is_whitespace() || c == '=' || c == ']'),
                many0(preceded(space1, param)),
            ),
            char(']'),
        ),
        |(id, params)| {
            (
                id.to_string(),
                params
                    .into_iter()
                    .map(|(name, value)| (name.to_string(), value))
                    .collect(),
            )
        },
    )(input)
}

/// Parse the structured data section. The nil marker `-` yields `None`.
pub(crate) fn structured_data(input: &str) -> IResult<&str, Option<StructuredData>> {
    alt((
        map(tag("-"), |_| None),
        map(many1(element), |elements| {
            Some(elements.into_iter().collect())
        }),
    ))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_param_value() {
        assert_eq!(
            delimited(char('"'), param_value, char('"'))("\"Some \\\"lovely\\\" string\"")
                .unwrap()
                .1,
            "Some \"lovely\" string".to_string()
        );
    }

    #[test]
    fn parse_element() {
        let (rest, (id, params)) =
            element("[exampleSDID@32473 iut=\"3\" eventSource=\"Application\" eventID=\"1011\"]")
                .unwrap();
        assert_eq!(rest, "");
        assert_eq!(id, "exampleSDID@32473");
        assert_eq!(params.get("iut").map(String::as_str), Some("3"));
        assert_eq!(
            params.get("eventSource").map(String::as_str),
            Some("Application")
        );
        assert_eq!(params.get("eventID").map(String::as_str), Some("1011"));
    }

    #[test]
    fn parse_element_without_params() {
        let (rest, (id, params)) = element("[origin]").unwrap();
        assert_eq!(rest, "");
        assert_eq!(id, "origin");
        assert!(params.is_empty());
    }

    #[test]
    fn parse_multiple_elements() {
        let (rest, sd) = structured_data("[a x=\"1\"][b y=\"2\"] msg").unwrap();
        let sd = sd.unwrap();
        assert_eq!(rest, " msg");
        assert_eq!(sd.len(), 2);
        assert_eq!(sd["a"]["x"], "1");
        assert_eq!(sd["b"]["y"], "2");
    }

    #[test]
    fn nil_structured_data() {
        assert_eq!(structured_data("- msg").unwrap(), (" msg", None));
    }

    #[test]
    fn unknown_escapes_are_kept() {
        let (_, (_, params)) = element("[id k=\"a\\nb\"]").unwrap();
        assert_eq!(params["k"], "a\\nb");
    }
}
