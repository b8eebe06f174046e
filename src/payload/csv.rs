//! Quoted CSV lines, the shape Palo Alto NGFW logs arrive in.
use nom::{
    branch::alt,
    bytes::complete::take_while,
    character::complete::char,
    combinator::{all_consuming, map},
    error::{make_error, ErrorKind},
    multi::separated_list1,
    sequence::{delimited, preceded},
    Err, IResult,
};

// The body of a quoted field. A doubled quote is a literal quote; the
// closing quote is left for the caller.
fn quoted_body(input: &str) -> IResult<&str, String> {
    let mut out = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != '"' {
            out.push(c);
            continue;
        }
        if let Some((_, '"')) = chars.peek() {
            out.push('"');
            chars.next();
        } else {
            return Ok((&input[i..], out));
        }
    }

    Err(Err::Error(make_error(input, ErrorKind::Fail)))
}

fn quoted_field(input: &str) -> IResult<&str, String> {
    delimited(char('"'), quoted_body, char('"'))(input)
}

fn bare_field(input: &str) -> IResult<&str, String> {
    map(take_while(|c| c != ','), str::to_string)(input)
}

// Whitespace straight after a delimiter is skipped; inside quotes it is
// preserved.
fn field(input: &str) -> IResult<&str, String> {
    preceded(
        take_while(|c| c == ' '),
        alt((quoted_field, bare_field)),
    )(input)
}

/// Parse one quoted-CSV record into its fields. Returns `None` for an
/// empty message or structurally broken quoting.
pub fn parse_quoted_csv(message: &str) -> Option<Vec<String>> {
    if message.is_empty() {
        return None;
    }

    let result: IResult<&str, Vec<String>> =
        all_consuming(separated_list1(char(','), field))(message);

    match result {
        Ok((_, fields)) if !fields.is_empty() => Some(fields),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_fields() {
        assert_eq!(
            parse_quoted_csv("a,b,c"),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn quoted_field_with_comma() {
        assert_eq!(
            parse_quoted_csv("field1,\"field 2, with comma\",field3"),
            Some(vec![
                "field1".to_string(),
                "field 2, with comma".to_string(),
                "field3".to_string()
            ])
        );
    }

    #[test]
    fn doubled_quotes_become_literal() {
        assert_eq!(
            parse_quoted_csv("\"say \"\"hi\"\"\",x"),
            Some(vec!["say \"hi\"".to_string(), "x".to_string()])
        );
    }

    #[test]
    fn leading_whitespace_skipped_outside_quotes() {
        assert_eq!(
            parse_quoted_csv("a,  b,\" c\""),
            Some(vec!["a".to_string(), "b".to_string(), " c".to_string()])
        );
    }

    #[test]
    fn empty_fields_are_kept() {
        assert_eq!(
            parse_quoted_csv("a,,b,"),
            Some(vec![
                "a".to_string(),
                String::new(),
                "b".to_string(),
                String::new()
            ])
        );
    }

    #[test]
    fn broken_quoting_is_rejected() {
        assert_eq!(parse_quoted_csv("\"unterminated,x"), None);
        assert_eq!(parse_quoted_csv("\"a\"b,c"), None);
    }

    #[test]
    fn empty_message_is_rejected() {
        assert_eq!(parse_quoted_csv(""), None);
    }
}
