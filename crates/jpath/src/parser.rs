//! A `nom`-based compiler from path text to a [`CompiledPath`].
//!
//! Accepted forms, all of which may be mixed in one path:
//!
//! - `$` root marker (optional, produces no selector)
//! - `name`, `.name`, `['name']`, `["name"]` member access
//! - `[N]`, `.N`, `.[N]` index access
//! - `*`, `.*`, `[*]` wildcard
//! - `..name`, `..N`, `..*`, `..[...]` recursive descent
//!
//! Dotted digit strings are compiled to [`Selector::Index`], which also
//! matches an object member named by the same digits at evaluation time. That
//! is how `10.errors.113.description` and `[10].errors.[113].description`
//! reach the same node.
use super::ast::{CompiledPath, Selector, is_name_char};
use crate::error::JPathError;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0},
    combinator::{eof, map, map_res, peek, value},
    error::{Error, ErrorKind},
    sequence::{delimited, preceded, terminated},
};
use std::num::ParseIntError;

// --- Main Public Parser ---

/// Compiles a path expression into a reusable plan.
pub fn compile(path: &str) -> Result<CompiledPath, JPathError> {
    let leading_ws = path.len() - path.trim_start().len();
    let input = path.trim();
    if input.is_empty() {
        return Err(JPathError::syntax(path, 0, "path is empty"));
    }
    let offset_of = |rest: &str| leading_ws + input.len() - rest.len();

    let (mut rest, has_root) = match root(input) {
        Ok((rest, _)) => (rest, true),
        Err(_) => (input, false),
    };

    let mut selectors = Vec::new();
    let mut first = !has_root;
    while !rest.is_empty() {
        let parsed = if first {
            leading_segment(rest)
        } else {
            segment(rest)
        };
        match parsed {
            Ok((next, seg)) => {
                seg.push_into(&mut selectors);
                rest = next;
            }
            Err(_) => return Err(JPathError::syntax(path, offset_of(rest), diagnose(rest, first))),
        }
        first = false;
    }

    log::trace!("Compiled '{}' into {} selector(s)", path, selectors.len());
    Ok(CompiledPath::new_unchecked(selectors))
}

/// A parsed segment, before it is flattened into selectors.
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Child(Selector),
    Descendant(Selector),
}

impl Segment {
    fn push_into(self, selectors: &mut Vec<Selector>) {
        match self {
            Segment::Child(s) => selectors.push(s),
            Segment::Descendant(s) => {
                selectors.push(Selector::RecursiveDescent);
                selectors.push(s);
            }
        }
    }
}

// --- Combinators ---

/// `$`, consumed only when it stands alone so keys like `$ref` stay names.
fn root(input: &str) -> IResult<&str, char> {
    terminated(char('$'), peek(alt((eof, tag("."), tag("["))))).parse(input)
}

fn leading_segment(input: &str) -> IResult<&str, Segment> {
    alt((segment, map(bare_member, Segment::Child))).parse(input)
}

fn segment(input: &str) -> IResult<&str, Segment> {
    alt((
        map(preceded(tag(".."), dotted_member), Segment::Descendant),
        map(preceded(char('.'), dotted_member), Segment::Child),
        map(bracket, Segment::Child),
    ))
    .parse(input)
}

/// Whatever may follow a `.` or `..`.
fn dotted_member(input: &str) -> IResult<&str, Selector> {
    alt((bracket, bare_member)).parse(input)
}

fn bare_member(input: &str) -> IResult<&str, Selector> {
    alt((wildcard, map_res(name_token, member_selector))).parse(input)
}

fn wildcard(input: &str) -> IResult<&str, Selector> {
    value(Selector::Wildcard, char('*')).parse(input)
}

fn name_token(input: &str) -> IResult<&str, &str> {
    take_while1(is_name_char).parse(input)
}

/// Digit strings become indices, exactly as `[N]` does; anything else is a key.
fn member_selector(token: &str) -> Result<Selector, ParseIntError> {
    if token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse::<usize>().map(Selector::Index)
    } else {
        Ok(Selector::Field(token.to_string()))
    }
}

// --- Bracket Parsers ---

fn bracket(input: &str) -> IResult<&str, Selector> {
    delimited(char('['), ws(bracket_content), char(']')).parse(input)
}

fn bracket_content(input: &str) -> IResult<&str, Selector> {
    alt((
        wildcard,
        map_res(digit1, |d: &str| d.parse::<usize>().map(Selector::Index)),
        map(quoted_key, Selector::Field),
    ))
    .parse(input)
}

/// A single- or double-quoted key. A backslash takes the next character
/// literally.
fn quoted_key(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    let quote = match chars.next() {
        Some((_, q @ ('\'' | '"'))) => q,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };
    let mut key = String::new();
    let mut escaped = false;
    for (i, c) in chars {
        if escaped {
            key.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            return Ok((&input[i + c.len_utf8()..], key));
        } else {
            key.push(c);
        }
    }
    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}

/// A combinator that takes a parser `inner` and produces a parser that consumes
/// surrounding whitespace.
fn ws<'a, F, O, E>(inner: F) -> impl Parser<&'a str, Output = O, Error = E>
where
    F: Parser<&'a str, Output = O, Error = E>,
    E: nom::error::ParseError<&'a str>,
{
    delimited(multispace0, inner, multispace0)
}

// --- Diagnostics ---

/// Explains why no segment parser accepted `rest`.
fn diagnose(rest: &str, leading: bool) -> String {
    if rest.starts_with('[') {
        return diagnose_bracket(rest);
    }
    if let Some(tail) = rest.strip_prefix("..") {
        if tail.is_empty() {
            return "recursive descent '..' must be followed by a selector".to_string();
        }
        return diagnose_member(tail);
    }
    if let Some(tail) = rest.strip_prefix('.') {
        if tail.is_empty() {
            return "path ends with '.'".to_string();
        }
        return diagnose_member(tail);
    }
    if leading {
        return diagnose_member(rest);
    }
    match rest.chars().next() {
        Some(c) => format!("unexpected character '{}'", c),
        None => "unexpected end of path".to_string(),
    }
}

fn diagnose_member(tail: &str) -> String {
    if tail.starts_with('[') {
        return diagnose_bracket(tail);
    }
    let token: String = tail.chars().take_while(|c| is_name_char(*c)).collect();
    if token.is_empty() {
        return match tail.chars().next() {
            Some(c) => format!("unexpected character '{}'", c),
            None => "unexpected end of path".to_string(),
        };
    }
    if token.bytes().all(|b| b.is_ascii_digit()) {
        return format!("malformed numeric index '{}': out of range", token);
    }
    format!("unknown selector token '{}'", token)
}

fn diagnose_bracket(rest: &str) -> String {
    let Some(close) = rest.find(']') else {
        return "unterminated bracket".to_string();
    };
    let content = rest[1..close].trim();
    if content.is_empty() {
        return "empty bracket selector".to_string();
    }
    if content.starts_with('\'') || content.starts_with('"') {
        // A well-formed quoted key may itself contain ']'.
        return if quoted_key(rest[1..].trim_start()).is_err() {
            "unterminated bracket or quoted key".to_string()
        } else {
            "unexpected characters after quoted key".to_string()
        };
    }
    if let Some(digits) = content.strip_prefix('-') {
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return format!(
                "malformed numeric index '{}': negative indices are not supported",
                content
            );
        }
    }
    if content.bytes().all(|b| b.is_ascii_digit()) {
        return format!("malformed numeric index '{}': out of range", content);
    }
    if content.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("malformed numeric index '{}'", content);
    }
    format!("unknown selector token '{}'", content)
}
