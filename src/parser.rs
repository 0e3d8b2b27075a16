//! BibTeX parser built on nom.
//!
//! Handles:
//! - regular entries with `{...}` or `(...)` outer delimiters
//! - braced, quoted and bare field values, nested braces
//! - `#` concatenation (kept verbatim as a raw value)
//! - `@string`, `@preamble` and `@comment` blocks
//! - `%` line comments and free text between blocks
//!
//! Entry types and field names are lower-cased. Any block that starts like
//! an entry but cannot be parsed aborts the whole parse.

use std::fs;
use std::path::Path;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, one_of},
    combinator::{consumed, map},
    error::{Error as NomError, ErrorKind},
    multi::separated_list1,
    sequence::delimited,
    IResult,
};
use thiserror::Error;

use crate::database::{Database, Directive, Entry, FieldValue};

/// A BibTeX syntax error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {message}")]
pub struct ParseError {
    /// 1-based line on which the failing block starts.
    pub line: usize,
    pub message: String,
}

/// Errors that can occur when loading a BibTeX file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid BibTeX at {0}")]
    ParseError(#[from] ParseError),
}

/// Reads and parses a BibTeX file.
pub fn load_bibtex(path: &Path) -> Result<Database, LoadError> {
    let content = fs::read_to_string(path)?;
    Ok(parse(&content)?)
}

/// A top-level `@` block.
enum Block {
    Entry(Entry),
    Directive(Directive),
}

/// Parses BibTeX text into a database.
pub fn parse(input: &str) -> Result<Database, ParseError> {
    let mut database = Database::new();
    let mut remaining = input;

    loop {
        remaining = skip_free_text(remaining);
        if remaining.is_empty() {
            break;
        }

        match block(remaining) {
            Ok((rest, Block::Entry(entry))) => {
                database.entries.push(entry);
                remaining = rest;
            }
            Ok((rest, Block::Directive(directive))) => {
                database.directives.push(directive);
                remaining = rest;
            }
            Err(_) => {
                return Err(ParseError {
                    line: line_of(input, remaining),
                    message: format!("cannot parse block '{}'", snippet(remaining)),
                });
            }
        }
    }

    Ok(database)
}

/// Skips everything up to the next `@` that opens a block.
fn skip_free_text(input: &str) -> &str {
    let mut rest = input;
    loop {
        match rest.find(|c: char| c == '@' || c == '%') {
            None => return "",
            Some(pos) if rest[pos..].starts_with('%') => {
                let line = &rest[pos..];
                rest = &line[line.find('\n').unwrap_or(line.len())..];
            }
            Some(pos) => {
                rest = &rest[pos..];
                if block_start(rest).is_ok() {
                    return rest;
                }
                // a stray '@', e.g. an e-mail address in a comment
                rest = &rest[1..];
            }
        }
    }
}

fn block_start(input: &str) -> IResult<&str, char> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = ws(rest)?;
    let (rest, _) = identifier(rest)?;
    let (rest, _) = ws(rest)?;
    one_of("{(")(rest)
}

fn line_of(input: &str, remaining: &str) -> usize {
    let offset = input.len() - remaining.len();
    input[..offset].matches('\n').count() + 1
}

fn snippet(input: &str) -> String {
    let line = input.lines().next().unwrap_or("").trim();
    if line.chars().count() > 40 {
        let cut: String = line.chars().take(40).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}

/// Whitespace and `%` comments.
fn ws(input: &str) -> IResult<&str, ()> {
    let mut rest = input.trim_start();
    while let Some(comment) = rest.strip_prefix('%') {
        let end = comment.find('\n').unwrap_or(comment.len());
        rest = comment[end..].trim_start();
    }
    Ok((rest, ()))
}

fn identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || "_-:.+/".contains(c))(input)
}

fn cite_key(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace() && !",{}()\"#%=".contains(c))(input)
}

fn block(input: &str) -> IResult<&str, Block> {
    let (rest, _) = char('@')(input)?;
    let (rest, _) = ws(rest)?;
    let (rest, kind) = identifier(rest)?;
    let (rest, _) = ws(rest)?;
    let (rest, open) = one_of("{(")(rest)?;
    let close = if open == '{' { '}' } else { ')' };

    let kind = kind.to_lowercase();
    let (rest, block) = match kind.as_str() {
        "comment" => {
            let (rest, body) = comment_body(rest, close)?;
            let comment = Directive::Comment(body.to_string());
            return Ok((rest, Block::Directive(comment)));
        }
        "string" => {
            let (rest, (name, value)) = string_body(rest)?;
            (rest, Block::Directive(Directive::String { name, value }))
        }
        "preamble" => {
            let (rest, _) = ws(rest)?;
            let (rest, value) = field_value(rest)?;
            (rest, Block::Directive(Directive::Preamble(value)))
        }
        _ => {
            let (rest, entry) = entry_body(rest, &kind, close)?;
            (rest, Block::Entry(entry))
        }
    };

    let (rest, _) = ws(rest)?;
    let (rest, _) = char(close)(rest)?;
    Ok((rest, block))
}

/// Everything up to the matching closing delimiter, which is consumed.
fn comment_body(input: &str, close: char) -> IResult<&str, &str> {
    let open = if close == '}' { '{' } else { '(' };
    let mut depth = 1usize;
    for (i, c) in input.char_indices() {
        if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Ok((&input[i + 1..], &input[..i]));
            }
        }
    }
    Err(unterminated(input))
}

fn string_body(input: &str) -> IResult<&str, (String, FieldValue)> {
    let (rest, _) = ws(input)?;
    let (rest, name) = identifier(rest)?;
    let (rest, _) = ws(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = ws(rest)?;
    let (rest, value) = field_value(rest)?;
    Ok((rest, (name.to_string(), value)))
}

fn entry_body<'a>(input: &'a str, entry_type: &str, close: char) -> IResult<&'a str, Entry> {
    let (rest, _) = ws(input)?;
    let (rest, key) = cite_key(rest)?;
    let mut entry = Entry::new(entry_type, key);

    let mut remaining = rest;
    loop {
        let (rest, _) = ws(remaining)?;
        if rest.starts_with(close) {
            return Ok((rest, entry));
        }
        let (rest, _) = char(',')(rest)?;
        let (rest, _) = ws(rest)?;
        if rest.starts_with(close) {
            // trailing comma
            return Ok((rest, entry));
        }
        let (rest, (name, value)) = field(rest)?;
        // a repeated field keeps the last value
        entry.set_value(&name, value);
        remaining = rest;
    }
}

fn field(input: &str) -> IResult<&str, (String, FieldValue)> {
    let (rest, name) = identifier(input)?;
    let (rest, _) = ws(rest)?;
    let (rest, _) = char('=')(rest)?;
    let (rest, _) = ws(rest)?;
    let (rest, value) = field_value(rest)?;
    Ok((rest, (name.to_lowercase(), value)))
}

/// One value piece as it appears in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Braced(&'a str),
    Quoted(&'a str),
    Bare(&'a str),
}

fn piece(input: &str) -> IResult<&str, Piece<'_>> {
    alt((
        map(braced, Piece::Braced),
        map(quoted, Piece::Quoted),
        map(bare, Piece::Bare),
    ))(input)
}

/// A single piece or a `#` concatenation of pieces.
fn field_value(input: &str) -> IResult<&str, FieldValue> {
    let (rest, (expression, pieces)) =
        consumed(separated_list1(delimited(ws, char('#'), ws), piece))(input)?;

    let value = match pieces.as_slice() {
        [Piece::Braced(text)] => FieldValue::braced(*text),
        [Piece::Quoted(text)] => FieldValue::quoted(*text),
        [Piece::Bare(token)] => FieldValue::raw(*token),
        _ => FieldValue::raw(expression),
    };
    Ok((rest, value))
}

/// `{...}` with balanced nested braces; returns the inner text.
fn braced(input: &str) -> IResult<&str, &str> {
    let (rest, _) = char('{')(input)?;
    let mut depth = 1usize;
    for (i, c) in rest.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&rest[i + 1..], &rest[..i]));
                }
            }
            _ => {}
        }
    }
    Err(unterminated(input))
}

/// `"..."`; a quote inside braces does not end the value. A `}` without a
/// matching `{` is rejected.
fn quoted(input: &str) -> IResult<&str, &str> {
    let (rest, _) = char('"')(input)?;
    let mut depth = 0usize;
    for (i, c) in rest.char_indices() {
        match c {
            '{' => depth += 1,
            '}' if depth == 0 => {
                return Err(nom::Err::Failure(NomError::new(input, ErrorKind::Char)))
            }
            '}' => depth -= 1,
            '"' if depth == 0 => return Ok((&rest[i + 1..], &rest[..i])),
            _ => {}
        }
    }
    Err(unterminated(input))
}

/// A number or a `@string` macro name.
fn bare(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || "_-:.+/'".contains(c))(input)
}

fn unterminated(input: &str) -> nom::Err<NomError<&str>> {
    nom::Err::Failure(NomError::new(input, ErrorKind::TakeUntil))
}
