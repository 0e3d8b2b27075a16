//! BibTeX serialization.
//!
//! Converts a [`Database`] back to BibTeX text. `@string`, `@preamble` and
//! `@comment` blocks come first, then one entry per block separated by blank
//! lines.

use std::fs;
use std::io;
use std::path::Path;

use crate::database::{Database, Delimiter, Directive, Entry, FieldValue};

const INDENT: &str = "  ";

/// Formats a field value with the delimiter it was read with.
///
/// Quoted values are written braced; raw values are written bare.
fn format_value(value: &FieldValue) -> String {
    match value.delimiter {
        Delimiter::Braces | Delimiter::Quotes => format!("{{{}}}", value.text),
        Delimiter::Raw => value.text.clone(),
    }
}

fn format_directive(directive: &Directive) -> String {
    match directive {
        Directive::String { name, value } => {
            format!("@string{{{} = {}}}", name, format_value(value))
        }
        Directive::Preamble(value) => format!("@preamble{{{}}}", format_value(value)),
        Directive::Comment(body) if is_balanced(body, '{', '}') => {
            format!("@comment{{{}}}", body)
        }
        Directive::Comment(body) => format!("@comment({})", body),
    }
}

/// Whether every `close` in `text` has a matching `open` before it.
fn is_balanced(text: &str, open: char, close: char) -> bool {
    let mut depth = 0usize;
    for c in text.chars() {
        if c == open {
            depth += 1;
        } else if c == close {
            match depth.checked_sub(1) {
                Some(d) => depth = d,
                None => return false,
            }
        }
    }
    depth == 0
}

/// Formats a single entry.
pub fn format_entry(entry: &Entry) -> String {
    let mut result = String::new();
    result.push('@');
    result.push_str(&entry.entry_type);
    result.push('{');
    result.push_str(&entry.key);
    result.push_str(",\n");

    for field in entry.fields() {
        result.push_str(INDENT);
        result.push_str(&field.name);
        result.push_str(" = ");
        result.push_str(&format_value(&field.value));
        result.push_str(",\n");
    }

    result.push('}');
    result
}

/// Serializes the whole database.
pub fn to_bibtex(database: &Database) -> String {
    let blocks: Vec<String> = database
        .directives
        .iter()
        .map(format_directive)
        .chain(database.entries.iter().map(format_entry))
        .collect();

    if blocks.is_empty() {
        return String::new();
    }
    let mut output = blocks.join("\n\n");
    output.push('\n');
    output
}

/// Serializes the database and writes it to `path`, replacing any
/// existing file.
pub fn write_bibtex(database: &Database, path: &Path) -> io::Result<()> {
    fs::write(path, to_bibtex(database))
}
