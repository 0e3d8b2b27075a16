//! Author first-name compaction.
//!
//! Authors in BibTeX are separated by `" and "`. Each author written as
//! `Last, First Middle` has its given names reduced to initials:
//! `"Smith, Anton B C."` becomes `"Smith, A. B C."`. Authors in any other
//! shape are left exactly as written.

/// How a single given-name token is treated during compaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameToken {
    /// Zero or one character, e.g. `B`. Nothing left to shorten.
    Bare,
    /// Two characters including a period, e.g. `C.`.
    Abbreviated,
    /// Several letters, all upper case, e.g. `EF`.
    Acronym,
    /// Contains TeX markup (`{`, `}` or `\`), e.g. `{\"O}rjan`. Cutting
    /// it could leave unbalanced braces, so it is kept as written.
    Markup,
    /// A full name such as `Anton`.
    Full,
}

/// Classifies one given-name token.
pub fn classify(token: &str) -> NameToken {
    let len = token.chars().count();
    if token.contains(['{', '}', '\\']) {
        NameToken::Markup
    } else if len <= 1 {
        NameToken::Bare
    } else if len == 2 && token.contains('.') {
        NameToken::Abbreviated
    } else if is_upper(token) {
        NameToken::Acronym
    } else {
        NameToken::Full
    }
}

/// At least one cased character and no lower-case ones.
fn is_upper(token: &str) -> bool {
    token.chars().any(|c| c.is_uppercase()) && !token.chars().any(|c| c.is_lowercase())
}

/// Compacts a single given-name token.
pub fn compact_token(token: &str) -> String {
    match classify(token) {
        NameToken::Bare | NameToken::Abbreviated | NameToken::Acronym | NameToken::Markup => {
            token.to_string()
        }
        NameToken::Full => {
            let mut initial = String::with_capacity(4);
            // Full tokens have at least two characters
            if let Some(first) = token.chars().next() {
                initial.push(first);
            }
            initial.push('.');
            initial
        }
    }
}

/// Compacts a space-separated list of given names.
pub fn compact_given_names(given: &str) -> String {
    given
        .split(' ')
        .map(compact_token)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Compacts one author.
///
/// Returns `None` when the author is not in `Last, First` form (no comma,
/// or more than one `", "`), in which case the caller keeps the original.
pub fn compact_author(author: &str) -> Option<String> {
    let parts: Vec<&str> = author.split(", ").collect();
    match parts.as_slice() {
        [last, given] => Some(format!("{}, {}", last, compact_given_names(given))),
        _ => None,
    }
}

/// Compacts every author of an `author` field value.
pub fn compact_authors(field: &str) -> String {
    field
        .split(" and ")
        .map(|author| match compact_author(author) {
            Some(compacted) => compacted,
            None => {
                log::warn!(
                    "author '{}' is not in 'Last, First' form, leaving it unchanged",
                    author
                );
                author.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" and ")
}
