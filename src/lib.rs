//! bib-compactor: shorten BibTeX bibliographies.
//!
//! This library provides functionality to:
//! - Parse and serialize BibTeX files
//! - Abbreviate proceedings vocabulary and ordinal words in booktitles
//! - Reduce author given names to initials
//! - Rename `link` fields to `url` and drop unwanted fields

pub mod compactor;
pub mod config;
pub mod database;
pub mod names;
pub mod parser;
pub mod substitutions;
pub mod transform;
pub mod writer;

pub use compactor::{run, CompactError, RunSummary};
pub use config::{default_output_path, Config};
pub use database::{Database, Delimiter, Directive, Entry, Field, FieldValue};
pub use names::{compact_author, compact_authors};
pub use parser::{load_bibtex, parse, ParseError};
pub use substitutions::SubstitutionTable;
pub use transform::{CompactionStats, Compactor};
pub use writer::{to_bibtex, write_bibtex};
