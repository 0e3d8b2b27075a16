//! Load, compact and write a bibliography.

use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;

use crate::config::Config;
use crate::parser::{load_bibtex, LoadError, ParseError};
use crate::transform::{CompactionStats, Compactor};
use crate::writer::{to_bibtex, write_bibtex};

/// Errors that can occur during a compaction run.
#[derive(Error, Debug)]
pub enum CompactError {
    #[error("Failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid BibTeX in '{path}' at {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub stats: CompactionStats,
}

/// Runs a full compaction: read `config.bib`, compact every entry and
/// write the result to `config.out`, overwriting it if it exists.
///
/// # Errors
///
/// Fails if the input cannot be read or parsed, or the output cannot be
/// written. Nothing is written when reading or parsing fails.
pub fn run(config: &Config) -> Result<RunSummary, CompactError> {
    let mut database = load_bibtex(&config.bib).map_err(|e| match e {
        LoadError::IoError(source) => CompactError::Read {
            path: config.bib.clone(),
            source,
        },
        LoadError::ParseError(source) => CompactError::Parse {
            path: config.bib.clone(),
            source,
        },
    })?;
    log::debug!(
        "loaded {} entries from {}",
        database.len(),
        config.bib.display()
    );

    let stats = Compactor::new(config).compact_database(&mut database);

    let write_error = |source: io::Error| CompactError::Write {
        path: config.out.clone(),
        source,
    };
    if config.writes_to_stdout() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        handle
            .write_all(to_bibtex(&database).as_bytes())
            .map_err(write_error)?;
        handle.flush().map_err(write_error)?;
    } else {
        write_bibtex(&database, &config.out).map_err(write_error)?;
    }

    Ok(RunSummary {
        output: config.out.clone(),
        stats,
    })
}
