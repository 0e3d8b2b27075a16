//! Run configuration.
//!
//! Built once from the command line and passed by reference to the
//! compactor; nothing reads process-wide state.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// File-name prefix used for the default output path.
pub const OUTPUT_PREFIX: &str = "compact_";

/// Everything a single compaction run needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    /// Input BibTeX file.
    pub bib: PathBuf,
    /// Output file; `-` means stdout.
    pub out: PathBuf,
    /// Move the value of `link` fields to `url`.
    pub replace_link_with_url: bool,
    /// Reduce author given names to initials.
    pub compact_first_names: bool,
    /// Field names removed from every entry.
    pub keys_to_delete: Vec<String>,
}

impl Config {
    /// Creates a configuration, resolving the default output path when
    /// `out` is `None`.
    pub fn new(
        bib: PathBuf,
        out: Option<PathBuf>,
        replace_link_with_url: bool,
        compact_first_names: bool,
        keys_to_delete: Vec<String>,
    ) -> Self {
        let out = out.unwrap_or_else(|| default_output_path(&bib));
        Self {
            bib,
            out,
            replace_link_with_url,
            compact_first_names,
            keys_to_delete,
        }
    }

    /// Whether the output goes to stdout.
    pub fn writes_to_stdout(&self) -> bool {
        self.out == Path::new("-")
    }
}

/// Returns the output path next to `bib` with the file name prefixed by
/// `compact_`, e.g. `/a/b/refs.bib` becomes `/a/b/compact_refs.bib`.
pub fn default_output_path(bib: &Path) -> PathBuf {
    let mut name = std::ffi::OsString::from(OUTPUT_PREFIX);
    if let Some(file_name) = bib.file_name() {
        name.push(file_name);
    }
    match bib.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}
