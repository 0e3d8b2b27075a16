//! Shared test constants and helpers for integration tests.

use std::fs;
use std::path::{Path, PathBuf};

/// An inproceedings entry that exercises every compaction step.
///
/// With all options enabled (and `abstract` deleted) it compacts to
/// [`CONFERENCE_ENTRY_COMPACTED`].
pub const CONFERENCE_ENTRY: &str = r#"@InProceedings{smith2020,
  author    = {Smith, Anton B C. and Doe, Dora EF},
  title     = {On Compact Bibliographies},
  booktitle = {Proceedings of the Twenty-Third International Conference on Software Engineering},
  year      = 2020,
  month     = jan,
  link      = {https://example.org/smith2020},
  abstract  = {A long abstract nobody reads.},
}
"#;

pub const CONFERENCE_ENTRY_COMPACTED: &str = "@inproceedings{smith2020,
  author = {Smith, A. B C. and Doe, D. EF},
  title = {On Compact Bibliographies},
  booktitle = {Proc. of the 23rd Int'l. Conf. on Software Engineering},
  year = 2020,
  month = jan,
  url = {https://example.org/smith2020},
}
";

/// Writes `content` to `name` inside `dir` and returns the path.
pub fn write_bib(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
