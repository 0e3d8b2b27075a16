//! Per-entry compaction.
//!
//! Every entry goes through the same fixed sequence:
//!
//! 1. configured fields are deleted
//! 2. `link` is renamed to `url` (optional)
//! 3. `booktitle` phrases and ordinals are abbreviated
//! 4. author given names are reduced to initials (optional)
//!
//! Nothing here fails. Fields that are missing or not in the expected
//! shape are left alone.

use crate::config::Config;
use crate::database::{Database, Entry};
use crate::names::compact_authors;
use crate::substitutions::SubstitutionTable;

/// Counters collected while compacting a database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactionStats {
    pub entries: usize,
    pub fields_deleted: usize,
    pub links_renamed: usize,
    pub booktitles_changed: usize,
    pub authors_changed: usize,
}

impl CompactionStats {
    /// Whether anything changed since `before`.
    fn touched(&self, before: &CompactionStats) -> bool {
        self.fields_deleted != before.fields_deleted
            || self.links_renamed != before.links_renamed
            || self.booktitles_changed != before.booktitles_changed
            || self.authors_changed != before.authors_changed
    }
}

/// Applies the configured compaction to entries.
pub struct Compactor<'a> {
    config: &'a Config,
    table: SubstitutionTable,
}

impl<'a> Compactor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            table: SubstitutionTable::booktitle(),
        }
    }

    /// Compacts every entry of the database in place.
    pub fn compact_database(&self, database: &mut Database) -> CompactionStats {
        let mut stats = CompactionStats::default();
        for entry in database.iter_mut() {
            let before = stats;
            self.compact_entry(entry, &mut stats);
            if stats.touched(&before) {
                log::debug!("compacted entry '{}'", entry.key);
            }
        }
        stats
    }

    /// Compacts a single entry in place.
    pub fn compact_entry(&self, entry: &mut Entry, stats: &mut CompactionStats) {
        stats.entries += 1;

        for key in &self.config.keys_to_delete {
            if entry.remove(key).is_some() {
                stats.fields_deleted += 1;
            }
        }

        if self.config.replace_link_with_url && entry.rename("link", "url") {
            stats.links_renamed += 1;
        }

        if let Some(booktitle) = entry.get("booktitle") {
            let compacted = self.table.apply(booktitle);
            if compacted != booktitle {
                entry.set("booktitle", compacted);
                stats.booktitles_changed += 1;
            }
        }

        if self.config.compact_first_names {
            if let Some(author) = entry.get("author") {
                let compacted = compact_authors(author);
                if compacted != author {
                    entry.set("author", compacted);
                    stats.authors_changed += 1;
                }
            }
        }
    }
}
