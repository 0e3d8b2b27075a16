//! CLI for bib-compactor - Compact BibTeX bibliographies.

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;

use bib_compactor::{run as compact, CompactError, Config};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// BibTeX reference compactor
#[derive(Parser)]
#[command(name = "bib-compactor")]
#[command(version)]
#[command(after_help = "\
Examples:
  bib-compactor refs.bib
  bib-compactor refs.bib --out short.bib --compact_first_names
  bib-compactor refs.bib --replace_link_with_url --keys_to_delete abstract file
  bib-compactor refs.bib --out -")]
struct Cli {
    /// The BibTeX bibliography file
    bib: PathBuf,

    /// The compacted BibTeX file (default: 'compact_' + name of 'bib', next
    /// to it; use '-' for stdout)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Replace 'link' keys with 'url' keys (e.g., for natbib-based styles
    /// that only know 'url')
    #[arg(long = "replace_link_with_url", visible_alias = "replace-link-with-url")]
    replace_link_with_url: bool,

    /// Compact author first names, e.g. 'Anton' becomes 'A.'; every first
    /// name of an author is compacted
    #[arg(long = "compact_first_names", visible_alias = "compact-first-names")]
    compact_first_names: bool,

    /// BibTeX keys to delete from every entry
    #[arg(
        long = "keys_to_delete",
        visible_alias = "keys-to-delete",
        num_args = 0..,
        value_name = "KEY"
    )]
    keys_to_delete: Vec<String>,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Config::new(
            cli.bib,
            cli.out,
            cli.replace_link_with_url,
            cli.compact_first_names,
            cli.keys_to_delete,
        )
    }
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — input file not found / unreadable
    InputFile(String),
    /// Exit 11 — input is not valid BibTeX
    BibSyntax(String),
    /// Exit 15 — cannot write output file
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::BibSyntax(_) => 11,
            AppError::OutputFile(_) => 15,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(f, "{}\n  hint: verify the file path is correct", msg)
            }
            AppError::BibSyntax(msg) => {
                write!(
                    f,
                    "{}\n  hint: check for unbalanced braces or a missing comma between fields",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

impl From<CompactError> for AppError {
    fn from(e: CompactError) -> Self {
        match e {
            CompactError::Read { .. } => AppError::InputFile(e.to_string()),
            CompactError::Parse { .. } => AppError::BibSyntax(e.to_string()),
            CompactError::Write { .. } => AppError::OutputFile(e.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init_from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"));

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

fn run() -> Result<(), AppError> {
    let config = Config::from(Cli::parse());

    // Resolved configuration, before anything is read
    match serde_json::to_string(&config) {
        Ok(json) => eprintln!("{}", json),
        Err(_) => eprintln!("{:?}", config),
    }

    let summary = compact(&config)?;
    let stats = summary.stats;
    info!(
        "compacted {} entr{} ({} booktitle(s), {} author list(s), {} link(s) renamed, {} field(s) deleted)",
        stats.entries,
        if stats.entries == 1 { "y" } else { "ies" },
        stats.booktitles_changed,
        stats.authors_changed,
        stats.links_renamed,
        stats.fields_deleted
    );
    if !config.writes_to_stdout() {
        info!("wrote {}", summary.output.display());
    }

    Ok(())
}
