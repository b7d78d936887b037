//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`Command`] - The available subcommands
//! - [`Delimiter`] - Spreadsheet column separators
//! - [`read_rows`] - Spreadsheet rows for the `dispatch` subcommand
//!
//! # Example
//!
//! ```rust
//! use disparo::cli::{Delimiter, read_rows};
//!
//! let csv = "Nome;Telefone\nAna;5511999\n";
//! let rows = read_rows(csv.as_bytes(), Delimiter::Semicolon)?;
//! assert_eq!(rows[0]["Nome"], "Ana");
//! # Ok::<(), disparo::SyncError>(())
//! ```

use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SyncError};
use crate::wire::SpreadsheetRow;

/// Normalize, diff and dispatch message-template groups
/// fetched from the messaging service.
#[derive(Parser, Debug, Clone)]
#[command(name = "disparo")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    disparo group records.json
    disparo diff original.json edited.json
    disparo create --groups groups.json -c 'Estudante=Olá, estudante!'
    disparo encode flyer.png --mime image/png
    disparo dispatch contatos.csv --disparo-id 3 -d semicolon
    disparo summarize response.json")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// JSON configuration file (media limits, categories)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Group a fetched record array by disparo_id
    Group {
        /// JSON array of flat message records
        input: PathBuf,
    },

    /// Print the update payload for an edited group
    Diff {
        /// Group as originally fetched
        original: PathBuf,
        /// Same group after editing
        edited: PathBuf,
    },

    /// Print the create payload for a new group
    Create {
        /// Current groups, used to pick the next disparo_id
        #[arg(long, value_name = "FILE")]
        groups: Option<PathBuf>,

        /// Text for one category
        #[arg(short = 'c', long = "category", value_name = "CATEGORY=TEXT", value_parser = parse_category)]
        categories: Vec<(String, String)>,
    },

    /// Validate an attachment and print its transport form
    Encode {
        /// File to attach
        input: PathBuf,

        /// Declared media type
        #[arg(long)]
        mime: String,
    },

    /// Print the dispatch payload for a spreadsheet
    Dispatch {
        /// CSV export of the recipient spreadsheet
        rows: PathBuf,

        /// Group to dispatch
        #[arg(long)]
        disparo_id: u64,

        /// Column separator
        #[arg(short, long, value_enum, default_value = "comma")]
        delimiter: Delimiter,
    },

    /// Summarize a dispatch response
    Summarize {
        /// JSON response of the dispatch endpoint
        input: PathBuf,
    },
}

/// Column separator of a spreadsheet export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,

    /// Common in locales that use `,` as the decimal mark
    #[value(alias = "sc")]
    Semicolon,

    Tab,
}

impl Delimiter {
    pub fn as_byte(self) -> u8 {
        match self {
            Delimiter::Comma => b',',
            Delimiter::Semicolon => b';',
            Delimiter::Tab => b'\t',
        }
    }

    /// Returns all supported delimiter names.
    pub fn all_names() -> &'static [&'static str] {
        &["comma", "semicolon", "sc", "tab"]
    }
}

impl std::fmt::Display for Delimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Delimiter::Comma => write!(f, "comma"),
            Delimiter::Semicolon => write!(f, "semicolon"),
            Delimiter::Tab => write!(f, "tab"),
        }
    }
}

impl std::str::FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "comma" | "," => Ok(Delimiter::Comma),
            "semicolon" | "sc" | ";" => Ok(Delimiter::Semicolon),
            "tab" | "\t" => Ok(Delimiter::Tab),
            _ => Err(format!(
                "Unknown delimiter: '{}'. Expected one of: {}",
                s,
                Delimiter::all_names().join(", ")
            )),
        }
    }
}

/// Splits `CATEGORY=TEXT` at the first `=`.
fn parse_category(s: &str) -> std::result::Result<(String, String), String> {
    let (category, text) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CATEGORY=TEXT, got '{s}'"))?;
    Ok((category.trim().to_string(), text.to_string()))
}

/// Reads spreadsheet rows from CSV, one row per recipient.
///
/// The header line names the columns. Empty cells are left out of the row.
pub fn read_rows<R: Read>(reader: R, delimiter: Delimiter) -> Result<Vec<SpreadsheetRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.as_byte())
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    if headers.iter().all(|h| h.trim().is_empty()) {
        return Err(SyncError::invalid_input("spreadsheet has no header row"));
    }

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: SpreadsheetRow = headers
            .iter()
            .zip(record.iter())
            .filter(|(_, cell)| !cell.is_empty())
            .map(|(header, cell)| (header.to_string(), Value::String(cell.to_string())))
            .collect();
        if !row.is_empty() {
            rows.push(row);
        }
    }

    tracing::debug!(rows = rows.len(), "read spreadsheet rows");
    Ok(rows)
}
