//! # disparo CLI
//!
//! Command-line front-end over the disparo library. Results are printed to
//! stdout as JSON; logs go to stderr.

use std::fs;
use std::path::Path;
use std::process;

use clap::Parser as ClapParser;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing_subscriber::EnvFilter;

use disparo::cli::{Args, Command, read_rows};
use disparo::config::SyncConfig;
use disparo::core::{GroupBuilder, GroupStore, MediaCodec, MediaFile, aggregate, diff, normalize_json};
use disparo::wire::{CreatePayload, DispatchPayload};
use disparo::{MessageGroup, SyncError};

fn main() {
    let args = <Args as ClapParser>::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs to stderr; `RUST_LOG` overrides the level chosen by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<(), SyncError> {
    let config = match &args.config {
        Some(path) => SyncConfig::from_json(&fs::read_to_string(path)?)?,
        None => SyncConfig::default(),
    };

    match args.command {
        Command::Group { input } => {
            let groups = normalize_json(&fs::read_to_string(input)?)?;
            print_json(&groups)
        }

        Command::Diff { original, edited } => {
            let original: MessageGroup = read_json(&original)?;
            let edited: MessageGroup = read_json(&edited)?;
            let delta = diff(&original, &edited);

            for id in delta.removed_ids() {
                tracing::warn!(id, "message missing from edited group; removals are not sent");
            }
            match delta.to_update_payload() {
                Some(payload) => print_json(&payload),
                None => {
                    println!("No changes; nothing to send");
                    Ok(())
                }
            }
        }

        Command::Create { groups, categories } => {
            let store = match groups {
                Some(path) => GroupStore::from(read_json::<Vec<MessageGroup>>(&path)?),
                None => GroupStore::new(),
            };

            let mut builder = GroupBuilder::with_config(&config);
            for (category, text) in &categories {
                builder.set(category, text.as_str())?;
            }
            let group = builder.build(store.max_disparo_id())?;
            print_json(&CreatePayload::from(&group))
        }

        Command::Encode { input, mime } => {
            let name = input
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .ok_or_else(|| SyncError::invalid_input("input path has no file name"))?;
            let file = MediaFile::new(name, mime, fs::read(&input)?);

            let codec = MediaCodec::with_config(config.media);
            let mut message = disparo::Message::new(0, "", "");
            codec.attach(&mut message, &file)?;
            print_json(&serde_json::json!({
                "midiaExtension": message.media_extension,
                "midiaBase64": message.media_payload,
            }))
        }

        Command::Dispatch {
            rows,
            disparo_id,
            delimiter,
        } => {
            let data = read_rows(fs::File::open(rows)?, delimiter)?;
            print_json(&DispatchPayload::new(disparo_id, data)?)
        }

        Command::Summarize { input } => {
            let response: serde_json::Value = read_json(&input)?;
            println!("{}", aggregate(&response));
            Ok(())
        }
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, SyncError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|e| SyncError::json(path.display().to_string(), e))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), SyncError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
