//! # Scribe CLI
//!
//! Command line host for `scribe-core`. Loads a consultation snapshot (or the built-in
//! sample), prints EMR text and applies pending suggestions.
//!
//! Configuration:
//! - `RUST_LOG` controls log output (default `scribe=info`)
//! - `SCRIBE_UTC_OFFSET` sets the display offset when `--utc-offset` is not given
//!
//! A `.env` file in the working directory is loaded first if present.

use anyhow::Context;
use chrono::{Local, Offset};
use clap::{Parser, Subcommand, ValueEnum};
use scribe_core::clipboard::{Clipboard, ClipboardError};
use scribe_core::notice::Notice;
use scribe_core::{
    sample, snapshot, suggestion, CopySection, MedicalScribeData, ScribeConfig, ScribeSession,
    SuggestionField,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scribe")]
#[command(about = "Medical scribe record tool")]
struct Cli {
    /// Display offset for timestamps, e.g. +01:00 (defaults to the local offset)
    #[arg(long, global = true, env = "SCRIBE_UTC_OFFSET")]
    utc_offset: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a section as EMR text
    Emr {
        section: Section,
        /// Snapshot file (.json, .yaml or .yml); the built-in sample if omitted
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// List pending suggestions
    Suggestions {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Apply a suggestion and print the resulting snapshot as JSON
    Apply {
        /// Suggestion field key, e.g. metrics or primary_diagnosis
        field: String,
        /// JSON value to apply instead of the pending suggestion
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        input: Option<PathBuf>,
        /// Write the snapshot here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the built-in sample snapshot as JSON
    Sample,
}

#[derive(Clone, Copy, ValueEnum)]
enum Section {
    Transcript,
    Profile,
    Goal,
    Review,
    Note,
}

/// Clipboard stand-in that prints EMR text to stdout.
struct StdoutClipboard;

impl Clipboard for StdoutClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{text}").map_err(|err| ClipboardError::Rejected(err.to_string()))
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scribe=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = resolve_config(cli.utc_offset.as_deref())?;

    match cli.command {
        Some(Commands::Emr { section, input }) => {
            let mut session = ScribeSession::new(load(input.as_deref())?, config);
            let mut clipboard = StdoutClipboard;
            let copied = match section {
                Section::Transcript => {
                    session.copy_section(CopySection::Transcript, &mut clipboard)
                }
                Section::Profile => session.copy_section(CopySection::Profile, &mut clipboard),
                Section::Goal => session.copy_section(CopySection::Goal, &mut clipboard),
                Section::Review => session.copy_section(CopySection::Review, &mut clipboard),
                Section::Note => session.copy_complete_note(&mut clipboard),
            };
            report(session.drain_notices());
            copied?;
        }
        Some(Commands::Suggestions { input }) => {
            let data = load(input.as_deref())?;
            let pending = suggestion::pending_fields(&data.note);
            if pending.is_empty() {
                println!("No pending suggestions.");
            } else {
                for field in pending {
                    println!("{:<24} {}", field.key(), field.label());
                }
            }
            let goal_data = &data.note.goal_data;
            if goal_data.has_pending_suggestions() {
                if let Some(rationale) = goal_data.suggestion_rationale.as_deref() {
                    println!("\nRationale: {rationale}");
                }
            }
        }
        Some(Commands::Apply {
            field,
            value,
            input,
            output,
        }) => {
            let mut session = ScribeSession::new(load(input.as_deref())?, config);
            let applied = match value {
                Some(raw) => {
                    let value: serde_json::Value = serde_json::from_str(&raw)
                        .with_context(|| format!("--value is not valid JSON: {raw}"))?;
                    session.apply_suggestion_key(&field, value)
                }
                None => field
                    .parse::<SuggestionField>()
                    .and_then(|field| session.apply_pending(field)),
            };
            applied.with_context(|| format!("could not apply suggestion for {field}"))?;
            report(session.drain_notices());
            write_snapshot(session.data(), output.as_deref())?;
        }
        Some(Commands::Sample) => {
            write_snapshot(&sample::sample_scribe_data()?, None)?;
        }
        None => {
            println!("Use 'scribe --help' for commands");
        }
    }

    Ok(())
}

fn resolve_config(offset: Option<&str>) -> anyhow::Result<ScribeConfig> {
    match offset {
        Some(value) => ScribeConfig::from_offset_str(value)
            .with_context(|| format!("invalid UTC offset: {value}")),
        None => Ok(ScribeConfig::new(Local::now().offset().fix())),
    }
}

fn load(input: Option<&Path>) -> anyhow::Result<MedicalScribeData> {
    match input {
        Some(path) => snapshot::load(path)
            .with_context(|| format!("failed to load snapshot {}", path.display())),
        None => Ok(sample::sample_scribe_data()?),
    }
}

fn write_snapshot(data: &MedicalScribeData, output: Option<&Path>) -> anyhow::Result<()> {
    let json = snapshot::to_json_pretty(data)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "snapshot written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn report(notices: Vec<Notice>) {
    for notice in notices {
        if notice.is_destructive() {
            tracing::warn!("{notice}");
        } else {
            tracing::info!("{notice}");
        }
    }
}
