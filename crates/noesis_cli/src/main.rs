//! CLI entry point for local memory-store checks.
//!
//! # Responsibility
//! - Wire `noesis_core` against a SQLite key-value file.
//! - Keep output line-oriented and deterministic for quick sanity checks.

use clap::{Parser, Subcommand};
use log::error;
use noesis_core::{
    flush_logging, init_logging, CoreConfig, DeleteOutcome, Entry, EntryDraft, LandmarkCatalog,
    MemoryStore, SqliteKvStore,
};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "noesis", version, about = "Inspect and edit a NOESIS memory store")]
struct Cli {
    /// SQLite file holding the key-value storage.
    #[arg(long, default_value = "noesis.sqlite3")]
    db: PathBuf,
    /// User scope; the default scope is used when omitted.
    #[arg(long)]
    user: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long)]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Lists the landmark catalog.
    Landmarks,
    /// Lists entries, newest first.
    List {
        #[arg(long)]
        landmark: Option<String>,
    },
    /// Adds a text entry under a landmark.
    Add {
        landmark: String,
        title: String,
        #[arg(long)]
        text: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Searches entries by substring and/or exact tag.
    Search {
        #[arg(default_value = "")]
        query: String,
        #[arg(long, default_value = "")]
        tag: String,
    },
    /// Deletes one entry by id.
    Delete { entry_id: String },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let result = run(cli);
    flush_logging();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("noesis: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = CoreConfig::default();
    if let Some(log_dir) = cli.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir)?;
    }

    let backend = SqliteKvStore::open(&cli.db)?;
    let mut store = MemoryStore::open(
        backend,
        LandmarkCatalog::builtin().clone(),
        &config,
        cli.user.as_deref(),
    );

    match cli.command {
        Command::Landmarks => {
            for landmark in store.catalog().enumerate() {
                println!(
                    "{}\t{}\t{}",
                    landmark.id,
                    landmark.category.as_str(),
                    landmark.name
                );
            }
        }
        Command::List { landmark } => match landmark.as_deref() {
            Some(landmark_id) => store.entries_by_landmark(landmark_id).for_each(print_entry),
            None => store.entries().iter().for_each(print_entry),
        },
        Command::Add {
            landmark,
            title,
            text,
            tags,
        } => {
            let mut draft = EntryDraft::titled(title).with_tags(tags);
            draft.text = text;
            let entry = store.add_entry(&landmark, draft)?;
            println!("{}", entry.id);
        }
        Command::Search { query, tag } => {
            store
                .search_entries(&query, &tag)
                .into_iter()
                .for_each(print_entry);
        }
        Command::Delete { entry_id } => match store.delete_entry(&entry_id)? {
            DeleteOutcome::Deleted => println!("deleted {entry_id}"),
            DeleteOutcome::NotFound => println!("not found {entry_id}"),
        },
    }

    store.into_backend();
    Ok(())
}

fn print_entry(entry: &Entry) {
    println!(
        "{}\t{}\t{}\t{}\t[{}]",
        entry.id,
        entry.landmark_id,
        entry.created_at.to_rfc3339(),
        entry.title,
        entry.tags.join(",")
    );
}
