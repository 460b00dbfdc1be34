//! Transition log commands

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::cli::output::{OutputFormat, print_formatted, print_success};
use crate::config::Config;
use crate::store::LogStore;

#[derive(Subcommand, Debug)]
pub enum LogCommands {
    /// Show stored transition lines, newest first
    Show {
        /// Maximum number of lines to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Delete all stored transition lines
    Clear,
}

#[derive(Serialize)]
struct LogListResult {
    count: usize,
    lines: Vec<String>,
}

pub async fn run(command: LogCommands, format: OutputFormat, quiet: bool) -> Result<()> {
    let config = Config::load()?;
    let store = LogStore::open(&config.db_path()?)?;

    match command {
        LogCommands::Show { limit } => show(&store, limit, format),
        LogCommands::Clear => clear(&store, quiet),
    }
}

fn show(store: &LogStore, limit: Option<usize>, format: OutputFormat) -> Result<()> {
    let mut lines = store.read_all_descending()?;
    if let Some(limit) = limit {
        lines.truncate(limit);
    }

    let result = LogListResult {
        count: lines.len(),
        lines,
    };

    print_formatted(&result, format, |r| {
        if r.lines.is_empty() {
            "No log entries".to_string()
        } else {
            r.lines.join("\n")
        }
    });

    Ok(())
}

fn clear(store: &LogStore, quiet: bool) -> Result<()> {
    store.clear_all()?;
    print_success("Cleared", quiet);
    Ok(())
}
