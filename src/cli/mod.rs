//! CLI module for battrack
//!
//! Provides the command-line interface: the monitor service itself plus
//! log, status and configuration commands.

mod commands;
mod output;

use clap::{Parser, Subcommand};

pub use output::OutputFormat;

/// Battrack - battery state monitor
#[derive(Parser, Debug)]
#[command(name = "battrack")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the monitor service
    Run(commands::run::RunArgs),

    /// Transition log access
    Log {
        #[command(subcommand)]
        command: commands::log::LogCommands,
    },

    /// One-shot battery status read
    Status,

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },
}

/// Run the CLI with parsed arguments
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let format = cli.output.format();
    let quiet = cli.output.quiet;

    match cli.command {
        Commands::Run(args) => commands::run::run(args).await,
        Commands::Log { command } => commands::log::run(command, format, quiet).await,
        Commands::Status => commands::status::run(format).await,
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
    }
}
