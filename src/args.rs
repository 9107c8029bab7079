//! These structs provide the CLI interface for the expenses CLI.

use crate::render::Format;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

/// expenses: track expenses, then filter, search, sort and summarize them.
///
/// Expenses are kept in memory only. A session is a list of user actions, one JSON object per
/// line, which is replayed against an empty expense list. After the session, or whenever it asks
/// for a view, the visible expenses are printed along with their total and a chart of the totals
/// per category.
///
/// Example session:
///
///   {"op": "add", "amount": "10", "description": "lunch", "date": "2024-01-01", "category": "food"}
///   {"op": "add", "amount": "20", "description": "bus", "date": "2024-01-02", "category": "transport", "paymentMethod": "credit"}
///   {"op": "filter", "field": "category", "value": "food"}
///   {"op": "sort", "key": "amount"}
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Replay a session of user actions and print the resulting view.
    Run(RunArgs),
    /// Write a configuration file with the default settings.
    Init(InitArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The configuration file. Defaults to expenses/config.json in your config directory, and is
    /// optional there.
    #[arg(long, env = "EXPENSES_CONFIG")]
    config: Option<PathBuf>,
}

impl Common {
    pub fn new(log_level: LevelFilter, config: Option<PathBuf>) -> Self {
        Self { log_level, config }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn config(&self) -> Option<&Path> {
        self.config.as_deref()
    }
}

/// Args for the `expenses run` command.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// The session file, one JSON event per line. Reads stdin when omitted or "-".
    session: Option<PathBuf>,

    /// The output format. Defaults to the configured format, or table.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Print the view after every change rather than only at the end and on "view" events.
    #[arg(long)]
    each: bool,
}

impl RunArgs {
    pub fn new(session: Option<PathBuf>, format: Option<Format>, each: bool) -> Self {
        Self {
            session,
            format,
            each,
        }
    }

    /// The session file, or `None` for stdin.
    pub fn session(&self) -> Option<&Path> {
        self.session
            .as_deref()
            .filter(|p| p.as_os_str() != "-")
    }

    pub fn format(&self) -> Option<Format> {
        self.format
    }

    pub fn each(&self) -> bool {
        self.each
    }
}

/// Args for the `expenses init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Where to write the configuration file. Defaults to expenses/config.json in your config
    /// directory.
    path: Option<PathBuf>,
}

impl InitArgs {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
