use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "almanac",
    version,
    about = "Terminal three-month calendar and event planner"
)]
pub struct Cli {
    /// Path to the events file (defaults to the platform data directory)
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive calendar
    Tui,
    /// List events for a date, a month, or everything
    List {
        /// Date in YYYY-MM-DD format
        date: Option<String>,
        /// Month in YYYY-MM format
        #[arg(long, conflicts_with = "date")]
        month: Option<String>,
    },
    /// Add an event
    Add {
        /// Date in YYYY-MM-DD format
        date: String,
        /// Time in HH:MM format
        time: String,
        /// Event description
        description: String,
    },
    /// Search event descriptions
    Search {
        /// Case-insensitive substring to look for
        query: String,
    },
}
