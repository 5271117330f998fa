mod calendar;
mod cli;
mod commands;
mod input;
mod model;
mod nav;
mod storage;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);
    match command {
        cli::Command::Tui => commands::tui(args.file),
        cli::Command::List { date, month } => commands::list(args.file, date, month),
        cli::Command::Add {
            date,
            time,
            description,
        } => commands::add(args.file, date, time, description),
        cli::Command::Search { query } => commands::search(args.file, query),
    }
}
