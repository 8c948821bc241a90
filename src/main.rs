mod cli;
mod commands;
mod config;
mod logging;
mod meals;
mod storage;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.command.unwrap_or(cli::Command::Tui);

    let log_file = match command {
        cli::Command::Tui => Some(config::log_path()?),
        _ => None,
    };
    let target = match &log_file {
        Some(path) => logging::LogTarget::File(path),
        None => logging::LogTarget::Stderr,
    };
    logging::init(args.verbose, target)?;

    let settings = config::load_settings(args.config.as_deref())?;
    match command {
        cli::Command::Tui => commands::tui(settings),
        cli::Command::Show { view, date } => commands::show(settings, view, date),
        cli::Command::Plan { date, slot, recipe } => commands::plan(settings, date, slot, recipe),
        cli::Command::Unplan { date, slot } => commands::unplan(settings, date, slot),
        cli::Command::List => commands::list(settings),
    }
}
