use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mealcal", version, about = "Terminal meal-planning calendar")]
pub struct Cli {
    /// Path to a config file (defaults to the per-user config.yml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Log at debug level
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the interactive calendar
    Tui,
    /// Print one calendar view as text
    Show {
        /// day, week, month or year (defaults to the configured view)
        #[arg(long)]
        view: Option<String>,
        /// Anchor date in YYYY-MM-DD format (defaults to today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Assign a recipe to a meal
    Plan {
        /// Date in YYYY-MM-DD format
        date: String,
        /// breakfast, lunch or dinner
        slot: String,
        /// Recipe name
        recipe: String,
    },
    /// Remove the recipe from a meal
    Unplan {
        /// Date in YYYY-MM-DD format
        date: String,
        /// breakfast, lunch or dinner
        slot: String,
    },
    /// List all planned meals
    List,
}
