// MIT License
// Copyright (c) 2024 Graham King

use clap::{Parser, Subcommand};

mod article;
#[cfg(test)]
mod fixture;
mod report;
mod views;

const DEFAULT_DB: &str = "news.db";

/// Reports on the news site's articles, authors and errors
#[derive(Parser)]
struct Cli {
    /// Sets a custom database path
    #[arg(long, value_name = "PATH", default_value = DEFAULT_DB, global = true)]
    db_path: String,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the most popular articles and authors, and the days with too many errors.
    /// This is the default.
    Report,

    /// Create the views the report reads. Run once against a new database.
    Views {
        /// Drop and re-create views that already exist
        #[clap(long)]
        replace: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    // Any failure ends the run. It is reported on stdout like the rest of the output.
    if let Err(err) = run(cli) {
        println!("{err:#}");
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command.unwrap_or(Commands::Report) {
        Commands::Report => report::run(&cli.db_path),
        Commands::Views { replace } => views::run(&cli.db_path, replace),
    }
}
