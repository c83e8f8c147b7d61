pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "clarity")]
#[command(about = "Summarized world news in the terminal", long_about = None)]
pub struct Cli {
    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Read configuration from this file instead of the default location
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the TUI (the default)
    Tui,
    /// Search for a topic and print the summary
    Search {
        /// Words of the query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// List pre-fetched articles
    Articles {
        /// Category name or value (e.g. "Finance" or "techsci"); unknown names show Top
        #[arg(long)]
        category: Option<String>,
    },
}
