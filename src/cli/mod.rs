#[cfg(feature = "llm")]
pub mod ask;
pub mod categories;
pub mod clean;
pub mod demo;
pub mod init;
pub mod rules;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tally",
    about = "Cleans, de-duplicates, and classifies personal-finance CSV exports."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up tally: choose the directory your exports live in.
    Init {
        /// Path for transaction exports (default: ~/Documents/tally)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Clean one or more CSV exports and print the classified table.
    Clean {
        /// CSV files or directories to scan (default: the configured data directory)
        paths: Vec<String>,
        /// Write the cleaned table to a CSV file
        #[arg(long)]
        output: Option<String>,
        /// Column name for the assigned category (default from settings)
        #[arg(long)]
        column: Option<String>,
        /// Grouping column for the same-file merge
        #[arg(long, default_value = "ProvenanceFingerprint")]
        merge_key: String,
        /// Grouping column for cross-file de-duplication
        #[arg(long, default_value = "ContentFingerprint")]
        dedupe_key: String,
        /// Preview at most this many rows
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// List the classification rules in evaluation order.
    Rules,
    /// Show the category taxonomy as dotted paths.
    Categories,
    /// Run the pipeline over bundled sample exports.
    Demo,
    /// Ask the configured model a quick question.
    #[cfg(feature = "llm")]
    Ask {
        prompt: String,
        /// Optional system message
        #[arg(long)]
        system: Option<String>,
    },
}
