mod cli;
mod dedup;
mod error;
mod fingerprint;
mod fmt;
#[cfg(feature = "llm")]
mod llm;
mod models;
mod normalize;
mod pipeline;
mod reader;
mod rules;
mod settings;
mod taxonomy;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init { data_dir } => cli::init::run(data_dir),
        Commands::Clean {
            paths,
            output,
            column,
            merge_key,
            dedupe_key,
            limit,
        } => cli::clean::run(cli::clean::CleanArgs {
            paths,
            output,
            column,
            merge_key,
            dedupe_key,
            limit,
        }),
        Commands::Rules => cli::rules::run(),
        Commands::Categories => cli::categories::run(),
        Commands::Demo => cli::demo::run(),
        #[cfg(feature = "llm")]
        Commands::Ask { prompt, system } => cli::ask::run(&prompt, system.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
