//! gaffer - who coaches that club?
//!
//! Detects club and city mentions in a question, resolves them against
//! Wikidata (or a local JSON knowledge base) and prints the answer.
//!
//! # Usage
//!
//! ```bash
//! # One question
//! gaffer ask "Who is coaching Leverkusn?"
//!
//! # Offline, against a local knowledge base
//! gaffer --kb-file clubs.json ask --json "who manages pauli"
//!
//! # Gazetteer matches only
//! gaffer --kb-file clubs.json extract "bremen or mainz"
//!
//! # Interactive console
//! gaffer chat
//!
//! # Accuracy on a labelled dataset
//! gaffer eval --dataset manager_dataset.json --type spelling_error --failures failed_queries.csv
//! ```

mod commands;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use commands::ask::AskArgs;
use commands::chat::ChatArgs;
use commands::config::ConfigArgs;
use commands::eval::EvalArgs;
use commands::extract::ExtractArgs;
use commands::GlobalArgs;
use output::color;

/// Fuzzy club detection and manager lookup
#[derive(Parser, Debug)]
#[command(name = "gaffer", version, about)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a question
    Ask(AskArgs),
    /// List gazetteer matches in a text
    Extract(ExtractArgs),
    /// Interactive console
    Chat(ChatArgs),
    /// Accuracy over a labelled dataset
    Eval(EvalArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    // RUST_LOG, when set, overrides the flag
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match cli.command {
        Commands::Ask(args) => commands::ask::run(args, &cli.global),
        Commands::Extract(args) => commands::extract::run(args, &cli.global),
        Commands::Chat(args) => commands::chat::run(args, &cli.global),
        Commands::Eval(args) => commands::eval::run(args, &cli.global),
        Commands::Config(args) => commands::config::run(args, &cli.global),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", color("31", "error:"), e);
            ExitCode::FAILURE
        }
    }
}
