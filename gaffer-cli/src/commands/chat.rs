//! Chat command - interactive console

use std::io::{self, BufRead, Write};

use clap::Parser;
use gaffer::console::{format_response, Command, DEGRADED_MESSAGE, HELP_TEXT};

use super::super::output::color;
use super::ask::print_analysis;
use super::{DynPipeline, GlobalArgs};

/// Ask questions interactively
#[derive(Parser, Debug)]
pub struct ChatArgs {
    /// Start with entity debugging on
    #[arg(long)]
    pub debug: bool,
}

pub fn run(args: ChatArgs, global: &GlobalArgs) -> Result<(), String> {
    let config = global.load_config()?;
    let pipeline = global.pipeline(&config)?;

    print_welcome();
    let stdin = io::stdin();
    chat_loop(&pipeline, stdin.lock(), args.debug)
}

fn print_welcome() {
    println!("{}", color("1;36", "BUNDESLIGA COACHING ASSISTANT"));
    println!("{}", HELP_TEXT);
}

fn chat_loop<R: BufRead>(pipeline: &DynPipeline, mut input: R, mut debug: bool) -> Result<(), String> {
    let mut line = String::new();
    loop {
        print!("\nYour question: ");
        io::stdout()
            .flush()
            .map_err(|e| format!("Failed to flush stdout: {}", e))?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .map_err(|e| format!("Failed to read input: {}", e))?;
        if read == 0 {
            println!();
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            continue;
        }

        if let Some(cmd) = Command::parse(query) {
            match cmd {
                Command::Quit => break,
                Command::Debug => {
                    debug = !debug;
                    println!("Debug mode {}", if debug { "ON" } else { "OFF" });
                }
                Command::Help => print_welcome(),
                Command::Unknown(other) => {
                    println!("{} unknown command {}", color("33", "warning:"), other)
                }
            }
            continue;
        }

        match pipeline.analyze(query) {
            Ok(analysis) => {
                if debug {
                    print_analysis(&analysis);
                }
                println!("{}", format_response(&pipeline.package(query, &analysis)));
            }
            Err(e) => {
                log::error!("Error processing query: {}", e);
                println!("{}", DEGRADED_MESSAGE);
            }
        }
    }
    println!("Goodbye!");
    Ok(())
}
