//! Extract command - list gazetteer matches in a text

use clap::Parser;

use super::super::output::{color, label_color};
use super::GlobalArgs;

/// List club and city mentions found in a text
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Text to scan
    #[arg(value_name = "TEXT", required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Print matches as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ExtractArgs, global: &GlobalArgs) -> Result<(), String> {
    let config = global.load_config()?;
    let pipeline = global.pipeline(&config)?;
    let text = args.text.join(" ");

    let (matches, stats) = pipeline.ner().predict_with_stats(&text);

    if args.json {
        let json = serde_json::to_string_pretty(&matches)
            .map_err(|e| format!("Failed to serialize matches: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    if matches.is_empty() {
        println!("No matches.");
        return Ok(());
    }
    for m in &matches {
        println!(
            "{:>3}..{:<3} {:<7} {:5.1}  {:?} ~ {:?}",
            m.start,
            m.end,
            color(label_color(m.label), m.label.as_label()),
            m.score,
            m.text,
            m.surface_form
        );
    }
    log::info!(
        "{} matches from {} gazetteer entries in {:?}",
        stats.matches,
        stats.entries_scanned,
        stats.elapsed
    );
    Ok(())
}
