//! Ask command - answer one question

use clap::Parser;
use gaffer::console::format_response;
use gaffer::QueryAnalysis;

use super::super::output::{color, confidence_bar, label_color};
use super::GlobalArgs;

/// Answer a question about a club's manager
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question
    #[arg(value_name = "QUERY", required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Print the prompt package as JSON
    #[arg(long)]
    pub json: bool,

    /// Also print detected entities
    #[arg(long)]
    pub debug: bool,
}

pub fn run(args: AskArgs, global: &GlobalArgs) -> Result<(), String> {
    let config = global.load_config()?;
    let pipeline = global.pipeline(&config)?;
    let query = args.query.join(" ");

    let analysis = pipeline.analyze(&query).map_err(|e| e.to_string())?;
    let package = pipeline.package(&query, &analysis);

    if args.json {
        let json = serde_json::to_string_pretty(&package)
            .map_err(|e| format!("Failed to serialize prompt: {}", e))?;
        println!("{}", json);
        return Ok(());
    }

    if args.debug {
        print_analysis(&analysis);
    }
    println!("{}", format_response(&package));
    Ok(())
}

/// Detected entities, ranking order, and the resolved club
pub fn print_analysis(analysis: &QueryAnalysis) {
    println!("{}", color("1;36", "Detected entities"));
    if analysis.entities.is_empty() {
        println!("  (none)");
    }
    for e in &analysis.entities {
        println!(
            "  {} {:<20} {} [{}..{})",
            confidence_bar(e.confidence),
            e.text,
            color(label_color(e.label), e.label.as_label()),
            e.start,
            e.end
        );
    }
    match &analysis.resolved {
        Some(club) => {
            println!("{} {}", color("1;36", "Resolved:"), club.club_name);
            for url in [&club.club_wikipedia_url, &club.manager_wikipedia_url]
                .into_iter()
                .flatten()
            {
                println!("  {}", color("90", url));
            }
        }
        None => println!("{} -", color("1;36", "Resolved:")),
    }
    println!(
        "{} {} entries, {} comparisons, {:.1?}",
        color("90", "Stats:"),
        analysis.stats.entries_scanned,
        analysis.stats.comparisons,
        analysis.stats.elapsed
    );
    println!();
}
