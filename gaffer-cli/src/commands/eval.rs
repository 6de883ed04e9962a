//! Eval command - accuracy over a labelled dataset

use std::path::PathBuf;

use clap::Parser;
use gaffer::eval::{evaluate, load_dataset};

use super::super::output::{color, metric_colored};
use super::GlobalArgs;

/// Measure answer accuracy over a JSON dataset
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Dataset: JSON array of {question, managerLabel, type}
    #[arg(long, short, value_name = "PATH")]
    pub dataset: PathBuf,

    /// Only run cases of this type (e.g. spelling_error)
    #[arg(long = "type", value_name = "TYPE")]
    pub question_type: Option<String>,

    /// Write failed cases as CSV
    #[arg(long, value_name = "PATH")]
    pub failures: Option<PathBuf>,
}

pub fn run(args: EvalArgs, global: &GlobalArgs) -> Result<(), String> {
    let cases = load_dataset(&args.dataset).map_err(|e| e.to_string())?;
    let config = global.load_config()?;
    let pipeline = global.pipeline(&config)?;

    let report = evaluate(&pipeline, &cases, args.question_type.as_deref());
    if report.total == 0 {
        return Err(format!(
            "No cases to evaluate in {}",
            args.dataset.display()
        ));
    }

    println!("{}", color("1;36", "EVALUATION"));
    println!("  Total queries:     {}", report.total);
    println!("  Correct responses: {}", report.correct);
    println!("  Accuracy:          {}%", metric_colored(report.accuracy()));
    println!("  Total time:        {:.2}s", report.elapsed.as_secs_f64());
    println!("  Per query:         {:.3}s", report.average().as_secs_f64());

    if let Some(path) = &args.failures {
        report.write_failures(path).map_err(|e| e.to_string())?;
        println!(
            "{} {} failed queries written to {}",
            color("32", "ok:"),
            report.failures.len(),
            path.display()
        );
    }
    Ok(())
}
