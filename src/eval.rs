//! Accuracy evaluation over a labelled question set.
//!
//! # Dataset format
//!
//! ```json
//! [
//!   {"question": "Who coaches Leverkusn?", "managerLabel": "Kasper Hjulmand", "type": "spelling_error"}
//! ]
//! ```
//!
//! A case is correct when the expected manager is a case-insensitive
//! substring of the `manager_name` the pipeline put in the prompt context.
//! Cases run in parallel across queries.
//!
//! Misses are written as CSV with the columns in [`FAILURE_HEADER`].

use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::{Duration, Instant};

use gaffer_core::{Error, Result};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::kb::KnowledgeBase;
use crate::pipeline::Pipeline;

/// Column names of the failures CSV.
pub const FAILURE_HEADER: [&str; 5] = ["id", "question", "expected", "response", "type"];

/// One labelled question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalCase {
    /// Natural-language question.
    pub question: String,
    /// Expected manager label.
    #[serde(rename = "managerLabel")]
    pub manager_label: String,
    /// Question category, e.g. `spelling_error`.
    #[serde(rename = "type", default)]
    pub question_type: String,
}

/// Parse a JSON dataset.
///
/// # Errors
///
/// [`Error::Dataset`] when the JSON is malformed.
pub fn parse_dataset(json: &str) -> Result<Vec<EvalCase>> {
    serde_json::from_str(json).map_err(|e| Error::dataset(format!("invalid dataset: {e}")))
}

/// Load a JSON dataset file.
///
/// # Errors
///
/// [`Error::Dataset`] when the file is unreadable or malformed.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<EvalCase>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| Error::dataset(format!("failed to read {}: {e}", path.display())))?;
    let cases = parse_dataset(&content)?;
    log::info!("Loaded {} cases from {}", cases.len(), path.display());
    Ok(cases)
}

/// A case the pipeline got wrong.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalFailure {
    /// Position in the full dataset.
    pub index: usize,
    /// The question asked.
    pub question: String,
    /// Expected manager label.
    pub expected: String,
    /// Manager name produced, or the error text.
    pub response: String,
    /// Question category.
    #[serde(rename = "type")]
    pub question_type: String,
}

/// Aggregate result of an evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvalReport {
    /// Cases run.
    pub total: usize,
    /// Cases answered correctly.
    pub correct: usize,
    /// Wall-clock time of the run.
    pub elapsed: Duration,
    /// Misses, in dataset order.
    pub failures: Vec<EvalFailure>,
}

impl EvalReport {
    /// Percentage correct; 0 for an empty run.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f64 / self.total as f64 * 100.0
        }
    }

    /// Mean wall-clock time per case.
    #[must_use]
    pub fn average(&self) -> Duration {
        match u32::try_from(self.total) {
            Ok(n) if n > 0 => self.elapsed / n,
            _ => Duration::ZERO,
        }
    }

    /// Write failures as CSV, header first.
    ///
    /// # Errors
    ///
    /// IO errors creating or writing the file.
    pub fn write_failures(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = File::create(path.as_ref())?;
        self.write_failures_to(file)
    }

    /// Write failures as CSV to any writer.
    ///
    /// # Errors
    ///
    /// IO errors from the writer.
    pub fn write_failures_to<W: Write>(&self, out: W) -> Result<()> {
        let csv_err = |e: csv::Error| Error::dataset(format!("failed to write failures CSV: {e}"));
        let mut wtr = csv::Writer::from_writer(out);
        wtr.write_record(FAILURE_HEADER).map_err(csv_err)?;
        for failure in &self.failures {
            wtr.write_record([
                failure.index.to_string().as_str(),
                failure.question.as_str(),
                failure.expected.as_str(),
                failure.response.as_str(),
                failure.question_type.as_str(),
            ])
            .map_err(csv_err)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl fmt::Display for EvalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total queries: {}", self.total)?;
        writeln!(f, "Correct responses: {}", self.correct)?;
        writeln!(f, "Accuracy: {:.2}%", self.accuracy())?;
        writeln!(f, "Total time: {:.2} seconds", self.elapsed.as_secs_f64())?;
        write!(
            f,
            "Average time per query: {:.3} seconds",
            self.average().as_secs_f64()
        )
    }
}

/// Whether `response` names the expected manager.
#[must_use]
pub fn is_hit(expected: &str, response: &str) -> bool {
    response.to_lowercase().contains(&expected.to_lowercase())
}

/// Run `cases` (optionally only those of `question_type`) through `pipeline`.
///
/// Knowledge-base errors count as misses with the error text as response.
pub fn evaluate<K: KnowledgeBase>(
    pipeline: &Pipeline<K>,
    cases: &[EvalCase],
    question_type: Option<&str>,
) -> EvalReport {
    let started = Instant::now();
    let selected: Vec<(usize, &EvalCase)> = cases
        .iter()
        .enumerate()
        .filter(|(_, c)| question_type.map_or(true, |t| c.question_type == t))
        .collect();
    log::info!("Evaluating {} of {} cases", selected.len(), cases.len());

    let outcomes: Vec<Option<EvalFailure>> = selected
        .par_iter()
        .map(|&(index, case)| {
            let response = match pipeline.process_query(&case.question) {
                Ok(package) => package.manager_name().unwrap_or_default().to_string(),
                Err(e) => {
                    log::warn!("Case {index} failed: {e}");
                    e.to_string()
                }
            };
            if is_hit(&case.manager_label, &response) {
                None
            } else {
                Some(EvalFailure {
                    index,
                    question: case.question.clone(),
                    expected: case.manager_label.clone(),
                    response,
                    question_type: case.question_type.clone(),
                })
            }
        })
        .collect();

    let total = outcomes.len();
    let failures: Vec<EvalFailure> = outcomes.into_iter().flatten().collect();
    EvalReport {
        total,
        correct: total - failures.len(),
        elapsed: started.elapsed(),
        failures,
    }
}
