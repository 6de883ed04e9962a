//! Gazetteer entity predictor.
//!
//! Runs the span matcher once per `(label, surface form)` pair and keeps
//! every hit. Overlapping hits are NOT deduplicated: "munich" may come back
//! both as a club token and as a city. Ranking happens in the pipeline.

use std::time::{Duration, Instant};

use gaffer_core::GazetteerMatch;
use serde::Serialize;

use crate::gazetteer::Gazetteer;
use crate::matcher::{fold_lowercase, SpanMatcher};

/// Counters from one prediction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    /// Gazetteer entries the matcher ran against.
    pub entries_scanned: usize,
    /// Entries rejected as invalid matcher input.
    pub entries_skipped: usize,
    /// Window comparisons performed.
    pub comparisons: usize,
    /// Matches at or above the threshold.
    pub matches: usize,
    /// Wall-clock time of the pass.
    pub elapsed: Duration,
}

/// Fuzzy gazetteer NER.
#[derive(Debug, Clone)]
pub struct GazetteerNER {
    gazetteer: Gazetteer,
    matcher: SpanMatcher,
}

impl GazetteerNER {
    /// Create a predictor over `gazetteer`.
    #[must_use]
    pub fn new(gazetteer: Gazetteer, matcher: SpanMatcher) -> Self {
        log::info!(
            "Initialized GazetteerNER with {} surface forms, threshold={}, max_deviation={}",
            gazetteer.len(),
            matcher.threshold(),
            matcher.max_deviation()
        );
        Self { gazetteer, matcher }
    }

    /// The underlying gazetteer.
    #[must_use]
    pub fn gazetteer(&self) -> &Gazetteer {
        &self.gazetteer
    }

    /// The span matcher configuration.
    #[must_use]
    pub fn matcher(&self) -> &SpanMatcher {
        &self.matcher
    }

    /// All gazetteer matches in `text`.
    ///
    /// Output order is gazetteer order (clubs, then cities, each sorted) and
    /// says nothing about ranking.
    #[must_use]
    pub fn predict(&self, text: &str) -> Vec<GazetteerMatch> {
        self.predict_with_stats(text).0
    }

    /// [`predict`](Self::predict) plus pass counters.
    #[must_use]
    pub fn predict_with_stats(&self, text: &str) -> (Vec<GazetteerMatch>, MatchStats) {
        let started = Instant::now();
        let original: Vec<char> = text.chars().collect();
        let folded = fold_lowercase(text);

        let mut stats = MatchStats::default();
        let mut matches = Vec::new();

        for (label, form) in self.gazetteer.iter() {
            stats.entries_scanned += 1;
            let pattern = fold_lowercase(form);
            // Gazetteer never stores an empty form through its public API.
            let scan = match self.matcher.scan(&folded, &pattern) {
                Ok(scan) => scan,
                Err(e) => {
                    log::warn!("Skipping gazetteer entry {label}:{form:?}: {e}");
                    stats.entries_skipped += 1;
                    continue;
                }
            };
            stats.comparisons += scan.comparisons;

            if let Some(span) = scan.best {
                log::debug!(
                    "Matched {label}:{form:?} at {}..{} (score {:.1})",
                    span.start,
                    span.end,
                    span.score
                );
                matches.push(GazetteerMatch {
                    text: original[span.start..span.end].iter().collect(),
                    start: span.start,
                    end: span.end,
                    label,
                    score: span.score,
                    surface_form: form.to_string(),
                });
            }
        }

        stats.matches = matches.len();
        stats.elapsed = started.elapsed();
        log::info!(
            "Gazetteer predicted {} entities ({} comparisons) in text: {:?}",
            stats.matches,
            stats.comparisons,
            text
        );
        (matches, stats)
    }
}
