//! Query pipeline: predict, rank, resolve, package.
//!
//! ```text
//! query ──► GazetteerNER ──► ExtractedEntity (confidence = score/100)
//!                               │ stable sort, highest confidence first
//!                               ▼
//!           KnowledgeBase::get_club_info(entity.text)  (first hit wins)
//!                               │
//!              club + manager ──┴── otherwise
//!                   ▼                  ▼
//!            manager prompt       error prompt
//! ```
//!
//! Knowledge-base errors are returned to the caller untouched. A query that
//! resolves to nothing is not an error: it yields a failure
//! [`PromptPackage`].

use gaffer_core::{ExtractedEntity, PromptPackage, ResolvedClub, Result};
use serde::Serialize;

use crate::config::Config;
use crate::gazetteer::Gazetteer;
use crate::kb::{GazetteerSource, KnowledgeBase};
use crate::predictor::{GazetteerNER, MatchStats};
use crate::prompt::PromptBuilder;

/// Base failure message.
pub const NOT_FOUND_MESSAGE: &str = "No club or manager information found";

/// How many detected entity texts a failure message names.
pub const MAX_DETECTED_IN_MESSAGE: usize = 3;

/// Default cap on manager background length, in chars.
pub const DEFAULT_MAX_BACKGROUND_CHARS: usize = 400;

/// Intermediate state of one query, for debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryAnalysis {
    /// Detected entities, highest confidence first.
    pub entities: Vec<ExtractedEntity>,
    /// The club the first resolvable entity led to.
    pub resolved: Option<ResolvedClub>,
    /// Predictor counters.
    pub stats: MatchStats,
}

impl QueryAnalysis {
    /// Failure message naming up to three detected entities.
    #[must_use]
    pub fn failure_message(&self) -> String {
        if self.entities.is_empty() {
            return NOT_FOUND_MESSAGE.to_string();
        }
        let detected: Vec<&str> = self
            .entities
            .iter()
            .take(MAX_DETECTED_IN_MESSAGE)
            .map(|e| e.text.as_str())
            .collect();
        format!("{NOT_FOUND_MESSAGE} (detected: {})", detected.join(", "))
    }
}

/// End-to-end question pipeline over a knowledge base `K`.
#[derive(Debug, Clone)]
pub struct Pipeline<K> {
    ner: GazetteerNER,
    kb: K,
    prompts: PromptBuilder,
    max_background_chars: usize,
}

impl<K: KnowledgeBase> Pipeline<K> {
    /// Create a pipeline.
    #[must_use]
    pub fn new(ner: GazetteerNER, kb: K) -> Self {
        Self {
            ner,
            kb,
            prompts: PromptBuilder::new(),
            max_background_chars: DEFAULT_MAX_BACKGROUND_CHARS,
        }
    }

    /// Build the gazetteer from `source`, then wire everything per `config`.
    ///
    /// # Errors
    ///
    /// Propagates failures fetching the club list.
    pub fn from_source<S>(source: &S, kb: K, config: &Config) -> Result<Self>
    where
        S: GazetteerSource + ?Sized,
    {
        let records = source.club_records()?;
        let gazetteer = Gazetteer::from_records(&records);
        let ner = GazetteerNER::new(gazetteer, config.matcher.matcher());
        Ok(Self::new(ner, kb).with_max_background_chars(config.prompt.max_background_chars))
    }

    /// Cap the manager background embedded in the prompt.
    #[must_use]
    pub fn with_max_background_chars(mut self, max: usize) -> Self {
        self.max_background_chars = max;
        self
    }

    /// The predictor.
    #[must_use]
    pub fn ner(&self) -> &GazetteerNER {
        &self.ner
    }

    /// The knowledge base.
    #[must_use]
    pub fn knowledge_base(&self) -> &K {
        &self.kb
    }

    /// Detect, rank and resolve without building a prompt.
    ///
    /// # Errors
    ///
    /// Knowledge-base errors propagate.
    pub fn analyze(&self, query: &str) -> Result<QueryAnalysis> {
        log::info!("Processing query: {query}");
        let (matches, stats) = self.ner.predict_with_stats(query);

        let mut entities: Vec<ExtractedEntity> =
            matches.into_iter().map(ExtractedEntity::from).collect();
        entities.sort_by(|a, b| a.confidence.cmp_desc(&b.confidence));

        let mut resolved = None;
        for entity in entities.iter().filter(|e| e.label.is_resolvable()) {
            log::debug!(
                "Resolving {} '{}' (confidence {}) via {}",
                entity.label,
                entity.text,
                entity.confidence,
                self.kb.name()
            );
            if let Some(info) = self.kb.get_club_info(&entity.text)? {
                resolved = Some(ResolvedClub::from(info));
                break;
            }
        }

        Ok(QueryAnalysis {
            entities,
            resolved,
            stats,
        })
    }

    /// Answer a question with a prompt package.
    ///
    /// # Errors
    ///
    /// Knowledge-base errors propagate; an unresolved query is a failure
    /// package, not an error.
    pub fn process_query(&self, query: &str) -> Result<PromptPackage> {
        let analysis = self.analyze(query)?;
        Ok(self.package(query, &analysis))
    }

    /// Build the prompt for an already analyzed query.
    #[must_use]
    pub fn package(&self, query: &str, analysis: &QueryAnalysis) -> PromptPackage {
        if let Some(club) = &analysis.resolved {
            if let Some(manager) = club.manager() {
                let background = club
                    .manager_content
                    .as_deref()
                    .map(|text| truncate_chars(text, self.max_background_chars));
                return self.prompts.build_manager_prompt(
                    query,
                    &club.club_name,
                    club.city_name.as_deref(),
                    manager,
                    background,
                );
            }
            log::warn!("Resolved '{}' but it has no manager", club.club_name);
        }
        self.prompts
            .build_error_prompt(query, &analysis.failure_message())
    }
}

/// Prefix of `text` at most `max` chars long.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kb::{InMemoryKnowledgeBase, KnownClub};
    use crate::matcher::SpanMatcher;
    use gaffer_core::{ClubInfo, Confidence, EntityLabel};

    fn club(name: &str, city: &str, manager: Option<&str>) -> KnownClub {
        KnownClub {
            info: ClubInfo {
                club_name: name.into(),
                city_name: Some(city.into()),
                manager_name: manager.map(Into::into),
                ..ClubInfo::default()
            },
            aliases: Vec::new(),
        }
    }

    fn pipeline(clubs: Vec<KnownClub>) -> Pipeline<InMemoryKnowledgeBase> {
        let kb = InMemoryKnowledgeBase::new(clubs);
        Pipeline::from_source(&kb, kb.clone(), &Config::default()).unwrap()
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate_chars("Köln", 2), "Kö");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn failure_message_names_three() {
        let entity = |text: &str| ExtractedEntity {
            text: text.into(),
            start: 0,
            end: text.chars().count(),
            label: EntityLabel::Cities,
            confidence: Confidence::MAX,
            source: "gazetteer".into(),
        };
        let analysis = QueryAnalysis {
            entities: ["a", "b", "c", "d"].into_iter().map(entity).collect(),
            resolved: None,
            stats: MatchStats::default(),
        };
        assert_eq!(
            analysis.failure_message(),
            "No club or manager information found (detected: a, b, c)"
        );
    }

    #[test]
    fn resolves_city_to_club() {
        let p = pipeline(vec![club("FC Bayern Munich", "Munich", Some("Vincent Kompany"))]);
        let package = p.process_query("who is coaching munich").unwrap();
        assert!(!package.is_failure());
        assert_eq!(package.manager_name(), Some("Vincent Kompany"));
        assert_eq!(package.club_name(), Some("FC Bayern Munich"));
    }

    #[test]
    fn missing_manager_fails() {
        let p = pipeline(vec![club("Hamburger SV", "Hamburg", None)]);
        let package = p.process_query("who coaches hamburg").unwrap();
        assert!(package.is_failure());
        assert!(package.error().unwrap().contains("detected: hamburg"));
    }

    #[test]
    fn unknown_manager_placeholder_fails() {
        let p = pipeline(vec![club("Hamburger SV", "Hamburg", Some("Unknown Manager"))]);
        assert!(p.process_query("hamburg").unwrap().is_failure());
    }

    #[test]
    fn background_is_truncated() {
        let mut bayern = club("FC Bayern Munich", "Munich", Some("Vincent Kompany"));
        bayern.info.manager_content = Some("x".repeat(1000));
        let p = pipeline(vec![bayern]).with_max_background_chars(10);
        let package = p.process_query("munich").unwrap();
        assert_eq!(package.get("manager_info").map(str::len), Some(10));
    }

    #[test]
    fn analysis_ranks_by_confidence() {
        let gaz = Gazetteer::from_names(Vec::<&str>::new(), ["Mainz", "Bremen"]);
        let ner = GazetteerNER::new(gaz, SpanMatcher::new(80, 1));
        let p = Pipeline::new(ner, InMemoryKnowledgeBase::default());
        let analysis = p.analyze("bremn or mainz").unwrap();
        let confidences: Vec<f64> = analysis.entities.iter().map(|e| e.confidence.get()).collect();
        assert!(confidences.windows(2).all(|w| w[0] >= w[1]), "{confidences:?}");
        assert_eq!(analysis.entities[0].text, "mainz");
        assert!(analysis.resolved.is_none());
    }
}
