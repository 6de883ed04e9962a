//! Entity types: gazetteer labels, span matches, extracted entities and
//! resolved clubs.
//!
//! # Lifecycle
//!
//! ```text
//! SpanMatch ──► GazetteerMatch ──► ExtractedEntity ──► ResolvedClub
//! (matcher)      (predictor)        (pipeline rank)     (KB lookup)
//! ```
//!
//! All offsets are character offsets (NOT byte offsets) into the original
//! query text.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use crate::Confidence;

/// Provenance tag for entities produced by the fuzzy gazetteer matcher.
pub const GAZETTEER_SOURCE: &str = "gazetteer";

/// Placeholder manager name the knowledge base reports when a club has no
/// head coach label. Treated as "no manager" downstream.
pub const UNKNOWN_MANAGER: &str = "Unknown Manager";

/// Gazetteer label (entity type).
///
/// Declaration order is the gazetteer iteration order: clubs first, then
/// cities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityLabel {
    /// Club names and their most distinctive token.
    Clubs,
    /// Club home cities and their first token.
    Cities,
}

impl EntityLabel {
    /// All labels in iteration order.
    pub const ALL: [EntityLabel; 2] = [EntityLabel::Clubs, EntityLabel::Cities];

    /// Canonical label string (`CLUBS` / `CITIES`).
    #[must_use]
    pub const fn as_label(&self) -> &'static str {
        match self {
            EntityLabel::Clubs => "CLUBS",
            EntityLabel::Cities => "CITIES",
        }
    }

    /// Whether entities with this label may be sent to the club lookup.
    #[must_use]
    pub const fn is_resolvable(&self) -> bool {
        matches!(self, EntityLabel::Clubs | EntityLabel::Cities)
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Best-matching window found by the span matcher.
///
/// `start..end` is half-open, in characters. `score` is on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpanMatch {
    /// Start position (character offset).
    pub start: usize,
    /// End position (character offset, exclusive).
    pub end: usize,
    /// Similarity score, 0-100.
    pub score: f64,
}

impl SpanMatch {
    /// Window length in characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True for a zero-width window.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// One raw predictor hit: a text window plus the gazetteer entry it matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GazetteerMatch {
    /// Matched substring of the original (not lowercased) text.
    pub text: String,
    /// Start position (character offset).
    pub start: usize,
    /// End position (character offset, exclusive).
    pub end: usize,
    /// Label of the gazetteer entry.
    pub label: EntityLabel,
    /// Similarity score, 0-100.
    pub score: f64,
    /// The gazetteer surface form that produced this match.
    pub surface_form: String,
}

/// An entity detected in a query, ready for ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntity {
    /// Surface text as it appears in the query.
    pub text: String,
    /// Start position (character offset).
    pub start: usize,
    /// End position (character offset, exclusive).
    pub end: usize,
    /// Gazetteer label.
    pub label: EntityLabel,
    /// Match score normalized to [0, 1].
    pub confidence: Confidence,
    /// Which extractor produced this entity.
    pub source: Cow<'static, str>,
}

impl From<GazetteerMatch> for ExtractedEntity {
    fn from(m: GazetteerMatch) -> Self {
        Self {
            confidence: Confidence::from_score(m.score),
            text: m.text,
            start: m.start,
            end: m.end,
            label: m.label,
            source: Cow::Borrowed(GAZETTEER_SOURCE),
        }
    }
}

/// Club record as returned by the knowledge-base lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClubInfo {
    /// Club label, e.g. "FC Bayern Munich".
    pub club_name: String,
    /// Head coach label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_name: Option<String>,
    /// Home city label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city_name: Option<String>,
    /// Encyclopedia intro for the club.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_content: Option<String>,
    /// Encyclopedia intro for the manager.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_content: Option<String>,
    /// Article the club intro came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub club_wikipedia_url: Option<String>,
    /// Article the manager intro came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_wikipedia_url: Option<String>,
}

/// The club a query resolved to.
///
/// Same fields as [`ClubInfo`], kept separate so the lookup record and the
/// pipeline result can evolve independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedClub {
    /// Club label.
    pub club_name: String,
    /// Home city, when the knowledge base has one.
    pub city_name: Option<String>,
    /// Raw head coach label; see [`ResolvedClub::manager`].
    pub manager_name: Option<String>,
    /// Club intro text.
    pub club_content: Option<String>,
    /// Manager intro text.
    pub manager_content: Option<String>,
    /// Club article URL.
    pub club_wikipedia_url: Option<String>,
    /// Manager article URL.
    pub manager_wikipedia_url: Option<String>,
}

impl ResolvedClub {
    /// Manager name, if the knowledge base reported a real one.
    ///
    /// Empty names and the [`UNKNOWN_MANAGER`] placeholder count as absent.
    #[must_use]
    pub fn manager(&self) -> Option<&str> {
        self.manager_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty() && *name != UNKNOWN_MANAGER)
    }
}

impl From<ClubInfo> for ResolvedClub {
    fn from(info: ClubInfo) -> Self {
        Self {
            club_name: info.club_name,
            city_name: info.city_name,
            manager_name: info.manager_name,
            club_content: info.club_content,
            manager_content: info.manager_content,
            club_wikipedia_url: info.club_wikipedia_url,
            manager_wikipedia_url: info.manager_wikipedia_url,
        }
    }
}
