//! In-memory knowledge base loaded from JSON.
//!
//! File format: a JSON array of clubs.
//!
//! ```json
//! [
//!   {
//!     "club_name": "Bayer 04 Leverkusen",
//!     "city_name": "Leverkusen",
//!     "manager_name": "Kasper Hjulmand",
//!     "aliases": ["Werkself"],
//!     "manager_content": "Danish football manager..."
//!   }
//! ]
//! ```

use std::fs;
use std::path::Path;

use gaffer_core::{ClubInfo, Error, Result};
use serde::{Deserialize, Serialize};

use super::{ClubRecord, GazetteerSource, KnowledgeBase};

/// One club entry of an in-memory knowledge base.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct KnownClub {
    /// Club record as returned by lookups.
    #[serde(flatten)]
    pub info: ClubInfo,
    /// Extra names the club is searchable by.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
}

impl KnownClub {
    fn matches(&self, needle: &str) -> bool {
        let hit = |name: &str| name.to_lowercase().contains(needle);
        hit(self.info.club_name.as_str())
            || self.info.city_name.as_deref().is_some_and(hit)
            || self.aliases.iter().any(|a| hit(a.as_str()))
    }
}

/// Knowledge base over a fixed list of clubs.
///
/// Lookup is a case-insensitive containment match of the search text
/// against club name, city and aliases; the first listed club wins.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKnowledgeBase {
    clubs: Vec<KnownClub>,
}

impl InMemoryKnowledgeBase {
    /// Create from club entries.
    #[must_use]
    pub fn new(clubs: Vec<KnownClub>) -> Self {
        Self { clubs }
    }

    /// Parse a JSON array of clubs.
    ///
    /// # Errors
    ///
    /// [`Error::Parse`] if the JSON does not match the format.
    pub fn from_json(json: &str) -> Result<Self> {
        let clubs: Vec<KnownClub> = serde_json::from_str(json)
            .map_err(|e| Error::parse(format!("invalid knowledge base JSON: {e}")))?;
        Ok(Self::new(clubs))
    }

    /// Load a JSON knowledge-base file.
    ///
    /// # Errors
    ///
    /// IO errors reading the file, [`Error::Parse`] for bad JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let kb = Self::from_json(&content)?;
        log::info!("Loaded {} clubs from {}", kb.clubs.len(), path.display());
        Ok(kb)
    }

    /// Club entries.
    #[must_use]
    pub fn clubs(&self) -> &[KnownClub] {
        &self.clubs
    }
}

impl KnowledgeBase for InMemoryKnowledgeBase {
    fn get_club_info(&self, search_text: &str) -> Result<Option<ClubInfo>> {
        let needle = search_text.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }
        let found = self.clubs.iter().find(|c| c.matches(&needle));
        match found {
            Some(club) => log::info!("Found club '{}' for '{}'", club.info.club_name, search_text),
            None => log::warn!("No club found matching '{search_text}'"),
        }
        Ok(found.map(|c| c.info.clone()))
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

impl GazetteerSource for InMemoryKnowledgeBase {
    fn club_records(&self) -> Result<Vec<ClubRecord>> {
        Ok(self
            .clubs
            .iter()
            .map(|c| ClubRecord {
                club_name: c.info.club_name.clone(),
                city_name: c.info.city_name.clone(),
            })
            .collect())
    }
}
