//! Knowledge-base collaborators.
//!
//! Two seams, both synchronous and shareable across threads:
//!
//! - [`GazetteerSource`]: the list of clubs and home cities, read once at
//!   startup to build the [`Gazetteer`](crate::Gazetteer).
//! - [`KnowledgeBase`]: resolves a detected mention to a club record.
//!
//! Implementations:
//!
//! | Type | Backing | Use |
//! |------|---------|-----|
//! | [`WikidataClient`] | Wikidata SPARQL + Wikipedia extracts over HTTP | production |
//! | [`InMemoryKnowledgeBase`] | JSON file or literal records | offline runs, tests |
//!
//! Errors from a lookup are [`gaffer_core::Error::Collaborator`] and are
//! never retried here.

mod memory;
mod wikidata;

use gaffer_core::{ClubInfo, Result};
use serde::{Deserialize, Serialize};

pub use memory::{InMemoryKnowledgeBase, KnownClub};
pub use wikidata::{article_url, sanitize_search_term, WikidataClient, WikipediaIntro};

/// A club and its home city, as listed by the gazetteer source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClubRecord {
    /// Club label.
    pub club_name: String,
    /// Headquarters city label.
    #[serde(default)]
    pub city_name: Option<String>,
}

/// Resolves a text mention to a club record.
pub trait KnowledgeBase: Send + Sync {
    /// Look up the club best matching `search_text`.
    ///
    /// `Ok(None)` means the lookup worked and found nothing.
    fn get_club_info(&self, search_text: &str) -> Result<Option<ClubInfo>>;

    /// Backend identifier for logs.
    fn name(&self) -> &'static str;
}

/// Supplies the raw club/city names for the gazetteer.
pub trait GazetteerSource: Send + Sync {
    /// All clubs with their home cities.
    fn club_records(&self) -> Result<Vec<ClubRecord>>;
}

impl<T: KnowledgeBase + ?Sized> KnowledgeBase for &T {
    fn get_club_info(&self, search_text: &str) -> Result<Option<ClubInfo>> {
        (**self).get_club_info(search_text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: KnowledgeBase + ?Sized> KnowledgeBase for Box<T> {
    fn get_club_info(&self, search_text: &str) -> Result<Option<ClubInfo>> {
        (**self).get_club_info(search_text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<T: KnowledgeBase + ?Sized> KnowledgeBase for std::sync::Arc<T> {
    fn get_club_info(&self, search_text: &str) -> Result<Option<ClubInfo>> {
        (**self).get_club_info(search_text)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
