//! # gaffer
//!
//! Who coaches that club? Fuzzy gazetteer matching plus a knowledge-base
//! lookup, packaged as a prompt for a language model.
//!
//! - **Matching**: bounded-window fuzzy substring search (`SpanMatcher`)
//! - **Detection**: club and city mentions from a gazetteer (`GazetteerNER`)
//! - **Resolution**: ranked lookup through a `KnowledgeBase` (`Pipeline`)
//! - **Evaluation**: accuracy over a labelled question set
//!
//! ## Quick Start
//!
//! ```rust
//! use gaffer::{Config, Pipeline};
//! use gaffer::kb::InMemoryKnowledgeBase;
//!
//! let kb = InMemoryKnowledgeBase::from_json(r#"[
//!     {"club_name": "FC Bayern Munich", "city_name": "Munich", "manager_name": "Vincent Kompany"}
//! ]"#).unwrap();
//!
//! let pipeline = Pipeline::from_source(&kb, kb.clone(), &Config::default()).unwrap();
//! let prompt = pipeline.process_query("Who is coaching Munich?").unwrap();
//! assert_eq!(prompt.manager_name(), Some("Vincent Kompany"));
//! ```
//!
//! ## Components
//!
//! | Module | Role |
//! |--------|------|
//! | [`similarity`] | normalized Indel ratio (0-100) |
//! | [`matcher`] | best window of a text for one pattern |
//! | [`gazetteer`] | club / city surface forms |
//! | [`predictor`] | all gazetteer hits in a text |
//! | [`kb`] | Wikidata client and in-memory store |
//! | [`pipeline`] | rank, resolve, build the prompt |
//! | [`eval`] | dataset accuracy |
//!
//! Everything in the matching path is immutable after construction and
//! `Send + Sync`. Parallelize across queries, not within one.

#![warn(missing_docs)]

pub mod config;
pub mod console;
pub mod eval;
pub mod gazetteer;
pub mod kb;
pub mod matcher;
pub mod pipeline;
pub mod predictor;
pub mod prompt;
pub mod similarity;

pub use config::Config;
pub use gazetteer::Gazetteer;
pub use kb::{ClubRecord, GazetteerSource, KnowledgeBase};
pub use matcher::SpanMatcher;
pub use pipeline::{Pipeline, QueryAnalysis};
pub use predictor::{GazetteerNER, MatchStats};
pub use prompt::PromptBuilder;

pub use gaffer_core::{
    ClubInfo, Confidence, EntityLabel, Error, ExtractedEntity, GazetteerMatch, PromptPackage,
    ResolvedClub, Result, SpanMatch,
};
