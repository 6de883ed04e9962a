//! # gaffer-core
//!
//! Core types for the gaffer workspace: shared data structures used by the
//! library and the CLI.
//!
//! This crate provides:
//! - **Gazetteer labels**: `EntityLabel` (`CLUBS`, `CITIES`)
//! - **Matching results**: `SpanMatch`, `GazetteerMatch`, `ExtractedEntity`
//! - **Resolution results**: `ClubInfo`, `ResolvedClub`, `PromptPackage`
//! - **Confidence**: a witness type for scores bounded to [0.0, 1.0]
//!
//! Everything here is request-scoped data with no I/O.

pub mod confidence;
pub mod entity;
pub mod error;
pub mod prompt;

pub use confidence::Confidence;
pub use entity::{
    ClubInfo, EntityLabel, ExtractedEntity, GazetteerMatch, ResolvedClub, SpanMatch,
    GAZETTEER_SOURCE, UNKNOWN_MANAGER,
};
pub use error::{Error, Result};
pub use prompt::{PromptContext, PromptPackage};
