//! Configuration loaded from TOML.
//!
//! ```toml
//! [matcher]
//! threshold = 90
//! max_deviation = 3
//!
//! [wikidata]
//! timeout_secs = 30
//! include_wikipedia = true
//!
//! [prompt]
//! max_background_chars = 400
//! ```
//!
//! Every key is optional. Lookup order: explicit path, then
//! `<config dir>/gaffer/config.toml`, then built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use gaffer_core::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::matcher::{SpanMatcher, DEFAULT_MAX_DEVIATION, DEFAULT_THRESHOLD};

/// Config file name inside the per-user config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `[matcher]`
    pub matcher: MatcherConfig,
    /// `[wikidata]`
    pub wikidata: WikidataConfig,
    /// `[prompt]`
    pub prompt: PromptConfig,
}

/// Span matcher parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatcherConfig {
    /// Minimum similarity (0-100). Values above 100 disable matching.
    pub threshold: u32,
    /// Maximum window length deviation from the pattern length.
    pub max_deviation: usize,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            max_deviation: DEFAULT_MAX_DEVIATION,
        }
    }
}

impl MatcherConfig {
    /// Build the span matcher.
    #[must_use]
    pub fn matcher(&self) -> SpanMatcher {
        SpanMatcher::new(self.threshold, self.max_deviation)
    }
}

/// Wikidata / Wikipedia endpoints and HTTP behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WikidataConfig {
    /// SPARQL query service.
    pub sparql_endpoint: String,
    /// Wikidata action API (`wbgetentities`).
    pub api_endpoint: String,
    /// Wikipedia action API (`extracts`).
    pub wikipedia_endpoint: String,
    /// `User-Agent` header sent with every request.
    pub user_agent: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Fetch Wikipedia intros for club and manager.
    pub include_wikipedia: bool,
    /// SPARQL `LIMIT` for club search (capped at 10).
    pub search_limit: usize,
}

impl Default for WikidataConfig {
    fn default() -> Self {
        Self {
            sparql_endpoint: "https://query.wikidata.org/sparql".to_string(),
            api_endpoint: "https://www.wikidata.org/w/api.php".to_string(),
            wikipedia_endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            user_agent: concat!("gaffer/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_secs: 30,
            include_wikipedia: true,
            search_limit: 1,
        }
    }
}

/// Prompt assembly limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PromptConfig {
    /// Manager background is cut to this many characters.
    pub max_background_chars: usize,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            max_background_chars: 400,
        }
    }
}

impl Config {
    /// Parse TOML and validate.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] on syntax errors, unknown keys or invalid values.
    pub fn from_toml(s: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| Error::config(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        log::debug!("Loading config from {}", path.display());
        Self::from_toml(&content)
    }

    /// Resolve the effective configuration.
    ///
    /// An explicit path must exist; the per-user file is optional.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] when a file exists but is invalid.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_path(path),
            _ => Ok(Self::default()),
        }
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] naming the offending key.
    pub fn validate(&self) -> Result<()> {
        if self.wikidata.timeout_secs == 0 {
            return Err(Error::config("wikidata.timeout_secs must be positive"));
        }
        if self.wikidata.search_limit == 0 {
            return Err(Error::config("wikidata.search_limit must be positive"));
        }
        if self.matcher.threshold > 100 {
            log::warn!(
                "matcher.threshold = {} is above 100; nothing will match",
                self.matcher.threshold
            );
        }
        Ok(())
    }

    /// Serialize back to TOML.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(format!("failed to serialize: {e}")))
    }
}

/// `<config dir>/gaffer/config.toml`, if the platform has a config dir.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut dir| {
        dir.push("gaffer");
        dir.push(CONFIG_FILE);
        dir
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_toml_is_default() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matcher.threshold, 90);
        assert_eq!(config.matcher.max_deviation, 3);
        assert_eq!(config.prompt.max_background_chars, 400);
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config = Config::from_toml("[matcher]\nthreshold = 85\n").unwrap();
        assert_eq!(config.matcher.threshold, 85);
        assert_eq!(config.matcher.max_deviation, 3);
        assert!(config.wikidata.include_wikipedia);
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = Config::from_toml("[matcher]\nthresh = 85\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = Config::from_toml("[wikidata]\ntimeout_secs = 0\n").unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn zero_search_limit_rejected() {
        assert!(Config::from_toml("[wikidata]\nsearch_limit = 0\n").is_err());
    }

    #[test]
    fn high_threshold_is_accepted() {
        let config = Config::from_toml("[matcher]\nthreshold = 150\n").unwrap();
        assert_eq!(config.matcher.matcher().threshold(), 150);
    }

    #[test]
    fn toml_roundtrip() {
        let mut config = Config::default();
        config.matcher.max_deviation = 1;
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn load_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[prompt]\nmax_background_chars = 120").unwrap();
        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.prompt.max_background_chars, 120);
    }

    #[test]
    fn load_missing_explicit_file_fails() {
        let err = Config::load(Some(Path::new("/nonexistent/gaffer.toml"))).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
