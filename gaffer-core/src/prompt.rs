//! Structured prompt output.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context mapping attached to a prompt. `None` values serialize as `null`.
pub type PromptContext = BTreeMap<String, Option<String>>;

/// Final output of a query: system message, user message and the context
/// that was injected into them.
///
/// Built once per request; there are no mutating methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPackage {
    system: String,
    user: String,
    context: PromptContext,
}

impl PromptPackage {
    /// Context key present only on failure prompts.
    pub const ERROR_KEY: &'static str = "error";

    /// Assemble a prompt package.
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>, context: PromptContext) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            context,
        }
    }

    /// System message.
    #[must_use]
    pub fn system(&self) -> &str {
        &self.system
    }

    /// User message.
    #[must_use]
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Context mapping.
    #[must_use]
    pub fn context(&self) -> &PromptContext {
        &self.context
    }

    /// Look up a non-null context value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.context.get(key).and_then(|v| v.as_deref())
    }

    /// Error message of a failure prompt.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.get(Self::ERROR_KEY)
    }

    /// True when this package explains a resolution failure.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        self.context.contains_key(Self::ERROR_KEY)
    }

    /// Club name from a success context.
    #[must_use]
    pub fn club_name(&self) -> Option<&str> {
        self.get("club_name")
    }

    /// Manager name from a success context.
    #[must_use]
    pub fn manager_name(&self) -> Option<&str> {
        self.get("manager_name")
    }
}
