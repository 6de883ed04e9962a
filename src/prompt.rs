//! Prompt assembly: turns a resolved club (or a failure) into the
//! `(system, user, context)` triple handed to a language model.

use gaffer_core::{PromptContext, PromptPackage};

/// System message for answers backed by resolved context.
pub const MANAGER_SYSTEM_PROMPT: &str = "You are a German Bundesliga football expert assistant. \
You have access to current, verified information about football clubs and their coaches. \
Answer questions about coaches clearly and concisely using only the provided context. \
Be specific about coach names and include relevant background information.";

/// System message when the required information could not be found.
pub const ERROR_SYSTEM_PROMPT: &str = "You are a helpful assistant for German Bundesliga information. \
When you cannot access the required information, explain the limitation clearly and suggest alternatives.";

/// Placeholder for a missing manager background.
pub const NO_BACKGROUND: &str = "Additional information not available";

/// Placeholder for a missing city.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Builds [`PromptPackage`]s. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    /// Create a builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Success prompt for a resolved club with a known manager.
    ///
    /// ```rust
    /// use gaffer::PromptBuilder;
    ///
    /// let p = PromptBuilder::new().build_manager_prompt(
    ///     "who coaches mainz?",
    ///     "1. FSV Mainz 05",
    ///     Some("Mainz"),
    ///     "Bo Henriksen",
    ///     None,
    /// );
    /// assert_eq!(p.manager_name(), Some("Bo Henriksen"));
    /// assert!(p.user().ends_with("USER QUESTION: who coaches mainz?"));
    /// ```
    #[must_use]
    pub fn build_manager_prompt(
        &self,
        query: &str,
        club_name: &str,
        city_name: Option<&str>,
        manager_name: &str,
        manager_info: Option<&str>,
    ) -> PromptPackage {
        let user = format!(
            "CONTEXT: Club: {club_name} City: {} Current Manager: {manager_name} \
             Manager Background: {} USER QUESTION: {query}",
            city_name.unwrap_or(UNKNOWN_CITY),
            manager_info.unwrap_or(NO_BACKGROUND),
        );

        let mut context = PromptContext::new();
        context.insert("club_name".into(), Some(club_name.to_string()));
        context.insert("city_name".into(), city_name.map(str::to_string));
        context.insert("manager_name".into(), Some(manager_name.to_string()));
        context.insert("manager_info".into(), manager_info.map(str::to_string));

        PromptPackage::new(MANAGER_SYSTEM_PROMPT, user, context)
    }

    /// Failure prompt. The context holds only the `error` key.
    #[must_use]
    pub fn build_error_prompt(&self, query: &str, error_msg: &str) -> PromptPackage {
        let user = format!(
            "I asked: {query} System message: {error_msg} \
             Please explain why this information isn't available and suggest how I can rephrase my question."
        );

        let mut context = PromptContext::new();
        context.insert(PromptPackage::ERROR_KEY.into(), Some(error_msg.to_string()));

        PromptPackage::new(ERROR_SYSTEM_PROMPT, user, context)
    }

    /// The context mapping alone, for logging.
    #[must_use]
    pub fn context_only<'a>(&self, package: &'a PromptPackage) -> &'a PromptContext {
        package.context()
    }
}
