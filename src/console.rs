//! Interactive console helpers: command parsing and answer formatting.
//!
//! The read loop itself lives in the binary; everything here is pure.

use std::fmt;

use gaffer_core::{PromptPackage, UNKNOWN_MANAGER};

/// Shown when a query fails because a collaborator is unavailable.
pub const DEGRADED_MESSAGE: &str =
    "Sorry, the club database is unavailable right now. Please try again in a moment.";

/// Answer when nothing could be resolved.
pub const NO_CLUB_MESSAGE: &str =
    "I couldn't identify a specific Bundesliga club from your question.";

/// Help text listing the commands.
pub const HELP_TEXT: &str = "Ask about current Bundesliga coaches or clubs.\n\
Commands: /debug, /help, /quit, /exit";

/// A slash command typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/quit`, `/exit` or `/q`.
    Quit,
    /// `/debug`: toggle printing detected entities.
    Debug,
    /// `/help`.
    Help,
    /// Anything else starting with `/`.
    Unknown(String),
}

impl Command {
    /// Parse a line as a command. Returns `None` for ordinary questions.
    ///
    /// ```rust
    /// use gaffer::console::Command;
    ///
    /// assert_eq!(Command::parse("/QUIT"), Some(Command::Quit));
    /// assert_eq!(Command::parse("who coaches mainz?"), None);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let cmd = line.to_lowercase();
        Some(match cmd.as_str() {
            "/quit" | "/exit" | "/q" => Self::Quit,
            "/debug" => Self::Debug,
            "/help" => Self::Help,
            _ => Self::Unknown(cmd),
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quit => f.write_str("/quit"),
            Self::Debug => f.write_str("/debug"),
            Self::Help => f.write_str("/help"),
            Self::Unknown(cmd) => f.write_str(cmd),
        }
    }
}

/// Human-readable answer for a prompt package.
#[must_use]
pub fn format_response(package: &PromptPackage) -> String {
    let club = package.club_name();
    let manager = package
        .manager_name()
        .filter(|m| !m.is_empty() && *m != UNKNOWN_MANAGER);

    match (manager, club) {
        (Some(manager), club) => {
            let mut resp = match club {
                Some(club) => format!("{manager} is currently coaching {club}."),
                None => format!("The current manager is {manager}."),
            };
            if let Some(info) = package.get("manager_info") {
                resp.push_str("\n\nBackground: ");
                resp.push_str(info);
            }
            resp
        }
        (None, Some(club)) => {
            format!("I found {club} but couldn't determine the current manager.")
        }
        (None, None) => NO_CLUB_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::PromptBuilder;
    use gaffer_core::PromptContext;

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse("/q"), Some(Command::Quit));
        assert_eq!(Command::parse("  /exit "), Some(Command::Quit));
        assert_eq!(Command::parse("/Debug"), Some(Command::Debug));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(
            Command::parse("/stats"),
            Some(Command::Unknown("/stats".into()))
        );
        assert_eq!(Command::parse(""), None);
    }

    #[test]
    fn formats_success_with_background() {
        let p = PromptBuilder::new().build_manager_prompt(
            "q",
            "SC Freiburg",
            Some("Freiburg im Breisgau"),
            "Julian Schuster",
            Some("German former midfielder."),
        );
        assert_eq!(
            format_response(&p),
            "Julian Schuster is currently coaching SC Freiburg.\n\nBackground: German former midfielder."
        );
    }

    #[test]
    fn formats_success_without_background() {
        let p = PromptBuilder::new().build_manager_prompt("q", "SC Freiburg", None, "Julian Schuster", None);
        assert_eq!(
            format_response(&p),
            "Julian Schuster is currently coaching SC Freiburg."
        );
    }

    #[test]
    fn club_without_manager() {
        let mut ctx = PromptContext::new();
        ctx.insert("club_name".into(), Some("Hamburger SV".into()));
        ctx.insert("manager_name".into(), Some(UNKNOWN_MANAGER.into()));
        let p = PromptPackage::new("s", "u", ctx);
        assert_eq!(
            format_response(&p),
            "I found Hamburger SV but couldn't determine the current manager."
        );
    }

    #[test]
    fn failure_package() {
        let p = PromptBuilder::new().build_error_prompt("q", "No club or manager information found");
        assert_eq!(format_response(&p), NO_CLUB_MESSAGE);
    }
}
