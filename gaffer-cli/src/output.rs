//! Output formatting for CLI commands

use std::io;

use gaffer_core::{Confidence, EntityLabel};
use is_terminal::IsTerminal;

/// Colorize text with ANSI escape codes (only if stdout is a terminal)
pub fn color(code: &str, text: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

/// Color code for a gazetteer label
pub fn label_color(label: EntityLabel) -> &'static str {
    match label {
        EntityLabel::Clubs => "1;32",
        EntityLabel::Cities => "1;33",
    }
}

/// Accuracy percentage colored by band
pub fn metric_colored(value: f64) -> String {
    let code = if value >= 90.0 {
        "1;32"
    } else if value >= 70.0 {
        "1;33"
    } else if value >= 50.0 {
        "33"
    } else {
        "1;31"
    };
    color(code, &format!("{:5.1}", value))
}

/// Ten-cell confidence bar
pub fn confidence_bar(conf: Confidence) -> String {
    let filled = ((conf.get() * 10.0).round() as usize).min(10);
    let code = if conf.get() >= 0.9 {
        "32"
    } else if conf.get() >= 0.7 {
        "33"
    } else {
        "31"
    };
    format!(
        "{}{}",
        color(code, &"#".repeat(filled)),
        color("90", &".".repeat(10 - filled))
    )
}
