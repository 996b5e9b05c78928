/// ANSI color helper utilities for terminal output.
use crate::models::AvailabilityStatus;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Yes → green, Maybe → yellow, No → red, no answer → grey.
pub fn color_for_status(status: Option<AvailabilityStatus>) -> &'static str {
    match status {
        Some(AvailabilityStatus::Yes) => GREEN,
        Some(AvailabilityStatus::Maybe) => YELLOW,
        Some(AvailabilityStatus::No) => RED,
        None => GREY,
    }
}

/// Greys out placeholder values ("", "-", "--:--").
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" || v == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
