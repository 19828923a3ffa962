//! Sniff test for exported chat transcripts.
//!
//! This is a heuristic, not a parser: a file passes if any line carries a
//! timestamp header in one of the known export formats. Participants and
//! individual messages are never extracted.
//!
//! Known header forms:
//! - `[DD/MM/YYYY, HH:MM:SS] Name: Message`
//! - `[DD/MM/YYYY, HH:MM] Name: Message`
//! - `[M/D/YY, H:MM AM] Name: Message`
//! - `DD/MM/YYYY, HH:MM - Name: Message`

use std::sync::LazyLock;

use regex::Regex;

static BRACKET_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4},?\s+\d{1,2}:\d{2}")
        .expect("bracket header pattern")
});

static DASH_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,2}[/\-.]\d{1,2}[/\-.]\d{2,4},?\s+\d{1,2}:\d{2}\s*[-–]\s*")
        .expect("dash header pattern")
});

/// Returns true when the text contains at least one timestamp header in
/// either the bracketed or the dash export form.
pub fn is_likely_export(text: &str) -> bool {
    BRACKET_HEADER.is_match(text) || DASH_HEADER.is_match(text)
}

/// Uploads are restricted to plain-text exports.
pub fn is_export_file_name(name: &str) -> bool {
    name.ends_with(".txt")
}
