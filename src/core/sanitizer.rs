//! Cleanup of raw model output

use regex::Regex;
use std::sync::OnceLock;

const FENCE: &str = "```";

fn opening_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\A```\w*\n?").expect("valid opening fence pattern"))
}

fn closing_fence() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n?```\z").expect("valid closing fence pattern"))
}

/// Strip a surrounding markdown code fence and whitespace from model output.
///
/// Only the start and end of the text are inspected; fences in the middle
/// are left alone.
pub fn sanitize_output(raw: &str) -> String {
    let mut cleaned = raw.trim().to_string();

    if cleaned.starts_with(FENCE) {
        cleaned = opening_fence().replace(&cleaned, "").into_owned();
    }

    if cleaned.ends_with(FENCE) {
        cleaned = closing_fence().replace(&cleaned, "").into_owned();
    }

    cleaned.trim().to_string()
}
