use std::sync::LazyLock;

use regex::Regex;

// Runs of whitespace containing three or more newlines.
static EXCESS_BREAKS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n(?:[ \t]*\n){2,}").expect("static pattern"));

// Dash/asterisk list markers at the start of a line.
static DASH_BULLETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*[-*][ \t]*").expect("static pattern"));

// `1)` / `1.` numbering with trailing spacing.
static NUMBERING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)[.)][ \t]*").expect("static pattern"));

/// Normalize raw model text into a consistent display form: paragraph
/// boundaries become exactly one blank line, leading `-`/`*` markers
/// become a bullet glyph, and `N)`/`N.` numbering becomes `N. `.
///
/// Purely cosmetic and idempotent; the content is never reinterpreted.
pub fn format_response(raw: &str) -> String {
    let text = raw.trim();
    let text = EXCESS_BREAKS.replace_all(text, "\n\n");
    let text = DASH_BULLETS.replace_all(&text, "• ");
    let text = NUMBERING.replace_all(&text, "$1. ");
    text.into_owned()
}
