use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

/// First stretch of text that holds no newline or tab. Ranking cells pad
/// their content with layout whitespace on both sides.
static TEXT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\n\t]+").expect("static pattern"));

/// Characters stripped from both ends of field labels and values.
const FIELD_TRIM: &[char] = &[':', ',', ' '];

/// Candidate names are used as JSON keys and CSV cells, so spaces become
/// underscores. The one accented letter seen in the source pages is folded
/// to ASCII; no other Unicode normalization is attempted.
pub fn normalize_name(name: &str) -> String {
    name.replace(' ', "_").replace('á', "a")
}

pub fn normalize_dashes(text: &str) -> String {
    text.replace('\u{2014}', "-")
}

pub fn trim_field(text: &str) -> &str {
    text.trim_matches(FIELD_TRIM)
}

pub fn first_text_run(text: &str) -> Option<&str> {
    TEXT_RUN
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .find(|run| !run.is_empty())
}

/// Rendered text of a node, all descendant text nodes concatenated.
pub fn element_text(node: ElementRef) -> String {
    node.text().collect::<String>()
}
