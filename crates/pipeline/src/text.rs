//! Text normalization shared by every feature source.

use regex::Regex;
use std::sync::LazyLock;

/// Anything outside Latin and Cyrillic letters, digits and whitespace
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9а-яА-ЯёЁ\s]").expect("Invalid normalizer regex"));

/// Strip disallowed characters, lower-case and trim.
///
/// `None` and empty input both yield an empty string.
pub fn normalize(text: Option<&str>) -> String {
    match text {
        Some(text) if !text.is_empty() => DISALLOWED
            .replace_all(text, "")
            .to_lowercase()
            .trim()
            .to_string(),
        _ => String::new(),
    }
}

/// Normalize each piece and drop the ones that end up empty
pub fn normalize_all<'a, I>(pieces: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    pieces
        .into_iter()
        .map(|piece| normalize(Some(piece)))
        .filter(|token| !token.is_empty())
        .collect()
}
