use std::sync::OnceLock;

use regex::Regex;

/// An ATX heading found in the document, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub level: u8,
    pub text: String,
}

fn heading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?m)^(#{1,6})[^\S\r\n]+(.*)$").expect("heading pattern is valid")
    })
}

/// Collects every line shaped like an ATX heading.
///
/// Code fences are not tracked, so a `#` line inside any fenced block counts
/// too; strip previously generated blocks before calling this.
pub fn extract_headings(text: &str) -> Vec<Heading> {
    heading_pattern()
        .captures_iter(text)
        .map(|caps| Heading {
            level: caps[1].len() as u8,
            text: caps[2].trim().to_string(),
        })
        .collect()
}
