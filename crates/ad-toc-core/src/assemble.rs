use std::sync::OnceLock;

use ad_toc_config::TocSettings;
use regex::Regex;

use crate::compose::compose_block;
use crate::heading::{extract_headings, Heading};
use crate::render::render_outline;
use crate::strip::strip_blocks;

/// Result of one generate pass, kept for callers that report on it.
#[derive(Debug, Clone)]
pub struct Assembled {
    pub document: String,
    pub headings: Vec<Heading>,
    pub insert_at: usize,
    pub block: String,
}

fn front_matter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\A---\n(?s:.*?)\n---\n").expect("front matter pattern is valid")
    })
}

/// Byte offset just past a leading `---` front-matter block, or 0 when the
/// document does not open with one. Only the first such block counts.
pub fn front_matter_end(text: &str) -> usize {
    front_matter_pattern()
        .find(text)
        .map(|found| found.end())
        .unwrap_or(0)
}

/// Strips any generated block, rebuilds it from the remaining headings, and
/// inserts it after the front matter.
pub fn assemble(text: &str, settings: &TocSettings) -> Assembled {
    let stripped = strip_blocks(text, settings);
    let headings = extract_headings(&stripped);
    let outline = render_outline(&headings, settings.max_level);
    let block = compose_block(&outline, settings);
    let insert_at = front_matter_end(&stripped);

    log::debug!(
        "inserting {} block with {} heading(s) at offset {insert_at}",
        settings.style,
        headings.len()
    );

    let mut document = String::with_capacity(stripped.len() + block.len());
    document.push_str(&stripped[..insert_at]);
    document.push_str(&block);
    document.push_str(&stripped[insert_at..]);

    Assembled {
        document,
        headings,
        insert_at,
        block,
    }
}

/// Returns the full replacement text for `text` with a fresh TOC block.
pub fn compute_updated_document(text: &str, settings: &TocSettings) -> String {
    assemble(text, settings).document
}

/// Returns `text` with every generated block removed and nothing inserted.
pub fn remove_toc(text: &str, settings: &TocSettings) -> String {
    strip_blocks(text, settings).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn detects_front_matter_span() {
        let text = "---\nkey: val\n---\n# Heading\n";
        assert_eq!(front_matter_end(text), "---\nkey: val\n---\n".len());
    }

    #[test]
    fn front_matter_must_open_the_document() {
        assert_eq!(front_matter_end("\n---\nkey: val\n---\n"), 0);
        assert_eq!(front_matter_end("# Title\n---\na\n---\n"), 0);
    }

    #[test]
    fn unterminated_front_matter_is_ignored() {
        assert_eq!(front_matter_end("---\nkey: val\n---"), 0);
        assert_eq!(front_matter_end("---\nkey: val\n"), 0);
    }

    #[test]
    fn only_first_front_matter_block_is_the_anchor() {
        let text = "---\na: 1\n---\n---\nb: 2\n---\n";
        assert_eq!(front_matter_end(text), "---\na: 1\n---\n".len());
    }

    #[test]
    fn inserts_after_front_matter() {
        let settings = TocSettings::default();
        let assembled = assemble("---\nkey: val\n---\n# Heading\n", &settings);
        assert_eq!(
            assembled.document,
            "---\nkey: val\n---\n```ad-toc\ntitle: 目录\ncolor: #6496FF\ncollapse: open\n- [ ] [[# Heading]]\n```\n# Heading\n"
        );
        assert_eq!(assembled.insert_at, 17);
    }

    #[test]
    fn inserts_at_start_without_front_matter() {
        let settings = TocSettings::default();
        let assembled = assemble("# Heading\n", &settings);
        assert_eq!(assembled.insert_at, 0);
        assert!(assembled.document.starts_with("```ad-toc\n"));
        assert!(assembled.document.ends_with("```\n# Heading\n"));
    }

    #[test]
    fn remove_toc_only_strips() {
        let settings = TocSettings::default();
        let generated = compute_updated_document("# A\n", &settings);
        assert_eq!(remove_toc(&generated, &settings), "# A\n");
    }
}
