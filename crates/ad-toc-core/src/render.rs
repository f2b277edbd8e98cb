use crate::heading::Heading;

const INDENT_WIDTH: usize = 4;

/// One outline line derived from a heading that passed the depth cutoff.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutlineItem {
    pub indent: usize,
    pub text: String,
}

/// Keeps headings at or above `max_level` and cleans their text for use
/// inside a wiki link.
pub fn outline_items(headings: &[Heading], max_level: u8) -> Vec<OutlineItem> {
    headings
        .iter()
        .filter(|heading| heading.level <= max_level)
        .map(|heading| OutlineItem {
            indent: usize::from(heading.level.saturating_sub(1)),
            text: link_text(&heading.text),
        })
        .collect()
}

/// Renders the checkbox outline, one `- [ ] [[# text]]` line per item,
/// without a trailing newline.
pub fn render_outline(headings: &[Heading], max_level: u8) -> String {
    render_items(&outline_items(headings, max_level))
}

pub fn render_items(items: &[OutlineItem]) -> String {
    items
        .iter()
        .map(|item| {
            let indent = " ".repeat(item.indent * INDENT_WIDTH);
            format!("{indent}- [ ] [[# {}]]", item.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops nested `[[`/`]]` so a heading holding a wiki link does not break
/// the generated link around it.
fn link_text(raw: &str) -> String {
    raw.replace("[[", "").replace("]]", "").trim().to_string()
}
