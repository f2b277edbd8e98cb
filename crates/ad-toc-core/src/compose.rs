use ad_toc_config::{BlockStyle, TocSettings};

/// Wraps a rendered outline in the configured block format.
///
/// The fenced form carries optional `title`/`color`/`collapse` lines ahead of
/// the outline; the plain form never does. Every line, including an empty
/// outline, is newline-terminated so [`crate::strip`] can remove the block
/// again with the same settings.
pub fn compose_block(outline: &str, settings: &TocSettings) -> String {
    let mut block = String::with_capacity(outline.len() + 64);

    match settings.style {
        BlockStyle::Fenced => {
            block.push_str(&format!("```{}\n", settings.fence_label));
            if let Some(title) = settings.title.active() {
                block.push_str(&format!("title: {title}\n"));
            }
            if let Some(color) = settings.color.active() {
                block.push_str(&format!("color: {color}\n"));
            }
            if let Some(collapse) = settings.collapse.active() {
                block.push_str(&format!("collapse: {collapse}\n"));
            }
            block.push_str(&format!("{outline}\n"));
            block.push_str("```\n");
        }
        BlockStyle::Plain => {
            block.push_str(&format!("{}\n", settings.head_marker));
            block.push_str(&format!("{outline}\n"));
            block.push_str(&format!("{}\n", settings.tail_marker));
        }
    }

    block
}
