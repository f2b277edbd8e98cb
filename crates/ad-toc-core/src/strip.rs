//! Removal of previously generated TOC blocks.
//!
//! Blocks are recognised purely by their markers: the fence label for the
//! fenced style, the head/tail lines for the plain style. Markers that also
//! occur in ordinary content (or empty markers) cause that content to be
//! removed as well; callers must pick markers unique to the generated block.

use std::borrow::Cow;

use ad_toc_config::TocSettings;
use regex::Regex;

/// Removes every generated block of either style.
///
/// Both styles are always attempted so a block written before the style was
/// switched is still replaced.
pub fn strip_blocks<'a>(text: &'a str, settings: &TocSettings) -> Cow<'a, str> {
    let head = settings.head_marker.as_str();
    let tail = settings.tail_marker.as_str();

    match strip_fenced(text, &settings.fence_label) {
        Cow::Borrowed(unchanged) => strip_plain(unchanged, head, tail),
        Cow::Owned(stripped) => Cow::Owned(strip_plain(&stripped, head, tail).into_owned()),
    }
}

/// Removes every ```` ```<label> ```` block, through its closing fence line.
pub fn strip_fenced<'a>(text: &'a str, label: &str) -> Cow<'a, str> {
    let source = format!("```{}\n(?s:.*?)\n```\n", regex::escape(label));
    remove_all(&source, text, "fenced")
}

/// Removes every region from a `head` line through the next `tail` line.
pub fn strip_plain<'a>(text: &'a str, head: &str, tail: &str) -> Cow<'a, str> {
    let source = format!(
        "{}\n(?s:.*?)\n{}\n",
        regex::escape(head),
        regex::escape(tail)
    );
    remove_all(&source, text, "plain")
}

/// Markers too large for the regex size limit leave the text untouched.
fn remove_all<'a>(source: &str, text: &'a str, style: &str) -> Cow<'a, str> {
    let pattern = match Regex::new(source) {
        Ok(pattern) => pattern,
        Err(err) => {
            log::warn!("cannot match {style} TOC blocks, leaving text as is: {err}");
            return Cow::Borrowed(text);
        }
    };

    let removed = pattern.find_iter(text).count();
    if removed == 0 {
        return Cow::Borrowed(text);
    }
    log::debug!("removed {removed} {style} TOC block(s)");
    pattern.replace_all(text, "")
}
