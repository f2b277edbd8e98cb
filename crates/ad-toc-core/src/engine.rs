use ad_toc_config::TocSettings;
use similar::TextDiff;

use crate::assemble::{assemble, remove_toc};
use crate::document::DocumentSource;
use crate::error::{ExitCode, TocResult};
use crate::heading::Heading;

#[derive(Debug, Clone, Default)]
pub struct TocOptions {
    pub dry_run: bool,
    pub backup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Replace any generated block with a freshly built one.
    Generate,
    /// Remove generated blocks without inserting a new one.
    Remove,
}

#[derive(Debug, Clone)]
pub struct TocRequest {
    pub source: DocumentSource,
    pub operation: Operation,
    pub options: TocOptions,
}

#[derive(Debug)]
pub struct TocOutcome {
    pub exit_code: ExitCode,
    pub changed: bool,
    pub written: bool,
    pub diff: Option<String>,
    pub headings: Vec<Heading>,
    pub result: String,
}

/// Runs one TOC operation against a document: reads it, checks the
/// preconditions, transforms the text and writes it back in a single replace.
///
/// Stdin documents are never written; the caller owns the output.
pub fn apply(request: TocRequest, settings: &TocSettings) -> TocResult<TocOutcome> {
    let origin = request.source.label();
    let content = match request.source.read() {
        Ok(content) => content,
        Err(err) => {
            if err.is_precondition() {
                log::warn!("skipping {origin}: {err}");
            }
            return Err(err);
        }
    };

    let (result, headings) = match request.operation {
        Operation::Generate => {
            let assembled = assemble(&content, settings);
            (assembled.document, assembled.headings)
        }
        Operation::Remove => (remove_toc(&content, settings), Vec::new()),
    };

    let changed = result != content;
    let diff = changed.then(|| preview_diff(&origin, &content, &result));

    let written = changed
        && !request.options.dry_run
        && request.source.write_back(&result, request.options.backup)?;
    if written {
        log::info!("updated {origin}");
    }

    Ok(TocOutcome {
        exit_code: ExitCode::Success,
        changed,
        written,
        diff,
        headings,
        result,
    })
}

/// Unified diff of the document before and after, headed by its origin.
fn preview_diff(origin: &str, before: &str, after: &str) -> String {
    let diff = TextDiff::from_lines(before, after);
    diff.unified_diff().header(origin, origin).to_string()
}
