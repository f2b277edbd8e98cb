//! Generates a checkbox table of contents from a markdown document's headings
//! and keeps a single generated copy of it near the top of the document.
//!
//! The pipeline is a chain of pure string transforms:
//! [`strip`] → [`heading`] → [`render`] → [`compose`] → [`assemble`].
//! [`engine`] runs it against a [`document`] source with precondition checks,
//! dry-run diffs and atomic writes.

pub mod assemble;
pub mod compose;
pub mod document;
pub mod engine;
pub mod error;
pub mod heading;
pub mod render;
pub mod strip;

pub use ad_toc_config::{BlockStyle, CollapseState, MetadataLine, TocSettings};
pub use assemble::{assemble, compute_updated_document, front_matter_end, remove_toc, Assembled};
pub use compose::compose_block;
pub use document::DocumentSource;
pub use engine::{apply, Operation, TocOptions, TocOutcome, TocRequest};
pub use error::{ExitCode, TocError, TocResult};
pub use heading::{extract_headings, Heading};
pub use render::{outline_items, render_outline, OutlineItem};
pub use strip::{strip_blocks, strip_fenced, strip_plain};
