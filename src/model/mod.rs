//! Data model for outline inference.
//!
//! Spans come from the page-content parser, lines are derived from spans
//! once per page, and headings accumulate into the final [`Outline`].

mod outline;
mod stats;
mod text;

pub(crate) use outline::title_from_filename;
pub use outline::{Heading, HeadingLevel, Outline};
pub use stats::FontStats;
pub use text::{Line, Span, StyleFlags};
