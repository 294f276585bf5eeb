//! Seed URL inputs
//!
//! Turns positional arguments and URL source files into the run's seed set.

pub mod documents;
pub mod extractor;
pub mod resolver;

pub use documents::{DocumentKind, read_document_text};
pub use extractor::extract_urls_from_text;
pub use resolver::{SeedSet, resolve_seeds};
