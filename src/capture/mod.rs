//! Capture stage: output naming, reporting and the per-target capture loop.

pub mod orchestrator;
pub mod output_key;
pub mod reporter;
pub mod targets;

pub use orchestrator::{RunSummary, run_capture, run_with_host};
pub use output_key::{OutputKeyResolver, base_key, slugify};
pub use reporter::{CaptureReporter, ConsoleReporter, NoOpReporter, SavedScreenshot};
pub use targets::{CaptureTarget, build_capture_targets};
