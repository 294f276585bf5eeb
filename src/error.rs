//! Error types for capture runs
//!
//! Every failure that reaches the binary is a `CaptureError`. The browser
//! boundary works in `anyhow::Result` and is converted here at the seam.

use std::path::PathBuf;

/// Result type alias for capture operations
pub type CaptureResult<T> = Result<T, CaptureError>;

/// Error kinds for a capture run
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    /// Bad flag value or missing value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Flag that the CLI does not define
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// Removed legacy feature requested explicitly
    #[error("{0} is not supported; only full-document capture is available")]
    NotSupported(String),

    /// Empty string given where a URL was expected
    #[error("URL is empty")]
    EmptyUrl,

    /// URL parsed, but its scheme is not http or https
    #[error("Unsupported URL scheme '{scheme}' in '{url}' (only http and https are allowed)")]
    UnsupportedScheme { url: String, scheme: String },

    /// URL could not be parsed at all
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Input file that cannot be used as a URL source
    #[error("Unsupported input {}: {reason}", path.display())]
    UnsupportedInput { path: PathBuf, reason: String },

    /// Browser runtime or helper tool missing from this machine
    #[error("{message}\n  hint: {remediation}")]
    EnvironmentUnavailable { message: String, remediation: String },

    /// A single URL failed to load or become capture-ready
    #[error("Navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Nothing left to capture after seed resolution and crawl
    #[error("No capture targets resolved")]
    NoTargetsResolved,

    /// Some targets in a batch failed; the rest were captured
    #[error("{failed} of {total} capture targets failed")]
    CaptureFailures { failed: usize, total: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CaptureError {
    /// Wrap a navigation or readiness failure for `url`
    pub fn navigation(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Navigation {
            url: url.into(),
            reason: err.to_string(),
        }
    }

    /// Wrap a problem with an input file
    pub fn unsupported_input(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::UnsupportedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the binary should print the full diagnostic chain
    #[must_use]
    pub fn is_unexpected(&self) -> bool {
        matches!(self, Self::Io(_) | Self::Other(_))
    }
}
