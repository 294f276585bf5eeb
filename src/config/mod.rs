//! Configuration module for capture runs
//!
//! This module provides the `CaptureConfig` struct and its builder for
//! configuring a run with validation and sensible defaults.

// Sub-modules
pub mod builder;
pub mod types;

// Re-exports for public API
pub use builder::CaptureConfigBuilder;
pub use types::{CaptureConfig, ConvergenceSettings, CrawlSettings};
