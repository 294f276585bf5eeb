//! Core configuration types for capture runs
//!
//! `CaptureConfig` is built once at entry (normally from the CLI) and passed
//! explicitly to every component. Nothing in the crate reads ambient globals.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::utils::constants::{
    ASSET_SETTLE_TIMEOUT_MS, DOM_READY_TIMEOUT_MS, FINAL_SETTLE_MS, HEIGHT_TOLERANCE_PX,
    MAX_SCROLL_ROUNDS, NETWORK_IDLE_TIMEOUT_MS, POST_LOAD_GRACE_MS, SCRIPT_TIMEOUT_MS,
    SCROLL_PASS_MAX_STEPS, SCROLL_STEP_DELAY_MS, SCROLL_STEP_MIN_PX, STABLE_ROUNDS_REQUIRED,
};

/// Main configuration struct for a capture run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Positional seed URLs, raw as given
    pub(crate) urls: Vec<String>,
    /// URL source files, in argument order
    pub(crate) url_files: Vec<PathBuf>,
    pub(crate) output_dir: PathBuf,
    /// Device pixel ratio for every profile
    pub(crate) scale: f64,
    /// Timeout for each `navigate` call
    pub(crate) navigation_timeout: Duration,
    pub(crate) exclude_classes: Vec<String>,
    pub(crate) exclude_ids: Vec<String>,
    pub(crate) headless: bool,
    pub(crate) crawl: CrawlSettings,
    pub(crate) convergence: ConvergenceSettings,
}

impl CaptureConfig {
    /// Create a builder with every default applied
    #[must_use]
    pub fn builder() -> super::CaptureConfigBuilder {
        super::CaptureConfigBuilder::default()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn url_files(&self) -> &[PathBuf] {
        &self.url_files
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn navigation_timeout(&self) -> Duration {
        self.navigation_timeout
    }

    pub fn exclude_classes(&self) -> &[String] {
        &self.exclude_classes
    }

    pub fn exclude_ids(&self) -> &[String] {
        &self.exclude_ids
    }

    pub fn headless(&self) -> bool {
        self.headless
    }

    pub fn crawl(&self) -> &CrawlSettings {
        &self.crawl
    }

    pub fn convergence(&self) -> &ConvergenceSettings {
        &self.convergence
    }
}

/// Crawl discovery constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlSettings {
    pub enabled: bool,
    /// Maximum link hops from any seed (0 = seeds only)
    pub max_depth: u32,
    /// Cap on discovered URLs, seeds included
    pub max_pages: usize,
    /// Restrict discovery to the seed origins
    pub same_origin_only: bool,
}

/// Timeouts and thresholds for the page convergence loop
///
/// Every wait the driver performs is bounded by one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConvergenceSettings {
    pub dom_ready_timeout: Duration,
    pub network_idle_timeout: Duration,
    pub post_load_grace: Duration,
    pub scroll_step_min_px: u32,
    pub scroll_step_delay: Duration,
    pub scroll_pass_max_steps: u32,
    pub height_tolerance_px: f64,
    pub stable_rounds_required: u32,
    pub max_scroll_rounds: u32,
    pub asset_settle_timeout: Duration,
    pub final_settle: Duration,
    pub script_timeout: Duration,
}

impl Default for ConvergenceSettings {
    fn default() -> Self {
        Self {
            dom_ready_timeout: Duration::from_millis(DOM_READY_TIMEOUT_MS),
            network_idle_timeout: Duration::from_millis(NETWORK_IDLE_TIMEOUT_MS),
            post_load_grace: Duration::from_millis(POST_LOAD_GRACE_MS),
            scroll_step_min_px: SCROLL_STEP_MIN_PX,
            scroll_step_delay: Duration::from_millis(SCROLL_STEP_DELAY_MS),
            scroll_pass_max_steps: SCROLL_PASS_MAX_STEPS,
            height_tolerance_px: HEIGHT_TOLERANCE_PX,
            stable_rounds_required: STABLE_ROUNDS_REQUIRED,
            max_scroll_rounds: MAX_SCROLL_ROUNDS,
            asset_settle_timeout: Duration::from_millis(ASSET_SETTLE_TIMEOUT_MS),
            final_settle: Duration::from_millis(FINAL_SETTLE_MS),
            script_timeout: Duration::from_millis(SCRIPT_TIMEOUT_MS),
        }
    }
}

impl ConvergenceSettings {
    /// Settings with every delay collapsed, for driving fake pages in tests
    #[must_use]
    pub fn instant() -> Self {
        Self {
            post_load_grace: Duration::ZERO,
            scroll_step_delay: Duration::ZERO,
            final_settle: Duration::ZERO,
            ..Self::default()
        }
    }
}
