//! Builder for `CaptureConfig`
//!
//! Defaults come from `utils::constants`; `build()` validates every range so
//! that a config which exists is a config that can run.

use std::path::PathBuf;
use std::time::Duration;

use super::types::{CaptureConfig, ConvergenceSettings, CrawlSettings};
use crate::error::{CaptureError, CaptureResult};
use crate::utils::constants::{
    DEFAULT_CRAWL_DEPTH, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT_MS, DEFAULT_OUTPUT_DIR,
    DEFAULT_SCALE, MAX_SCALE, MIN_NAVIGATION_TIMEOUT_MS,
};

pub struct CaptureConfigBuilder {
    pub(crate) urls: Vec<String>,
    pub(crate) url_files: Vec<PathBuf>,
    pub(crate) output_dir: PathBuf,
    pub(crate) scale: f64,
    pub(crate) navigation_timeout_ms: u64,
    pub(crate) exclude_classes: Vec<String>,
    pub(crate) exclude_ids: Vec<String>,
    pub(crate) headless: bool,
    pub(crate) crawl: CrawlSettings,
    pub(crate) convergence: ConvergenceSettings,
}

impl Default for CaptureConfigBuilder {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            url_files: Vec::new(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            scale: DEFAULT_SCALE,
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            exclude_classes: Vec::new(),
            exclude_ids: Vec::new(),
            headless: true,
            crawl: CrawlSettings {
                enabled: false,
                max_depth: DEFAULT_CRAWL_DEPTH,
                max_pages: DEFAULT_MAX_PAGES,
                same_origin_only: true,
            },
            convergence: ConvergenceSettings::default(),
        }
    }
}

impl CaptureConfigBuilder {
    #[must_use]
    pub fn urls(mut self, urls: Vec<String>) -> Self {
        self.urls = urls;
        self
    }

    #[must_use]
    pub fn url_files(mut self, files: Vec<PathBuf>) -> Self {
        self.url_files = files;
        self
    }

    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    #[must_use]
    pub fn scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    #[must_use]
    pub fn navigation_timeout_ms(mut self, ms: u64) -> Self {
        self.navigation_timeout_ms = ms;
        self
    }

    #[must_use]
    pub fn exclude_classes(mut self, classes: Vec<String>) -> Self {
        self.exclude_classes = classes;
        self
    }

    #[must_use]
    pub fn exclude_ids(mut self, ids: Vec<String>) -> Self {
        self.exclude_ids = ids;
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    #[must_use]
    pub fn crawl_enabled(mut self, enabled: bool) -> Self {
        self.crawl.enabled = enabled;
        self
    }

    #[must_use]
    pub fn crawl_depth(mut self, depth: u32) -> Self {
        self.crawl.max_depth = depth;
        self
    }

    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.crawl.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn same_origin_only(mut self, same_origin_only: bool) -> Self {
        self.crawl.same_origin_only = same_origin_only;
        self
    }

    #[must_use]
    pub fn convergence(mut self, settings: ConvergenceSettings) -> Self {
        self.convergence = settings;
        self
    }

    /// Validate ranges and produce the config
    ///
    /// # Errors
    ///
    /// Returns `CaptureError::InvalidArgument` naming the offending option.
    pub fn build(self) -> CaptureResult<CaptureConfig> {
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > MAX_SCALE {
            return Err(CaptureError::InvalidArgument(format!(
                "--scale must be greater than 0 and at most {MAX_SCALE}, got {}",
                self.scale
            )));
        }
        if self.navigation_timeout_ms < MIN_NAVIGATION_TIMEOUT_MS {
            return Err(CaptureError::InvalidArgument(format!(
                "--timeout-ms must be at least {MIN_NAVIGATION_TIMEOUT_MS}, got {}",
                self.navigation_timeout_ms
            )));
        }
        if self.crawl.max_pages == 0 {
            return Err(CaptureError::InvalidArgument(
                "--max-pages must be at least 1".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(CaptureError::InvalidArgument(
                "--output-dir must not be empty".to_string(),
            ));
        }

        Ok(CaptureConfig {
            urls: self.urls,
            url_files: self.url_files,
            output_dir: self.output_dir,
            scale: self.scale,
            navigation_timeout: Duration::from_millis(self.navigation_timeout_ms),
            exclude_classes: self.exclude_classes,
            exclude_ids: self.exclude_ids,
            headless: self.headless,
            crawl: self.crawl,
            convergence: self.convergence,
        })
    }
}
