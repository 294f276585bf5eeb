//! Run reporting abstraction
//!
//! Defines the `CaptureReporter` trait for run lifecycle events, a console
//! implementation for the binary and a no-op implementation for library use.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::CaptureConfig;
use crate::convergence::ExclusionSelectorSet;
use crate::driver::DeviceProfile;
use crate::error::CaptureError;
use crate::utils::CaptureUrl;

/// A screenshot written to disk
#[derive(Debug, Clone, Copy)]
pub struct SavedScreenshot<'a> {
    pub url: &'a CaptureUrl,
    pub profile: &'a DeviceProfile,
    pub path: &'a Path,
    pub bytes: u64,
}

/// Trait for reporting capture progress at key lifecycle events
pub trait CaptureReporter: Send + Sync {
    /// Report the effective settings before any browser work
    fn report_run_started(&self, config: &CaptureConfig, selectors: &ExclusionSelectorSet);

    /// Report the outcome of crawl discovery
    fn report_crawl_finished(&self, seeds: usize, discovered: usize);

    /// Report that a screenshot was saved
    fn report_screenshot_saved(&self, shot: &SavedScreenshot<'_>);

    /// Report a target that could not be captured
    fn report_target_failed(&self, url: &CaptureUrl, error: &CaptureError);

    /// Report totals at the end of the run
    fn report_run_finished(&self, captured: usize, failed: usize, elapsed: Duration);
}

/// Reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpReporter;

impl CaptureReporter for NoOpReporter {
    #[inline(always)]
    fn report_run_started(&self, _config: &CaptureConfig, _selectors: &ExclusionSelectorSet) {}

    #[inline(always)]
    fn report_crawl_finished(&self, _seeds: usize, _discovered: usize) {}

    #[inline(always)]
    fn report_screenshot_saved(&self, _shot: &SavedScreenshot<'_>) {}

    #[inline(always)]
    fn report_target_failed(&self, _url: &CaptureUrl, _error: &CaptureError) {}

    #[inline(always)]
    fn report_run_finished(&self, _captured: usize, _failed: usize, _elapsed: Duration) {}
}

/// Prints the run report to stdout and failures to stderr
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    /// Paths are shown relative to this directory when possible
    base_dir: PathBuf,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_dir: std::env::current_dir().unwrap_or_default(),
        }
    }

    fn display_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.base_dir)
            .unwrap_or(path)
            .display()
            .to_string()
    }
}

impl CaptureReporter for ConsoleReporter {
    fn report_run_started(&self, config: &CaptureConfig, selectors: &ExclusionSelectorSet) {
        println!("Output directory: {}", self.display_path(config.output_dir()));
        println!("Scale factor: {}", config.scale());

        let crawl = config.crawl();
        if crawl.enabled {
            println!(
                "Crawl: on (depth {}, max pages {}, same origin only: {})",
                crawl.max_depth, crawl.max_pages, crawl.same_origin_only
            );
        } else {
            println!("Crawl: off");
        }

        println!("Excluded selectors ({}):", selectors.len());
        for selector in selectors.iter() {
            println!("  {selector}");
        }
    }

    fn report_crawl_finished(&self, seeds: usize, discovered: usize) {
        println!("Crawl found {discovered} pages from {seeds} seeds");
    }

    fn report_screenshot_saved(&self, shot: &SavedScreenshot<'_>) {
        println!(
            "Saved {} [{} {}x{}] -> {} ({} bytes)",
            shot.url,
            shot.profile.name,
            shot.profile.width,
            shot.profile.height,
            self.display_path(shot.path),
            shot.bytes
        );
    }

    fn report_target_failed(&self, url: &CaptureUrl, error: &CaptureError) {
        eprintln!("Failed to capture {url}: {error}");
    }

    fn report_run_finished(&self, captured: usize, failed: usize, elapsed: Duration) {
        if failed == 0 {
            println!("Captured {captured} screenshots in {:.1}s", elapsed.as_secs_f64());
        } else {
            println!(
                "Captured {captured} screenshots in {:.1}s, {failed} targets failed",
                elapsed.as_secs_f64()
            );
        }
    }
}
