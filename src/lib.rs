pub mod browser_profile;
pub mod browser_setup;
pub mod capture;
pub mod cli;
pub mod config;
pub mod convergence;
pub mod crawl_engine;
pub mod driver;
pub mod error;
pub mod seeds;
pub mod utils;

pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use capture::{
    CaptureReporter, CaptureTarget, ConsoleReporter, NoOpReporter, OutputKeyResolver, RunSummary,
    build_capture_targets, run_capture, run_with_host,
};
pub use cli::{Cli, CliOutcome, parse_args};
pub use config::{CaptureConfig, CaptureConfigBuilder, ConvergenceSettings, CrawlSettings};
pub use convergence::{ExclusionSelectorSet, build_excluded_selectors, prepare_page};
pub use crawl_engine::crawl_site;
pub use driver::{BrowserHost, BrowserSession, DeviceProfile, PageDriver};
pub use error::{CaptureError, CaptureResult};
pub use seeds::{SeedSet, extract_urls_from_text, resolve_seeds};
pub use utils::{CaptureUrl, normalize_capture_url};
