//! Shared configuration constants for sitesnap
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Seed captured when neither positional URLs nor URL files are given
pub const DEFAULT_SEED_URL: &str = "https://membershealth.ca/";

/// Default directory for screenshots, relative to the working directory
pub const DEFAULT_OUTPUT_DIR: &str = "./screenshot-output";

/// Default device pixel ratio for both capture profiles
pub const DEFAULT_SCALE: f64 = 2.0;

/// Largest accepted device pixel ratio
pub const MAX_SCALE: f64 = 4.0;

/// Default per-navigation timeout in milliseconds
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 60_000;

/// Smallest accepted per-navigation timeout in milliseconds
pub const MIN_NAVIGATION_TIMEOUT_MS: u64 = 5_000;

/// Default crawl depth: seeds plus one hop
pub const DEFAULT_CRAWL_DEPTH: u32 = 1;

/// Default cap on the number of URLs a crawl may return (seeds included)
pub const DEFAULT_MAX_PAGES: usize = 50;

// Convergence loop tuning

/// Minimum scroll increment in CSS pixels
pub const SCROLL_STEP_MIN_PX: u32 = 220;

/// Pause between scroll increments
pub const SCROLL_STEP_DELAY_MS: u64 = 90;

/// Upper bound on scroll increments inside one pass
pub const SCROLL_PASS_MAX_STEPS: u32 = 400;

/// Height growth (px) below which a round counts as stable
pub const HEIGHT_TOLERANCE_PX: f64 = 2.0;

/// Consecutive non-growing rounds that end scroll stabilization
pub const STABLE_ROUNDS_REQUIRED: u32 = 3;

/// Hard cap on scroll rounds for infinite-scroll pages
pub const MAX_SCROLL_ROUNDS: u32 = 36;

/// Budget for `document.readyState` to leave `loading`
pub const DOM_READY_TIMEOUT_MS: u64 = 15_000;

/// Budget for each best-effort network idle wait
pub const NETWORK_IDLE_TIMEOUT_MS: u64 = 10_000;

/// Window without new resource entries that counts as idle
pub const NETWORK_QUIET_WINDOW_MS: u64 = 500;

/// Grace delay after the first idle wait
pub const POST_LOAD_GRACE_MS: u64 = 400;

/// Budget for the image/font settle race
pub const ASSET_SETTLE_TIMEOUT_MS: u64 = 8_000;

/// Delay after determinism styles are applied
pub const FINAL_SETTLE_MS: u64 = 300;

/// Budget for any single in-page script evaluation
pub const SCRIPT_TIMEOUT_MS: u64 = 30_000;

/// Budget for a single full-page screenshot
pub const SCREENSHOT_TIMEOUT_MS: u64 = 60_000;

/// Selectors hidden on every page regardless of CLI options
///
/// Consent banners, chat launchers and captcha badges float over content and
/// differ between runs.
pub const DEFAULT_EXCLUDED_SELECTORS: [&str; 4] = [
    "#onetrust-consent-sdk",
    "#hubspot-messages-iframe-container",
    ".grecaptcha-badge",
    "#CybotCookiebotDialog",
];

/// Scroll-reveal patterns forced to their revealed state before capture
pub const REVEAL_SELECTORS: &[&str] = &[
    "[data-aos]",
    "[data-sal]",
    "[data-animate]",
    "[data-scroll]",
    ".wow",
    ".reveal",
    ".fade-in",
    ".fade-up",
    ".animate-on-scroll",
];

/// Path extensions that mark a crawl link as a non-page asset
pub const ASSET_EXTENSIONS: &[&str] = &[
    // images
    "png", "jpg", "jpeg", "gif", "webp", "avif", "svg", "ico", "bmp", "tif", "tiff",
    // scripts and styles
    "js", "mjs", "cjs", "css", "map",
    // fonts
    "woff", "woff2", "ttf", "otf", "eot",
    // documents
    "pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "csv", "rtf", "txt", "xml", "json",
    // archives
    "zip", "gz", "tgz", "rar", "7z", "tar", "bz2",
    // media
    "mp3", "mp4", "m4a", "mov", "avi", "webm", "wav", "ogg",
];

// Device profiles

pub const DESKTOP_VIEWPORT: (u32, u32) = (1440, 900);

pub const MOBILE_VIEWPORT: (u32, u32) = (390, 844);

/// Mobile profile user agent (iPhone Safari)
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_5 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.5 Mobile/15E148 Safari/604.1";

/// Desktop profile user agent
///
/// Pinned so that sites serving UA-specific markup render the same between
/// runs and Chromium upgrades.
pub const DESKTOP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
