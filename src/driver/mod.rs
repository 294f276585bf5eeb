//! Browser capability boundary
//!
//! The crawl engine, convergence driver and capture orchestrator only see
//! these two traits. `chromium` implements them over chromiumoxide; tests
//! implement them over an in-memory site.

pub mod chromium;
pub mod device;
pub mod js_scripts;
pub mod page_timeout;

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use tracing::warn;

pub use chromium::{BrowserSession, ChromiumPage};
pub use device::DeviceProfile;
pub use page_timeout::with_page_timeout;

/// A single browser tab the core can drive
pub trait PageDriver: Send + Sync {
    /// Navigate to `url` and wait for the load event, bounded by `timeout`
    fn navigate(&self, url: &str, timeout: Duration) -> impl Future<Output = Result<()>> + Send;

    /// URL of the current document after redirects, if known
    fn current_url(&self) -> impl Future<Output = Result<Option<String>>> + Send;

    /// Evaluate a script expression; promises are awaited and the result
    /// returned by value (`Null` for `undefined`)
    fn evaluate(&self, script: &str) -> impl Future<Output = Result<serde_json::Value>> + Send;

    /// Wait until the page stops issuing requests, failing after `timeout`
    fn wait_for_network_idle(&self, timeout: Duration) -> impl Future<Output = Result<()>> + Send;

    /// Raw `href` attribute values of every hyperlink, in document order
    fn query_links(&self) -> impl Future<Output = Result<Vec<String>>> + Send;

    /// Write a full-document PNG to `path`; returns the number of bytes written
    fn screenshot(&self, path: &Path) -> impl Future<Output = Result<u64>> + Send;

    /// Close the tab and release whatever context it owns
    fn close(self) -> impl Future<Output = Result<()>> + Send;
}

/// Source of pages: one shared context for crawling, fresh isolated
/// contexts for each capture
pub trait BrowserHost: Send + Sync {
    type Page: PageDriver;

    /// Open a page. `None` reuses the shared crawl context; `Some(profile)`
    /// creates an isolated context with the profile's emulation applied.
    fn open_page(
        &self,
        profile: Option<&DeviceProfile>,
    ) -> impl Future<Output = Result<Self::Page>> + Send;
}

/// Close `page`, logging a close failure instead of returning it
///
/// `what` names the page in the log line.
pub async fn close_logged<P: PageDriver>(page: P, what: &str) {
    if let Err(e) = page.close().await {
        warn!("Failed to close {what}: {e:#}");
    }
}
