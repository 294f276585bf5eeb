//! chromiumoxide implementation of the browser capability
//!
//! One Chromium process serves the whole run. Crawl navigation shares the
//! default context; every capture gets a throwaway browser context so that
//! cookies, storage and viewport never leak between captures.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::browser::BrowserContextId;
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetDeviceMetricsOverrideParams, SetTouchEmulationEnabledParams,
};
use chromiumoxide::cdp::browser_protocol::network::SetUserAgentOverrideParams;
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, CaptureScreenshotParams, Viewport,
};
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::js_scripts::{LINKS_SCRIPT, LOCATION_SCRIPT, network_idle_script};
use super::page_timeout::with_page_timeout;
use super::{BrowserHost, DeviceProfile, PageDriver, close_logged};
use crate::browser_profile::{BrowserProfile, create_unique_profile};
use crate::browser_setup::launch_browser;
use crate::error::{CaptureError, CaptureResult};
use crate::utils::constants::{NETWORK_QUIET_WINDOW_MS, SCREENSHOT_TIMEOUT_MS};

const LAUNCH_REMEDIATION: &str = "install Google Chrome or Chromium, or set CHROMIUM_PATH to its executable; \
     inside containers make sure Chromium may start without a user namespace sandbox";

/// Launched Chromium plus the task driving its CDP connection
pub struct BrowserSession {
    browser: Arc<Browser>,
    handler: JoinHandle<()>,
    profile: BrowserProfile,
}

impl BrowserSession {
    /// Find or download Chromium and launch it with a fresh profile
    ///
    /// # Errors
    ///
    /// `EnvironmentUnavailable` when no browser can be found, downloaded or started.
    pub async fn launch(headless: bool, request_timeout: Duration) -> CaptureResult<Self> {
        let profile = create_unique_profile().map_err(|e| CaptureError::EnvironmentUnavailable {
            message: format!("Could not create a browser profile directory: {e:#}"),
            remediation: "check that the system temp directory is writable".to_string(),
        })?;

        let (browser, handler) = launch_browser(headless, profile.path(), request_timeout)
            .await
            .map_err(|e| CaptureError::EnvironmentUnavailable {
                message: format!("Could not start Chromium: {e:#}"),
                remediation: LAUNCH_REMEDIATION.to_string(),
            })?;

        info!("Browser launched (profile {})", profile.path().display());
        Ok(Self {
            browser: Arc::new(browser),
            handler,
            profile,
        })
    }

    /// Close Chromium, stop the handler task and remove the profile directory
    pub async fn shutdown(self) {
        let Self {
            browser,
            handler,
            profile,
        } = self;

        match Arc::try_unwrap(browser) {
            Ok(mut browser) => {
                if let Err(e) = browser.close().await {
                    warn!("Failed to close browser cleanly: {e}");
                }
                if let Err(e) = browser.wait().await {
                    warn!("Failed waiting for browser exit: {e}");
                }
            }
            Err(arc) => {
                warn!(
                    "Browser still has {} strong references, cleanup will happen on drop",
                    Arc::strong_count(&arc)
                );
            }
        }

        info!("Aborting browser handler task");
        handler.abort();
        if let Err(e) = handler.await
            && !e.is_cancelled()
        {
            warn!("Handler task failed during abort: {e}");
        }

        drop(profile);
    }

    async fn open_isolated(&self, profile: &DeviceProfile) -> Result<ChromiumPage> {
        let context_id = self
            .browser
            .execute(CreateBrowserContextParams::default())
            .await
            .context("Failed to create isolated browser context")?
            .result
            .browser_context_id;

        let target = CreateTargetParams::builder()
            .url("about:blank")
            .browser_context_id(context_id.clone())
            .build()
            .map_err(anyhow::Error::msg)?;

        let page = match self.browser.new_page(target).await {
            Ok(page) => page,
            Err(e) => {
                dispose_context(&self.browser, context_id).await;
                return Err(anyhow::Error::new(e).context("Failed to open page in isolated context"));
            }
        };

        let page = ChromiumPage {
            page,
            browser: Arc::clone(&self.browser),
            context_id: Some(context_id),
            viewport_width: profile.width,
        };
        if let Err(e) = apply_emulation(&page.page, profile).await {
            close_logged(page, &format!("{} page after emulation error", profile.name)).await;
            return Err(e);
        }
        debug!("Opened isolated {} page", profile.name);
        Ok(page)
    }
}

impl BrowserHost for BrowserSession {
    type Page = ChromiumPage;

    async fn open_page(&self, profile: Option<&DeviceProfile>) -> Result<ChromiumPage> {
        if let Some(profile) = profile {
            return self.open_isolated(profile).await;
        }

        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("Failed to open crawl page")?;
        let profile = DeviceProfile::desktop(1.0);
        apply_emulation(&page, &profile).await?;
        Ok(ChromiumPage {
            page,
            browser: Arc::clone(&self.browser),
            context_id: None,
            viewport_width: profile.width,
        })
    }
}

/// Apply viewport, touch and user agent emulation for `profile`
async fn apply_emulation(page: &Page, profile: &DeviceProfile) -> Result<()> {
    page.execute(
        SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(profile.width))
            .height(i64::from(profile.height))
            .device_scale_factor(profile.device_scale_factor)
            .mobile(profile.mobile)
            .build()
            .map_err(anyhow::Error::msg)?,
    )
    .await
    .context("Failed to set device metrics")?;

    page.execute(SetTouchEmulationEnabledParams::new(profile.touch))
        .await
        .context("Failed to set touch emulation")?;

    page.execute(SetUserAgentOverrideParams::new(profile.user_agent))
        .await
        .context("Failed to set user agent")?;

    Ok(())
}

async fn dispose_context(browser: &Browser, context_id: BrowserContextId) {
    if let Err(e) = browser
        .execute(DisposeBrowserContextParams::new(context_id))
        .await
    {
        warn!("Failed to dispose browser context: {e}");
    }
}

/// Clip covering the whole document in CSS px, never narrower than the
/// emulated viewport
fn full_document_clip(content_width: f64, content_height: f64, viewport_width: u32) -> Viewport {
    let width = content_width.max(f64::from(viewport_width)).ceil();
    let height = content_height.max(1.0).ceil();
    Viewport {
        x: 0.0,
        y: 0.0,
        width,
        height,
        scale: 1.0,
    }
}

/// PNG capture of `clip` beyond the viewport
///
/// The device metrics override stays untouched, so the output keeps the
/// profile's device pixel ratio and mobile layout.
fn document_screenshot_params(clip: Viewport) -> CaptureScreenshotParams {
    CaptureScreenshotParams {
        format: Some(CaptureScreenshotFormat::Png),
        clip: Some(clip),
        capture_beyond_viewport: Some(true),
        ..Default::default()
    }
}

/// A chromiumoxide tab, optionally owning its isolated browser context
pub struct ChromiumPage {
    page: Page,
    browser: Arc<Browser>,
    context_id: Option<BrowserContextId>,
    /// Emulated viewport width in CSS px
    viewport_width: u32,
}

impl PageDriver for ChromiumPage {
    async fn navigate(&self, url: &str, timeout: Duration) -> Result<()> {
        with_page_timeout(
            async {
                self.page
                    .goto(url)
                    .await
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                Ok(())
            },
            timeout,
            "Page navigation",
        )
        .await
    }

    async fn current_url(&self) -> Result<Option<String>> {
        let value = self.evaluate(LOCATION_SCRIPT).await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value> {
        let params = EvaluateParams::builder()
            .expression(script)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(anyhow::Error::msg)?;

        let result = self
            .page
            .evaluate_expression(params)
            .await
            .context("Failed to evaluate script in page")?;

        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    async fn wait_for_network_idle(&self, timeout: Duration) -> Result<()> {
        let script = network_idle_script(u128::from(NETWORK_QUIET_WINDOW_MS), timeout.as_millis());
        // The in-page loop gives up on its own; the outer timer covers a stuck evaluation.
        let idle = with_page_timeout(
            self.evaluate(&script),
            timeout + Duration::from_secs(1),
            "Network idle wait",
        )
        .await?;

        if idle.as_bool() == Some(true) {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "network still busy after {} ms",
                timeout.as_millis()
            ))
        }
    }

    async fn query_links(&self) -> Result<Vec<String>> {
        let value = self.evaluate(LINKS_SCRIPT).await?;
        serde_json::from_value(value).context("Failed to parse links from JS result")
    }

    async fn screenshot(&self, path: &Path) -> Result<u64> {
        let bytes = with_page_timeout(
            async {
                let metrics = self
                    .page
                    .layout_metrics()
                    .await
                    .context("Failed to read layout metrics")?;
                let content = &metrics.css_content_size;
                let clip = full_document_clip(content.width, content.height, self.viewport_width);
                debug!("Capturing {}x{} CSS px", clip.width, clip.height);

                self.page
                    .screenshot(document_screenshot_params(clip))
                    .await
                    .map_err(|e| anyhow::anyhow!("Failed to capture screenshot: {e}"))
            },
            Duration::from_millis(SCREENSHOT_TIMEOUT_MS),
            "Screenshot",
        )
        .await?;

        tokio::fs::write(path, &bytes)
            .await
            .with_context(|| format!("Failed to write screenshot to {}", path.display()))?;

        Ok(bytes.len() as u64)
    }

    async fn close(self) -> Result<()> {
        let Self {
            page,
            browser,
            context_id,
            ..
        } = self;

        let closed = page.close().await.context("Failed to close page");
        if let Some(context_id) = context_id {
            dispose_context(&browser, context_id).await;
        }
        closed
    }
}
