//! Capture orchestration
//!
//! Seeds, optional crawl, then every target captured once per device profile,
//! strictly one at a time. Each target/profile pair gets its own isolated
//! page. A failing target is reported and the batch moves on; the run fails
//! at the end if any target failed.

use std::time::Instant;

use log::{debug, info, warn};

use super::output_key::OutputKeyResolver;
use super::reporter::{CaptureReporter, SavedScreenshot};
use super::targets::{CaptureTarget, build_capture_targets};
use crate::config::CaptureConfig;
use crate::convergence::{ExclusionSelectorSet, build_excluded_selectors, prepare_page};
use crate::crawl_engine::crawl_site;
use crate::driver::{BrowserHost, BrowserSession, DeviceProfile, PageDriver, close_logged};
use crate::error::{CaptureError, CaptureResult};
use crate::seeds::resolve_seeds;
use crate::utils::CaptureUrl;

/// Totals for a run in which every target was captured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub targets: usize,
    pub screenshots: usize,
}

/// Run a full capture: resolve seeds, launch Chromium, capture, shut down
///
/// # Errors
///
/// Input and environment errors abort before any capture. Per-target
/// failures are collected and surface as `CaptureFailures`.
pub async fn run_capture<R: CaptureReporter>(
    config: &CaptureConfig,
    reporter: &R,
) -> CaptureResult<RunSummary> {
    let seeds = resolve_seeds(config.urls(), config.url_files()).await?;
    info!("Resolved {} seed URLs", seeds.len());

    let selectors = build_excluded_selectors(config.exclude_classes(), config.exclude_ids());
    reporter.report_run_started(config, &selectors);

    tokio::fs::create_dir_all(config.output_dir()).await?;

    let session = BrowserSession::launch(config.headless(), config.navigation_timeout()).await?;
    let result = run_with_host(&session, seeds.as_slice(), &selectors, config, reporter).await;
    session.shutdown().await;
    result
}

/// Crawl (when enabled) and capture using an already-running browser
///
/// # Errors
///
/// `NoTargetsResolved` when nothing is left to capture, `CaptureFailures`
/// when any target failed.
pub async fn run_with_host<H, R>(
    host: &H,
    seeds: &[CaptureUrl],
    selectors: &ExclusionSelectorSet,
    config: &CaptureConfig,
    reporter: &R,
) -> CaptureResult<RunSummary>
where
    H: BrowserHost,
    R: CaptureReporter,
{
    let started = Instant::now();
    let mut resolver = OutputKeyResolver::new();

    let urls = if config.crawl().enabled && !seeds.is_empty() {
        let discovered = discover(host, seeds, config).await?;
        reporter.report_crawl_finished(seeds.len(), discovered.len());
        discovered
    } else {
        seeds.to_vec()
    };

    if urls.is_empty() {
        return Err(CaptureError::NoTargetsResolved);
    }

    let targets = build_capture_targets(&urls, &mut resolver);
    let profiles = DeviceProfile::capture_order(config.scale());

    let mut screenshots = 0;
    let mut failed = 0;
    for target in &targets {
        if let Err(e) = capture_target(host, target, &profiles, selectors, config, reporter, &mut screenshots).await {
            failed += 1;
            warn!("Capture of {} failed: {e}", target.url);
            reporter.report_target_failed(&target.url, &e);
        }
    }

    reporter.report_run_finished(screenshots, failed, started.elapsed());

    if failed > 0 {
        return Err(CaptureError::CaptureFailures {
            failed,
            total: targets.len(),
        });
    }
    Ok(RunSummary {
        targets: targets.len(),
        screenshots,
    })
}

/// Crawl from the seeds on one shared page
async fn discover<H: BrowserHost>(
    host: &H,
    seeds: &[CaptureUrl],
    config: &CaptureConfig,
) -> CaptureResult<Vec<CaptureUrl>> {
    let page = host.open_page(None).await?;
    let discovered = crawl_site(&page, seeds, config.crawl(), config.navigation_timeout()).await;
    close_logged(page, "crawl page").await;
    Ok(discovered)
}

/// Capture one target under every profile, desktop first
///
/// Stops at the first failing profile.
async fn capture_target<H, R>(
    host: &H,
    target: &CaptureTarget,
    profiles: &[DeviceProfile],
    selectors: &ExclusionSelectorSet,
    config: &CaptureConfig,
    reporter: &R,
    screenshots: &mut usize,
) -> CaptureResult<()>
where
    H: BrowserHost,
    R: CaptureReporter,
{
    for profile in profiles {
        let page = host.open_page(Some(profile)).await?;
        let result = capture_on_page(&page, target, profile, selectors, config, reporter).await;
        close_logged(page, &format!("{} page for {}", profile.name, target.url)).await;
        result?;
        *screenshots += 1;
    }
    Ok(())
}

async fn capture_on_page<P, R>(
    page: &P,
    target: &CaptureTarget,
    profile: &DeviceProfile,
    selectors: &ExclusionSelectorSet,
    config: &CaptureConfig,
    reporter: &R,
) -> CaptureResult<()>
where
    P: PageDriver,
    R: CaptureReporter,
{
    let url = target.url.as_str();
    debug!("Capturing {url} as {}", profile.name);

    page.navigate(url, config.navigation_timeout())
        .await
        .map_err(|e| CaptureError::navigation(url, format!("{e:#}")))?;

    prepare_page(page, selectors, config.convergence())
        .await
        .map_err(|e| CaptureError::navigation(url, format!("{e:#}")))?;

    let path = target.output_path(config.output_dir(), profile);
    let bytes = page.screenshot(&path).await?;

    reporter.report_screenshot_saved(&SavedScreenshot {
        url: &target.url,
        profile,
        path: &path,
        bytes,
    });
    Ok(())
}
