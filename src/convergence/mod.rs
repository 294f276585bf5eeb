//! Page convergence driver
//!
//! Takes a navigated page to a capture-ready state: DOM ready, lazy content
//! promoted, document height stable under scrolling, assets settled, motion
//! frozen and excluded elements hidden. Every wait is bounded.

pub mod scripts;
pub mod selectors;
pub mod stabilizer;

use std::time::Duration;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};

pub use selectors::{ExclusionSelectorSet, build_excluded_selectors, css_escape};
pub use stabilizer::{ScrollStabilizer, ScrollVerdict};

use crate::config::ConvergenceSettings;
use crate::driver::{PageDriver, with_page_timeout};
use scripts::{
    DOCUMENT_HEIGHT_SCRIPT, LAZY_PROMOTION_SCRIPT, SCROLL_TO_TOP_SCRIPT, asset_settle_script,
    determinism_script, dom_ready_script, scroll_pass_script,
};

/// What the convergence loop observed on one page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceReport {
    /// Scroll rounds performed
    pub scroll_rounds: u32,
    /// Largest document height seen, in CSS px
    pub max_height: f64,
    /// `false` when the round cap ended scrolling before the height settled
    pub height_stable: bool,
    /// Whether images and fonts finished before the settle timeout
    pub assets_settled: bool,
    /// Elements hidden by exclusion selectors
    pub hidden_elements: u64,
}

/// Drive `page` to a capture-ready state
///
/// # Errors
///
/// Fails when the DOM never becomes ready or an in-page script cannot run.
/// Network idle and asset settle waits are best-effort and never fail.
pub async fn prepare_page<P: PageDriver>(
    page: &P,
    selectors: &ExclusionSelectorSet,
    settings: &ConvergenceSettings,
) -> Result<ConvergenceReport> {
    wait_for_dom_ready(page, settings).await?;

    if let Err(e) = page.wait_for_network_idle(settings.network_idle_timeout).await {
        debug!("Proceeding without network idle after load: {e:#}");
    }
    sleep_if_nonzero(settings.post_load_grace).await;

    let promoted = run_script(page, LAZY_PROMOTION_SCRIPT, settings.script_timeout, "Lazy content promotion").await?;
    debug!("Promoted {} lazy elements", promoted.as_u64().unwrap_or(0));

    let (scroll_rounds, max_height, height_stable) = stabilize_scroll(page, settings).await?;

    let assets_settled = settle_assets(page, settings).await;

    let hidden = run_script(
        page,
        &determinism_script(selectors.as_slice()),
        settings.script_timeout,
        "Determinism pass",
    )
    .await?;

    sleep_if_nonzero(settings.final_settle).await;

    let report = ConvergenceReport {
        scroll_rounds,
        max_height,
        height_stable,
        assets_settled,
        hidden_elements: hidden.as_u64().unwrap_or(0),
    };
    info!(
        "Page converged after {} scroll rounds (height {}px, stable: {}, assets settled: {})",
        report.scroll_rounds, report.max_height, report.height_stable, report.assets_settled
    );
    Ok(report)
}

async fn wait_for_dom_ready<P: PageDriver>(page: &P, settings: &ConvergenceSettings) -> Result<()> {
    let budget = settings.dom_ready_timeout;
    let ready = with_page_timeout(
        page.evaluate(&dom_ready_script(budget.as_millis())),
        budget + settings.script_timeout,
        "DOM ready wait",
    )
    .await?;

    if ready.as_bool() != Some(true) {
        bail!("DOM not ready after {} ms", budget.as_millis());
    }
    Ok(())
}

/// Scroll full passes until the height holds; then return to the top
async fn stabilize_scroll<P: PageDriver>(
    page: &P,
    settings: &ConvergenceSettings,
) -> Result<(u32, f64, bool)> {
    let initial = read_height(page, DOCUMENT_HEIGHT_SCRIPT, settings.script_timeout, "Document height").await?;
    let mut stabilizer = ScrollStabilizer::new(initial, settings);

    let pass = scroll_pass_script(
        settings.scroll_step_min_px,
        settings.scroll_step_delay.as_millis(),
        settings.scroll_pass_max_steps,
    );
    let pass_budget = settings.script_timeout + settings.scroll_step_delay * settings.scroll_pass_max_steps;

    let height_stable = loop {
        let height = read_height(page, &pass, pass_budget, "Scroll pass").await?;
        match stabilizer.observe(height) {
            ScrollVerdict::Continue => {}
            ScrollVerdict::Stable => break true,
            ScrollVerdict::RoundCapReached => {
                warn!(
                    "Document height still growing after {} scroll rounds, capturing at {}px",
                    stabilizer.rounds(),
                    stabilizer.max_height()
                );
                break false;
            }
        }
    };

    run_script(page, SCROLL_TO_TOP_SCRIPT, settings.script_timeout, "Scroll to top").await?;
    Ok((stabilizer.rounds(), stabilizer.max_height(), height_stable))
}

/// Best-effort: network idle, then images and fonts raced against a timer
async fn settle_assets<P: PageDriver>(page: &P, settings: &ConvergenceSettings) -> bool {
    if let Err(e) = page.wait_for_network_idle(settings.network_idle_timeout).await {
        debug!("Proceeding without network idle before asset settle: {e:#}");
    }

    let budget = settings.asset_settle_timeout;
    match with_page_timeout(
        page.evaluate(&asset_settle_script(budget.as_millis())),
        budget,
        "Asset settle",
    )
    .await
    {
        Ok(value) => value.as_bool().unwrap_or(false),
        Err(e) => {
            debug!("Proceeding with assets still loading: {e:#}");
            false
        }
    }
}

async fn run_script<P: PageDriver>(
    page: &P,
    script: &str,
    timeout: Duration,
    name: &str,
) -> Result<serde_json::Value> {
    with_page_timeout(page.evaluate(script), timeout, name)
        .await
        .with_context(|| format!("{name} failed"))
}

async fn read_height<P: PageDriver>(page: &P, script: &str, timeout: Duration, name: &str) -> Result<f64> {
    let value = run_script(page, script, timeout, name).await?;
    value
        .as_f64()
        .with_context(|| format!("{name} returned a non-numeric height: {value}"))
}

async fn sleep_if_nonzero(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
