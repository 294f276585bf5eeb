//! Breadth-first link discovery
//!
//! One shared page visits the frontier in FIFO order. A page that fails to
//! load, or whose links cannot be read, is skipped without aborting the crawl.

use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

use super::crawl_types::{CrawlFrontier, CrawlQueue};
use super::link_filter::LinkFilter;
use crate::config::CrawlSettings;
use crate::driver::PageDriver;
use crate::utils::CaptureUrl;

/// Discover pages reachable from `seeds` within the crawl constraints
///
/// Returns every discovered URL in discovery order, seeds first, never more
/// than `max_pages` unless the seeds alone exceed it.
pub async fn crawl_site<P: PageDriver>(
    page: &P,
    seeds: &[CaptureUrl],
    settings: &CrawlSettings,
    navigation_timeout: Duration,
) -> Vec<CaptureUrl> {
    let mut frontier = CrawlFrontier::from_seeds(seeds, settings.max_pages);
    if frontier.is_full() {
        info!(
            target: "sitesnap::crawl",
            "{} seeds already meet the page cap of {}, nothing to crawl",
            frontier.discovered_count(),
            settings.max_pages
        );
        return frontier.into_discovered();
    }

    let filter = LinkFilter::new(seeds, settings.same_origin_only);

    'crawl: while let Some(item) = frontier.pop() {
        // max-depth nodes are never expanded
        if item.depth >= settings.max_depth {
            continue;
        }

        let Some((base, hrefs)) = visit(page, &item, navigation_timeout).await else {
            continue;
        };

        let before = frontier.discovered_count();
        for href in &hrefs {
            let Some(link) = filter.accept(&base, href) else {
                continue;
            };
            if frontier.discover(link, item.depth + 1) && frontier.is_full() {
                info!(
                    target: "sitesnap::crawl",
                    "Reached page cap of {}, stopping crawl",
                    settings.max_pages
                );
                break 'crawl;
            }
        }

        debug!(
            target: "sitesnap::crawl",
            "Found {} links on {} (depth {}), {} new",
            hrefs.len(),
            item.url,
            item.depth,
            frontier.discovered_count() - before
        );
    }

    let discovered = frontier.into_discovered();
    info!(
        target: "sitesnap::crawl",
        "Crawl discovered {} pages from {} seeds",
        discovered.len(),
        seeds.len()
    );
    discovered
}

/// Load one node and read its links; `None` means skip it
async fn visit<P: PageDriver>(
    page: &P,
    item: &CrawlQueue,
    navigation_timeout: Duration,
) -> Option<(Url, Vec<String>)> {
    if let Err(e) = page.navigate(item.url.as_str(), navigation_timeout).await {
        warn!(target: "sitesnap::crawl", "Skipping {}: {e:#}", item.url);
        return None;
    }

    let hrefs = match page.query_links().await {
        Ok(hrefs) => hrefs,
        Err(e) => {
            warn!(target: "sitesnap::crawl", "Could not read links on {}: {e:#}", item.url);
            return None;
        }
    };

    // Resolve against the post-redirect URL when the page reports one
    let base = match page.current_url().await {
        Ok(Some(current)) => Url::parse(&current).ok(),
        Ok(None) => None,
        Err(e) => {
            debug!(target: "sitesnap::crawl", "No current URL for {}: {e:#}", item.url);
            None
        }
    };
    let base = match base {
        Some(base) => base,
        None => item.url.to_url().ok()?,
    };

    Some((base, hrefs))
}
