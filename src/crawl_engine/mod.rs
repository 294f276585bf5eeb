//! Crawl Engine Module
//!
//! Bounded breadth-first discovery of additional pages from the seed URLs.

pub mod crawl_types;
pub mod crawler;
pub mod link_filter;

pub use crawl_types::{CrawlFrontier, CrawlQueue};
pub use crawler::crawl_site;
pub use link_filter::{LinkFilter, OriginAllowSet, is_asset_path};
