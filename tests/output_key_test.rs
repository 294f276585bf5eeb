//! Tests for output key resolution and capture target naming

use std::collections::HashSet;
use std::path::Path;

use sitesnap::{DeviceProfile, OutputKeyResolver, build_capture_targets};

mod common;
use common::{url, urls};

#[test]
fn test_keys_from_last_path_segment() {
    let mut resolver = OutputKeyResolver::with_timestamp("20260101-000000");
    assert_eq!(resolver.resolve(&url("https://example.com/")), "home");
    assert_eq!(resolver.resolve(&url("https://example.com/Programs/Sleep_Health/")), "sleep-health");
    assert_eq!(resolver.resolve(&url("https://example.com/a/About%20Us")), "about-us");
    assert_eq!(resolver.resolve(&url("https://example.com/%E2%9C%93")), "page");
}

#[test]
fn test_query_does_not_affect_key() {
    let mut resolver = OutputKeyResolver::with_timestamp("t");
    assert_eq!(resolver.resolve(&url("https://example.com/search?q=x")), "search");
}

#[test]
fn test_collisions_walk_the_fallback_chain() {
    let mut resolver = OutputKeyResolver::with_timestamp("20260101-000000");

    let keys: Vec<String> = [
        "https://example.com/about",
        "https://example.org/about",
        "https://example.com/team/about",
        "https://example.com/x/about",
        "https://example.com/y/about",
    ]
    .iter()
    .map(|raw| resolver.resolve(&url(raw)))
    .collect();

    assert_eq!(
        keys,
        vec![
            "about",
            "example-org-about",
            "example-com-about",
            "example-com-about-20260101-000000",
            "example-com-about-20260101-000000-2",
        ]
    );
}

#[test]
fn test_many_urls_with_same_base_get_distinct_keys() {
    let mut resolver = OutputKeyResolver::with_timestamp("ts");
    let keys: Vec<String> = (0..25)
        .map(|i| resolver.resolve(&url(&format!("https://example.com/section-{i}/index"))))
        .collect();

    assert_eq!(keys[0], "index");
    let unique: HashSet<&String> = keys.iter().collect();
    assert_eq!(unique.len(), keys.len());
}

#[test]
fn test_capture_targets_keep_order_and_name_files_per_profile() {
    let mut resolver = OutputKeyResolver::with_timestamp("ts");
    let targets = build_capture_targets(
        &urls(&["https://example.com/", "https://example.com/contact"]),
        &mut resolver,
    );

    assert_eq!(targets.len(), 2);
    assert_eq!(targets[0].output_key, "home");
    assert_eq!(targets[1].output_key, "contact");

    let [desktop, mobile] = DeviceProfile::capture_order(2.0);
    let out = Path::new("/tmp/shots");
    assert_eq!(
        targets[1].output_path(out, &desktop),
        out.join("contact-fullpage-document.png")
    );
    assert_eq!(
        targets[1].output_path(out, &mobile),
        out.join("contact-fullpage-mobile-document.png")
    );
}

#[test]
fn test_device_profiles() {
    let [desktop, mobile] = DeviceProfile::capture_order(1.5);
    assert_eq!((desktop.width, desktop.height), (1440, 900));
    assert!(!desktop.mobile);
    assert_eq!((mobile.width, mobile.height), (390, 844));
    assert!(mobile.mobile && mobile.touch);
    assert!(mobile.user_agent.contains("iPhone"));
    assert_eq!(desktop.device_scale_factor, 1.5);
    assert_eq!(mobile.device_scale_factor, 1.5);
}
