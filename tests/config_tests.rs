//! Tests for the capture configuration builder

use std::time::Duration;

use sitesnap::{CaptureConfig, CaptureError, ConvergenceSettings};
use tempfile::TempDir;

#[test]
fn test_builder_optional_fields_have_defaults() {
    let config = CaptureConfig::builder().build().unwrap();

    assert_eq!(config.scale(), 2.0);
    assert_eq!(config.navigation_timeout(), Duration::from_secs(60));
    assert!(config.headless());
    assert!(!config.crawl().enabled);
    assert_eq!(config.convergence(), &ConvergenceSettings::default());
}

#[test]
fn test_builder_with_all_fields() {
    let temp_dir = TempDir::new().unwrap();
    let config = CaptureConfig::builder()
        .urls(vec!["example.com".to_string()])
        .url_files(vec![temp_dir.path().join("urls.txt")])
        .output_dir(temp_dir.path())
        .scale(4.0)
        .navigation_timeout_ms(5000)
        .exclude_classes(vec!["promo".to_string()])
        .exclude_ids(vec!["chat".to_string()])
        .headless(false)
        .crawl_enabled(true)
        .crawl_depth(0)
        .max_pages(1)
        .same_origin_only(false)
        .convergence(ConvergenceSettings::instant())
        .build()
        .unwrap();

    assert_eq!(config.urls(), ["example.com"]);
    assert_eq!(config.output_dir(), temp_dir.path());
    assert_eq!(config.scale(), 4.0);
    assert!(!config.headless());
    assert_eq!(config.crawl().max_depth, 0);
    assert_eq!(config.crawl().max_pages, 1);
    assert!(!config.crawl().same_origin_only);
    assert_eq!(config.convergence().final_settle, Duration::ZERO);
    assert_eq!(config.convergence().max_scroll_rounds, 36);
}

#[test]
fn test_builder_rejects_out_of_range_values() {
    let cases = [
        CaptureConfig::builder().scale(0.0),
        CaptureConfig::builder().scale(-1.0),
        CaptureConfig::builder().scale(4.5),
        CaptureConfig::builder().scale(f64::NAN),
        CaptureConfig::builder().navigation_timeout_ms(4999),
        CaptureConfig::builder().max_pages(0),
        CaptureConfig::builder().output_dir(""),
    ];

    for builder in cases {
        match builder.build() {
            Err(CaptureError::InvalidArgument(message)) => assert!(message.starts_with("--")),
            other => panic!("expected InvalidArgument, got {other:?}"),
        }
    }
}

#[test]
fn test_config_serializes_to_json() {
    let config = CaptureConfig::builder().crawl_enabled(true).build().unwrap();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["crawl"]["enabled"], true);
    assert_eq!(json["crawl"]["max_pages"], 50);
}
