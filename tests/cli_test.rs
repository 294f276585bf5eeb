//! Tests for command-line parsing into capture configuration

use std::path::Path;
use std::time::Duration;

use sitesnap::{CaptureConfig, CaptureError, CliOutcome, parse_args};

fn parse(args: &[&str]) -> Result<CliOutcome, CaptureError> {
    parse_args(std::iter::once("sitesnap").chain(args.iter().copied()))
}

fn config(args: &[&str]) -> CaptureConfig {
    match parse(args) {
        Ok(CliOutcome::Run(config)) => *config,
        other => panic!("expected a run config for {args:?}, got {other:?}"),
    }
}

#[test]
fn test_defaults() {
    let config = config(&[]);
    assert!(config.urls().is_empty());
    assert!(config.url_files().is_empty());
    assert_eq!(config.output_dir(), Path::new("./screenshot-output"));
    assert_eq!(config.scale(), 2.0);
    assert_eq!(config.navigation_timeout(), Duration::from_millis(60_000));
    assert!(!config.crawl().enabled);
    assert_eq!(config.crawl().max_depth, 1);
    assert_eq!(config.crawl().max_pages, 50);
    assert!(config.crawl().same_origin_only);
    assert!(config.headless());
}

#[test]
fn test_full_option_set() {
    let config = config(&[
        "example.com",
        "--url-file",
        "a.txt",
        "https://example.org/",
        "--url-file=b.md",
        "--crawl",
        "--crawl-depth",
        "3",
        "--max-pages",
        "10",
        "--exclude-class",
        "promo,banner",
        "--exclude-class=footer",
        "--exclude-id",
        "chat",
        "--output",
        "shots",
        "--scale",
        "1.5",
        "--timeout-ms",
        "5000",
        "--mode",
        "full",
    ]);

    assert_eq!(config.urls(), ["example.com", "https://example.org/"]);
    assert_eq!(config.url_files(), [Path::new("a.txt"), Path::new("b.md")]);
    assert!(config.crawl().enabled);
    assert_eq!(config.crawl().max_depth, 3);
    assert_eq!(config.crawl().max_pages, 10);
    assert_eq!(config.exclude_classes(), ["promo", "banner", "footer"]);
    assert_eq!(config.exclude_ids(), ["chat"]);
    assert_eq!(config.output_dir(), Path::new("shots"));
    assert_eq!(config.scale(), 1.5);
    assert_eq!(config.navigation_timeout(), Duration::from_millis(5000));
}

#[test]
fn test_crawl_aliases_and_last_flag_wins() {
    assert!(config(&["--loop", "--loop-depth", "0"]).crawl().enabled);
    assert_eq!(config(&["--loop-depth", "0"]).crawl().max_depth, 0);
    assert!(!config(&["--crawl", "--no-crawl"]).crawl().enabled);
    assert!(config(&["--no-crawl", "--crawl"]).crawl().enabled);
}

#[test]
fn test_same_origin_forms() {
    assert!(config(&["--same-origin-only"]).crawl().same_origin_only);
    assert!(config(&["--same-origin-only=true"]).crawl().same_origin_only);
    assert!(!config(&["--same-origin-only=false"]).crawl().same_origin_only);
    assert!(!config(&["--no-same-origin-only"]).crawl().same_origin_only);
}

#[test]
fn test_segment_mode_is_not_supported() {
    for args in [&["--mode=segments"][..], &["--mode", "segments"][..], &["--segments"][..]] {
        match parse(args) {
            Err(CaptureError::NotSupported(what)) => assert!(what.contains("segments")),
            other => panic!("{args:?}: expected NotSupported, got {other:?}"),
        }
    }
}

#[test]
fn test_unknown_option() {
    match parse(&["--frobnicate"]) {
        Err(CaptureError::UnknownOption(arg)) => assert!(arg.contains("--frobnicate"), "{arg}"),
        other => panic!("expected UnknownOption, got {other:?}"),
    }
}

#[test]
fn test_help_is_not_an_error() {
    for flag in ["--help", "-h"] {
        match parse(&[flag]) {
            Ok(CliOutcome::Help(text)) => {
                assert!(text.contains("--url-file"));
                assert!(text.contains("--crawl"));
            }
            other => panic!("{flag}: expected help, got {other:?}"),
        }
    }
}

#[test]
fn test_out_of_range_values_are_invalid() {
    for args in [
        &["--timeout-ms", "4999"][..],
        &["--max-pages", "0"][..],
        &["--scale", "0"][..],
        &["--scale", "5"][..],
        &["--crawl-depth", "deep"][..],
        &["--scale", "big"][..],
        &["--url-file"][..],
    ] {
        assert!(
            matches!(parse(args), Err(CaptureError::InvalidArgument(_))),
            "{args:?} should be rejected"
        );
    }
}
