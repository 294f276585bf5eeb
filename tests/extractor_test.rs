//! Tests for free-form text URL extraction

use sitesnap::extract_urls_from_text;

fn extracted(text: &str) -> Vec<String> {
    extract_urls_from_text(text)
        .into_iter()
        .map(|u| u.into_string())
        .collect()
}

#[test]
fn test_mixed_document_extracts_three_urls_in_order() {
    let text = "\
https://example.com/about
See [our home page](https://example.com/) for details.
membershealth.ca/Discovery
https://example.com/about
";

    assert_eq!(
        extracted(text),
        vec![
            "https://example.com/about",
            "https://example.com/",
            "https://membershealth.ca/Discovery",
        ]
    );
}

#[test]
fn test_trailing_punctuation_is_trimmed() {
    let text = "Visit https://example.com/a, then (https://example.com/b). Also https://example.com/c;";
    assert_eq!(
        extracted(text),
        vec![
            "https://example.com/a",
            "https://example.com/b",
            "https://example.com/c",
        ]
    );
}

#[test]
fn test_scheme_defaulted_duplicates_collapse() {
    let text = "example.com/pricing\nhttps://example.com/pricing\n";
    assert_eq!(extracted(text), vec!["https://example.com/pricing"]);
}

#[test]
fn test_fragment_variants_collapse() {
    let text = "https://example.com/faq#one https://example.com/faq#two";
    assert_eq!(extracted(text), vec!["https://example.com/faq"]);
}

#[test]
fn test_bare_lines_with_spaces_or_emails_are_ignored() {
    let text = "\
contact@example.com
example.com is our site
not a url
  indented.example.org/page
";
    assert_eq!(extracted(text), vec!["https://indented.example.org/page"]);
}

#[test]
fn test_invalid_candidates_are_dropped_silently() {
    let text = "https://exa%mple.com/\nhttps://good.example.com/ok";
    assert_eq!(extracted(text), vec!["https://good.example.com/ok"]);
}

#[test]
fn test_extraction_is_deterministic() {
    let text = "b.example.com\n[x](https://a.example.com/)\nhttps://c.example.com/";
    let first = extracted(text);
    for _ in 0..5 {
        assert_eq!(extracted(text), first);
    }
    assert_eq!(
        first,
        vec![
            "https://a.example.com/",
            "https://c.example.com/",
            "https://b.example.com/",
        ]
    );
}

#[test]
fn test_empty_text_yields_nothing() {
    assert!(extract_urls_from_text("").is_empty());
    assert!(extract_urls_from_text("no links here at all").is_empty());
}
