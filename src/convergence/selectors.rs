//! Exclusion selector set
//!
//! Fixed defaults first, then one `.class` selector per excluded class and
//! one `#id` selector per excluded id, escaped, duplicates removed.

use std::collections::HashSet;

use crate::utils::DEFAULT_EXCLUDED_SELECTORS;

/// Ordered, duplicate-free CSS selectors hidden on every page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionSelectorSet {
    selectors: Vec<String>,
}

impl ExclusionSelectorSet {
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.selectors
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selectors.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Build the exclusion selectors for a run
///
/// Leading `.` on class names and `#` on ids are tolerated; blank names are
/// ignored.
#[must_use]
pub fn build_excluded_selectors<C, I>(classes: &[C], ids: &[I]) -> ExclusionSelectorSet
where
    C: AsRef<str>,
    I: AsRef<str>,
{
    let candidates = DEFAULT_EXCLUDED_SELECTORS
        .iter()
        .map(|s| (*s).to_string())
        .chain(
            classes
                .iter()
                .filter_map(|name| clean_name(name.as_ref(), '.'))
                .map(|name| format!(".{}", css_escape(name))),
        )
        .chain(
            ids.iter()
                .filter_map(|name| clean_name(name.as_ref(), '#'))
                .map(|name| format!("#{}", css_escape(name))),
        );

    let mut seen = HashSet::new();
    let selectors = candidates.filter(|s| seen.insert(s.clone())).collect();
    ExclusionSelectorSet { selectors }
}

fn clean_name(raw: &str, sigil: char) -> Option<&str> {
    let name = raw.trim();
    let name = name.strip_prefix(sigil).unwrap_or(name).trim();
    (!name.is_empty()).then_some(name)
}

/// Escape an identifier the way `CSS.escape` does
#[must_use]
pub fn css_escape(ident: &str) -> String {
    let chars: Vec<char> = ident.chars().collect();
    let mut out = String::with_capacity(ident.len());

    for (index, &c) in chars.iter().enumerate() {
        let code = c as u32;
        match c {
            '\0' => out.push('\u{FFFD}'),
            '\u{1}'..='\u{1f}' | '\u{7f}' => push_code_point(&mut out, code),
            '0'..='9' if index == 0 => push_code_point(&mut out, code),
            '0'..='9' if index == 1 && chars[0] == '-' => push_code_point(&mut out, code),
            '-' if index == 0 && chars.len() == 1 => out.push_str("\\-"),
            c if code >= 0x80 || c == '-' || c == '_' || c.is_ascii_alphanumeric() => out.push(c),
            c => {
                out.push('\\');
                out.push(c);
            }
        }
    }
    out
}

fn push_code_point(out: &mut String, code: u32) {
    out.push_str(&format!("\\{code:x} "));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_like_css_escape() {
        assert_eq!(css_escape("hero-banner"), "hero-banner");
        assert_eq!(css_escape("1col"), "\\31 col");
        assert_eq!(css_escape("-2x"), "-\\32 x");
        assert_eq!(css_escape("-"), "\\-");
        assert_eq!(css_escape("md:flex"), "md\\:flex");
        assert_eq!(css_escape("w-1/2"), "w-1\\/2");
        assert_eq!(css_escape("café"), "café");
    }

    #[test]
    fn clean_name_strips_one_sigil() {
        assert_eq!(clean_name(" .promo ", '.'), Some("promo"));
        assert_eq!(clean_name("#promo", '.'), Some("#promo"));
        assert_eq!(clean_name("  ", '#'), None);
        assert_eq!(clean_name("#", '#'), None);
    }
}
