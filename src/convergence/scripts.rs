//! In-page scripts for the convergence loop
//!
//! Each script is a named function expression so that the driver's logs and
//! test doubles can tell them apart.

use crate::utils::REVEAL_SELECTORS;

/// Resolves `true` once the DOM has been parsed, or `false` after `max_ms`
#[must_use]
pub fn dom_ready_script(max_ms: u128) -> String {
    format!(
        r#"
    (async function waitForDomReady(maxMs) {{
        if (document.readyState !== 'loading') {{
            return true;
        }}
        await new Promise(resolve => {{
            document.addEventListener('DOMContentLoaded', resolve, {{ once: true }});
            setTimeout(resolve, maxMs);
        }});
        return document.readyState !== 'loading';
    }})({max_ms})
"#
    )
}

/// Forces lazy images and iframes to load and promotes deferred `data-*`
/// sources. Returns the number of elements touched.
pub const LAZY_PROMOTION_SCRIPT: &str = r#"
    (function promoteLazyContent() {
        let touched = 0;
        const promote = (el, from, to) => {
            const value = el.getAttribute(from);
            if (value && el.getAttribute(to) !== value) {
                el.setAttribute(to, value);
                return true;
            }
            return false;
        };

        document.querySelectorAll('img[loading="lazy"], iframe[loading="lazy"]').forEach(el => {
            el.setAttribute('loading', 'eager');
            touched++;
        });

        document.querySelectorAll('[data-src], [data-lazy-src], [data-original], [data-srcset], [data-lazy-srcset]').forEach(el => {
            let changed = false;
            changed = promote(el, 'data-src', 'src') || changed;
            changed = promote(el, 'data-lazy-src', 'src') || changed;
            changed = promote(el, 'data-original', 'src') || changed;
            changed = promote(el, 'data-srcset', 'srcset') || changed;
            changed = promote(el, 'data-lazy-srcset', 'srcset') || changed;
            if (changed) touched++;
        });

        document.querySelectorAll('[data-bg], [data-background-image]').forEach(el => {
            const value = el.getAttribute('data-bg') || el.getAttribute('data-background-image');
            if (!value) return;
            const css = value.trim().startsWith('url(') ? value : `url("${value}")`;
            el.style.setProperty('background-image', css, 'important');
            touched++;
        });

        document.querySelectorAll('*').forEach(el => {
            if (getComputedStyle(el).contentVisibility === 'auto') {
                el.style.setProperty('content-visibility', 'visible', 'important');
                touched++;
            }
        });

        return touched;
    })()
"#;

/// Current scrollable document height in CSS px
pub const DOCUMENT_HEIGHT_SCRIPT: &str = r#"
    (function documentHeight() {
        const root = document.scrollingElement || document.documentElement;
        return Math.max(
            root ? root.scrollHeight : 0,
            document.documentElement ? document.documentElement.offsetHeight : 0,
            document.body ? document.body.scrollHeight : 0
        );
    })()
"#;

/// One top-to-bottom pass in viewport-sized steps; resolves to the largest
/// height observed during the pass
#[must_use]
pub fn scroll_pass_script(min_step_px: u32, step_delay_ms: u128, max_steps: u32) -> String {
    format!(
        r#"
    (async function scrollPass(minStep, delayMs, maxSteps) {{
        const root = document.scrollingElement || document.documentElement;
        const height = () => Math.max(
            root ? root.scrollHeight : 0,
            document.body ? document.body.scrollHeight : 0
        );
        const step = Math.max(minStep, window.innerHeight || 0);
        let maxHeight = height();
        let y = 0;
        window.scrollTo(0, 0);
        for (let i = 0; i < maxSteps; i++) {{
            y += step;
            window.scrollTo(0, y);
            await new Promise(resolve => setTimeout(resolve, delayMs));
            maxHeight = Math.max(maxHeight, height());
            if (y + (window.innerHeight || 0) >= height()) break;
        }}
        return maxHeight;
    }})({min_step_px}, {step_delay_ms}, {max_steps})
"#
    )
}

pub const SCROLL_TO_TOP_SCRIPT: &str = r#"
    (function scrollToTop() {
        window.scrollTo(0, 0);
        return true;
    })()
"#;

/// Resolves once every image is complete or errored and web fonts are
/// ready, or after `max_ms`
#[must_use]
pub fn asset_settle_script(max_ms: u128) -> String {
    format!(
        r#"
    (async function waitForAssets(maxMs) {{
        const images = Array.from(document.images).map(img => {{
            if (img.complete) return Promise.resolve();
            return new Promise(resolve => {{
                img.addEventListener('load', resolve, {{ once: true }});
                img.addEventListener('error', resolve, {{ once: true }});
            }});
        }});
        const fonts = document.fonts ? document.fonts.ready : Promise.resolve();
        const settled = Promise.all([...images, fonts]).then(() => true);
        const timer = new Promise(resolve => setTimeout(() => resolve(false), maxMs));
        return Promise.race([settled, timer]);
    }})({max_ms})
"#
    )
}

/// Stylesheet neutralizing animation, forcing reveal patterns visible and
/// hiding every excluded selector
///
/// One rule per selector, so a single invalid selector cannot void the rest.
#[must_use]
pub fn determinism_stylesheet(excluded: &[String]) -> String {
    let mut css = String::from(
        "*, *::before, *::after {\n  \
         animation-duration: 0s !important;\n  \
         animation-delay: 0s !important;\n  \
         animation-iteration-count: 1 !important;\n  \
         transition-duration: 0s !important;\n  \
         transition-delay: 0s !important;\n  \
         scroll-behavior: auto !important;\n  \
         caret-color: transparent !important;\n}\n",
    );

    for selector in REVEAL_SELECTORS {
        css.push_str(&format!(
            "{selector} {{ opacity: 1 !important; transform: none !important; visibility: visible !important; }}\n"
        ));
    }

    for selector in excluded {
        css.push_str(&format!(
            "{selector} {{ display: none !important; visibility: hidden !important; opacity: 0 !important; pointer-events: none !important; }}\n"
        ));
    }
    css
}

/// Install the determinism stylesheet, then apply the same reveal and hide
/// rules directly on matching elements. Returns the number of elements hidden.
#[must_use]
pub fn determinism_script(excluded: &[String]) -> String {
    let css = serde_json::to_string(&determinism_stylesheet(excluded)).unwrap_or_else(|_| "\"\"".into());
    let reveal = serde_json::to_string(&REVEAL_SELECTORS).unwrap_or_else(|_| "[]".into());
    let hidden = serde_json::to_string(excluded).unwrap_or_else(|_| "[]".into());

    format!(
        r#"
    (function applyDeterminism(css, revealSelectors, hiddenSelectors) {{
        const styleId = 'sitesnap-determinism';
        let style = document.getElementById(styleId);
        if (!style) {{
            style = document.createElement('style');
            style.id = styleId;
            (document.head || document.documentElement).appendChild(style);
        }}
        style.textContent = css;

        const each = (selector, fn) => {{
            try {{
                document.querySelectorAll(selector).forEach(fn);
            }} catch (e) {{
                // invalid selector
            }}
        }};

        for (const selector of revealSelectors) {{
            each(selector, el => {{
                el.style.setProperty('opacity', '1', 'important');
                el.style.setProperty('transform', 'none', 'important');
                el.style.setProperty('visibility', 'visible', 'important');
            }});
        }}

        let hidden = 0;
        for (const selector of hiddenSelectors) {{
            each(selector, el => {{
                el.style.setProperty('display', 'none', 'important');
                el.style.setProperty('visibility', 'hidden', 'important');
                el.style.setProperty('opacity', '0', 'important');
                el.style.setProperty('pointer-events', 'none', 'important');
                hidden++;
            }});
        }}

        document.getAnimations?.().forEach(animation => {{
            try {{
                animation.finish();
            }} catch (e) {{
                // infinite animations cannot finish
            }}
        }});

        return hidden;
    }})({css}, {reveal}, {hidden})
"#
    )
}
