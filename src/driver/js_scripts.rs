//! JavaScript evaluated by the chromiumoxide page driver

/// Raw `href` attributes of every anchor and area, in document order
pub const LINKS_SCRIPT: &str = r#"
    (() => Array.from(document.querySelectorAll('a[href], area[href]'))
        .map(el => el.getAttribute('href'))
        .filter(href => typeof href === 'string'))()
"#;

/// `location.href` of the current document
pub const LOCATION_SCRIPT: &str = "window.location.href";

/// Resolves `true` once no new resource-timing entries appear for `quietMs`,
/// or `false` after `maxMs`
#[must_use]
pub fn network_idle_script(quiet_ms: u128, max_ms: u128) -> String {
    format!(
        r#"
    (async function networkIdle(quietMs, maxMs) {{
        if (performance.setResourceTimingBufferSize) {{
            performance.setResourceTimingBufferSize(10000);
        }}
        const count = () => performance.getEntriesByType('resource').length;
        const start = performance.now();
        let last = count();
        let quietSince = performance.now();
        while (performance.now() - start < maxMs) {{
            await new Promise(resolve => setTimeout(resolve, 100));
            const now = count();
            if (now !== last) {{
                last = now;
                quietSince = performance.now();
            }} else if (performance.now() - quietSince >= quietMs) {{
                return true;
            }}
        }}
        return false;
    }})({quiet_ms}, {max_ms})
"#
    )
}
