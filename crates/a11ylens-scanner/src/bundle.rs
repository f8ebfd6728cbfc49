//! The in-page scanner bundle and the expressions that talk to it.

use serde::Serialize;

/// Source of the bundle installed into scanned pages.
pub const BUNDLE_SOURCE: &str = include_str!("bundle/scanner_bundle.js");

/// Version the bundle reports as `window.__A11Y_LENS__.version`.
pub const BUNDLE_VERSION: &str = "1.0.0";

/// Global the bundle installs.
pub const MARKER_GLOBAL: &str = "__A11Y_LENS__";

/// True once the bundle is installed and usable.
pub const IS_INJECTED_EXPRESSION: &str = "(() => { const lens = window.__A11Y_LENS__; \
     return !!lens && typeof lens.scan === 'function' && typeof lens.restoreNavigation === 'function'; })()";

/// True when the rule engine global is present.
pub const RULE_ENGINE_PRESENT_EXPRESSION: &str =
    "typeof window.axe === 'object' && window.axe !== null && typeof window.axe.run === 'function'";

/// Standalone React detection; works before the bundle is installed.
pub const DETECT_FRAMEWORK_EXPRESSION: &str = r#"(() => {
  const hook = window.__REACT_DEVTOOLS_GLOBAL_HOOK__;
  if (hook && hook.renderers && hook.renderers.size > 0) return true;
  const elements = document.querySelectorAll('*');
  const limit = Math.min(elements.length, 5000);
  for (let i = 0; i < limit; i++) {
    for (const key of Object.keys(elements[i])) {
      if (key.startsWith('__reactContainer$') || key.startsWith('__reactFiber$')) return true;
    }
  }
  return false;
})()"#;

/// Undo the navigation patch. Harmless when nothing is patched or the
/// bundle is gone.
pub const RESTORE_NAVIGATION_EXPRESSION: &str =
    "(() => { const lens = window.__A11Y_LENS__; return !!lens && lens.restoreNavigation(); })()";

/// Options handed to `__A11Y_LENS__.scan`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    /// Rule tags passed to the rule engine's `runOnly` filter.
    pub tags: Vec<String>,
    pub max_components: usize,
    pub include_passes: bool,
    pub include_incomplete: bool,
    pub include_inapplicable: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            tags: Vec::new(),
            max_components: 10_000,
            include_passes: true,
            include_incomplete: true,
            include_inapplicable: false,
        }
    }
}

/// Expression that runs one scan with navigation patched for its duration.
pub fn scan_expression(options: &ScanOptions) -> Result<String, serde_json::Error> {
    let options = serde_json::to_string(options)?;
    Ok(format!(
        "(async () => {{ const lens = window.__A11Y_LENS__; const patch = lens.patchNavigation(); \
         try {{ return await lens.scan({}); }} finally {{ lens.restoreNavigation(patch); }} }})()",
        options
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundle_declares_marker_and_version() {
        assert!(BUNDLE_SOURCE.contains(&format!("window.{}", MARKER_GLOBAL)));
        assert!(BUNDLE_SOURCE.contains(&format!("var VERSION = '{}'", BUNDLE_VERSION)));
        assert!(BUNDLE_SOURCE.contains("restoreNavigation"));
    }

    #[test]
    fn test_restore_is_scoped_to_patch_generation() {
        assert!(BUNDLE_SOURCE.contains("function restoreNavigation(owner)"));
        assert!(BUNDLE_SOURCE.contains("owner !== generation"));
        // The Rust-side restore passes no generation and always wins.
        assert!(RESTORE_NAVIGATION_EXPRESSION.contains("lens.restoreNavigation()"));
    }

    #[test]
    fn test_scan_expression_embeds_options() {
        let options = ScanOptions {
            tags: vec!["wcag2a".to_string(), "wcag2aa".to_string()],
            ..Default::default()
        };
        let expr = scan_expression(&options).unwrap();
        assert!(expr.contains(r#""tags":["wcag2a","wcag2aa"]"#));
        assert!(expr.contains(r#""maxComponents":10000"#));
        assert!(expr.contains("const patch = lens.patchNavigation()"));
        assert!(expr.contains("finally { lens.restoreNavigation(patch); }"));
    }

    #[test]
    fn test_expressions_are_distinct() {
        let scan = scan_expression(&ScanOptions::default()).unwrap();
        assert!(!RESTORE_NAVIGATION_EXPRESSION.contains(".scan("));
        assert!(!IS_INJECTED_EXPRESSION.contains(".scan("));
        assert!(scan.contains("lens.scan("));
    }
}
