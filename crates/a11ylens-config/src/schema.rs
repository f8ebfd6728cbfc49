//! Configuration schema definitions.

use std::path::PathBuf;
use std::time::Duration;

use a11ylens_protocols::BrowserKind;
use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub attribution: AttributionConfig,
}

/// Browser launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default)]
    pub kind: BrowserKind,

    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Remote debugging port for Chromium.
    #[serde(default = "default_debug_port")]
    pub debug_port: u16,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,

    /// Throwaway profile directory; a temp dir is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_dir: Option<PathBuf>,

    /// Explicit browser binary; auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            kind: BrowserKind::default(),
            headless: default_headless(),
            debug_port: default_debug_port(),
            viewport_width: default_viewport_width(),
            viewport_height: default_viewport_height(),
            profile_dir: None,
            executable: None,
        }
    }
}

fn default_headless() -> bool {
    true
}

fn default_debug_port() -> u16 {
    9222
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_viewport_height() -> u32 {
    720
}

/// Page stabilization timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    #[serde(default = "default_network_idle_timeout_ms")]
    pub network_idle_timeout_ms: u64,

    #[serde(default = "default_post_navigation_delay_ms")]
    pub post_navigation_delay_ms: u64,

    #[serde(default = "default_navigation_check_interval_ms")]
    pub navigation_check_interval_ms: u64,

    #[serde(default = "default_max_navigation_waits")]
    pub max_navigation_waits: u32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: default_navigation_timeout_ms(),
            network_idle_timeout_ms: default_network_idle_timeout_ms(),
            post_navigation_delay_ms: default_post_navigation_delay_ms(),
            navigation_check_interval_ms: default_navigation_check_interval_ms(),
            max_navigation_waits: default_max_navigation_waits(),
        }
    }
}

impl NavigationConfig {
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn network_idle_timeout(&self) -> Duration {
        Duration::from_millis(self.network_idle_timeout_ms)
    }

    pub fn post_navigation_delay(&self) -> Duration {
        Duration::from_millis(self.post_navigation_delay_ms)
    }

    pub fn navigation_check_interval(&self) -> Duration {
        Duration::from_millis(self.navigation_check_interval_ms)
    }
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_network_idle_timeout_ms() -> u64 {
    5_000
}

fn default_post_navigation_delay_ms() -> u64 {
    1_000
}

fn default_navigation_check_interval_ms() -> u64 {
    1_000
}

fn default_max_navigation_waits() -> u32 {
    3
}

/// Scan execution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Rule-engine tag filter.
    #[serde(default = "default_tags")]
    pub tags: Vec<String>,

    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Linear backoff base; attempt `n` waits `base * n` before retrying.
    #[serde(default = "default_retry_delay_base_ms")]
    pub retry_delay_base_ms: u64,

    /// Upper bound for a single in-page scan call.
    #[serde(default = "default_scan_timeout_ms")]
    pub scan_timeout_ms: u64,

    /// Hard cap on render-tree nodes walked per scan.
    #[serde(default = "default_max_components")]
    pub max_components: usize,

    /// Path to the rule-engine source (e.g. `axe.min.js`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule_engine_script: Option<PathBuf>,

    #[serde(default = "default_true")]
    pub include_passes: bool,

    #[serde(default = "default_true")]
    pub include_incomplete: bool,

    #[serde(default)]
    pub include_inapplicable: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tags: default_tags(),
            max_retries: default_max_retries(),
            retry_delay_base_ms: default_retry_delay_base_ms(),
            scan_timeout_ms: default_scan_timeout_ms(),
            max_components: default_max_components(),
            rule_engine_script: None,
            include_passes: true,
            include_incomplete: true,
            include_inapplicable: false,
        }
    }
}

impl ScannerConfig {
    pub fn retry_delay_base(&self) -> Duration {
        Duration::from_millis(self.retry_delay_base_ms)
    }

    pub fn scan_timeout(&self) -> Duration {
        Duration::from_millis(self.scan_timeout_ms)
    }
}

fn default_tags() -> Vec<String> {
    ["wcag2a", "wcag2aa", "wcag21a", "wcag21aa", "wcag22aa", "best-practice"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_base_ms() -> u64 {
    1_000
}

fn default_scan_timeout_ms() -> u64 {
    60_000
}

fn default_max_components() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

/// Component attribution configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttributionConfig {
    /// Component names treated as framework noise. `*` matches any run of
    /// characters, everything else matches literally.
    #[serde(default = "default_framework_patterns")]
    pub framework_patterns: Vec<String>,

    /// Appended to `framework_patterns`, so users can extend the defaults
    /// without restating them.
    #[serde(default)]
    pub extra_framework_patterns: Vec<String>,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            framework_patterns: default_framework_patterns(),
            extra_framework_patterns: Vec::new(),
        }
    }
}

impl AttributionConfig {
    /// Effective pattern list, defaults first.
    pub fn patterns(&self) -> Vec<String> {
        self.framework_patterns
            .iter()
            .chain(self.extra_framework_patterns.iter())
            .cloned()
            .collect()
    }
}

fn default_framework_patterns() -> Vec<String> {
    [
        "ErrorBoundary",
        "*Router",
        "Routes",
        "Route",
        "RenderedRoute",
        "Outlet",
        "*Provider",
        "*Consumer",
        "Suspense",
        "StrictMode",
        "Fragment",
        "InnerLayoutRouter",
        "LoadingBoundary",
        "NotFoundBoundary",
        "RedirectBoundary",
        "ScrollAndFocusHandler",
        "HotReload",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
