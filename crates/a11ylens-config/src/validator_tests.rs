use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    // No rule engine script configured by default.
    assert!(result
        .warnings
        .iter()
        .any(|w| w.path == "scanner.rule_engine_script"));
}

#[test]
fn test_validate_zero_retries() {
    let mut config = Config::default();
    config.scanner.max_retries = 0;

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "scanner.max_retries"));
}

#[test]
fn test_validate_zero_component_cap() {
    let mut config = Config::default();
    config.scanner.max_components = 0;

    let result = ConfigValidator::validate(&config);
    assert!(result.errors.iter().any(|e| e.path == "scanner.max_components"));
}

#[test]
fn test_validate_missing_rule_engine_script() {
    let mut config = Config::default();
    config.scanner.rule_engine_script = Some("/nonexistent/axe.min.js".into());

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_non_chromium_warning() {
    let mut config = Config::default();
    config.browser.kind = BrowserKind::Webkit;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "browser.kind"));
}

#[test]
fn test_validate_empty_pattern() {
    let mut config = Config::default();
    config.attribution.extra_framework_patterns = vec!["  ".to_string()];

    let result = ConfigValidator::validate(&config);
    assert!(!result.is_valid());
}

#[test]
fn test_validate_high_navigation_waits_warning() {
    let mut config = Config::default();
    config.navigation.max_navigation_waits = 100;

    let result = ConfigValidator::validate(&config);
    assert!(result.is_valid());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.path == "navigation.max_navigation_waits"));
}

#[test]
fn test_into_result_first_error() {
    let mut config = Config::default();
    config.navigation.navigation_timeout_ms = 0;

    let err = ConfigValidator::validate(&config).into_result().unwrap_err();
    assert!(err.to_string().contains("navigation.navigation_timeout_ms"));
}

#[test]
fn test_validate_url() {
    assert!(ConfigValidator::validate_url("http://localhost:3000").is_ok());
    assert!(ConfigValidator::validate_url("https://example.com/app").is_ok());
    assert!(ConfigValidator::validate_url("localhost:3000").is_err());
}
