//! Configuration validation.

use a11ylens_protocols::BrowserKind;
use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_browser(config, &mut result);
        Self::validate_navigation(config, &mut result);
        Self::validate_scanner(config, &mut result);
        Self::validate_attribution(config, &mut result);

        result
    }

    /// Check a scan target URL.
    pub fn validate_url(url: &str) -> Result<(), ConfigError> {
        if url.starts_with("http://") || url.starts_with("https://") || url.starts_with("file://") {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "url".to_string(),
                message: format!("'{}' must start with http://, https:// or file://", url),
            })
        }
    }

    fn validate_browser(config: &Config, result: &mut ValidationResult) {
        if config.browser.debug_port == 0 {
            result.add_error(ValidationError::new(
                "browser.debug_port",
                "Port cannot be 0",
            ));
        }

        if config.browser.kind != BrowserKind::Chromium {
            result.add_warning(ValidationWarning::new(
                "browser.kind",
                format!(
                    "'{}' is not supported by the built-in CDP driver; launches will fail",
                    config.browser.kind
                ),
            ));
        }

        if let Some(ref exe) = config.browser.executable {
            if !exe.exists() {
                result.add_warning(ValidationWarning::new(
                    "browser.executable",
                    format!("Browser executable does not exist: {:?}", exe),
                ));
            }
        }
    }

    fn validate_navigation(config: &Config, result: &mut ValidationResult) {
        let nav = &config.navigation;

        if nav.navigation_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "navigation.navigation_timeout_ms",
                "navigation_timeout_ms must be greater than 0",
            ));
        }

        if nav.navigation_check_interval_ms == 0 {
            result.add_error(ValidationError::new(
                "navigation.navigation_check_interval_ms",
                "navigation_check_interval_ms must be greater than 0",
            ));
        }

        if nav.navigation_timeout_ms > 300_000 {
            result.add_warning(ValidationWarning::new(
                "navigation.navigation_timeout_ms",
                "navigation timeout is very high (>5 minutes)",
            ));
        }

        if nav.max_navigation_waits > 50 {
            result.add_warning(ValidationWarning::new(
                "navigation.max_navigation_waits",
                "max_navigation_waits is very high (>50), unstable pages will take long to scan",
            ));
        }
    }

    fn validate_scanner(config: &Config, result: &mut ValidationResult) {
        let scanner = &config.scanner;

        if scanner.max_retries == 0 {
            result.add_error(ValidationError::new(
                "scanner.max_retries",
                "max_retries must be at least 1",
            ));
        }

        if scanner.max_components == 0 {
            result.add_error(ValidationError::new(
                "scanner.max_components",
                "max_components must be greater than 0",
            ));
        }

        if scanner.scan_timeout_ms == 0 {
            result.add_error(ValidationError::new(
                "scanner.scan_timeout_ms",
                "scan_timeout_ms must be greater than 0",
            ));
        }

        if scanner.tags.is_empty() {
            result.add_warning(ValidationWarning::new(
                "scanner.tags",
                "No rule tags configured, every rule will run",
            ));
        }

        match scanner.rule_engine_script {
            Some(ref path) if !path.exists() => {
                result.add_error(ValidationError::new(
                    "scanner.rule_engine_script",
                    format!("Rule engine script does not exist: {:?}", path),
                ));
            }
            None => {
                result.add_warning(ValidationWarning::new(
                    "scanner.rule_engine_script",
                    "No rule engine script configured, the page must already load axe",
                ));
            }
            _ => {}
        }
    }

    fn validate_attribution(config: &Config, result: &mut ValidationResult) {
        for pattern in config.attribution.patterns() {
            if pattern.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "attribution.framework_patterns",
                    "Framework patterns cannot be empty",
                ));
                continue;
            }
            let escaped = regex::escape(&pattern).replace(r"\*", ".*");
            if Regex::new(&format!("^{}$", escaped)).is_err() {
                result.add_error(ValidationError::new(
                    "attribution.framework_patterns",
                    format!("Pattern '{}' cannot be compiled", pattern),
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
