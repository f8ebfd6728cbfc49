//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let mut config: Config = toml::from_str(&expanded)?;
        Self::expand_paths(&mut config);
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let mut result = content.to_string();

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    fn expand_paths(config: &mut Config) {
        for slot in [
            &mut config.browser.profile_dir,
            &mut config.browser.executable,
            &mut config.scanner.rule_engine_script,
        ] {
            if let Some(path) = slot.take() {
                *slot = Some(PathBuf::from(Self::expand_path(&path.to_string_lossy())));
            }
        }
    }

    /// Expand shell-style paths (e.g., `~/.a11ylens`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }

    /// Default config location: `~/.a11ylens/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".a11ylens")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.scanner.max_retries, 3);
    }

    #[test]
    fn test_expand_path() {
        let expanded = ConfigLoader::expand_path("~/.a11ylens");
        assert!(!expanded.starts_with('~'));
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [browser]
            kind = "chromium"
            headless = true
            debug_port = 9333

            [navigation]
            navigation_timeout_ms = 20000
            max_navigation_waits = 5

            [scanner]
            tags = ["wcag2a"]
            max_retries = 4
            retry_delay_base_ms = 250

            [attribution]
            extra_framework_patterns = ["Layout*"]
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.browser.debug_port, 9333);
        assert_eq!(config.navigation.max_navigation_waits, 5);
        assert_eq!(config.scanner.tags, vec!["wcag2a"]);
        assert_eq!(config.scanner.max_retries, 4);
        assert!(config.attribution.patterns().contains(&"Layout*".to_string()));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[scanner]").unwrap();
        writeln!(file, "max_components = 500").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.scanner.max_components, 500);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/a11ylens.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/a11ylens.toml")).unwrap();
        assert_eq!(config.navigation.max_navigation_waits, 3);
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_rule_engine_path_tilde_expanded() {
        let config = ConfigLoader::load_str(
            r#"
            [scanner]
            rule_engine_script = "~/vendor/axe.min.js"
            "#,
        )
        .unwrap();
        let path = config.scanner.rule_engine_script.unwrap();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("vendor/axe.min.js"));
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("A11YLENS_TEST_AXE", "/opt/axe.min.js");
        }
        let content = "rule_engine_script = \"${A11YLENS_TEST_AXE}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert!(expanded.contains("/opt/axe.min.js"));
        unsafe {
            std::env::remove_var("A11YLENS_TEST_AXE");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${A11YLENS_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_default_path() {
        assert!(ConfigLoader::default_path().ends_with(".a11ylens/config.toml"));
    }
}
