//! `a11ylens config` handlers.

use std::path::Path;

use a11ylens_config::{ConfigLoader, ConfigValidator};

use crate::cli::ConfigAction;

pub(crate) async fn handle_config_command(
    action: ConfigAction,
    config_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Check => config_check(config_path),
    }
}

fn config_check(config_path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigLoader::load(config_path)?;
    let result = ConfigValidator::validate(&config);

    for warning in &result.warnings {
        println!("warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("error: {}: {}", error.path, error.message);
    }

    if !result.is_valid() {
        return Err(format!(
            "{} has {} error(s)",
            config_path.display(),
            result.errors.len()
        )
        .into());
    }

    println!("{} is valid", config_path.display());
    Ok(())
}
