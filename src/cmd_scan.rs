//! `a11ylens scan` handler.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use a11ylens_browser::{CdpDriver, LauncherConfig};
use a11ylens_config::{Config, ConfigLoader, ConfigValidator};
use a11ylens_protocols::BrowserKind;
use a11ylens_scanner::{ScanSession, SessionConfig};
use tracing::{info, warn};

/// Command-line overrides applied on top of the config file.
pub(crate) struct ScanArgs {
    pub url: String,
    pub browser: Option<BrowserKind>,
    pub headed: bool,
    pub tags: Option<Vec<String>>,
    pub output: Option<PathBuf>,
}

pub(crate) async fn handle_scan(
    config_path: &Path,
    args: ScanArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = ConfigLoader::load_or_default(config_path)?;
    apply_overrides(&mut config, &args);

    for warning in ConfigValidator::validate(&config).into_result()? {
        warn!("{}: {}", warning.path, warning.message);
    }

    let session_config = SessionConfig::from_config(&args.url, &config)?;
    let driver = Arc::new(CdpDriver::new(launcher_config(&config)));
    let session = ScanSession::new(session_config, driver);

    let result = session.run().await?;
    let json = serde_json::to_string_pretty(&result)?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, json).await?;
            info!("Report written to {}", path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, args: &ScanArgs) {
    if let Some(kind) = args.browser {
        config.browser.kind = kind;
    }
    if args.headed {
        config.browser.headless = false;
    }
    if let Some(tags) = &args.tags {
        config.scanner.tags = tags
            .iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
    }
}

/// Slack on top of the slowest page-side wait before a CDP call gives up.
const COMMAND_TIMEOUT_MARGIN: Duration = Duration::from_secs(5);

fn launcher_config(config: &Config) -> LauncherConfig {
    let browser = &config.browser;
    // The scan and navigation timeouts are enforced above the transport.
    let command_timeout = config
        .scanner
        .scan_timeout()
        .max(config.navigation.navigation_timeout())
        + COMMAND_TIMEOUT_MARGIN;
    LauncherConfig {
        debug_port: browser.debug_port,
        headless: browser.headless,
        viewport: (browser.viewport_width, browser.viewport_height),
        profile_dir: browser.profile_dir.clone(),
        executable: browser.executable.clone(),
        command_timeout,
        ..Default::default()
    }
}
