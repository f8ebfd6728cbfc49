//! ChromeLauncher: executable discovery, spawning and readiness polling.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use a11ylens_protocols::DriverError;
use tokio::process::Command;
use tracing::{debug, info};

use super::launcher_types::Profile;
use super::{LaunchedChrome, LauncherConfig};

const READY_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Environment variable naming an explicit Chromium binary.
pub const CHROME_PATH_ENV: &str = "CHROME_PATH";

/// Starts Chromium processes.
pub struct ChromeLauncher {
    config: LauncherConfig,
}

impl ChromeLauncher {
    pub fn new(config: LauncherConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    /// Find Chrome executable path.
    pub fn find_chrome() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CHROME_PATH_ENV).map(PathBuf::from) {
            if path.exists() {
                return Some(path);
            }
        }

        #[cfg(target_os = "macos")]
        let paths: &[&str] = &[
            "/Applications/Google Chrome.app/Contents/MacOS/Google Chrome",
            "/Applications/Chromium.app/Contents/MacOS/Chromium",
            "/Applications/Microsoft Edge.app/Contents/MacOS/Microsoft Edge",
        ];

        #[cfg(target_os = "linux")]
        let paths: &[&str] = &[
            "/usr/bin/google-chrome",
            "/usr/bin/google-chrome-stable",
            "/usr/bin/chromium",
            "/usr/bin/chromium-browser",
            "/snap/bin/chromium",
        ];

        #[cfg(target_os = "windows")]
        let paths: &[&str] = &[
            r"C:\Program Files\Google\Chrome\Application\chrome.exe",
            r"C:\Program Files (x86)\Google\Chrome\Application\chrome.exe",
        ];

        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        let paths: &[&str] = &[];

        paths.iter().map(PathBuf::from).find(|p| p.exists())
    }

    /// Resolve the executable to run.
    pub fn resolve_executable(&self) -> Result<PathBuf, DriverError> {
        match &self.config.executable {
            Some(path) if path.exists() => Ok(path.clone()),
            Some(path) => Err(DriverError::NotInstalled(format!(
                "configured executable {} does not exist",
                path.display()
            ))),
            None => Self::find_chrome().ok_or_else(|| {
                DriverError::NotInstalled(format!(
                    "Chromium not found; install Google Chrome or set {}",
                    CHROME_PATH_ENV
                ))
            }),
        }
    }

    /// Command-line flags for a launch.
    pub fn args(&self, profile_dir: &Path) -> Vec<String> {
        let (width, height) = self.config.viewport;
        let mut args = vec![
            format!("--remote-debugging-port={}", self.config.debug_port),
            format!("--user-data-dir={}", profile_dir.display()),
            format!("--window-size={},{}", width, height),
            "--no-first-run".to_string(),
            "--no-default-browser-check".to_string(),
            "--disable-background-networking".to_string(),
            "--disable-sync".to_string(),
            "--disable-translate".to_string(),
            "--metrics-recording-only".to_string(),
        ];
        if self.config.headless {
            args.push("--headless=new".to_string());
        }
        args.push("about:blank".to_string());
        args
    }

    /// Check whether something already answers on a debugging port.
    async fn is_endpoint_up(port: u16) -> bool {
        reqwest::get(format!("{}/json/version", LauncherConfig::endpoint(port)))
            .await
            .is_ok()
    }

    /// Launch Chromium and wait until its DevTools endpoint is reachable.
    pub async fn launch(&self) -> Result<LaunchedChrome, DriverError> {
        let executable = self.resolve_executable()?;

        let port = self.config.debug_port;
        if port != 0 && Self::is_endpoint_up(port).await {
            return Err(DriverError::LaunchFailed(format!(
                "debugging port {} is already in use by another browser",
                port
            )));
        }

        let profile = match &self.config.profile_dir {
            Some(dir) => {
                std::fs::create_dir_all(dir).map_err(|e| {
                    DriverError::LaunchFailed(format!("profile dir {}: {}", dir.display(), e))
                })?;
                Profile::Fixed(dir.clone())
            }
            None => tempfile::Builder::new()
                .prefix("a11ylens-chromium-")
                .tempdir()
                .map(Profile::Temporary)
                .map_err(|e| DriverError::LaunchFailed(format!("profile dir: {}", e)))?,
        };

        info!(
            "Launching {} with profile at {}",
            executable.display(),
            profile.path().display()
        );

        let child = Command::new(&executable)
            .args(self.args(profile.path()))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| DriverError::LaunchFailed(format!("{}: {}", executable.display(), e)))?;

        debug!("Chromium launched with PID: {:?}", child.id());

        let mut launched = LaunchedChrome {
            child,
            port,
            profile,
        };

        match self.wait_until_ready(&mut launched).await {
            Ok(()) => Ok(launched),
            Err(e) => {
                launched.shutdown().await;
                Err(e)
            }
        }
    }

    async fn wait_until_ready(&self, launched: &mut LaunchedChrome) -> Result<(), DriverError> {
        let deadline = tokio::time::Instant::now() + self.config.startup_timeout;

        loop {
            if let Ok(Some(status)) = launched.child.try_wait() {
                return Err(DriverError::LaunchFailed(format!(
                    "Chromium exited during startup: {}",
                    status
                )));
            }

            if launched.port == 0 {
                if let Some(port) = read_active_port(launched.profile.path()).await {
                    debug!("Chromium picked debugging port {}", port);
                    launched.port = port;
                }
            }

            if launched.port != 0 && Self::is_endpoint_up(launched.port).await {
                return Ok(());
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(DriverError::LaunchFailed(format!(
                    "Chromium did not expose DevTools within {}ms",
                    self.config.startup_timeout.as_millis()
                )));
            }

            tokio::time::sleep(READY_POLL_INTERVAL).await;
        }
    }
}

/// Read the port Chromium writes to `DevToolsActivePort` when started
/// with `--remote-debugging-port=0`.
pub(crate) async fn read_active_port(profile_dir: &Path) -> Option<u16> {
    let contents = tokio::fs::read_to_string(profile_dir.join("DevToolsActivePort"))
        .await
        .ok()?;
    parse_active_port(&contents)
}

pub(crate) fn parse_active_port(contents: &str) -> Option<u16> {
    contents
        .lines()
        .next()?
        .trim()
        .parse()
        .ok()
        .filter(|port| *port != 0)
}
