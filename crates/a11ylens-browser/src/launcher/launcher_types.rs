//! Launcher configuration and the launched-process handle.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use tokio::process::Child;
use tracing::{debug, info, warn};

/// How to start Chromium.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    /// Remote debugging port. `0` lets Chromium pick a free port.
    pub debug_port: u16,
    /// Run without a visible window.
    pub headless: bool,
    /// Window size in CSS pixels.
    pub viewport: (u32, u32),
    /// Fixed profile directory. A temporary one is used when unset.
    pub profile_dir: Option<PathBuf>,
    /// Chromium executable. Discovered when unset.
    pub executable: Option<PathBuf>,
    /// Per-command CDP timeout.
    pub command_timeout: Duration,
    /// How long to wait for the DevTools endpoint after spawning.
    pub startup_timeout: Duration,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            debug_port: 9222,
            headless: true,
            viewport: (1280, 720),
            profile_dir: None,
            executable: None,
            command_timeout: Duration::from_secs(30),
            startup_timeout: Duration::from_secs(6),
        }
    }
}

impl LauncherConfig {
    /// HTTP DevTools endpoint for a port.
    pub fn endpoint(port: u16) -> String {
        format!("http://127.0.0.1:{}", port)
    }
}

/// Profile directory of a launched browser.
#[derive(Debug)]
pub(crate) enum Profile {
    /// Removed when the browser is shut down.
    Temporary(TempDir),
    /// Caller-owned, left in place.
    Fixed(PathBuf),
}

impl Profile {
    pub(crate) fn path(&self) -> &Path {
        match self {
            Profile::Temporary(dir) => dir.path(),
            Profile::Fixed(path) => path,
        }
    }
}

/// A Chromium process started by [`ChromeLauncher`](super::ChromeLauncher).
///
/// The child is spawned with `kill_on_drop`, so dropping this handle
/// without calling [`shutdown`](Self::shutdown) still kills the browser.
#[derive(Debug)]
pub struct LaunchedChrome {
    pub(crate) child: Child,
    pub(crate) port: u16,
    pub(crate) profile: Profile,
}

impl LaunchedChrome {
    /// Actual debugging port.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// HTTP DevTools endpoint.
    pub fn endpoint(&self) -> String {
        LauncherConfig::endpoint(self.port)
    }

    pub fn profile_dir(&self) -> &Path {
        self.profile.path()
    }

    /// OS process id, if still running.
    pub fn pid(&self) -> Option<u32> {
        self.child.id()
    }

    /// Kill the process, reap it and remove a temporary profile.
    pub async fn shutdown(mut self) {
        match self.child.try_wait() {
            Ok(Some(status)) => debug!("Chromium already exited: {}", status),
            _ => {
                if let Err(e) = self.child.kill().await {
                    warn!("Failed to kill Chromium: {}", e);
                }
            }
        }

        if let Profile::Temporary(dir) = self.profile {
            let path = dir.path().to_path_buf();
            if let Err(e) = dir.close() {
                warn!("Failed to remove profile {}: {}", path.display(), e);
            }
        }
        info!("Chromium on port {} shut down", self.port);
    }
}
