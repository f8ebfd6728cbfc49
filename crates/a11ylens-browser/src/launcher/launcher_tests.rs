use std::path::PathBuf;

use a11ylens_protocols::DriverError;

use super::launcher_core::{parse_active_port, read_active_port};
use super::*;

#[test]
fn test_default_config() {
    let config = LauncherConfig::default();
    assert_eq!(config.debug_port, 9222);
    assert!(config.headless);
    assert_eq!(config.viewport, (1280, 720));
    assert_eq!(LauncherConfig::endpoint(9333), "http://127.0.0.1:9333");
}

#[test]
fn test_args_headless_and_profile() {
    let launcher = ChromeLauncher::new(LauncherConfig {
        debug_port: 0,
        viewport: (800, 600),
        ..Default::default()
    });
    let args = launcher.args(&PathBuf::from("/tmp/profile"));
    assert!(args.contains(&"--remote-debugging-port=0".to_string()));
    assert!(args.contains(&"--user-data-dir=/tmp/profile".to_string()));
    assert!(args.contains(&"--window-size=800,600".to_string()));
    assert!(args.contains(&"--headless=new".to_string()));
}

#[test]
fn test_args_headed() {
    let launcher = ChromeLauncher::new(LauncherConfig {
        headless: false,
        ..Default::default()
    });
    let args = launcher.args(&PathBuf::from("/tmp/p"));
    assert!(!args.iter().any(|a| a.starts_with("--headless")));
}

#[test]
fn test_missing_configured_executable() {
    let launcher = ChromeLauncher::new(LauncherConfig {
        executable: Some(PathBuf::from("/nonexistent/chromium-binary")),
        ..Default::default()
    });
    assert!(matches!(
        launcher.resolve_executable(),
        Err(DriverError::NotInstalled(_))
    ));
}

#[test]
fn test_parse_active_port() {
    assert_eq!(parse_active_port("45123\n/devtools/browser/abc\n"), Some(45123));
    assert_eq!(parse_active_port("0\n"), None);
    assert_eq!(parse_active_port("garbage"), None);
    assert_eq!(parse_active_port(""), None);
}

#[tokio::test]
async fn test_read_active_port_from_profile() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(read_active_port(dir.path()).await, None);

    std::fs::write(dir.path().join("DevToolsActivePort"), "39001\n/devtools/browser/x").unwrap();
    assert_eq!(read_active_port(dir.path()).await, Some(39001));
}
