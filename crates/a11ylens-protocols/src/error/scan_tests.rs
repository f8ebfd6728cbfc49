use super::*;

#[test]
fn test_browser_launch_not_installed() {
    let err = ScanFailure::BrowserLaunch {
        browser_type: BrowserKind::Chromium,
        reason: LaunchReason::from(DriverError::NotInstalled("google-chrome".to_string())),
    };
    let display = err.to_string();
    assert!(display.contains("chromium"));
    assert!(display.contains("not installed"));
    assert_eq!(err.tag(), "BrowserLaunchError");
}

#[test]
fn test_launch_reason_from_driver_error() {
    assert!(LaunchReason::from(DriverError::NotInstalled("x".to_string())).is_not_installed());
    assert_eq!(
        LaunchReason::from(DriverError::Unsupported("webkit".to_string())),
        LaunchReason::Unsupported("webkit".to_string())
    );
    let failed = LaunchReason::from(DriverError::Timeout("startup".to_string()));
    assert!(matches!(failed, LaunchReason::Failed(ref msg) if msg.contains("startup")));
}

#[test]
fn test_navigation_timeout_display() {
    let err = ScanFailure::NavigationTimeout {
        url: "http://localhost:3000".to_string(),
        timeout_ms: 30000,
    };
    assert_eq!(
        err.to_string(),
        "Navigation to http://localhost:3000 timed out after 30000ms"
    );
}

#[test]
fn test_max_retries_carries_source() {
    use std::error::Error;

    let err = ScanFailure::MaxRetriesExceeded {
        attempts: 3,
        last_error: DriverError::ContextDestroyed("frame detached".to_string()),
    };
    assert!(err.to_string().contains("3 attempts"));
    assert!(err.to_string().contains("frame detached"));
    assert!(err.source().is_some());
}

#[test]
fn test_framework_not_detected() {
    let err = ScanFailure::FrameworkNotDetected {
        url: "https://example.com".to_string(),
    };
    assert!(err.to_string().contains("React was not detected"));
    assert_eq!(err.tag(), "FrameworkNotDetectedError");
}

#[test]
fn test_scanner_injection_display() {
    let err = ScanFailure::ScannerInjection {
        reason: "marker missing after install".to_string(),
    };
    assert!(err.to_string().starts_with("Failed to inject scanner"));
}
