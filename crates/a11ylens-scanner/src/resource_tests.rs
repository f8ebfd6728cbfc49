use std::time::Duration;

use a11ylens_protocols::{BrowserKind, DriverError, LaunchReason, ScanFailure};

use super::*;
use crate::testing::{Counters, FakeBehavior, FakeDriver};

#[tokio::test]
async fn test_acquire_and_release() {
    let driver = FakeDriver::new(FakeBehavior::default());
    let mut resource = BrowserResource::acquire(&driver, BrowserKind::Chromium, true)
        .await
        .unwrap();

    assert_eq!(resource.kind(), BrowserKind::Chromium);
    assert!(resource.page().is_ok());

    resource.release().await;
    assert!(resource.is_released());
    assert_eq!(resource.page().err(), Some(DriverError::Closed));
    assert_eq!(driver.launches(), 1);
    assert_eq!(driver.browser_closes(), 1);
    assert_eq!(Counters::get(&driver.counters().page_closes), 1);
}

#[tokio::test]
async fn test_release_is_idempotent() {
    let driver = FakeDriver::new(FakeBehavior::default());
    let mut resource = BrowserResource::acquire(&driver, BrowserKind::Chromium, true)
        .await
        .unwrap();

    resource.release().await;
    resource.release().await;
    drop(resource);
    tokio::task::yield_now().await;

    assert_eq!(driver.browser_closes(), 1);
    assert_eq!(Counters::get(&driver.counters().page_closes), 1);
}

#[tokio::test]
async fn test_launch_failure_reports_not_installed() {
    let driver = FakeDriver::new(FakeBehavior {
        launch_error: Some(DriverError::NotInstalled("chromium".to_string())),
        ..Default::default()
    });

    let err = BrowserResource::acquire(&driver, BrowserKind::Chromium, true)
        .await
        .err()
        .unwrap();

    match err {
        ScanFailure::BrowserLaunch {
            browser_type,
            reason,
        } => {
            assert_eq!(browser_type, BrowserKind::Chromium);
            assert!(reason.is_not_installed());
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(driver.launches(), 0);
}

#[tokio::test]
async fn test_page_failure_closes_browser() {
    let driver = FakeDriver::new(FakeBehavior {
        page_error: Some(DriverError::Protocol("Target.createTarget failed".to_string())),
        ..Default::default()
    });

    let err = BrowserResource::acquire(&driver, BrowserKind::Chromium, true)
        .await
        .err()
        .unwrap();

    assert!(matches!(
        err,
        ScanFailure::BrowserLaunch {
            reason: LaunchReason::Failed(_),
            ..
        }
    ));
    assert_eq!(driver.launches(), 1);
    assert_eq!(driver.browser_closes(), 1);
}

#[tokio::test]
async fn test_drop_releases_on_runtime() {
    let driver = FakeDriver::new(FakeBehavior::default());
    let resource = BrowserResource::acquire(&driver, BrowserKind::Chromium, true)
        .await
        .unwrap();

    drop(resource);
    // Let the spawned release run.
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(driver.browser_closes(), 1);
}
