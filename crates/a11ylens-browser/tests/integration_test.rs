//! Integration tests against a real Chromium.
//!
//! These tests require Chrome to be installed on the system.
//! Run with: cargo test -p a11ylens-browser --test integration_test -- --ignored --nocapture

use std::time::Duration;

use a11ylens_browser::{CdpDriver, ChromeLauncher, LauncherConfig};
use a11ylens_protocols::{BrowserDriver, BrowserKind, DriverError, LoadState};

fn test_config() -> LauncherConfig {
    LauncherConfig {
        debug_port: 0,
        headless: true,
        ..Default::default()
    }
}

const PAGE: &str = "data:text/html,<html><body><button id=b>Go</button></body></html>";

#[tokio::test]
#[ignore]
async fn test_chrome_detection() {
    let chrome_path = ChromeLauncher::find_chrome();
    assert!(chrome_path.is_some(), "Chrome should be installed on the system");
    println!("Found Chrome at: {}", chrome_path.unwrap().display());
}

#[tokio::test]
async fn test_firefox_is_unsupported() {
    let driver = CdpDriver::new(test_config());
    let result = driver.launch(BrowserKind::Firefox, true).await;
    assert!(matches!(result, Err(DriverError::Unsupported(_))));
}

#[tokio::test]
#[ignore]
async fn test_launch_navigate_evaluate_close() {
    let driver = CdpDriver::new(test_config());
    let browser = driver.launch(BrowserKind::Chromium, true).await.unwrap();
    let page = browser.new_page().await.unwrap();

    page.goto(PAGE, Duration::from_secs(10)).await.unwrap();
    page.wait_for_load_state(LoadState::NetworkIdle, Duration::from_secs(5))
        .await
        .unwrap();

    let tag = page
        .evaluate("document.getElementById('b').tagName")
        .await
        .unwrap();
    assert_eq!(tag, "BUTTON");

    page.add_script_tag("window.__marker = 41 + 1;").await.unwrap();
    assert_eq!(page.evaluate("window.__marker").await.unwrap(), 42);

    page.close().await.unwrap();
    browser.close().await.unwrap();
    // Second close is a no-op.
    browser.close().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_wait_for_navigation_sees_hash_change() {
    let driver = CdpDriver::new(test_config());
    let browser = driver.launch(BrowserKind::Chromium, true).await.unwrap();
    let page = browser.new_page().await.unwrap();
    page.goto(PAGE, Duration::from_secs(10)).await.unwrap();

    let waiter = page.wait_for_navigation();
    let trigger = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        page.evaluate("location.hash = 'next'").await
    };
    let (waited, triggered) = tokio::join!(
        tokio::time::timeout(Duration::from_secs(5), waiter),
        trigger
    );
    triggered.unwrap();
    waited.expect("navigation observed").unwrap();

    browser.close().await.unwrap();
}

#[tokio::test]
#[ignore]
async fn test_evaluate_reports_exception_message() {
    let driver = CdpDriver::new(test_config());
    let browser = driver.launch(BrowserKind::Chromium, true).await.unwrap();
    let page = browser.new_page().await.unwrap();

    let err = page
        .evaluate("(() => { throw new Error('boom'); })()")
        .await
        .unwrap_err();
    match err {
        DriverError::JavaScript(msg) => assert!(msg.contains("boom"), "{}", msg),
        other => panic!("unexpected error {:?}", other),
    }

    browser.close().await.unwrap();
}
