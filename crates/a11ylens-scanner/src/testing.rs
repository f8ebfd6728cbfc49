//! Scripted in-memory driver for scanner tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use a11ylens_protocols::{
    BrowserDriver, BrowserHandle, BrowserKind, DriverError, LoadState, PageHandle,
};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::bundle::{
    BUNDLE_SOURCE, DETECT_FRAMEWORK_EXPRESSION, IS_INJECTED_EXPRESSION,
    RESTORE_NAVIGATION_EXPRESSION, RULE_ENGINE_PRESENT_EXPRESSION,
};

/// What the fake browser and page do.
#[derive(Debug, Clone)]
pub struct FakeBehavior {
    pub launch_error: Option<DriverError>,
    pub page_error: Option<DriverError>,
    pub goto_error: Option<DriverError>,
    pub goto_delay: Duration,
    /// `false` makes every network-idle wait time out.
    pub network_idle: bool,
    /// Further client-side navigations the page performs.
    pub navigations: u32,
    /// Delay between a navigation wait starting and the navigation firing.
    pub navigation_after: Duration,
    pub react: bool,
    /// Whether adding the bundle actually installs the marker.
    pub marker_after_bundle: bool,
    pub rule_engine_loaded: bool,
    /// Consumed in order by scan evaluations; empty means an empty payload.
    pub scan_results: VecDeque<Result<Value, DriverError>>,
    pub scan_delay: Duration,
    /// A failed scan also wipes the bundle, as a reload would.
    pub reset_injection_on_error: bool,
}

impl Default for FakeBehavior {
    fn default() -> Self {
        Self {
            launch_error: None,
            page_error: None,
            goto_error: None,
            goto_delay: Duration::ZERO,
            network_idle: true,
            navigations: 0,
            navigation_after: Duration::from_millis(100),
            react: true,
            marker_after_bundle: true,
            rule_engine_loaded: true,
            scan_results: VecDeque::new(),
            scan_delay: Duration::ZERO,
            reset_injection_on_error: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct Counters {
    pub launches: AtomicU32,
    pub browser_closes: AtomicU32,
    pub pages_opened: AtomicU32,
    pub page_closes: AtomicU32,
    pub bundle_injections: AtomicU32,
    pub rule_engine_injections: AtomicU32,
    pub scan_calls: AtomicU32,
    pub restores: AtomicU32,
    pub idle_waits: AtomicU32,
}

impl Counters {
    pub fn get(counter: &AtomicU32) -> u32 {
        counter.load(Ordering::SeqCst)
    }
}

pub struct FakeState {
    pub behavior: Mutex<FakeBehavior>,
    pub counters: Counters,
    injected: AtomicBool,
    rule_engine: AtomicBool,
}

#[derive(Clone)]
pub struct FakeDriver {
    state: Arc<FakeState>,
}

impl FakeDriver {
    pub fn new(behavior: FakeBehavior) -> Self {
        let rule_engine = behavior.rule_engine_loaded;
        Self {
            state: Arc::new(FakeState {
                behavior: Mutex::new(behavior),
                counters: Counters::default(),
                injected: AtomicBool::new(false),
                rule_engine: AtomicBool::new(rule_engine),
            }),
        }
    }

    pub fn counters(&self) -> &Counters {
        &self.state.counters
    }

    pub fn launches(&self) -> u32 {
        Counters::get(&self.state.counters.launches)
    }

    pub fn browser_closes(&self) -> u32 {
        Counters::get(&self.state.counters.browser_closes)
    }

    /// A page handle not tied to any launch, for component-level tests.
    pub fn page(&self) -> FakePage {
        FakePage {
            state: self.state.clone(),
        }
    }

    pub fn set_injected(&self, injected: bool) {
        self.state.injected.store(injected, Ordering::SeqCst);
    }
}

/// Payload the fake page returns when no scan result is scripted.
pub fn empty_payload() -> Value {
    json!({
        "fibers": [],
        "violations": [],
        "passes": [],
        "incomplete": [],
        "inapplicable": [],
        "customFindings": [],
        "errors": [],
        "bundleVersion": crate::bundle::BUNDLE_VERSION
    })
}

#[async_trait]
impl BrowserDriver for FakeDriver {
    async fn launch(
        &self,
        kind: BrowserKind,
        _headless: bool,
    ) -> Result<Box<dyn BrowserHandle>, DriverError> {
        if let Some(e) = self.state.behavior.lock().launch_error.clone() {
            return Err(e);
        }
        self.state.counters.launches.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeBrowser {
            kind,
            state: self.state.clone(),
            closed: AtomicBool::new(false),
        }))
    }
}

pub struct FakeBrowser {
    kind: BrowserKind,
    state: Arc<FakeState>,
    closed: AtomicBool,
}

#[async_trait]
impl BrowserHandle for FakeBrowser {
    fn kind(&self) -> BrowserKind {
        self.kind
    }

    async fn new_page(&self) -> Result<Box<dyn PageHandle>, DriverError> {
        if let Some(e) = self.state.behavior.lock().page_error.clone() {
            return Err(e);
        }
        self.state.counters.pages_opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakePage {
            state: self.state.clone(),
        }))
    }

    async fn close(&self) -> Result<(), DriverError> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.state.counters.browser_closes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

pub struct FakePage {
    state: Arc<FakeState>,
}

impl FakePage {
    async fn run_scan(&self) -> Result<Value, DriverError> {
        self.state.counters.scan_calls.fetch_add(1, Ordering::SeqCst);
        let (delay, next, reset) = {
            let mut behavior = self.state.behavior.lock();
            (
                behavior.scan_delay,
                behavior.scan_results.pop_front(),
                behavior.reset_injection_on_error,
            )
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let result = next.unwrap_or_else(|| Ok(empty_payload()));
        if result.is_err() && reset {
            self.state.injected.store(false, Ordering::SeqCst);
        }
        result
    }
}

#[async_trait]
impl PageHandle for FakePage {
    async fn goto(&self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let (delay, error) = {
            let behavior = self.state.behavior.lock();
            (behavior.goto_delay, behavior.goto_error.clone())
        };
        if delay > timeout {
            tokio::time::sleep(timeout).await;
            return Err(DriverError::Timeout(format!("goto {}", url)));
        }
        tokio::time::sleep(delay).await;
        error.map_or(Ok(()), Err)
    }

    async fn wait_for_load_state(
        &self,
        state: LoadState,
        timeout: Duration,
    ) -> Result<(), DriverError> {
        if state == LoadState::NetworkIdle {
            self.state.counters.idle_waits.fetch_add(1, Ordering::SeqCst);
            if !self.state.behavior.lock().network_idle {
                tokio::time::sleep(timeout).await;
                return Err(DriverError::Timeout("network idle".to_string()));
            }
        }
        Ok(())
    }

    async fn wait_for_navigation(&self) -> Result<(), DriverError> {
        let after = {
            let mut behavior = self.state.behavior.lock();
            if behavior.navigations == 0 {
                None
            } else {
                behavior.navigations -= 1;
                Some(behavior.navigation_after)
            }
        };
        match after {
            Some(delay) => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
            None => std::future::pending().await,
        }
    }

    async fn evaluate(&self, expression: &str) -> Result<Value, DriverError> {
        if expression == IS_INJECTED_EXPRESSION {
            return Ok(Value::Bool(self.state.injected.load(Ordering::SeqCst)));
        }
        if expression == RULE_ENGINE_PRESENT_EXPRESSION {
            return Ok(Value::Bool(self.state.rule_engine.load(Ordering::SeqCst)));
        }
        if expression == DETECT_FRAMEWORK_EXPRESSION {
            return Ok(Value::Bool(self.state.behavior.lock().react));
        }
        if expression == RESTORE_NAVIGATION_EXPRESSION {
            self.state.counters.restores.fetch_add(1, Ordering::SeqCst);
            return Ok(Value::Bool(false));
        }
        if expression.contains("lens.scan(") {
            return self.run_scan().await;
        }
        Ok(Value::Null)
    }

    async fn add_script_tag(&self, content: &str) -> Result<(), DriverError> {
        if content == BUNDLE_SOURCE {
            self.state.counters.bundle_injections.fetch_add(1, Ordering::SeqCst);
            if self.state.behavior.lock().marker_after_bundle {
                self.state.injected.store(true, Ordering::SeqCst);
            }
        } else {
            self.state.counters.rule_engine_injections.fetch_add(1, Ordering::SeqCst);
            self.state.rule_engine.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.state.counters.page_closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
