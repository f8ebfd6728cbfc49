//! # a11ylens Scanner
//!
//! Scan orchestration on top of the driver traits in `a11ylens-protocols`:
//!
//! - [`BrowserResource`] - scoped browser + page, released on every path
//! - [`NavigationStabilizer`] - waits for client-side navigation to settle
//! - [`Injector`] - installs the rule engine and the in-page bundle
//! - [`ScanExecutor`] - retried in-page scan with payload validation
//! - [`ComponentMapBuilder`] / [`Attributor`] - component attribution
//! - [`aggregate`] - final report assembly
//!
//! [`ScanSession`] runs all of the above for one URL.

pub mod aggregator;
pub mod attribution;
pub mod bundle;
pub mod component_map;
pub mod executor;
pub mod filter;
pub mod injector;
pub mod resource;
pub mod retry;
pub mod session;
pub mod stabilizer;
pub mod wcag;

#[cfg(test)]
mod testing;

pub use aggregator::{aggregate, summarize, AggregateInput};
pub use attribution::Attributor;
pub use bundle::{ScanOptions, BUNDLE_VERSION};
pub use component_map::{ComponentMap, ComponentMapBuilder, DomComponentMap};
pub use executor::{ExecutedScan, ScanExecutor};
pub use filter::FrameworkFilter;
pub use injector::Injector;
pub use resource::BrowserResource;
pub use retry::{Backoff, RetryExhausted, RetryPolicy, Retried};
pub use session::{ScanSession, SessionConfig};
pub use stabilizer::{NavigationStabilizer, StabilizerConfig};
pub use wcag::WcagLevel;
