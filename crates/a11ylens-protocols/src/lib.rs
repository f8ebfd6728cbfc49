//! # a11ylens Protocols
//!
//! Shared definitions for the a11ylens scanner. Contains the data model that
//! flows between the in-page bundle and the Rust side, the browser driver
//! traits, and the error taxonomy - no implementations.
//!
//! ## Core Traits
//!
//! - [`BrowserDriver`] - Launches a browser of a given [`BrowserKind`]
//! - [`BrowserHandle`] - A running browser process that can open pages
//! - [`PageHandle`] - A single page/document the scanner drives
//!
//! ## Data Model
//!
//! - [`RawFinding`] - A rule-engine result as produced in the page
//! - [`AttributedFinding`] - A violation enriched with component attribution
//! - [`ScanResult`] - The final report handed to callers

pub mod driver;
pub mod error;
pub mod types;

pub use driver::{BrowserDriver, BrowserHandle, BrowserKind, LoadState, PageHandle};
pub use error::{DriverError, LaunchReason, ScanFailure};
pub use types::*;
