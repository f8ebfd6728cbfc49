//! Browser driver protocol.
//!
//! The scanner only depends on this minimal surface. The default
//! implementation lives in `a11ylens-browser` and speaks CDP; tests use
//! scripted fakes.

mod kind;
mod traits;

pub use kind::{BrowserKind, LoadState};
pub use traits::{BrowserDriver, BrowserHandle, PageHandle};
