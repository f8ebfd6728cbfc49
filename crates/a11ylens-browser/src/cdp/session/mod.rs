//! CDP page session for interacting with a single page.

mod activity;
mod core;
mod js;
mod navigation;

pub use self::activity::PageActivity;
pub use self::core::PageSession;
