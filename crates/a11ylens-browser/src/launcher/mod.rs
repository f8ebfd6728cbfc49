//! Chromium process launcher.
//!
//! Starts a private Chromium with remote debugging on a throwaway profile
//! and waits until its DevTools endpoint answers.

mod launcher_core;
mod launcher_types;

pub use launcher_core::ChromeLauncher;
pub use launcher_types::{LaunchedChrome, LauncherConfig};

#[cfg(test)]
#[path = "launcher_tests.rs"]
mod tests;
