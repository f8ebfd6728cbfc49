//! Browser driver for a11ylens.
//!
//! Launches a private Chromium process and drives it through the Chrome
//! DevTools Protocol (CDP). Pure Rust, no Node.js dependency.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐    WebSocket     ┌──────────────────┐
//! │  a11ylens scan  │ ◄──────────────► │ Chromium (owned, │
//! │  (CdpDriver)    │       CDP        │  throwaway prof.)│
//! └─────────────────┘                  └──────────────────┘
//! ```
//!
//! [`CdpDriver`] implements the [`BrowserDriver`](a11ylens_protocols::BrowserDriver)
//! protocol. Each launch starts a fresh Chromium with its own profile
//! directory; closing the browser kills the process and removes the profile.
//! The child process is also killed when its handle is dropped, so an
//! abandoned scan never leaks a browser.
//!
//! Page sessions track CDP `Network.*` and `Page.*` events to answer
//! "is the network idle" and "did another navigation start" without polling
//! the page itself.

pub mod cdp;
mod driver;
pub mod launcher;

pub use cdp::{CdpClient, CdpError, PageSession};
pub use driver::{CdpBrowser, CdpDriver, CdpPage};
pub use launcher::{ChromeLauncher, LaunchedChrome, LauncherConfig};
