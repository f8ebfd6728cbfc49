//! Chrome DevTools Protocol (CDP) client implementation.
//!
//! Connects to Chromium via WebSocket and speaks the CDP JSON-RPC protocol.
//!
//! ```rust,ignore
//! let client = CdpClient::connect("http://localhost:9222", Duration::from_secs(30)).await?;
//! let page = client.new_page().await?;
//! page.navigate("http://localhost:3000").await?;
//! ```

mod client;
mod error;
mod protocol;
mod session;

pub use client::CdpClient;
pub use error::CdpError;
pub use protocol::*;
pub use session::{PageActivity, PageSession};
