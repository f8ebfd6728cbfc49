//! CDP protocol types and message definitions.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// CDP request message.
#[derive(Debug, Serialize)]
pub struct CdpRequest {
    pub id: u64,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP response or event message.
#[derive(Debug, Deserialize)]
pub struct CdpResponse {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<CdpErrorResponse>,
    pub method: Option<String>,
    pub params: Option<Value>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// CDP error in response.
#[derive(Debug, Deserialize)]
pub struct CdpErrorResponse {
    pub code: i64,
    pub message: String,
    pub data: Option<String>,
}

/// Browser version info.
///
/// Note: Chrome returns PascalCase field names for this endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "Protocol-Version")]
    pub protocol_version: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

/// Exception details from Runtime.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionDetails {
    pub text: String,
    #[serde(default)]
    pub line_number: i64,
    #[serde(default)]
    pub column_number: i64,
    pub exception: Option<ExceptionObject>,
}

impl ExceptionDetails {
    /// Most specific message available: the thrown object's description
    /// (`Error: message\n at ...`) when present, else the summary text.
    pub fn message(&self) -> String {
        self.exception
            .as_ref()
            .and_then(|e| e.description.as_deref())
            .and_then(|d| d.lines().next())
            .map(|line| line.to_string())
            .unwrap_or_else(|| self.text.clone())
    }
}

/// Thrown value attached to exception details.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionObject {
    #[serde(rename = "type")]
    pub object_type: String,
    pub description: Option<String>,
}

/// A CDP event relevant to page stability tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    RequestStarted(String),
    RequestFinished(String),
    /// Main-frame document navigation committed.
    FrameNavigated,
    /// Main-frame same-document (history API) navigation.
    NavigatedWithinDocument,
    DomContentLoaded,
    Load,
    Other,
}

impl PageEvent {
    /// Classify a raw CDP event.
    pub fn from_cdp(method: &str, params: &Value) -> Self {
        match method {
            "Network.requestWillBeSent" => Self::request_id(params)
                .map(PageEvent::RequestStarted)
                .unwrap_or(PageEvent::Other),
            "Network.loadingFinished" | "Network.loadingFailed" => Self::request_id(params)
                .map(PageEvent::RequestFinished)
                .unwrap_or(PageEvent::Other),
            "Page.frameNavigated" => {
                let is_main = params["frame"].get("parentId").map_or(true, Value::is_null);
                if is_main {
                    PageEvent::FrameNavigated
                } else {
                    PageEvent::Other
                }
            }
            "Page.navigatedWithinDocument" => PageEvent::NavigatedWithinDocument,
            "Page.domContentEventFired" => PageEvent::DomContentLoaded,
            "Page.loadEventFired" => PageEvent::Load,
            _ => PageEvent::Other,
        }
    }

    fn request_id(params: &Value) -> Option<String> {
        params["requestId"].as_str().map(|s| s.to_string())
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
