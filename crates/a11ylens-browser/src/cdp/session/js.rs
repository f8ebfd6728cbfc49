//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::ExceptionDetails;

use super::core::PageSession;

impl PageSession {
    /// Evaluate JavaScript expression, awaiting promises and returning the
    /// result by value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(exception) = result.get("exceptionDetails") {
            return Err(Self::exception_error(exception));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Insert an inline `<script>` element carrying `source`.
    ///
    /// The source is passed through JSON so no escaping of the script
    /// body is needed. Errors thrown by the script itself are reported
    /// to the page, not here.
    pub async fn add_script_tag(&self, source: &str) -> Result<(), CdpError> {
        let literal = serde_json::to_string(source)?;
        let expression = format!(
            "(() => {{ const s = document.createElement('script'); s.textContent = {}; \
             (document.head || document.documentElement).appendChild(s); s.remove(); return true; }})()",
            literal
        );
        self.evaluate(&expression).await?;
        Ok(())
    }

    pub(super) fn exception_error(exception: &Value) -> CdpError {
        match serde_json::from_value::<ExceptionDetails>(exception.clone()) {
            Ok(details) => CdpError::JavaScript(details.message()),
            Err(_) => CdpError::JavaScript(
                exception["text"]
                    .as_str()
                    .unwrap_or("Unknown error")
                    .to_string(),
            ),
        }
    }
}
