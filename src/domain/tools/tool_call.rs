//! Tool call and response types.

use serde::{Deserialize, Serialize};

use super::ToolResult;
use crate::domain::foundation::DomainError;

/// A request from the orchestrator to run a named tool.
///
/// Parameters stay raw JSON here; [`super::Command::parse`] turns them into
/// typed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    name: String,

    #[serde(default)]
    parameters: serde_json::Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, parameters: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            parameters,
        }
    }

    /// A call with no parameters.
    pub fn bare(name: impl Into<String>) -> Self {
        Self::new(name, serde_json::Value::Null)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parameters(&self) -> &serde_json::Value {
        &self.parameters
    }
}

/// Result of running a tool, ready for narration.
///
/// Every call produces one of these; errors are folded into `outcome` plus a
/// human-readable `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResponse {
    outcome: ToolResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,

    /// Whether session state (cart, world or ledger) changed.
    state_changed: bool,
}

impl ToolResponse {
    fn with_outcome(outcome: ToolResult, message: impl Into<String>) -> Self {
        Self {
            outcome,
            message: Some(message.into()),
            data: None,
            state_changed: false,
        }
    }

    /// A successful call described by a message.
    pub fn success(message: impl Into<String>, state_changed: bool) -> Self {
        Self {
            state_changed,
            ..Self::with_outcome(ToolResult::Success, message)
        }
    }

    /// A successful call returning a structured payload.
    pub fn payload(data: serde_json::Value) -> Self {
        Self {
            outcome: ToolResult::Success,
            message: None,
            data: Some(data),
            state_changed: false,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_outcome(ToolResult::NotFound, message)
    }

    pub fn precondition_failed(message: impl Into<String>) -> Self {
        Self::with_outcome(ToolResult::PreconditionFailed, message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::with_outcome(ToolResult::ValidationError, message)
    }

    /// Builds a failure response from a domain error, keeping its message.
    /// Error details, if any, become the response data.
    pub fn from_error(err: &DomainError) -> Self {
        let response = Self::with_outcome(ToolResult::from_code(err.code), err.message.clone());
        if err.details.is_empty() {
            return response;
        }
        let details: serde_json::Map<String, serde_json::Value> = err
            .details
            .iter()
            .map(|(key, value)| (key.clone(), serde_json::Value::String(value.clone())))
            .collect();
        response.with_data(serde_json::Value::Object(details))
    }

    /// Replaces the message, keeping the outcome.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn outcome(&self) -> ToolResult {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn state_changed(&self) -> bool {
        self.state_changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::ErrorCode;

    #[test]
    fn tool_call_deserializes_without_parameters() {
        let call: ToolCall = serde_json::from_str(r#"{"name": "get_cart_status"}"#).unwrap();
        assert_eq!(call.name(), "get_cart_status");
        assert!(call.parameters().is_null());
    }

    #[test]
    fn success_carries_state_flag() {
        let response = ToolResponse::success("Added 1 x Bread to cart.", true);
        assert!(response.is_success());
        assert!(response.state_changed());
        assert_eq!(response.message(), Some("Added 1 x Bread to cart."));
    }

    #[test]
    fn failures_never_report_state_change() {
        let response = ToolResponse::precondition_failed("Your cart is empty.");
        assert_eq!(response.outcome(), ToolResult::PreconditionFailed);
        assert!(!response.state_changed());
    }

    #[test]
    fn from_error_maps_code() {
        let err = DomainError::new(ErrorCode::Timeout, "store busy");
        let response = ToolResponse::from_error(&err);
        assert_eq!(response.outcome(), ToolResult::PersistenceFailed);
        assert!(response.outcome().is_retryable());
    }

    #[test]
    fn from_error_exposes_details_as_data() {
        let err = DomainError::new(ErrorCode::UnsupportedTool, "Tool 'dance' is not available")
            .with_detail("tool", "dance");

        let response = ToolResponse::from_error(&err);

        assert_eq!(response.outcome(), ToolResult::ValidationError);
        assert_eq!(response.data().unwrap()["tool"], "dance");
        assert!(ToolResponse::from_error(&DomainError::new(ErrorCode::CartEmpty, "empty"))
            .data()
            .is_none());
    }

    #[test]
    fn with_message_keeps_outcome() {
        let err = DomainError::new(ErrorCode::PersistenceFailed, "disk full");
        let response = ToolResponse::from_error(&err).with_message("Could not save your order.");
        assert_eq!(response.outcome(), ToolResult::PersistenceFailed);
        assert_eq!(response.message(), Some("Could not save your order."));
    }

    #[test]
    fn payload_omits_message_in_json() {
        let json = serde_json::to_value(ToolResponse::payload(serde_json::json!({"total": "0.00"})))
            .unwrap();
        assert!(json.get("message").is_none());
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["data"]["total"], "0.00");
    }
}
