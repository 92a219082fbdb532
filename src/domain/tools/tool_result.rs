//! Tool execution outcome.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;

/// Category of a tool call's outcome.
///
/// Lookup misses and rejected preconditions are ordinary outcomes, not
/// faults: the orchestrator narrates them back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolResult {
    /// Operation applied.
    Success,

    /// Catalog, cart, meal or order lookup found nothing.
    NotFound,

    /// Operation refused by a business rule (e.g. ordering an empty cart).
    PreconditionFailed,

    /// Unknown tool or malformed parameters.
    ValidationError,

    /// The order store could not be written or timed out.
    PersistenceFailed,

    /// The order write outlived its deadline and may still land.
    Pending,
}

impl ToolResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    /// Only storage failures are worth retrying without user input.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::PersistenceFailed)
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Success => "Tool executed successfully",
            Self::NotFound => "Requested item was not found",
            Self::PreconditionFailed => "Operation is not allowed in the current state",
            Self::ValidationError => "Tool call failed validation",
            Self::PersistenceFailed => "Order could not be saved",
            Self::Pending => "Order is still being saved",
        }
    }

    /// Maps a domain error code onto the outcome reported to the orchestrator.
    pub fn from_code(code: ErrorCode) -> Self {
        match code {
            ErrorCode::ItemNotFound | ErrorCode::NoOrders => Self::NotFound,
            ErrorCode::CartEmpty | ErrorCode::CatalogUnavailable => Self::PreconditionFailed,
            ErrorCode::PersistenceFailed | ErrorCode::Timeout => Self::PersistenceFailed,
            ErrorCode::OrderUnconfirmed => Self::Pending,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::UnsupportedTool => Self::ValidationError,
        }
    }
}

impl std::fmt::Display for ToolResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}
