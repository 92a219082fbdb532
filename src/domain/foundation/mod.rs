//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the assistant state engine.

mod aggregate;
mod assistant_kind;
mod errors;
mod ids;
mod money;
mod timestamp;

pub use aggregate::{Aggregate, AggregateSnapshot, DerivedState};
pub use assistant_kind::AssistantKind;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ItemId, OrderId, SessionId};
pub use money::Money;
pub use timestamp::Timestamp;
