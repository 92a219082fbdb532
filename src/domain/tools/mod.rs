//! Tool interface - the fixed set of named operations offered to the
//! external orchestrator.
//!
//! - [`ToolCall`] / [`ToolResponse`] are the boundary value objects
//! - [`Command`] is the closed, typed form of a call
//! - [`ToolRegistry`] lists each assistant's [`ToolDefinition`]s

pub mod command;
mod definitions;
mod tool_call;
mod tool_definition;
mod tool_registry;
mod tool_result;

pub use command::{AddToCart, BuyProduct, Command, ItemRef, MealRequest, UpdateCartItem};
pub use tool_call::{ToolCall, ToolResponse};
pub use tool_definition::ToolDefinition;
pub use tool_registry::ToolRegistry;
pub use tool_result::ToolResult;
