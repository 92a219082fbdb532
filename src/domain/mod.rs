//! Domain layer containing session state and its rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (ids, money, timestamps, errors, the generic aggregate)
//! - `catalog` - Read-only product index
//! - `cart` - Per-session shopping cart and the meal table
//! - `order` - Immutable order records
//! - `world` - Per-session game world
//! - `tools` - Tool calls, commands and the tool registry

pub mod cart;
pub mod catalog;
pub mod foundation;
pub mod order;
pub mod tools;
pub mod world;
