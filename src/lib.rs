//! Assistant Engine - session state behind conversational assistants
//!
//! This crate holds the deterministic state that voice and chat assistants
//! drive through tool calls: a shopping cart for grocery ordering, a single
//! item checkout for a shop, a game world for a game master, and the durable
//! order ledger they write to.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
