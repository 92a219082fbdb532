//! Application layer - services that coordinate the domain and the ports.
//!
//! - `catalog` - Loads the shared catalog index from a source
//! - `ordering` - The shared order ledger
//! - `session` - Per-conversation tool execution

pub mod catalog;
pub mod ordering;
pub mod session;

pub use catalog::{load_catalog, CatalogLoad};
pub use ordering::{OrderLedger, DEFAULT_WRITE_TIMEOUT};
pub use session::{AssistantSession, SessionState};
