//! World module - per-session game world for the game master assistant.
//!
//! Health status is derived from vitality and never set directly. Current
//! health is capped at the maximum but has no floor; views floor it at zero.

mod state;
mod update;

pub use state::{
    HealthStatus, Location, Vitality, WorldFields, WorldState, WorldStatus, WorldView,
    STARTING_HEALTH,
};
pub use update::{WorldChange, WorldUpdate};
