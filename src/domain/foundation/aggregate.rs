//! Generic session aggregate with derived fields.
//!
//! Both session aggregates (the shopping cart and the game world) follow the
//! same shape: a set of raw fields mutated through named operations, plus a
//! view computed from those fields. [`Aggregate`] owns that shape once so the
//! derived view can never drift from the raw fields.
//!
//! # Example
//!
//! ```ignore
//! impl DerivedState for CartLines {
//!     type Derived = CartTotals;
//!
//!     fn derive(&self) -> CartTotals {
//!         CartTotals { total: self.lines.iter().map(CartLine::subtotal).sum(), .. }
//!     }
//! }
//!
//! pub type Cart = Aggregate<CartLines>;
//! ```

use serde::Serialize;
use std::fmt::Debug;

use super::SessionId;

/// Raw field set of an aggregate, able to compute its derived view.
pub trait DerivedState: Clone + Debug {
    /// Values computed deterministically from the raw fields.
    type Derived: Clone + Debug + PartialEq + Serialize;

    /// Computes the derived view from the current raw fields.
    fn derive(&self) -> Self::Derived;
}

/// Session-owned mutable state with an always-current derived view.
///
/// # Invariants
///
/// - `derived == fields.derive()` after every public operation
/// - `version` increases by one for every applied mutation
#[derive(Debug, Clone)]
pub struct Aggregate<S: DerivedState> {
    session_id: SessionId,
    fields: S,
    derived: S::Derived,
    version: u64,
}

impl<S: DerivedState> Aggregate<S> {
    /// Creates an aggregate for a session from its initial fields.
    pub fn new(session_id: SessionId, fields: S) -> Self {
        let derived = fields.derive();
        Self {
            session_id,
            fields,
            derived,
            version: 0,
        }
    }

    /// Returns the owning session.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// Returns the raw fields.
    pub fn fields(&self) -> &S {
        &self.fields
    }

    /// Returns the derived view.
    pub fn derived(&self) -> &S::Derived {
        &self.derived
    }

    /// Number of mutations applied since creation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Applies a mutation to the raw fields and refreshes the derived view.
    ///
    /// Callers validate their input before calling this; the closure must
    /// leave the fields in a valid state.
    pub fn apply<R>(&mut self, mutation: impl FnOnce(&mut S) -> R) -> R {
        let result = mutation(&mut self.fields);
        self.derived = self.fields.derive();
        self.version += 1;
        result
    }

    /// Returns an owned copy of the full state, independent of this aggregate.
    pub fn snapshot(&self) -> AggregateSnapshot<S> {
        AggregateSnapshot {
            session_id: self.session_id,
            version: self.version,
            fields: self.fields.clone(),
            derived: self.derived.clone(),
        }
    }
}

/// Point-in-time copy of an aggregate for rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound = "S: Serialize")]
pub struct AggregateSnapshot<S: DerivedState> {
    pub session_id: SessionId,
    pub version: u64,
    #[serde(flatten)]
    pub fields: S,
    #[serde(flatten)]
    pub derived: S::Derived,
}
