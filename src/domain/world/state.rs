//! World state aggregate - the game master's view of the adventure.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Aggregate, DerivedState, SessionId};

/// Starting hit points of a new adventure.
pub const STARTING_HEALTH: i64 = 20;

/// Where the player currently is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub description: String,
}

/// Current and maximum hit points.
///
/// `current` never exceeds `maximum` but may drop below zero; only the
/// rendered view floors it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vitality {
    pub current: i64,
    pub maximum: i64,
}

impl Vitality {
    /// Current health floored at zero, for display.
    pub fn displayed(&self) -> i64 {
        self.current.max(0)
    }
}

/// Health status derived from the current/maximum ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HealthStatus {
    Healthy,
    Injured,
    Critical,
    Unconscious,
}

impl HealthStatus {
    /// Classifies a vitality by fixed thresholds, first match wins:
    /// ratio <= 0 is Unconscious, < 0.3 Critical, < 0.7 Injured, else Healthy.
    pub fn from_vitality(vitality: &Vitality) -> Self {
        let current = i128::from(vitality.current);
        let maximum = i128::from(vitality.maximum);
        if current <= 0 {
            HealthStatus::Unconscious
        } else if current * 10 < maximum * 3 {
            HealthStatus::Critical
        } else if current * 10 < maximum * 7 {
            HealthStatus::Injured
        } else {
            HealthStatus::Healthy
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Injured => "Injured",
            HealthStatus::Critical => "Critical",
            HealthStatus::Unconscious => "Unconscious",
        };
        f.write_str(s)
    }
}

/// Raw world fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldFields {
    pub location: Location,
    pub vitality: Vitality,
    pub inventory: Vec<String>,
    pub event_log: Vec<String>,
}

impl WorldFields {
    /// The fixed opening state of every adventure.
    pub fn opening() -> Self {
        Self {
            location: Location {
                name: "Village Square".to_string(),
                description: "A quiet square at the heart of the village. Paths lead north to the forest and east to the old mill.".to_string(),
            },
            vitality: Vitality {
                current: STARTING_HEALTH,
                maximum: STARTING_HEALTH,
            },
            inventory: vec!["Torch".to_string(), "Rusty Sword".to_string()],
            event_log: Vec::new(),
        }
    }
}

/// Values derived from the world fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldStatus {
    pub status: HealthStatus,
}

impl DerivedState for WorldFields {
    type Derived = WorldStatus;

    fn derive(&self) -> WorldStatus {
        WorldStatus {
            status: HealthStatus::from_vitality(&self.vitality),
        }
    }
}

/// The session's game world.
pub type WorldState = Aggregate<WorldFields>;

/// Rendering view with health floored at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldView {
    pub location: Location,
    pub health: i64,
    pub max_health: i64,
    pub status: HealthStatus,
    pub inventory: Vec<String>,
    pub events: Vec<String>,
}

impl Aggregate<WorldFields> {
    /// Starts a new adventure for a session.
    pub fn new_game(session_id: SessionId) -> Self {
        Aggregate::new(session_id, WorldFields::opening())
    }

    /// Replaces location name and description together.
    pub fn update_location(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let location = Location {
            name: name.into(),
            description: description.into(),
        };
        self.apply(|world| world.location = location);
    }

    /// Appends an item; duplicates are allowed.
    pub fn add_item(&mut self, item: impl Into<String>) {
        let item = item.into();
        self.apply(|world| world.inventory.push(item));
    }

    /// Removes the first occurrence of an item. Returns false if absent.
    pub fn remove_item(&mut self, item: &str) -> bool {
        let Some(idx) = self.fields().inventory.iter().position(|i| i == item) else {
            return false;
        };
        self.apply(|world| world.inventory.remove(idx));
        true
    }

    /// Adds `delta` to current health, capped at maximum, and returns the
    /// recomputed status.
    pub fn adjust_vitality(&mut self, delta: i64) -> HealthStatus {
        self.apply(|world| {
            let v = &mut world.vitality;
            v.current = v.current.saturating_add(delta).min(v.maximum);
        });
        self.status()
    }

    /// Appends a narrative event to the log.
    pub fn log_event(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.apply(|world| world.event_log.push(text));
    }

    pub fn status(&self) -> HealthStatus {
        self.derived().status
    }

    pub fn location(&self) -> &Location {
        &self.fields().location
    }

    pub fn vitality(&self) -> Vitality {
        self.fields().vitality
    }

    pub fn inventory(&self) -> &[String] {
        &self.fields().inventory
    }

    pub fn events(&self) -> &[String] {
        &self.fields().event_log
    }

    /// Owned rendering view of the current state.
    pub fn view(&self) -> WorldView {
        let fields = self.fields();
        WorldView {
            location: fields.location.clone(),
            health: fields.vitality.displayed(),
            max_health: fields.vitality.maximum,
            status: self.status(),
            inventory: fields.inventory.clone(),
            events: fields.event_log.clone(),
        }
    }
}
