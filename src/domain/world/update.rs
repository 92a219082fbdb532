//! Partial multi-field world update.

use serde::{Deserialize, Serialize};

use super::state::{HealthStatus, WorldState};

/// Fields the game master may change in one call. Absent fields are left
/// alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldUpdate {
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub location_description: Option<String>,
    #[serde(default)]
    pub add_item: Option<String>,
    #[serde(default)]
    pub remove_item: Option<String>,
    #[serde(default)]
    pub health_change: Option<i64>,
    #[serde(default)]
    pub event: Option<String>,
}

/// One applied change, in application order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WorldChange {
    Moved { location: String },
    Gained { item: String },
    Lost { item: String },
    MissingItem { item: String },
    Health { delta: i64, current: i64, status: HealthStatus },
    Event { text: String },
}

impl WorldChange {
    /// Short narration line for the change.
    pub fn describe(&self) -> String {
        match self {
            WorldChange::Moved { location } => format!("Moved to {location}"),
            WorldChange::Gained { item } => format!("Added {item} to inventory"),
            WorldChange::Lost { item } => format!("Removed {item} from inventory"),
            WorldChange::MissingItem { item } => format!("{item} was not in inventory"),
            WorldChange::Health {
                delta,
                current,
                status,
            } => format!("Health changed by {delta:+} to {current} ({status})"),
            WorldChange::Event { text } => format!("Logged event: {text}"),
        }
    }
}

impl WorldUpdate {
    /// True when no field would change anything.
    pub fn is_empty(&self) -> bool {
        self.location().is_none()
            && self.add_item.is_none()
            && self.remove_item.is_none()
            && self.health_change.is_none()
            && self.event.is_none()
    }

    /// Location pair, only when both halves are present.
    fn location(&self) -> Option<(&str, &str)> {
        match (&self.location_name, &self.location_description) {
            (Some(name), Some(description)) => Some((name.as_str(), description.as_str())),
            _ => None,
        }
    }

    /// Applies the present fields in order: location, add, remove, health,
    /// event.
    pub fn apply_to(&self, world: &mut WorldState) -> Vec<WorldChange> {
        let mut changes = Vec::new();

        if let Some((name, description)) = self.location() {
            world.update_location(name, description);
            changes.push(WorldChange::Moved {
                location: name.to_string(),
            });
        }

        if let Some(item) = &self.add_item {
            world.add_item(item.clone());
            changes.push(WorldChange::Gained { item: item.clone() });
        }

        if let Some(item) = &self.remove_item {
            if world.remove_item(item) {
                changes.push(WorldChange::Lost { item: item.clone() });
            } else {
                changes.push(WorldChange::MissingItem { item: item.clone() });
            }
        }

        if let Some(delta) = self.health_change {
            let status = world.adjust_vitality(delta);
            changes.push(WorldChange::Health {
                delta,
                current: world.vitality().displayed(),
                status,
            });
        }

        if let Some(text) = &self.event {
            world.log_event(text.clone());
            changes.push(WorldChange::Event { text: text.clone() });
        }

        changes
    }
}
