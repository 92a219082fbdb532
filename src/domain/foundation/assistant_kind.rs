//! AssistantKind enum naming the stateful assistant variants.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// The assistant variants that sit on top of the state engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssistantKind {
    /// Grocery ordering with a session cart.
    #[default]
    Grocery,
    /// E-commerce browsing with single-item checkout.
    Shop,
    /// Text-adventure game master tracking world state.
    GameMaster,
}

impl AssistantKind {
    /// Returns all variants in canonical order.
    pub fn all() -> &'static [AssistantKind] {
        &[
            AssistantKind::Grocery,
            AssistantKind::Shop,
            AssistantKind::GameMaster,
        ]
    }

    /// Returns the snake_case name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantKind::Grocery => "grocery",
            AssistantKind::Shop => "shop",
            AssistantKind::GameMaster => "game_master",
        }
    }

    /// Returns the display name.
    pub fn display_name(&self) -> &'static str {
        match self {
            AssistantKind::Grocery => "Grocery Ordering",
            AssistantKind::Shop => "E-commerce Ordering",
            AssistantKind::GameMaster => "Game Master",
        }
    }

    /// Whether this variant reads the product catalog.
    pub fn uses_catalog(&self) -> bool {
        !matches!(self, AssistantKind::GameMaster)
    }
}

impl fmt::Display for AssistantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for AssistantKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssistantKind::all()
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "assistant",
                    format!("unknown assistant kind '{}'", s),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_configuration_names() {
        assert_eq!("grocery".parse::<AssistantKind>().unwrap(), AssistantKind::Grocery);
        assert_eq!("Game_Master".parse::<AssistantKind>().unwrap(), AssistantKind::GameMaster);
        assert!("echo".parse::<AssistantKind>().is_err());
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&AssistantKind::GameMaster).unwrap();
        assert_eq!(json, "\"game_master\"");
    }

    #[test]
    fn only_game_master_skips_catalog() {
        assert!(AssistantKind::Grocery.uses_catalog());
        assert!(AssistantKind::Shop.uses_catalog());
        assert!(!AssistantKind::GameMaster.uses_catalog());
    }
}
