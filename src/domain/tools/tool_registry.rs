//! Tool registry - which tools each assistant offers.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use super::definitions::{game_master_tools, grocery_tools, shop_tools};
use super::ToolDefinition;
use crate::domain::foundation::AssistantKind;

static STANDARD: Lazy<ToolRegistry> = Lazy::new(ToolRegistry::standard);

/// Tool definitions by name, plus the ordered tool list of each assistant.
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolDefinition>,
    assistant_tools: HashMap<AssistantKind, Vec<String>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool registered for its assistant.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for (kind, tools) in [
            (AssistantKind::Grocery, grocery_tools()),
            (AssistantKind::Shop, shop_tools()),
            (AssistantKind::GameMaster, game_master_tools()),
        ] {
            for tool in tools {
                registry.register(tool, kind);
            }
        }
        registry
    }

    /// Process-wide standard registry, built on first use.
    pub fn global() -> &'static ToolRegistry {
        &STANDARD
    }

    /// Registers a tool for an assistant. Re-registering a name replaces its
    /// definition.
    pub fn register(&mut self, definition: ToolDefinition, kind: AssistantKind) {
        let name = definition.name().to_string();
        self.tools.insert(name.clone(), definition);
        let names = self.assistant_tools.entry(kind).or_default();
        if !names.contains(&name) {
            names.push(name);
        }
    }

    /// Tools offered by an assistant, in registration order.
    pub fn tools_for(&self, kind: AssistantKind) -> Vec<&ToolDefinition> {
        self.assistant_tools
            .get(&kind)
            .map(|names| names.iter().filter_map(|n| self.tools.get(n)).collect())
            .unwrap_or_default()
    }

    pub fn get_tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.get(name)
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn is_available_for(&self, name: &str, kind: AssistantKind) -> bool {
        self.assistant_tools
            .get(&kind)
            .is_some_and(|names| names.iter().any(|n| n == name))
    }

    /// OpenAI function definitions for an assistant.
    pub fn openai_tools(&self, kind: AssistantKind) -> Vec<serde_json::Value> {
        self.tools_for(kind)
            .into_iter()
            .map(ToolDefinition::to_openai_format)
            .collect()
    }

    /// Anthropic tool definitions for an assistant.
    pub fn anthropic_tools(&self, kind: AssistantKind) -> Vec<serde_json::Value> {
        self.tools_for(kind)
            .into_iter()
            .map(ToolDefinition::to_anthropic_format)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
