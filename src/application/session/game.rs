//! Game master tools: world updates and world view.

use serde_json::json;

use super::to_json;
use crate::domain::tools::ToolResponse;
use crate::domain::world::{WorldChange, WorldState, WorldUpdate};

pub(super) fn update_world_state(world: &mut WorldState, update: WorldUpdate) -> ToolResponse {
    if update.is_empty() {
        return ToolResponse::validation_error(
            "No world changes given. A new location needs both a name and a description.",
        );
    }

    let changes = update.apply_to(world);
    let summary = changes
        .iter()
        .map(WorldChange::describe)
        .collect::<Vec<_>>()
        .join("; ");

    ToolResponse::success(format!("World updated: {summary}."), true).with_data(json!({
        "changes": to_json(&changes),
        "state": to_json(&world.view()),
    }))
}

pub(super) fn get_world_state(world: &WorldState) -> ToolResponse {
    ToolResponse::payload(to_json(&world.view()))
}
