//! Tool definitions offered by each assistant.

use serde_json::json;

use super::command::*;
use super::ToolDefinition;

pub fn grocery_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::without_parameters(
            GET_CATALOG,
            "Get the list of available categories and items in the catalog.",
        ),
        ToolDefinition::new(
            ADD_TO_CART,
            "Add an item to the shopping cart.",
            json!({
                "type": "object",
                "required": ["item_name"],
                "properties": {
                    "item_name": { "type": "string", "description": "The name of the item to add." },
                    "quantity": { "type": "integer", "minimum": 1, "default": 1 },
                    "notes": { "type": "string", "description": "Any special notes or preferences." }
                }
            }),
        ),
        ToolDefinition::new(
            ADD_INGREDIENTS_FOR_MEAL,
            "Add the items needed for a known meal.",
            json!({
                "type": "object",
                "required": ["meal_name"],
                "properties": {
                    "meal_name": {
                        "type": "string",
                        "description": "The name of the meal (e.g., 'peanut butter sandwich', 'pasta')."
                    }
                }
            }),
        ),
        ToolDefinition::new(
            REMOVE_FROM_CART,
            "Remove an item from the cart.",
            json!({
                "type": "object",
                "required": ["item_name"],
                "properties": {
                    "item_name": { "type": "string", "description": "The name of the item to remove." }
                }
            }),
        ),
        ToolDefinition::new(
            UPDATE_CART_ITEM,
            "Set the quantity of an item already in the cart. Zero removes it.",
            json!({
                "type": "object",
                "required": ["item_name", "quantity"],
                "properties": {
                    "item_name": { "type": "string" },
                    "quantity": { "type": "integer", "minimum": 0 }
                }
            }),
        ),
        ToolDefinition::without_parameters(CLEAR_CART, "Remove every item from the cart."),
        ToolDefinition::without_parameters(
            GET_CART_STATUS,
            "Get the current items in the cart and the total price.",
        ),
        ToolDefinition::without_parameters(PLACE_ORDER, "Place the final order."),
    ]
}

pub fn shop_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            LIST_PRODUCTS,
            "List products, optionally filtered by category, tag or maximum price.",
            json!({
                "type": "object",
                "properties": {
                    "category": { "type": "string" },
                    "tag": { "type": "string" },
                    "max_price": { "type": "number", "minimum": 0 }
                }
            }),
        ),
        ToolDefinition::new(
            BUY_PRODUCT,
            "Buy a single product immediately.",
            json!({
                "type": "object",
                "required": ["product_name"],
                "properties": {
                    "product_name": { "type": "string" },
                    "quantity": { "type": "integer", "minimum": 1, "default": 1 }
                }
            }),
        ),
        ToolDefinition::without_parameters(GET_LAST_ORDER, "Get the most recent order."),
    ]
}

pub fn game_master_tools() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition::new(
            UPDATE_WORLD_STATE,
            "Update the game world. Only the given fields change; a location needs both name and description.",
            json!({
                "type": "object",
                "properties": {
                    "location_name": { "type": "string" },
                    "location_description": { "type": "string" },
                    "add_item": { "type": "string" },
                    "remove_item": { "type": "string" },
                    "health_change": { "type": "integer" },
                    "event": { "type": "string" }
                }
            }),
        ),
        ToolDefinition::without_parameters(
            GET_WORLD_STATE,
            "Get the current location, health, inventory and events.",
        ),
    ]
}
