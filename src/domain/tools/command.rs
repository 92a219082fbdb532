//! Closed set of tool commands with typed parameters.
//!
//! The orchestrator names tools at runtime; [`Command::parse`] is the one
//! place where that dynamic name and JSON payload become a typed command.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::ToolCall;
use crate::domain::catalog::ProductFilter;
use crate::domain::foundation::{AssistantKind, ValidationError};
use crate::domain::world::WorldUpdate;

pub const GET_CATALOG: &str = "get_catalog";
pub const ADD_TO_CART: &str = "add_to_cart";
pub const ADD_INGREDIENTS_FOR_MEAL: &str = "add_ingredients_for_meal";
pub const REMOVE_FROM_CART: &str = "remove_from_cart";
pub const UPDATE_CART_ITEM: &str = "update_cart_item";
pub const CLEAR_CART: &str = "clear_cart";
pub const GET_CART_STATUS: &str = "get_cart_status";
pub const PLACE_ORDER: &str = "place_order";
pub const LIST_PRODUCTS: &str = "list_products";
pub const BUY_PRODUCT: &str = "buy_product";
pub const GET_LAST_ORDER: &str = "get_last_order";
pub const UPDATE_WORLD_STATE: &str = "update_world_state";
pub const GET_WORLD_STATE: &str = "get_world_state";

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCart {
    pub item_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealRequest {
    pub meal_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRef {
    pub item_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCartItem {
    pub item_name: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuyProduct {
    pub product_name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

/// Every operation an assistant session can run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    GetCatalog,
    AddToCart(AddToCart),
    AddIngredientsForMeal(MealRequest),
    RemoveFromCart(ItemRef),
    UpdateCartItem(UpdateCartItem),
    ClearCart,
    GetCartStatus,
    PlaceOrder,
    /// Filters for the listing; all absent lists everything.
    ListProducts(ProductFilter),
    BuyProduct(BuyProduct),
    GetLastOrder,
    UpdateWorldState(WorldUpdate),
    GetWorldState,
}

impl Command {
    /// Parses a tool call into a typed command.
    ///
    /// # Errors
    ///
    /// `InvalidFormat` for an unknown tool name or parameters that do not
    /// match the tool's schema.
    pub fn parse(call: &ToolCall) -> Result<Self, ValidationError> {
        let command = match call.name() {
            GET_CATALOG => Command::GetCatalog,
            ADD_TO_CART => Command::AddToCart(decode(call)?),
            ADD_INGREDIENTS_FOR_MEAL => Command::AddIngredientsForMeal(decode(call)?),
            REMOVE_FROM_CART => Command::RemoveFromCart(decode(call)?),
            UPDATE_CART_ITEM => Command::UpdateCartItem(decode(call)?),
            CLEAR_CART => Command::ClearCart,
            GET_CART_STATUS => Command::GetCartStatus,
            PLACE_ORDER => Command::PlaceOrder,
            LIST_PRODUCTS => Command::ListProducts(decode(call)?),
            BUY_PRODUCT => Command::BuyProduct(decode(call)?),
            GET_LAST_ORDER => Command::GetLastOrder,
            UPDATE_WORLD_STATE => Command::UpdateWorldState(decode(call)?),
            GET_WORLD_STATE => Command::GetWorldState,
            other => {
                return Err(ValidationError::invalid_format(
                    "name",
                    format!("unknown tool '{other}'"),
                ))
            }
        };
        Ok(command)
    }

    /// Tool name this command was parsed from.
    pub fn name(&self) -> &'static str {
        match self {
            Command::GetCatalog => GET_CATALOG,
            Command::AddToCart(_) => ADD_TO_CART,
            Command::AddIngredientsForMeal(_) => ADD_INGREDIENTS_FOR_MEAL,
            Command::RemoveFromCart(_) => REMOVE_FROM_CART,
            Command::UpdateCartItem(_) => UPDATE_CART_ITEM,
            Command::ClearCart => CLEAR_CART,
            Command::GetCartStatus => GET_CART_STATUS,
            Command::PlaceOrder => PLACE_ORDER,
            Command::ListProducts(_) => LIST_PRODUCTS,
            Command::BuyProduct(_) => BUY_PRODUCT,
            Command::GetLastOrder => GET_LAST_ORDER,
            Command::UpdateWorldState(_) => UPDATE_WORLD_STATE,
            Command::GetWorldState => GET_WORLD_STATE,
        }
    }

    /// The assistant that offers this command.
    pub fn assistant(&self) -> AssistantKind {
        match self {
            Command::GetCatalog
            | Command::AddToCart(_)
            | Command::AddIngredientsForMeal(_)
            | Command::RemoveFromCart(_)
            | Command::UpdateCartItem(_)
            | Command::ClearCart
            | Command::GetCartStatus
            | Command::PlaceOrder => AssistantKind::Grocery,
            Command::ListProducts(_) | Command::BuyProduct(_) | Command::GetLastOrder => {
                AssistantKind::Shop
            }
            Command::UpdateWorldState(_) | Command::GetWorldState => AssistantKind::GameMaster,
        }
    }
}

/// Absent or null parameters decode as an empty object so all-optional
/// parameter sets need no payload.
fn decode<T: DeserializeOwned>(call: &ToolCall) -> Result<T, ValidationError> {
    let parameters = match call.parameters() {
        serde_json::Value::Null => serde_json::Value::Object(serde_json::Map::new()),
        other => other.clone(),
    };
    serde_json::from_value(parameters)
        .map_err(|e| ValidationError::invalid_format(call.name(), e.to_string()))
}
