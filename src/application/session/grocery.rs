//! Grocery assistant tools: catalog, cart and checkout.

use serde_json::json;

use super::{order_not_saved, to_json};
use crate::application::ordering::OrderLedger;
use crate::domain::cart::meals::{add_meal_ingredients, known_meals, recipe_for};
use crate::domain::cart::{Cart, QuantityChange};
use crate::domain::catalog::CatalogIndex;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::order::OrderError;
use crate::domain::tools::{AddToCart, ItemRef, MealRequest, ToolResponse, UpdateCartItem};

pub(super) fn get_catalog(catalog: &CatalogIndex) -> ToolResponse {
    if catalog.is_empty() {
        return ToolResponse::precondition_failed("The catalog is currently unavailable.");
    }
    ToolResponse::payload(to_json(&catalog.to_document()))
}

pub(super) fn add_to_cart(
    cart: &mut Cart,
    catalog: &CatalogIndex,
    params: AddToCart,
) -> ToolResponse {
    let Some(entry) = catalog.find_by_name(&params.item_name) else {
        return not_in_catalog(&params.item_name);
    };

    match cart.add_entry(entry, params.quantity, &params.notes) {
        Ok(line_quantity) => ToolResponse::success(
            format!("Added {} x {} to cart.", params.quantity, entry.name),
            true,
        )
        .with_data(json!({
            "item_id": entry.id,
            "quantity": line_quantity,
            "total": cart.total(),
        })),
        Err(e) => ToolResponse::from_error(&DomainError::from(e)),
    }
}

pub(super) fn add_ingredients_for_meal(
    cart: &mut Cart,
    catalog: &CatalogIndex,
    params: MealRequest,
) -> ToolResponse {
    let meal = params.meal_name;
    let Some(recipe) = recipe_for(&meal) else {
        return ToolResponse::not_found(format!(
            "I'm not sure what ingredients are needed for {meal}. Please add items individually."
        ))
        .with_data(json!({ "known_meals": known_meals().collect::<Vec<_>>() }));
    };

    let outcome = add_meal_ingredients(cart, catalog, recipe);
    if outcome.added.is_empty() {
        return ToolResponse::not_found(format!(
            "I couldn't find any ingredients for {meal} in the catalog."
        ))
        .with_data(to_json(&outcome));
    }

    let mut message = format!("Added ingredients for {meal}: {}.", outcome.added.join(", "));
    if !outcome.missing.is_empty() {
        message.push_str(&format!(" Not available: {}.", outcome.missing.join(", ")));
    }
    ToolResponse::success(message, true).with_data(to_json(&outcome))
}

pub(super) fn remove_from_cart(
    cart: &mut Cart,
    catalog: &CatalogIndex,
    params: ItemRef,
) -> ToolResponse {
    let removed = catalog
        .find_by_name(&params.item_name)
        .and_then(|entry| cart.remove_item(&entry.id));

    match removed {
        Some(line) => ToolResponse::success(format!("Removed {} from cart.", line.name), true),
        None => not_in_cart(&params.item_name),
    }
}

pub(super) fn update_cart_item(
    cart: &mut Cart,
    catalog: &CatalogIndex,
    params: UpdateCartItem,
) -> ToolResponse {
    let Some(entry) = catalog.find_by_name(&params.item_name) else {
        return not_in_cart(&params.item_name);
    };

    match cart.update_quantity(&entry.id, params.quantity) {
        Ok(QuantityChange::Updated(quantity)) => ToolResponse::success(
            format!("Updated {} to {} in your cart.", entry.name, quantity),
            true,
        ),
        Ok(QuantityChange::Removed) => {
            ToolResponse::success(format!("Removed {} from cart.", entry.name), true)
        }
        Ok(QuantityChange::NotInCart) => not_in_cart(&params.item_name),
        Err(e) => ToolResponse::from_error(&DomainError::from(e)),
    }
}

pub(super) fn clear_cart(cart: &mut Cart) -> ToolResponse {
    match cart.clear() {
        0 => ToolResponse::success("Your cart is already empty.", false),
        removed => ToolResponse::success(format!("Removed {removed} items from your cart."), true),
    }
}

pub(super) fn get_cart_status(cart: &Cart) -> ToolResponse {
    if cart.is_empty() {
        return ToolResponse::success("Your cart is empty.", false);
    }
    ToolResponse::payload(to_json(&cart.summary()))
}

pub(super) async fn place_order(cart: &mut Cart, ledger: &OrderLedger) -> ToolResponse {
    match ledger.place_order(cart).await {
        Ok(order) => ToolResponse::success(
            format!(
                "Order placed successfully! Order ID: {}. Total: {}",
                order.order_id(),
                order.total()
            ),
            true,
        )
        .with_data(to_json(&order)),
        Err(OrderError::EmptyCart) => {
            ToolResponse::precondition_failed("Your cart is empty. I cannot place an order.")
        }
        Err(e) => order_not_saved(e),
    }
}

fn not_in_catalog(query: &str) -> ToolResponse {
    item_not_found(query, format!("Sorry, I couldn't find '{query}' in the catalog."))
}

fn not_in_cart(query: &str) -> ToolResponse {
    item_not_found(query, format!("Item '{query}' not found in cart."))
}

fn item_not_found(query: &str, message: String) -> ToolResponse {
    ToolResponse::from_error(
        &DomainError::new(ErrorCode::ItemNotFound, message).with_detail("item_name", query),
    )
}
