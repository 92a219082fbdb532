//! Shop assistant tools: product listing and single-item checkout.

use serde_json::json;

use super::{order_not_saved, to_json};
use crate::application::ordering::OrderLedger;
use crate::domain::catalog::{CatalogIndex, ProductFilter};
use crate::domain::foundation::DomainError;
use crate::domain::order::{OrderDraft, OrderError};
use crate::domain::tools::{BuyProduct, ToolResponse};

pub(super) fn list_products(catalog: &CatalogIndex, filter: ProductFilter) -> ToolResponse {
    if catalog.is_empty() {
        return ToolResponse::precondition_failed("The product catalog is currently unavailable.");
    }

    let products = catalog.filter(&filter);
    if products.is_empty() {
        return ToolResponse::not_found("No products match those filters.");
    }

    ToolResponse::payload(json!({
        "count": products.len(),
        "products": to_json(&products),
    }))
}

pub(super) async fn buy_product(
    catalog: &CatalogIndex,
    ledger: &OrderLedger,
    params: BuyProduct,
) -> ToolResponse {
    let Some(entry) = catalog.find_by_name(&params.product_name) else {
        return ToolResponse::not_found(format!(
            "Sorry, I couldn't find '{}' in the catalog.",
            params.product_name
        ));
    };

    let draft = match OrderDraft::single_item(entry, params.quantity) {
        Ok(draft) => draft,
        Err(e) => return ToolResponse::from_error(&DomainError::from(e)),
    };

    match ledger.append_order(draft).await {
        Ok(order) => ToolResponse::success(
            format!(
                "Order placed successfully! Order ID: {}. Total: {}",
                order.order_id(),
                order.total()
            ),
            true,
        )
        .with_data(to_json(&order)),
        Err(e) => order_not_saved(e),
    }
}

pub(super) async fn get_last_order(ledger: &OrderLedger) -> ToolResponse {
    match ledger.last_order().await {
        Ok(order) => ToolResponse::payload(to_json(&order)),
        Err(OrderError::NoOrders) => ToolResponse::not_found("You haven't placed any orders yet."),
        Err(e) => ToolResponse::from_error(&DomainError::from(e))
            .with_message("I couldn't look up your orders right now. Please try again."),
    }
}
