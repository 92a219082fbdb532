//! Order record - the immutable result of a checkout.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::cart::{Cart, CartError, LineSnapshot, MAX_LINE_QUANTITY};
use crate::domain::catalog::CatalogEntry;
use crate::domain::foundation::{Money, OrderId, Timestamp};

/// Lifecycle status of an order. Orders are only ever created as `Received`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Received,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Received => write!(f, "received"),
        }
    }
}

/// Order contents before the ledger assigns an id and a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    items: Vec<LineSnapshot>,
    total: Money,
}

impl OrderDraft {
    /// Snapshots a cart. Returns `None` for an empty cart.
    pub fn from_cart(cart: &Cart) -> Option<Self> {
        if cart.is_empty() {
            return None;
        }
        Some(Self {
            items: cart.line_snapshots(),
            total: cart.total(),
        })
    }

    /// Single-item checkout of a catalog entry, without a cart.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is zero or negative
    /// - `QuantityLimit` if `quantity` exceeds the per-line limit
    /// - `AmountTooLarge` if the subtotal overflows
    pub fn single_item(entry: &CatalogEntry, quantity: i64) -> Result<Self, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }
        if quantity > i64::from(MAX_LINE_QUANTITY) {
            return Err(CartError::QuantityLimit {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }
        let quantity = quantity as u32;
        let subtotal = entry
            .price
            .checked_times(quantity)
            .ok_or_else(|| CartError::AmountTooLarge {
                item: entry.name.clone(),
                quantity,
            })?;
        Ok(Self {
            items: vec![LineSnapshot {
                item_id: entry.id.clone(),
                name: entry.name.clone(),
                price: entry.price,
                quantity,
                notes: String::new(),
                subtotal,
            }],
            total: subtotal,
        })
    }

    pub fn items(&self) -> &[LineSnapshot] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }
}

/// A placed order.
///
/// # Invariants
///
/// - Created exactly once, with status `Received`
/// - Never mutated after creation; only accessors are exposed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    timestamp: Timestamp,
    #[serde(default)]
    status: OrderStatus,
    items: Vec<LineSnapshot>,
    total: Money,
}

impl Order {
    /// Finalizes a draft under the given identity.
    pub fn place(draft: OrderDraft, order_id: OrderId, timestamp: Timestamp) -> Self {
        Self {
            order_id,
            timestamp,
            status: OrderStatus::Received,
            items: draft.items,
            total: draft.total,
        }
    }

    pub fn order_id(&self) -> &OrderId {
        &self.order_id
    }

    pub fn timestamp(&self) -> &Timestamp {
        &self.timestamp
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn items(&self) -> &[LineSnapshot] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    /// Total number of units ordered.
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{ItemId, SessionId};

    fn cart_with_items() -> Cart {
        let mut cart = Cart::empty(SessionId::new());
        cart.add_item(ItemId::new("pb-1").unwrap(), "Peanut Butter", Money::from_cents(350), 1, "")
            .unwrap();
        cart.add_item(ItemId::new("bread-1").unwrap(), "Bread", Money::from_cents(200), 2, "sliced")
            .unwrap();
        cart
    }

    #[test]
    fn draft_from_empty_cart_is_none() {
        assert!(OrderDraft::from_cart(&Cart::empty(SessionId::new())).is_none());
    }

    #[test]
    fn draft_total_matches_cart_total() {
        let cart = cart_with_items();
        let draft = OrderDraft::from_cart(&cart).unwrap();

        assert_eq!(draft.total(), Money::from_cents(750));
        assert_eq!(draft.items().len(), 2);
        assert_eq!(draft.items()[1].notes, "sliced");
    }

    #[test]
    fn placed_order_is_independent_of_later_cart_changes() {
        let mut cart = cart_with_items();
        let order = Order::place(
            OrderDraft::from_cart(&cart).unwrap(),
            OrderId::from("ORD-1-0001".to_string()),
            Timestamp::now(),
        );

        cart.update_quantity(&ItemId::new("bread-1").unwrap(), 9).unwrap();
        cart.clear();

        assert_eq!(order.items()[1].quantity, 2);
        assert_eq!(order.total(), Money::from_cents(750));
        assert_eq!(order.status(), OrderStatus::Received);
        assert_eq!(order.unit_count(), 3);
    }

    #[test]
    fn single_item_draft_rejects_zero_quantity() {
        let entry = CatalogEntry::new(
            ItemId::new("mug-1").unwrap(),
            "Mug",
            Money::from_cents(1200),
            "Kitchen",
            Vec::<String>::new(),
        );
        assert_eq!(
            OrderDraft::single_item(&entry, 0).unwrap_err(),
            CartError::InvalidQuantity(0)
        );

        let draft = OrderDraft::single_item(&entry, 2).unwrap();
        assert_eq!(draft.total(), Money::from_cents(2400));
    }

    #[test]
    fn order_serializes_with_received_status() {
        let order = Order::place(
            OrderDraft::from_cart(&cart_with_items()).unwrap(),
            OrderId::from("ORD-1-0001".to_string()),
            Timestamp::from_unix_secs(1705276800),
        );
        let json = serde_json::to_value(&order).unwrap();

        assert_eq!(json["status"], "received");
        assert_eq!(json["order_id"], "ORD-1-0001");
        assert_eq!(json["items"][0]["item_id"], "pb-1");

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
