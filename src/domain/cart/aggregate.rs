//! Cart aggregate - the session's shopping cart.
//!
//! A cart is an [`Aggregate`] over [`CartLines`]; its totals are the derived
//! view and are recomputed after every mutation.

use serde::{Deserialize, Serialize};

use super::{CartError, CartLine, LineSnapshot};
use crate::domain::catalog::CatalogEntry;
use crate::domain::foundation::{Aggregate, DerivedState, ItemId, Money, SessionId};

/// Largest quantity a single line may hold.
pub const MAX_LINE_QUANTITY: u32 = 999;

/// Raw cart fields: lines keyed by item id, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLines {
    lines: Vec<CartLine>,
}

impl CartLines {
    fn position(&self, item_id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|line| &line.item_id == item_id)
    }

    /// Cart total if the line at `replaced` (or a new line, for `None`) held
    /// `quantity` units at `unit_price`. `None` on overflow.
    fn total_with(&self, replaced: Option<usize>, unit_price: Money, quantity: u32) -> Option<Money> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(idx, _)| Some(*idx) != replaced)
            .try_fold(unit_price.checked_times(quantity)?, |total, (_, line)| {
                total.checked_add(line.unit_price.checked_times(line.quantity)?)
            })
    }
}

/// Values derived from the cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub total: Money,
    pub unit_count: u32,
    pub line_count: usize,
}

impl DerivedState for CartLines {
    type Derived = CartTotals;

    fn derive(&self) -> CartTotals {
        CartTotals {
            total: self.lines.iter().map(CartLine::subtotal).sum(),
            unit_count: self.lines.iter().map(|line| line.quantity).sum(),
            line_count: self.lines.len(),
        }
    }
}

/// The session's shopping cart.
pub type Cart = Aggregate<CartLines>;

/// Outcome of a quantity update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds this quantity.
    Updated(u32),
    /// The line was removed because the quantity was zero or less.
    Removed,
    /// The item was not in the cart; nothing changed.
    NotInCart,
}

/// Rendering view of a cart: line snapshots plus the grand total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSummary {
    pub items: Vec<LineSnapshot>,
    pub total: Money,
}

impl Aggregate<CartLines> {
    /// Creates an empty cart for a session.
    pub fn empty(session_id: SessionId) -> Self {
        Aggregate::new(session_id, CartLines::default())
    }

    /// Adds units of an item, merging into an existing line.
    ///
    /// An existing line keeps its snapshotted name and price; only the
    /// quantity grows and the notes accumulate. Returns the line's new
    /// quantity.
    ///
    /// # Errors
    ///
    /// - `InvalidQuantity` if `quantity` is zero or negative
    /// - `QuantityLimit` if the line would exceed [`MAX_LINE_QUANTITY`]
    /// - `AmountTooLarge` if the cart total would overflow
    pub fn add_item(
        &mut self,
        item_id: ItemId,
        name: impl Into<String>,
        unit_price: Money,
        quantity: i64,
        notes: &str,
    ) -> Result<u32, CartError> {
        if quantity <= 0 {
            return Err(CartError::InvalidQuantity(quantity));
        }

        let position = self.fields().position(&item_id);
        let existing = position
            .map(|idx| self.fields().lines[idx].quantity)
            .unwrap_or(0);
        let requested = i64::from(existing) + quantity;
        if requested > i64::from(MAX_LINE_QUANTITY) {
            return Err(CartError::QuantityLimit {
                requested,
                max: MAX_LINE_QUANTITY,
            });
        }
        let new_quantity = requested as u32;

        let name = name.into();
        let line_price = position
            .map(|idx| self.fields().lines[idx].unit_price)
            .unwrap_or(unit_price);
        if self.fields().total_with(position, line_price, new_quantity).is_none() {
            return Err(CartError::AmountTooLarge {
                item: name,
                quantity: new_quantity,
            });
        }

        self.apply(|cart| match cart.position(&item_id) {
            Some(idx) => {
                let line = &mut cart.lines[idx];
                line.quantity = new_quantity;
                line.append_note(notes);
            }
            None => cart
                .lines
                .push(CartLine::new(item_id, name, unit_price, new_quantity, notes)),
        });

        Ok(new_quantity)
    }

    /// Adds units of a catalog entry, snapshotting its name and price.
    pub fn add_entry(
        &mut self,
        entry: &CatalogEntry,
        quantity: i64,
        notes: &str,
    ) -> Result<u32, CartError> {
        self.add_item(entry.id.clone(), entry.name.clone(), entry.price, quantity, notes)
    }

    /// Removes a line. Absent items are a no-op and return `None`.
    pub fn remove_item(&mut self, item_id: &ItemId) -> Option<CartLine> {
        let idx = self.fields().position(item_id)?;
        Some(self.apply(|cart| cart.lines.remove(idx)))
    }

    /// Sets a line's quantity; zero or less removes the line.
    ///
    /// # Errors
    ///
    /// - `QuantityLimit` if `quantity` exceeds [`MAX_LINE_QUANTITY`]
    /// - `AmountTooLarge` if the cart total would overflow
    pub fn update_quantity(
        &mut self,
        item_id: &ItemId,
        quantity: i64,
    ) -> Result<QuantityChange, CartError> {
        let Some(idx) = self.fields().position(item_id) else {
            return Ok(QuantityChange::NotInCart);
        };
        if quantity <= 0 {
            self.apply(|cart| cart.lines.remove(idx));
            return Ok(QuantityChange::Removed);
        }
        if quantity > i64::from(MAX_LINE_QUANTITY) {
            return Err(CartError::QuantityLimit {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            });
        }

        let quantity = quantity as u32;
        let line = &self.fields().lines[idx];
        if self.fields().total_with(Some(idx), line.unit_price, quantity).is_none() {
            return Err(CartError::AmountTooLarge {
                item: line.name.clone(),
                quantity,
            });
        }
        self.apply(|cart| cart.lines[idx].quantity = quantity);
        Ok(QuantityChange::Updated(quantity))
    }

    /// Removes every line and returns how many were removed.
    pub fn clear(&mut self) -> usize {
        if self.is_empty() {
            return 0;
        }
        self.apply(|cart| std::mem::take(&mut cart.lines).len())
    }

    /// Sum of all line subtotals; zero for an empty cart.
    pub fn total(&self) -> Money {
        self.derived().total
    }

    pub fn is_empty(&self) -> bool {
        self.fields().lines.is_empty()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.fields().lines
    }

    pub fn line(&self, item_id: &ItemId) -> Option<&CartLine> {
        self.fields().lines.iter().find(|line| &line.item_id == item_id)
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.line(item_id).is_some()
    }

    /// Total number of units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.derived().unit_count
    }

    /// Snapshots every line in display order.
    pub fn line_snapshots(&self) -> Vec<LineSnapshot> {
        self.lines().iter().map(CartLine::snapshot).collect()
    }

    /// Rendering view of the cart.
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            items: self.line_snapshots(),
            total: self.total(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn cart() -> Cart {
        Cart::empty(SessionId::new())
    }

    fn add(cart: &mut Cart, item: &str, cents: u64, qty: i64, notes: &str) -> u32 {
        cart.add_item(id(item), item.to_uppercase(), Money::from_cents(cents), qty, notes)
            .unwrap()
    }

    #[test]
    fn new_cart_is_empty_with_zero_total() {
        let cart = cart();
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
        assert_eq!(cart.unit_count(), 0);
    }

    #[test]
    fn add_item_inserts_snapshot_line() {
        let mut cart = cart();
        add(&mut cart, "pb-1", 350, 2, "crunchy");

        let line = cart.line(&id("pb-1")).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.notes, "crunchy");
        assert_eq!(cart.total(), Money::from_cents(700));
    }

    #[test]
    fn add_existing_item_accumulates_and_keeps_original_price() {
        let mut cart = cart();
        add(&mut cart, "pb-1", 350, 1, "crunchy");
        cart.add_item(id("pb-1"), "Renamed", Money::from_cents(999), 2, "crunchy")
            .unwrap();

        let line = cart.line(&id("pb-1")).unwrap();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, Money::from_cents(350));
        assert_eq!(line.name, "PB-1");
        assert_eq!(line.notes, "crunchy");
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn add_rejects_non_positive_quantity_without_mutation() {
        let mut cart = cart();
        add(&mut cart, "pb-1", 350, 1, "");

        let err = cart
            .add_item(id("pb-1"), "PB", Money::from_cents(350), -3, "")
            .unwrap_err();

        assert_eq!(err, CartError::InvalidQuantity(-3));
        assert_eq!(cart.line(&id("pb-1")).unwrap().quantity, 1);
        assert_eq!(cart.version(), 1);
    }

    #[test]
    fn add_rejects_quantity_over_line_limit() {
        let mut cart = cart();
        add(&mut cart, "pb-1", 350, 990, "");
        let err = cart
            .add_item(id("pb-1"), "PB", Money::from_cents(350), 10, "")
            .unwrap_err();
        assert!(matches!(err, CartError::QuantityLimit { requested: 1000, .. }));
    }

    #[test]
    fn add_rejects_total_that_would_overflow() {
        let mut cart = cart();
        let half = Money::try_new(Decimal::MAX / Decimal::from(2)).unwrap();
        cart.add_item(id("gold-1"), "Gold", half, 1, "").unwrap();

        let err = cart
            .add_item(id("gold-2"), "More Gold", Money::try_new(Decimal::MAX).unwrap(), 1, "")
            .unwrap_err();

        assert!(matches!(err, CartError::AmountTooLarge { quantity: 1, .. }));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.total(), half);
    }

    #[test]
    fn update_rejects_quantity_whose_subtotal_would_overflow() {
        let mut cart = cart();
        let half = Money::try_new(Decimal::MAX / Decimal::from(2)).unwrap();
        cart.add_item(id("gold-1"), "Gold", half, 1, "").unwrap();

        let err = cart.update_quantity(&id("gold-1"), 3).unwrap_err();

        assert!(matches!(err, CartError::AmountTooLarge { quantity: 3, .. }));
        assert_eq!(cart.line(&id("gold-1")).unwrap().quantity, 1);
        assert_eq!(cart.version(), 1);
    }

    #[test]
    fn remove_absent_item_is_noop() {
        let mut cart = cart();
        add(&mut cart, "pb-1", 350, 1, "");
        let version = cart.version();

        assert!(cart.remove_item(&id("missing")).is_none());
        assert_eq!(cart.version(), version);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn update_quantity_sets_not_adds() {
        let mut cart = cart();
        add(&mut cart, "bread-1", 200, 3, "");

        let change = cart.update_quantity(&id("bread-1"), 5).unwrap();

        assert_eq!(change, QuantityChange::Updated(5));
        assert_eq!(cart.total(), Money::from_cents(1000));
    }

    #[test]
    fn update_quantity_on_absent_item_reports_not_in_cart() {
        let mut cart = cart();
        assert_eq!(
            cart.update_quantity(&id("x"), 2).unwrap(),
            QuantityChange::NotInCart
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let mut cart = cart();
        add(&mut cart, "a", 100, 1, "");
        add(&mut cart, "b", 100, 1, "");

        assert_eq!(cart.clear(), 2);
        assert_eq!(cart.clear(), 0);
        assert!(cart.is_empty());
        assert!(cart.total().is_zero());
    }

    #[test]
    fn summary_lists_lines_in_insertion_order() {
        let mut cart = cart();
        add(&mut cart, "b", 100, 1, "");
        add(&mut cart, "a", 250, 2, "");

        let summary = cart.summary();
        let ids: Vec<_> = summary.items.iter().map(|l| l.item_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
        assert_eq!(summary.total, Money::from_cents(600));
        assert_eq!(summary.items[1].subtotal, Money::from_cents(500));
    }

    fn arb_item() -> impl Strategy<Value = (&'static str, u64)> {
        prop_oneof![Just(("pb-1", 350u64)), Just(("bread-1", 200)), Just(("jam-1", 425))]
    }

    proptest! {
        #[test]
        fn repeated_adds_sum_quantities(quantities in prop::collection::vec(1i64..20, 1..10)) {
            let mut cart = cart();
            for qty in &quantities {
                add(&mut cart, "pb-1", 350, *qty, "note");
            }

            let line = cart.line(&id("pb-1")).unwrap();
            prop_assert_eq!(i64::from(line.quantity), quantities.iter().sum::<i64>());
            prop_assert_eq!(line.notes.as_str(), "note");
        }

        #[test]
        fn update_to_zero_equals_remove(ops in prop::collection::vec((arb_item(), 1i64..5), 1..8)) {
            let mut via_update = cart();
            for ((item, cents), qty) in &ops {
                add(&mut via_update, item, *cents, *qty, "");
            }
            let mut via_remove = via_update.clone();

            via_update.update_quantity(&id("pb-1"), 0).unwrap();
            via_remove.remove_item(&id("pb-1"));

            prop_assert_eq!(via_update.lines(), via_remove.lines());
            prop_assert_eq!(via_update.total(), via_remove.total());
        }

        #[test]
        fn total_matches_sum_of_lines(ops in prop::collection::vec((arb_item(), -2i64..6), 0..12)) {
            let mut cart = cart();
            for ((item, cents), qty) in &ops {
                if *qty > 0 {
                    add(&mut cart, item, *cents, *qty, "");
                } else {
                    cart.update_quantity(&id(item), *qty).unwrap();
                }
            }

            let expected: Money = cart
                .lines()
                .iter()
                .map(|l| l.unit_price.times(l.quantity))
                .sum();
            prop_assert_eq!(cart.total(), expected);
            prop_assert!(cart.lines().iter().all(|l| l.quantity >= 1));
        }
    }
}
