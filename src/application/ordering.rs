//! OrderLedger - turns carts and single-item drafts into durable orders.
//!
//! One ledger is shared by every session of the process. Ids come from a
//! per-ledger sequence seeded from the stored records on first use, so a
//! new id is always above the number of orders already stored.
//!
//! Writes run on their own task. When a write outlives its deadline it keeps
//! running, and the ledger reads the store back before answering: an order
//! that already landed counts as placed, one that has not is reported as
//! unconfirmed rather than failed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;
use tokio::time::timeout;

use crate::domain::cart::Cart;
use crate::domain::foundation::{OrderId, Timestamp};
use crate::domain::order::{Order, OrderDraft, OrderError};
use crate::ports::OrderStore;

/// Default bound on a single store read or write.
pub const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Append-only order ledger over an [`OrderStore`].
pub struct OrderLedger {
    store: Arc<dyn OrderStore>,
    sequence: AtomicU64,
    seeded: OnceCell<()>,
    write_timeout: Duration,
}

impl OrderLedger {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        Self {
            store,
            sequence: AtomicU64::new(0),
            seeded: OnceCell::new(),
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    pub fn with_write_timeout(mut self, write_timeout: Duration) -> Self {
        self.write_timeout = write_timeout;
        self
    }

    pub fn write_timeout(&self) -> Duration {
        self.write_timeout
    }

    /// Places the cart's contents as a new order.
    ///
    /// The cart is cleared only after the order is stored; on any failure it
    /// is left exactly as it was.
    ///
    /// # Errors
    ///
    /// - `EmptyCart` if the cart has no lines; nothing is written
    /// - `Persistence` / `Timeout` if the store write fails
    /// - `Unconfirmed` if the write is still in flight at the deadline
    pub async fn place_order(&self, cart: &mut Cart) -> Result<Order, OrderError> {
        let draft = OrderDraft::from_cart(cart).ok_or(OrderError::EmptyCart)?;
        let order = self.commit(draft).await?;
        cart.clear();
        Ok(order)
    }

    /// Stores a draft that did not come from a cart (single-item checkout).
    pub async fn append_order(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        self.commit(draft).await
    }

    /// Most recently stored order.
    ///
    /// # Errors
    ///
    /// `NoOrders` if the store is empty.
    pub async fn last_order(&self) -> Result<Order, OrderError> {
        self.orders().await?.pop().ok_or(OrderError::NoOrders)
    }

    /// Every stored order, oldest first.
    pub async fn orders(&self) -> Result<Vec<Order>, OrderError> {
        match timeout(self.write_timeout, self.store.load_all()).await {
            Ok(Ok(orders)) => Ok(orders),
            Ok(Err(e)) => {
                tracing::error!("Failed to read orders: {}", e);
                Err(OrderError::persistence(e.to_string()))
            }
            Err(_) => Err(self.timed_out()),
        }
    }

    async fn commit(&self, draft: OrderDraft) -> Result<Order, OrderError> {
        self.seed().await?;

        let now = Timestamp::now();
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let order = Order::place(draft, OrderId::generate(&now, sequence), now);

        let store = Arc::clone(&self.store);
        let pending = order.clone();
        let mut write = tokio::spawn(async move { store.append(&pending).await });

        match timeout(self.write_timeout, &mut write).await {
            Ok(Ok(Ok(stored))) => {
                tracing::info!(
                    "Placed order {} for {} ({} orders stored)",
                    order.order_id(),
                    order.total(),
                    stored
                );
                Ok(order)
            }
            Ok(Ok(Err(e))) => {
                tracing::error!("Failed to save order {}: {}", order.order_id(), e);
                Err(OrderError::persistence(e.to_string()))
            }
            Ok(Err(e)) => {
                tracing::error!("Write task for order {} aborted: {}", order.order_id(), e);
                Err(OrderError::persistence(e.to_string()))
            }
            Err(_) => {
                let order_id = order.order_id().clone();
                tokio::spawn(async move {
                    match write.await {
                        Ok(Ok(_)) => tracing::info!("Late write of order {} completed", order_id),
                        Ok(Err(e)) => tracing::error!("Late write of order {} failed: {}", order_id, e),
                        Err(e) => tracing::error!("Late write of order {} aborted: {}", order_id, e),
                    }
                });
                self.confirm(order).await
            }
        }
    }

    /// Resolves a write that missed its deadline by looking for the order in
    /// the store.
    async fn confirm(&self, order: Order) -> Result<Order, OrderError> {
        let landed = match self.orders().await {
            Ok(orders) => orders.iter().any(|o| o.order_id() == order.order_id()),
            Err(e) => {
                tracing::warn!("Could not read back order {}: {}", order.order_id(), e);
                false
            }
        };

        if landed {
            tracing::warn!(
                "Saving order {} exceeded {} ms but the order is stored",
                order.order_id(),
                self.write_timeout.as_millis()
            );
            return Ok(order);
        }

        tracing::error!(
            "Saving order {} exceeded {} ms and is not yet stored",
            order.order_id(),
            self.write_timeout.as_millis()
        );
        Err(OrderError::Unconfirmed {
            order_id: order.order_id().clone(),
            millis: self.write_timeout.as_millis() as u64,
        })
    }

    /// Raises the sequence to at least the stored record count and the
    /// highest stored sequence. Runs once; a failed attempt is retried on
    /// the next write.
    async fn seed(&self) -> Result<(), OrderError> {
        self.seeded
            .get_or_try_init(|| async {
                let orders = self.orders().await?;
                let floor = orders
                    .iter()
                    .filter_map(|order| order.order_id().sequence())
                    .max()
                    .unwrap_or(0)
                    .max(orders.len() as u64);
                self.sequence.fetch_max(floor, Ordering::SeqCst);
                Ok::<(), OrderError>(())
            })
            .await
            .map(|_| ())
    }

    fn timed_out(&self) -> OrderError {
        OrderError::Timeout {
            millis: self.write_timeout.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryOrderStore;
    use crate::domain::catalog::CatalogEntry;
    use crate::domain::foundation::{ItemId, Money, SessionId};
    use crate::ports::StoreError;
    use async_trait::async_trait;
    use std::collections::HashSet;

    fn entry(id: &str, name: &str, cents: u64) -> CatalogEntry {
        CatalogEntry::new(
            ItemId::new(id).unwrap(),
            name,
            Money::from_cents(cents),
            "Pantry",
            Vec::<String>::new(),
        )
    }

    fn filled_cart() -> Cart {
        let mut cart = Cart::empty(SessionId::new());
        cart.add_entry(&entry("pb-1", "Peanut Butter", 350), 1, "").unwrap();
        cart.add_entry(&entry("bread-1", "Bread", 200), 2, "sliced").unwrap();
        cart
    }

    struct FailingStore;

    #[async_trait]
    impl OrderStore for FailingStore {
        async fn load_all(&self) -> Result<Vec<Order>, StoreError> {
            Ok(Vec::new())
        }

        async fn append(&self, _order: &Order) -> Result<usize, StoreError> {
            Err(StoreError::IoError("disk full".to_string()))
        }
    }

    /// Stores the order immediately but is slow to acknowledge it.
    #[derive(Default)]
    struct SlowAckStore {
        inner: InMemoryOrderStore,
    }

    #[async_trait]
    impl OrderStore for SlowAckStore {
        async fn load_all(&self) -> Result<Vec<Order>, StoreError> {
            self.inner.load_all().await
        }

        async fn append(&self, order: &Order) -> Result<usize, StoreError> {
            let stored = self.inner.append(order).await?;
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(stored)
        }
    }

    /// Stores the order only after a delay.
    #[derive(Default)]
    struct LateStore {
        inner: InMemoryOrderStore,
    }

    #[async_trait]
    impl OrderStore for LateStore {
        async fn load_all(&self) -> Result<Vec<Order>, StoreError> {
            self.inner.load_all().await
        }

        async fn append(&self, order: &Order) -> Result<usize, StoreError> {
            tokio::time::sleep(Duration::from_millis(200)).await;
            self.inner.append(order).await
        }
    }

    #[tokio::test]
    async fn placing_clears_cart_and_records_total() {
        let store = Arc::new(InMemoryOrderStore::new());
        let ledger = OrderLedger::new(store.clone());
        let mut cart = filled_cart();
        let total_before = cart.total();

        let order = ledger.place_order(&mut cart).await.unwrap();

        assert!(cart.is_empty());
        assert_eq!(order.total(), total_before);
        assert_eq!(order.items().len(), 2);
        assert_eq!(store.count().await, 1);
    }

    #[tokio::test]
    async fn empty_cart_writes_nothing() {
        let store = Arc::new(InMemoryOrderStore::new());
        let ledger = OrderLedger::new(store.clone());
        let mut cart = Cart::empty(SessionId::new());

        let err = ledger.place_order(&mut cart).await.unwrap_err();

        assert_eq!(err, OrderError::EmptyCart);
        assert_eq!(store.count().await, 0);
        assert_eq!(cart.version(), 0);
    }

    #[tokio::test]
    async fn failed_write_keeps_the_cart() {
        let ledger = OrderLedger::new(Arc::new(FailingStore));
        let mut cart = filled_cart();
        let before = cart.summary();

        let err = ledger.place_order(&mut cart).await.unwrap_err();

        assert!(matches!(err, OrderError::Persistence(_)));
        assert!(err.is_retryable());
        assert_eq!(cart.summary(), before);
    }

    #[tokio::test]
    async fn stored_order_with_slow_acknowledgement_counts_as_placed() {
        let store = Arc::new(SlowAckStore::default());
        let ledger = OrderLedger::new(store.clone())
            .with_write_timeout(Duration::from_millis(50));
        let mut cart = filled_cart();

        let order = ledger.place_order(&mut cart).await.unwrap();

        assert!(cart.is_empty());
        assert_eq!(store.inner.count().await, 1);
        assert_eq!(ledger.last_order().await.unwrap(), order);
    }

    #[tokio::test]
    async fn late_write_is_unconfirmed_and_keeps_the_cart() {
        let store = Arc::new(LateStore::default());
        let ledger = OrderLedger::new(store.clone())
            .with_write_timeout(Duration::from_millis(50));
        let mut cart = filled_cart();
        let before = cart.summary();

        let err = ledger.place_order(&mut cart).await.unwrap_err();

        let order_id = match &err {
            OrderError::Unconfirmed { order_id, millis } => {
                assert_eq!(*millis, 50);
                order_id.clone()
            }
            other => panic!("expected an unconfirmed order, got {other:?}"),
        };
        assert!(!err.is_retryable());
        assert_eq!(cart.summary(), before);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(store.inner.count().await, 1);
        assert_eq!(ledger.last_order().await.unwrap().order_id(), &order_id);
    }

    #[tokio::test]
    async fn order_is_independent_of_later_cart_changes() {
        let ledger = OrderLedger::new(Arc::new(InMemoryOrderStore::new()));
        let mut cart = filled_cart();

        let order = ledger.place_order(&mut cart).await.unwrap();
        cart.add_entry(&entry("milk-1", "Milk", 100), 5, "").unwrap();

        let stored = ledger.last_order().await.unwrap();
        assert_eq!(stored, order);
        assert_eq!(stored.items().len(), 2);
    }

    #[tokio::test]
    async fn ids_are_unique_within_the_same_second() {
        let ledger = OrderLedger::new(Arc::new(InMemoryOrderStore::new()));
        let draft = OrderDraft::single_item(&entry("bread-1", "Bread", 200), 1).unwrap();

        let mut ids = HashSet::new();
        for _ in 0..20 {
            let order = ledger.append_order(draft.clone()).await.unwrap();
            assert!(ids.insert(order.order_id().clone()));
        }
    }

    #[tokio::test]
    async fn sequence_starts_above_stored_records() {
        let store = Arc::new(InMemoryOrderStore::new());
        let first = OrderLedger::new(store.clone());
        let draft = OrderDraft::single_item(&entry("bread-1", "Bread", 200), 1).unwrap();
        for _ in 0..3 {
            first.append_order(draft.clone()).await.unwrap();
        }

        let reopened = OrderLedger::new(store);
        let order = reopened.append_order(draft).await.unwrap();

        assert_eq!(order.order_id().sequence(), Some(4));
    }

    #[tokio::test]
    async fn last_order_on_empty_ledger_is_no_orders() {
        let ledger = OrderLedger::new(Arc::new(InMemoryOrderStore::new()));
        assert_eq!(ledger.last_order().await.unwrap_err(), OrderError::NoOrders);
    }

    #[tokio::test]
    async fn append_order_leaves_no_cart_behind() {
        let store = Arc::new(InMemoryOrderStore::new());
        let ledger = OrderLedger::new(store.clone());
        let draft = OrderDraft::single_item(&entry("pb-1", "Peanut Butter", 350), 2).unwrap();

        let order = ledger.append_order(draft).await.unwrap();

        assert_eq!(order.total(), Money::from_cents(700));
        assert_eq!(ledger.orders().await.unwrap().len(), 1);
    }
}
