//! The session cart store.

use serde::Serialize;

use crate::cart::CartItem;
use crate::catalog::Product;
use crate::ids::ProductId;

/// What changed in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CartEvent {
    /// A new line was appended.
    Added {
        product_id: Option<ProductId>,
        quantity: i64,
    },
    /// An existing line's quantity was changed.
    QuantityChanged {
        product_id: Option<ProductId>,
        quantity: i64,
    },
    /// A line was removed.
    Removed { product_id: ProductId },
    /// The cart was emptied.
    Cleared,
}

/// Derived aggregates over the current lines.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CartTotals {
    /// Sum of all quantities.
    pub total_items: i64,
    /// Sum of `price × quantity` over all lines.
    pub total_price: f64,
}

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&CartEvent, CartTotals) + Send>;

/// In-memory cart with at most one line per product id.
///
/// Lines keep insertion order. Totals are computed on every read, so they
/// always reflect the latest mutation. Listeners registered with
/// [`subscribe`](Self::subscribe) are called synchronously after each
/// mutation that touches a line.
pub struct CartStore {
    items: Vec<CartItem>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl CartStore {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Add `quantity` of `product`.
    ///
    /// If a line with the same product id exists its quantity is increased
    /// and its original snapshot is kept; otherwise a new line is appended.
    /// No upper bound is enforced.
    pub fn add_to_cart(&mut self, product: Product, quantity: i64) {
        let product_id = product.id;

        if let Some(existing) = self.items.iter_mut().find(|i| i.product.id == product_id) {
            existing.quantity = existing.quantity.saturating_add(quantity);
            let quantity = existing.quantity;
            tracing::debug!(?product_id, quantity, "cart line incremented");
            self.notify(CartEvent::QuantityChanged {
                product_id,
                quantity,
            });
            return;
        }

        tracing::debug!(?product_id, quantity, "cart line added");
        self.items.push(CartItem::new(product, quantity));
        self.notify(CartEvent::Added {
            product_id,
            quantity,
        });
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: Product) {
        self.add_to_cart(product, 1);
    }

    /// Remove the line for `product_id`. Absent ids are a no-op.
    ///
    /// Returns whether a line was removed.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };

        self.items.remove(index);
        tracing::debug!(%product_id, "cart line removed");
        self.notify(CartEvent::Removed { product_id });
        true
    }

    /// Overwrite the quantity for `product_id`. Absent ids are a no-op.
    ///
    /// The value is written verbatim: 0 or negative quantities are stored
    /// and the line is kept. Callers wanting "remove at zero" must call
    /// [`remove_from_cart`](Self::remove_from_cart) themselves.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        let Some(index) = self.position(product_id) else {
            return false;
        };

        self.items[index].quantity = quantity;
        tracing::debug!(%product_id, quantity, "cart quantity set");
        self.notify(CartEvent::QuantityChanged {
            product_id: Some(product_id),
            quantity,
        });
        true
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        tracing::debug!("cart cleared");
        self.notify(CartEvent::Cleared);
    }

    /// Current lines, in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Line for `product_id`, if present.
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.product.id == Some(product_id))
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of quantities across all lines, saturating at the `i64` bounds.
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Sum of `price × quantity` using each line's snapshot.
    pub fn total_price(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Both aggregates at once.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            total_items: self.total_items(),
            total_price: self.total_price(),
        }
    }

    /// Register a change listener.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent, CartTotals) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Drop a listener. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() < before
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|i| i.product.id == Some(product_id))
    }

    fn notify(&mut self, event: CartEvent) {
        if self.listeners.is_empty() {
            return;
        }
        let totals = self.totals();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event, totals);
        }
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn product(id: i64, price: f64) -> Product {
        Product::new(format!("Product {}", id), price, "", "Test").with_id(id)
    }

    fn summary(cart: &CartStore) -> Vec<(i64, i64)> {
        cart.items()
            .iter()
            .map(|i| (i.product_id().unwrap().get(), i.quantity))
            .collect()
    }

    #[test]
    fn test_new_cart_is_empty() {
        let cart = CartStore::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_items(), 0);
        assert_eq!(cart.total_price(), 0.0);
    }

    #[test]
    fn test_add_new_product_appends_one_line() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0), 3);
        assert_eq!(cart.len(), 1);
        assert_eq!(summary(&cart), vec![(1, 3)]);

        cart.add_one(product(2, 5.0));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(ProductId::new(2)).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_existing_product_increments() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0), 2);
        cart.add_to_cart(product(1, 10.0), 4);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 6);
    }

    #[test]
    fn test_reference_scenario() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0), 2);
        cart.add_one(product(2, 5.0));
        cart.add_to_cart(product(1, 10.0), 1);

        assert_eq!(summary(&cart), vec![(1, 3), (2, 1)]);
        assert_eq!(cart.total_items(), 4);
        assert_eq!(cart.total_price(), 35.0);
    }

    #[test]
    fn test_price_snapshot_is_kept() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0), 1);

        // The same product re-fetched after a price change.
        cart.add_to_cart(product(1, 99.0), 1);

        assert_eq!(cart.get(ProductId::new(1)).unwrap().product.price, 10.0);
        assert_eq!(cart.total_price(), 20.0);
    }

    #[test]
    fn test_remove_present_and_absent() {
        let mut cart = CartStore::new();
        cart.add_one(product(1, 1.0));
        cart.add_one(product(2, 2.0));
        cart.add_one(product(3, 3.0));

        assert!(cart.remove_from_cart(ProductId::new(2)));
        assert_eq!(summary(&cart), vec![(1, 1), (3, 1)]);

        assert!(!cart.remove_from_cart(ProductId::new(42)));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_update_quantity_to_zero_keeps_line() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0), 3);
        cart.add_one(product(2, 5.0));

        assert!(cart.update_quantity(ProductId::new(2), 0));

        assert_eq!(summary(&cart), vec![(1, 3), (2, 0)]);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price(), 30.0);
    }

    #[test]
    fn test_update_quantity_is_verbatim() {
        let mut cart = CartStore::new();
        cart.add_one(product(1, 4.0));

        cart.update_quantity(ProductId::new(1), -2);
        assert_eq!(cart.total_items(), -2);
        assert_eq!(cart.total_price(), -8.0);

        assert!(!cart.update_quantity(ProductId::new(7), 5));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 10.0), 2);
        cart.add_one(product(2, 5.0));

        cart.clear_cart();

        assert!(cart.items().is_empty());
        assert_eq!(cart.totals(), CartTotals::default());
    }

    #[test]
    fn test_unsaved_products_share_a_line() {
        let mut cart = CartStore::new();
        cart.add_one(Product::new("Draft A", 1.0, "", ""));
        cart.add_one(Product::new("Draft B", 2.0, "", ""));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].product.name, "Draft A");
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn test_large_quantities_saturate() {
        let mut cart = CartStore::new();
        cart.add_to_cart(product(1, 0.0), i64::MAX);
        cart.add_one(product(1, 0.0));
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, i64::MAX);
    }

    #[test]
    fn test_total_items_saturates_across_lines() {
        let seen: Arc<Mutex<Vec<i64>>> = Arc::default();
        let mut cart = CartStore::new();
        let sink = Arc::clone(&seen);
        cart.subscribe(move |_, totals| sink.lock().unwrap().push(totals.total_items));

        cart.add_to_cart(product(1, 1.0), i64::MAX);
        cart.add_one(product(2, 1.0));
        cart.add_to_cart(product(3, 1.0), i64::MAX);

        assert_eq!(cart.len(), 3);
        assert_eq!(cart.total_items(), i64::MAX);
        assert_eq!(cart.totals().total_items, i64::MAX);
        assert_eq!(*seen.lock().unwrap(), vec![i64::MAX; 3]);
    }

    #[test]
    fn test_listeners_see_fresh_totals() {
        let seen: Arc<Mutex<Vec<(CartEvent, CartTotals)>>> = Arc::default();
        let mut cart = CartStore::new();
        let sink = Arc::clone(&seen);
        cart.subscribe(move |event, totals| sink.lock().unwrap().push((*event, totals)));

        cart.add_to_cart(product(1, 10.0), 2);
        cart.add_one(product(1, 10.0));
        cart.remove_from_cart(ProductId::new(9));
        cart.update_quantity(ProductId::new(9), 3);
        cart.remove_from_cart(ProductId::new(1));

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3, "no-op mutations must not notify");
        assert_eq!(
            seen[0],
            (
                CartEvent::Added {
                    product_id: Some(ProductId::new(1)),
                    quantity: 2
                },
                CartTotals {
                    total_items: 2,
                    total_price: 20.0
                }
            )
        );
        assert_eq!(seen[1].1.total_items, 3);
        assert_eq!(
            seen[2].0,
            CartEvent::Removed {
                product_id: ProductId::new(1)
            }
        );
        assert_eq!(seen[2].1, CartTotals::default());
    }

    #[test]
    fn test_unsubscribe() {
        let calls = Arc::new(Mutex::new(0));
        let mut cart = CartStore::new();
        let counter = Arc::clone(&calls);
        let id = cart.subscribe(move |_, _| *counter.lock().unwrap() += 1);

        cart.add_one(product(1, 1.0));
        assert!(cart.unsubscribe(id));
        assert!(!cart.unsubscribe(id));
        cart.clear_cart();

        assert_eq!(*calls.lock().unwrap(), 1);
    }
}
