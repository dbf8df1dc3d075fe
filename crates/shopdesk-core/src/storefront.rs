//! Storefront flows: browse, view, cart and checkout.

use serde::Serialize;
use shopdesk_commerce::prelude::*;
use shopdesk_router::Page;

use crate::{AppResult, ShopApp};

/// What was bought, captured just before the cart is cleared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderSummary {
    pub items: Vec<CartItem>,
    pub total_items: i64,
    pub total_price: f64,
}

impl ShopApp {
    /// Fetch the catalog. On failure the previous catalog stays in place.
    pub async fn load_products(&mut self) -> AppResult<&[Product]> {
        let result = self.products.get_all().await;
        match result {
            Ok(products) => {
                tracing::info!(count = products.len(), "catalog loaded");
                self.catalog = products;
                Ok(&self.catalog)
            }
            Err(e) => Err(self.report("Failed to load products", e)),
        }
    }

    /// Last successfully loaded catalog.
    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    /// Fetch one product and make it the selection. On failure the previous
    /// selection stays in place.
    pub async fn open_product(&mut self, id: ProductId) -> AppResult<&Product> {
        let result = self.products.get_by_id(id).await;
        match result {
            Ok(product) => Ok(&*self.selected.insert(product)),
            Err(e) => Err(self.report("Failed to load product", e)),
        }
    }

    /// Open the product named by the current `/products/:id` route.
    pub async fn open_routed_product(&mut self) -> AppResult<&Product> {
        let id = self.route_id::<ProductId>()?;
        self.open_product(id).await
    }

    /// The product currently being viewed.
    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    /// Put `quantity` of product `id` in the cart.
    ///
    /// Uses the selected product or the cached catalog entry when there is
    /// one, otherwise fetches it first.
    pub async fn add_to_cart(&mut self, id: ProductId, quantity: i64) -> AppResult<()> {
        let cached = self
            .selected
            .iter()
            .chain(self.catalog.iter())
            .find(|p| p.id == Some(id))
            .cloned();

        let product = match cached {
            Some(product) => product,
            None => {
                let result = self.products.get_by_id(id).await;
                match result {
                    Ok(product) => product,
                    Err(e) => return Err(self.report("Failed to add product to cart", e)),
                }
            }
        };

        let message = format!("{} added to cart", product.name);
        self.cart.add_to_cart(product, quantity);
        self.toaster.success(message, None);
        Ok(())
    }

    /// Set a line's quantity. Returns whether the line exists.
    pub fn update_cart_quantity(&mut self, id: ProductId, quantity: i64) -> bool {
        self.cart.update_quantity(id, quantity)
    }

    /// Drop a line from the cart. Returns whether it was present.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let removed = self.cart.remove_from_cart(id);
        if removed {
            self.toaster.info("Item removed from cart", None);
        }
        removed
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
    }

    /// Place the order for everything in the cart.
    ///
    /// An empty cart only produces a warning. Otherwise the cart is emptied,
    /// the session moves to the order confirmation page and the summary of
    /// what was ordered is returned.
    pub fn checkout(&mut self) -> Option<OrderSummary> {
        if self.cart.is_empty() {
            self.toaster.warning("Your cart is empty", None);
            return None;
        }

        let totals = self.cart.totals();
        let summary = OrderSummary {
            items: self.cart.items().to_vec(),
            total_items: totals.total_items,
            total_price: totals.total_price,
        };

        self.cart.clear_cart();
        self.navigate(Page::OrderSuccess.path());
        self.toaster.success(
            format!("Order placed: {}", format_price(summary.total_price)),
            None,
        );
        tracing::info!(
            items = summary.total_items,
            total = summary.total_price,
            "order placed"
        );
        Some(summary)
    }
}
