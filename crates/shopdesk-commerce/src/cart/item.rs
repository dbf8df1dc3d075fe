//! Cart line type.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::ids::ProductId;

/// One line in the cart.
///
/// Holds a full snapshot of the product taken when it was first added, so
/// later price changes on the API do not reach the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product snapshot.
    pub product: Product,
    /// Quantity. Written verbatim by quantity updates, so it may be 0 or less.
    pub quantity: i64,
}

impl CartItem {
    /// Create a new line.
    pub fn new(product: Product, quantity: i64) -> Self {
        Self { product, quantity }
    }

    /// Id of the product on this line.
    pub fn product_id(&self) -> Option<ProductId> {
        self.product.id
    }

    /// `price × quantity` from the snapshot.
    pub fn line_total(&self) -> f64 {
        self.product.price * self.quantity as f64
    }
}
