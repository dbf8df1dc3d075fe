//! Product type.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::ids::ProductId;
use crate::services::Resource;

/// A product as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Assigned by the API on creation; absent until then.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    /// Display name.
    pub name: String,
    /// Unit price. Non-negative.
    #[serde(deserialize_with = "deserialize_price")]
    pub price: f64,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Category label.
    #[serde(default)]
    pub category: String,
}

impl Product {
    /// Create an unsaved product.
    pub fn new(
        name: impl Into<String>,
        price: f64,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            price,
            description: description.into(),
            image: None,
            category: category.into(),
        }
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<ProductId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the image URL.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Formatted unit price.
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }
}

impl Resource for Product {
    type Id = ProductId;

    const COLLECTION: &'static str = "/products";
    const NOUN: &'static str = "product";
    const NOUN_PLURAL: &'static str = "products";
}

/// Format an amount for display, e.g. `$35.00`.
pub fn format_price(amount: f64) -> String {
    if amount < 0.0 {
        format!("-${:.2}", -amount)
    } else {
        format!("${:.2}", amount)
    }
}

/// Prices arrive as JSON numbers or as decimal strings (`"12.50"`).
fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    match RawPrice::deserialize(deserializer)? {
        RawPrice::Number(price) => Ok(price),
        RawPrice::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid price {:?}", text))),
    }
}
