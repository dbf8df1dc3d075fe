//! Storefront domain types and logic for shopdesk.
//!
//! - **Catalog**: products and image-URL helpers
//! - **Account**: users managed from the dashboard
//! - **Cart**: the in-session cart store with derived totals
//! - **Services**: typed REST wrappers for every resource
//!
//! # Example
//!
//! ```rust,ignore
//! use shopdesk_commerce::prelude::*;
//!
//! let products = ProductService::new(client);
//! let lamp = products.get_by_id(ProductId::new(1)).await?;
//!
//! let mut cart = CartStore::new();
//! cart.add_to_cart(lamp, 2);
//! println!("{} items, {}", cart.total_items(), format_price(cart.total_price()));
//! ```

pub mod ids;

pub mod account;
pub mod cart;
pub mod catalog;
pub mod services;

pub use ids::{ProductId, UserId};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::ids::{ProductId, UserId};

    // Catalog
    pub use crate::catalog::{
        format_price, has_image_extension, image_or_placeholder, is_valid_image_url, Product,
        IMAGE_PLACEHOLDER,
    };

    // Account
    pub use crate::account::User;

    // Cart
    pub use crate::cart::{CartEvent, CartItem, CartStore, CartTotals, SubscriptionId};

    // Services
    pub use crate::services::{handle_api_error, ProductService, Resource, RestService, UserService};

    pub use shopdesk_data::FetchError;
}
