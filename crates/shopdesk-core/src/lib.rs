//! Application core for shopdesk.
//!
//! Wires the REST services, the cart, toasts and the router into a single
//! [`ShopApp`] session and implements the storefront and dashboard flows on
//! top of it.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use shopdesk_core::prelude::*;
//!
//! let mut app = ShopApp::connect(AppConfig::from_env())?;
//!
//! app.load_products().await?;
//! app.add_to_cart(ProductId::new(1), 3).await?;
//! println!("{} items in cart", app.cart().total_items());
//!
//! if let Some(order) = app.checkout() {
//!     println!("paid {}", format_price(order.total_price));
//! }
//! ```

pub mod prelude;
mod app;
mod config;
mod dashboard;
mod error;
mod storefront;

pub use app::*;
pub use config::*;
pub use error::*;
pub use storefront::*;
