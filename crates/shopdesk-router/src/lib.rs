//! Routing for shopdesk.
//!
//! Routes are plain data: a pattern per page, matched in registration order.
//!
//! ```text
//! /                              -> Page::Home
//! /products/:id                  -> Page::ProductDetail      (params: id)
//! /dashboard/users/edit/:id      -> Page::UserEdit           (dashboard layout)
//! /*                             -> Page::NotFound
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use shopdesk_router::prelude::*;
//!
//! let routes = app_routes()?;
//! let matched = routes.resolve("/products/7?ref=home").unwrap();
//! assert_eq!(*matched.page(), Page::ProductDetail);
//! assert_eq!(matched.params.get("id"), Some("7"));
//! assert!(Layout::for_path("/dashboard/users").is_dashboard());
//! ```

mod layout;
pub mod prelude;
mod route;
mod routes;

pub use layout::*;
pub use route::*;
pub use routes::*;
