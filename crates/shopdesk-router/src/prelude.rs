//! Prelude for convenient imports.

pub use crate::{
    app_routes, product_href, Layout, Page, RouteError, RouteMatch, RouteParams, RoutePattern,
    RouteRegistry,
};
