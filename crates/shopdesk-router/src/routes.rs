//! The application's page table.

use std::fmt;

use serde::Serialize;

use crate::{Layout, RouteMeta, RouteRegistry, RouteResult};

/// Every page the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    // Storefront
    Home,
    About,
    ProductList,
    ProductDetail,
    Cart,
    OrderSuccess,
    Contact,

    // Dashboard
    Dashboard,
    UserList,
    UserAdd,
    UserEdit,
    UserDetail,
    ProductAdminList,
    ProductAdd,
    ProductEdit,
    ProductAdminDetail,

    NotFound,
}

impl Page {
    /// All pages in registration order. `NotFound` stays last so the
    /// catch-all never shadows a real route.
    pub const ALL: [Page; 17] = [
        Page::Home,
        Page::About,
        Page::ProductList,
        Page::ProductDetail,
        Page::Cart,
        Page::OrderSuccess,
        Page::Contact,
        Page::Dashboard,
        Page::UserList,
        Page::UserAdd,
        Page::UserEdit,
        Page::UserDetail,
        Page::ProductAdminList,
        Page::ProductAdd,
        Page::ProductEdit,
        Page::ProductAdminDetail,
        Page::NotFound,
    ];

    /// Pattern and display name.
    pub const fn meta(self) -> RouteMeta {
        let (path, name) = match self {
            Page::Home => ("/", "Home"),
            Page::About => ("/about", "About"),
            Page::ProductList => ("/products", "Products"),
            Page::ProductDetail => ("/products/:id", "Product"),
            Page::Cart => ("/cart", "Cart"),
            Page::OrderSuccess => ("/order-success", "Order placed"),
            Page::Contact => ("/contact", "Contact"),
            Page::Dashboard => ("/dashboard", "Dashboard"),
            Page::UserList => ("/dashboard/users", "Users"),
            Page::UserAdd => ("/dashboard/users/add", "Add user"),
            Page::UserEdit => ("/dashboard/users/edit/:id", "Edit user"),
            Page::UserDetail => ("/dashboard/users/detail/:id", "User"),
            Page::ProductAdminList => ("/dashboard/products", "Products"),
            Page::ProductAdd => ("/dashboard/products/add", "Add product"),
            Page::ProductEdit => ("/dashboard/products/edit/:id", "Edit product"),
            Page::ProductAdminDetail => ("/dashboard/products/detail/:id", "Product"),
            Page::NotFound => ("/*", "Not found"),
        };
        RouteMeta { path, name }
    }

    /// Route pattern this page is registered under.
    pub const fn path(self) -> &'static str {
        self.meta().path
    }

    /// Layout the page is designed for.
    pub fn layout(self) -> Layout {
        match self {
            Page::NotFound => Layout::Landing,
            page => Layout::for_path(page.path()),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.meta().name)
    }
}

/// Build the registry of application routes.
pub fn app_routes() -> RouteResult<RouteRegistry<Page>> {
    let mut registry = RouteRegistry::new();
    for page in Page::ALL {
        registry.register(page.path(), page)?;
    }
    Ok(registry)
}

/// Link to a product's storefront page.
pub fn product_href(id: impl fmt::Display) -> String {
    format!("/products/{}", id)
}
