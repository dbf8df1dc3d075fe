//! The application context.

use std::str::FromStr;
use std::sync::Arc;

use shopdesk_commerce::prelude::*;
use shopdesk_data::{FetchClient, ReqwestTransport, Transport};
use shopdesk_observability::Toaster;
use shopdesk_router::{app_routes, Layout, Page, RouteParams, RouteRegistry};

use crate::{AppConfig, AppError, AppResult};

/// Everything one shopdesk session needs, constructed once and passed
/// around explicitly.
///
/// Owns the REST services, the cart, the visible toasts and the router
/// state, plus the view state the storefront and dashboard flows work
/// against (catalog cache, selected product, user list).
///
/// # Example
///
/// ```rust,ignore
/// let mut app = ShopApp::connect(AppConfig::from_env())?;
/// app.navigate("/products");
/// app.load_products().await?;
/// app.add_to_cart(ProductId::new(1), 2).await?;
/// let order = app.checkout();
/// ```
pub struct ShopApp {
    pub(crate) config: AppConfig,
    pub(crate) products: ProductService,
    pub(crate) users: UserService,
    pub(crate) images: FetchClient,
    pub(crate) cart: CartStore,
    pub(crate) toaster: Toaster,
    routes: RouteRegistry<Page>,
    location: String,
    page: Page,
    params: RouteParams,
    pub(crate) catalog: Vec<Product>,
    pub(crate) selected: Option<Product>,
    pub(crate) user_list: Vec<User>,
}

impl ShopApp {
    /// Build a session that sends every request through `transport`.
    pub fn new(config: AppConfig, transport: Arc<dyn Transport>) -> AppResult<Self> {
        let api = config.api.client(Arc::clone(&transport));
        let mut cart = CartStore::new();
        cart.subscribe(|event, totals| {
            tracing::debug!(
                ?event,
                total_items = totals.total_items,
                total_price = totals.total_price,
                "cart changed"
            );
        });

        let mut app = Self {
            products: ProductService::new(api.clone()),
            users: UserService::new(api),
            images: FetchClient::new(transport),
            cart,
            toaster: Toaster::new(config.toaster, config.toast.clone()),
            routes: app_routes()?,
            location: String::new(),
            page: Page::NotFound,
            params: RouteParams::default(),
            catalog: Vec::new(),
            selected: None,
            user_list: Vec::new(),
            config,
        };
        app.navigate("/");
        Ok(app)
    }

    /// Build a session over real HTTP.
    pub fn connect(config: AppConfig) -> AppResult<Self> {
        let transport = ReqwestTransport::new()?;
        Self::new(config, Arc::new(transport))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // === Navigation ===

    /// Move to `path` and return the page it resolves to.
    pub fn navigate(&mut self, path: &str) -> &Page {
        let (page, params) = match self.routes.resolve(path) {
            Some(matched) => (*matched.page(), matched.params),
            None => (Page::NotFound, RouteParams::default()),
        };
        tracing::debug!(%path, %page, "navigate");

        self.location = path.to_string();
        self.page = page;
        self.params = params;
        &self.page
    }

    /// Current path, as last passed to [`navigate`](Self::navigate).
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Page for the current location.
    pub fn page(&self) -> Page {
        self.page
    }

    /// Parameters captured from the current location.
    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    /// Layout for the current location.
    pub fn layout(&self) -> Layout {
        Layout::for_path(&self.location)
    }

    /// Parse the current route's `:id` parameter.
    pub fn route_id<I: FromStr>(&self) -> AppResult<I> {
        let raw = self.params.get("id").unwrap_or_default();
        raw.parse()
            .map_err(|_| AppError::InvalidId(raw.to_string()))
    }

    // === Shared state ===

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn toaster_mut(&mut self) -> &mut Toaster {
        &mut self.toaster
    }

    pub fn product_service(&self) -> &ProductService {
        &self.products
    }

    pub fn user_service(&self) -> &UserService {
        &self.users
    }

    /// Check whether `url` is usable as a product image.
    pub async fn check_image(&self, url: &str) -> bool {
        is_valid_image_url(&self.images, url).await
    }

    /// Toast `message` as an error and wrap `error` for the caller.
    pub(crate) fn report(&mut self, message: &str, error: FetchError) -> AppError {
        self.toaster.error(message, None);
        AppError::Fetch(error)
    }
}

impl std::fmt::Debug for ShopApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopApp")
            .field("api", &self.config.api.base_url)
            .field("location", &self.location)
            .field("page", &self.page)
            .field("cart", &self.cart)
            .field("catalog", &self.catalog.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_data::testing::MockTransport;

    fn app() -> ShopApp {
        ShopApp::new(AppConfig::new("https://api.test"), Arc::new(MockTransport::new())).unwrap()
    }

    #[test]
    fn test_starts_at_home() {
        let app = app();
        assert_eq!(app.location(), "/");
        assert_eq!(app.page(), Page::Home);
        assert!(app.layout().is_landing());
        assert!(app.cart().is_empty());
    }

    #[test]
    fn test_navigate_tracks_page_params_and_layout() {
        let mut app = app();

        assert_eq!(*app.navigate("/dashboard/users/edit/4"), Page::UserEdit);
        assert_eq!(app.params().get("id"), Some("4"));
        assert!(app.layout().is_dashboard());
        assert_eq!(app.route_id::<UserId>().unwrap(), UserId::new(4));

        assert_eq!(*app.navigate("/cart"), Page::Cart);
        assert!(app.params().is_empty());
        assert!(app.layout().is_landing());
    }

    #[test]
    fn test_route_id_rejects_garbage() {
        let mut app = app();
        app.navigate("/products/abc");
        assert!(matches!(
            app.route_id::<ProductId>(),
            Err(AppError::InvalidId(raw)) if raw == "abc"
        ));

        app.navigate("/about");
        assert!(matches!(app.route_id::<ProductId>(), Err(AppError::InvalidId(_))));
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let mut app = app();
        assert_eq!(*app.navigate("/missing/page"), Page::NotFound);
        assert_eq!(app.location(), "/missing/page");
    }
}
