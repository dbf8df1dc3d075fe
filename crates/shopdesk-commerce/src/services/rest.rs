//! Generic CRUD service.

use std::marker::PhantomData;

use shopdesk_data::{FetchClient, FetchError};

use super::{handle_api_error, Resource};

/// CRUD operations for one resource type.
///
/// The client is expected to carry the API base URL and the JSON content
/// type header (see `ApiConfig::client`).
pub struct RestService<R> {
    client: FetchClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R> Clone for RestService<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for RestService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestService")
            .field("client", &self.client)
            .finish()
    }
}

impl<R: Resource> RestService<R> {
    /// Create a service over `client`.
    pub fn new(client: FetchClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// `GET /{collection}`.
    pub async fn get_all(&self) -> Result<Vec<R>, FetchError> {
        self.client
            .get(R::COLLECTION)
            .send_json()
            .await
            .map_err(|e| handle_api_error(e, &format!("fetching {}", R::NOUN_PLURAL)))
    }

    /// `GET /{collection}/{id}`.
    pub async fn get_by_id(&self, id: R::Id) -> Result<R, FetchError> {
        self.client
            .get(R::item_path(id))
            .send_json()
            .await
            .map_err(|e| handle_api_error(e, &format!("fetching {} with id {}", R::NOUN, id)))
    }

    /// `POST /{collection}` with `entity` as the body.
    pub async fn create(&self, entity: &R) -> Result<R, FetchError> {
        let context = || format!("creating {}", R::NOUN);
        self.client
            .post(R::COLLECTION)
            .json(entity)
            .map_err(|e| handle_api_error(e, &context()))?
            .send_json()
            .await
            .map_err(|e| handle_api_error(e, &context()))
    }

    /// `PUT /{collection}/{id}` with `entity` as the body.
    pub async fn update(&self, id: R::Id, entity: &R) -> Result<R, FetchError> {
        let context = || format!("updating {} with id {}", R::NOUN, id);
        self.client
            .put(R::item_path(id))
            .json(entity)
            .map_err(|e| handle_api_error(e, &context()))?
            .send_json()
            .await
            .map_err(|e| handle_api_error(e, &context()))
    }

    /// `DELETE /{collection}/{id}`.
    ///
    /// Failures propagate exactly like the other operations.
    pub async fn delete(&self, id: R::Id) -> Result<(), FetchError> {
        self.client
            .delete(R::item_path(id))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map(|_| ())
            .map_err(|e| handle_api_error(e, &format!("deleting {} with id {}", R::NOUN, id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::User;
    use crate::catalog::Product;
    use crate::ids::{ProductId, UserId};
    use crate::services::{ProductService, UserService};
    use shopdesk_data::testing::MockTransport;
    use shopdesk_data::{ApiConfig, Method, Response, JSON_CONTENT_TYPE};
    use std::sync::Arc;

    const BASE: &str = "https://api.test/v1";

    fn products() -> (Arc<MockTransport>, ProductService) {
        let transport = Arc::new(MockTransport::new());
        let client = ApiConfig::new(BASE).client(transport.clone());
        (transport, ProductService::new(client))
    }

    fn users() -> (Arc<MockTransport>, UserService) {
        let transport = Arc::new(MockTransport::new());
        let client = ApiConfig::new(BASE).client(transport.clone());
        (transport, UserService::new(client))
    }

    fn lamp() -> serde_json::Value {
        serde_json::json!({
            "id": "1",
            "name": "Lamp",
            "price": "10.00",
            "description": "Desk lamp",
            "image": "https://cdn.test/lamp.png",
            "category": "Home"
        })
    }

    #[tokio::test]
    async fn test_get_all_products() {
        let (transport, service) = products();
        transport.push_json(200, &serde_json::json!([lamp()]));

        let all = service.get_all().await.unwrap();

        assert_eq!(all.len(), 1);
        assert_eq!(all[0].price, 10.0);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method(), Method::Get);
        assert_eq!(sent.url(), "https://api.test/v1/products");
        assert_eq!(sent.header_value("content-type"), Some(JSON_CONTENT_TYPE));
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (transport, service) = products();
        transport.push_json(200, &lamp());

        let product = service.get_by_id(ProductId::new(1)).await.unwrap();

        assert_eq!(product.id, Some(ProductId::new(1)));
        assert_eq!(transport.last_request().unwrap().url(), "https://api.test/v1/products/1");
    }

    #[tokio::test]
    async fn test_get_by_id_propagates_not_found() {
        let (transport, service) = products();
        transport.push_json(404, &"Not found");

        let err = service.get_by_id(ProductId::new(5)).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let (transport, service) = products();
        transport.push_response(Response::json_body(200, b"{\"name\": 3}".to_vec()));

        let err = service.get_by_id(ProductId::new(1)).await.unwrap_err();
        assert!(matches!(err, FetchError::ParseError(_)));
    }

    #[tokio::test]
    async fn test_create_posts_payload() {
        let (transport, service) = products();
        transport.push_json(201, &lamp());

        let draft = Product::new("Lamp", 10.0, "Desk lamp", "Home");
        let created = service.create(&draft).await.unwrap();

        assert_eq!(created.id, Some(ProductId::new(1)));
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method(), Method::Post);
        assert_eq!(sent.url(), "https://api.test/v1/products");
        let body: Product = sent.json_body().unwrap();
        assert_eq!(body, draft);
    }

    #[tokio::test]
    async fn test_update_puts_to_item_path() {
        let (transport, service) = users();
        transport.push_json(200, &serde_json::json!({ "id": "4", "name": "Ada L", "email": "ada@example.com" }));

        let edited = User::new("Ada L", "ada@example.com").with_id(UserId::new(4));
        let updated = service.update(UserId::new(4), &edited).await.unwrap();

        assert_eq!(updated.name, "Ada L");
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method(), Method::Put);
        assert_eq!(sent.url(), "https://api.test/v1/users/4");
    }

    #[tokio::test]
    async fn test_delete_success_and_failure() {
        let (transport, service) = users();
        transport.push_json(200, &serde_json::json!({ "id": "4", "name": "Ada", "email": "ada@example.com" }));
        transport.push_json(500, &"boom");

        service.delete(UserId::new(4)).await.unwrap();
        let err = service.delete(UserId::new(4)).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        let sent = transport.requests();
        assert_eq!(sent.len(), 2);
        assert!(sent.iter().all(|r| r.method() == Method::Delete));
        assert_eq!(sent[0].url(), "https://api.test/v1/users/4");
    }

    #[tokio::test]
    async fn test_failed_delete_logs_its_context() {
        let (transport, service) = products();
        transport.push_json(404, &"Not found");
        let capture = crate::services::tests::Capture::default();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        let err = service.delete(ProductId::new(7)).await.unwrap_err();

        assert!(err.is_not_found());
        let logged = capture.contents();
        assert!(logged.contains("Error deleting product with id 7"));
        assert!(logged.contains("HTTP 404"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_returned_unchanged() {
        let (transport, service) = users();
        transport.push_error(FetchError::Timeout);

        let err = service.get_all().await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout));
    }
}
