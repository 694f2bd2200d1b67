//! Async catalog operations: build, execute, parse, log.
//!
//! # Design
//! `CatalogService` glues the sans-IO `CatalogClient` to a `Transport`. Each
//! public method is one round trip. Validation runs inside `build_*`, so an
//! invalid input fails before the transport is touched. Every outcome is
//! logged once; errors are returned to the caller unchanged.

use tracing::{error, info};

use crate::client::CatalogClient;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::models::{Article, Product};
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{ArticlePatch, ListQuery, NewArticle, NewProduct, ProductPatch, ResourceId};

#[derive(Debug, Clone)]
pub struct CatalogService<T = ReqwestTransport> {
    client: CatalogClient,
    transport: T,
}

impl CatalogService<ReqwestTransport> {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_transport(CatalogClient::new(&config.base_url), ReqwestTransport::new())
    }
}

impl<T: Transport> CatalogService<T> {
    pub fn with_transport(client: CatalogClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    async fn exchange<R>(
        &self,
        request: Result<HttpRequest, ApiError>,
        parse: impl FnOnce(&CatalogClient, HttpResponse) -> Result<R, ApiError>,
    ) -> Result<R, ApiError> {
        let response = self.transport.execute(request?).await?;
        parse(&self.client, response)
    }

    // -----------------------------------------------------------------------
    // Products
    // -----------------------------------------------------------------------

    pub async fn get_product_list(&self, query: &ListQuery) -> Result<Vec<Product>, ApiError> {
        let result = self
            .exchange(self.client.build_list_products(query), CatalogClient::parse_list_products)
            .await;
        match &result {
            Ok(products) => info!(count = products.len(), "fetched product list"),
            Err(e) => error!(error = %e, "failed to fetch product list"),
        }
        result
    }

    pub async fn get_product(&self, id: &ResourceId) -> Result<Product, ApiError> {
        let result = self
            .exchange(self.client.build_get_product(id), CatalogClient::parse_get_product)
            .await;
        match &result {
            Ok(product) => info!(%id, name = product.name(), "fetched product"),
            Err(e) => error!(%id, error = %e, "failed to fetch product"),
        }
        result
    }

    pub async fn create_product(&self, input: &NewProduct) -> Result<Product, ApiError> {
        let result = self
            .exchange(self.client.build_create_product(input), CatalogClient::parse_create_product)
            .await;
        match &result {
            Ok(product) => info!(id = ?product.id(), name = product.name(), "created product"),
            Err(e) => error!(name = %input.name, error = %e, "failed to create product"),
        }
        result
    }

    pub async fn patch_product(
        &self,
        id: &ResourceId,
        patch: &ProductPatch,
    ) -> Result<Product, ApiError> {
        let request = self.client.build_patch_product(id, patch);
        let result = self
            .exchange(request, CatalogClient::parse_patch_product)
            .await;
        match &result {
            Ok(product) => info!(%id, name = product.name(), "updated product"),
            Err(e) => error!(%id, error = %e, "failed to update product"),
        }
        result
    }

    pub async fn delete_product(&self, id: &ResourceId) -> Result<(), ApiError> {
        let result = self
            .exchange(self.client.build_delete_product(id), CatalogClient::parse_delete_product)
            .await;
        match &result {
            Ok(()) => info!(%id, "deleted product"),
            Err(e) => error!(%id, error = %e, "failed to delete product"),
        }
        result
    }

    // -----------------------------------------------------------------------
    // Articles
    // -----------------------------------------------------------------------

    pub async fn get_article_list(&self, query: &ListQuery) -> Result<Vec<Article>, ApiError> {
        let result = self
            .exchange(self.client.build_list_articles(query), CatalogClient::parse_list_articles)
            .await;
        match &result {
            Ok(articles) => info!(count = articles.len(), "fetched article list"),
            Err(e) => error!(error = %e, "failed to fetch article list"),
        }
        result
    }

    pub async fn get_article(&self, id: &ResourceId) -> Result<Article, ApiError> {
        let result = self
            .exchange(self.client.build_get_article(id), CatalogClient::parse_get_article)
            .await;
        match &result {
            Ok(article) => info!(%id, title = %article.title, "fetched article"),
            Err(e) => error!(%id, error = %e, "failed to fetch article"),
        }
        result
    }

    pub async fn create_article(&self, input: &NewArticle) -> Result<Article, ApiError> {
        let result = self
            .exchange(self.client.build_create_article(input), CatalogClient::parse_create_article)
            .await;
        match &result {
            Ok(article) => info!(id = ?article.id, title = %article.title, "created article"),
            Err(e) => error!(title = %input.title, error = %e, "failed to create article"),
        }
        result
    }

    pub async fn patch_article(
        &self,
        id: &ResourceId,
        patch: &ArticlePatch,
    ) -> Result<Article, ApiError> {
        let request = self.client.build_patch_article(id, patch);
        let result = self
            .exchange(request, CatalogClient::parse_patch_article)
            .await;
        match &result {
            Ok(article) => info!(%id, title = %article.title, "updated article"),
            Err(e) => error!(%id, error = %e, "failed to update article"),
        }
        result
    }

    pub async fn delete_article(&self, id: &ResourceId) -> Result<ResourceId, ApiError> {
        let result = self
            .exchange(self.client.build_delete_article(id), CatalogClient::parse_delete_article)
            .await;
        match &result {
            Ok(deleted) => info!(id = %deleted, "deleted article"),
            Err(e) => error!(%id, error = %e, "failed to delete article"),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::ValidationError;
    use crate::http::HttpMethod;
    use crate::models::ELECTRONICS_TAG;

    /// Replays canned responses in order and records every request it sees.
    #[derive(Default)]
    struct ScriptedTransport {
        responses: Mutex<VecDeque<Result<HttpResponse, ApiError>>>,
        requests: Mutex<Vec<HttpRequest>>,
    }

    impl ScriptedTransport {
        fn replying(status: u16, body: &str) -> Self {
            let transport = Self::default();
            transport.responses.lock().unwrap().push_back(Ok(HttpResponse {
                status,
                headers: Vec::new(),
                body: body.to_string(),
            }));
            transport
        }

        fn failing(error: ApiError) -> Self {
            let transport = Self::default();
            transport.responses.lock().unwrap().push_back(Err(error));
            transport
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request);
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_string())))
        }
    }

    fn service(transport: ScriptedTransport) -> CatalogService<ScriptedTransport> {
        CatalogService::with_transport(CatalogClient::new("http://catalog.test"), transport)
    }

    #[tokio::test]
    async fn product_list_maps_electronics_tag() {
        let body = format!(
            r#"{{"list":[{{"name":"x","description":"y","price":10,
                "tags":["{ELECTRONICS_TAG}"],"images":[]}}]}}"#
        );
        let svc = service(ScriptedTransport::replying(200, &body));

        let products = svc.get_product_list(&ListQuery::default()).await.unwrap();
        assert_eq!(products.len(), 1);
        assert!(products[0].is_electronic());

        let requests = svc.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://catalog.test/products");
    }

    #[tokio::test]
    async fn product_list_without_tag_yields_standard_product() {
        let body = r#"{"list":[{"name":"x","description":"y","price":10,"tags":[],"images":[]}]}"#;
        let svc = service(ScriptedTransport::replying(200, body));
        let products = svc.get_product_list(&ListQuery::default()).await.unwrap();
        assert!(matches!(products[0], Product::Standard(_)));
    }

    #[tokio::test]
    async fn get_product_not_found_is_returned_not_panicked() {
        let svc = service(ScriptedTransport::replying(404, r#"{"message":"not found"}"#));
        let missing = ResourceId::from(404);
        let pending = svc.get_product(&missing);
        let err = pending.await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[tokio::test]
    async fn delete_product_sends_slashes_in_id_as_one_segment() {
        let svc = service(ScriptedTransport::replying(200, "{}"));
        svc.delete_product(&ResourceId::from("../articles/1")).await.unwrap();

        let requests = svc.transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].url, "http://catalog.test/products/..%2Farticles%2F1");
    }

    #[tokio::test]
    async fn dot_segment_id_never_reaches_transport() {
        let svc = service(ScriptedTransport::replying(200, "{}"));
        let err = svc.delete_article(&ResourceId::from("..")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(ValidationError::InvalidId(_))));
        assert!(svc.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn transport_errors_propagate_unchanged() {
        let reset = ApiError::Transport("connection reset".to_string());
        let svc = service(ScriptedTransport::failing(reset));
        let err = svc.delete_product(&ResourceId::from(1)).await.unwrap_err();
        match err {
            ApiError::Transport(msg) => assert_eq!(msg, "connection reset"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn invalid_product_never_reaches_transport() {
        let svc = service(ScriptedTransport::default());
        let input = NewProduct {
            name: "x".to_string(),
            description: "y".to_string(),
            price: -5.0,
            tags: Vec::new(),
            images: Vec::new(),
        };
        let err = svc.create_product(&input).await.unwrap_err();
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::InvalidField { field: "price", .. })
        ));
        assert!(svc.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn create_product_returns_mapped_model() {
        let svc = service(ScriptedTransport::replying(
            201,
            r#"{"id":7,"name":"TV","description":"OLED","price":1000,
                "tags":["전자제품"],"images":[]}"#,
        ));
        let input = NewProduct {
            name: "TV".to_string(),
            description: "OLED".to_string(),
            price: 1000.0,
            tags: vec![ELECTRONICS_TAG.to_string()],
            images: Vec::new(),
        };
        let product = svc.create_product(&input).await.unwrap();
        assert!(product.is_electronic());
        assert_eq!(product.id(), Some(&ResourceId::from(7)));
        assert_eq!(svc.transport.requests()[0].method, HttpMethod::Post);
    }

    #[tokio::test]
    async fn patch_article_returns_mapped_model() {
        let svc = service(ScriptedTransport::replying(
            200,
            r#"{"id":3,"title":"new","content":"c","writer":"w","image":"i"}"#,
        ));
        let patch = ArticlePatch {
            title: Some("new".to_string()),
            ..Default::default()
        };
        let article = svc.patch_article(&ResourceId::from(3), &patch).await.unwrap();
        assert_eq!(article.title, "new");
        assert_eq!(svc.transport.requests()[0].method, HttpMethod::Patch);
    }

    #[tokio::test]
    async fn delete_article_resolves_to_bare_id() {
        let body = r#"{"id":"42","title":"t","content":"c"}"#;
        let svc = service(ScriptedTransport::replying(200, body));
        let id = svc.delete_article(&ResourceId::from("42")).await.unwrap();
        assert_eq!(id, ResourceId::from("42"));
    }

    #[tokio::test]
    async fn server_errors_keep_status_and_body() {
        let svc = service(ScriptedTransport::replying(500, "boom"));
        let err = svc.get_article_list(&ListQuery::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, ref body } if body == "boom"));
    }
}
