//! Async API client for the product/article catalog service.
//!
//! # Overview
//! `CatalogClient` builds `HttpRequest` values and parses `HttpResponse`
//! values without touching the network (host-does-IO pattern).
//! `CatalogService` pairs it with a `Transport` and exposes one `async fn`
//! per catalog operation.
//!
//! # Design
//! - `CatalogClient` is stateless; it holds only `base_url`.
//! - Each operation is split into `build_*` (validates input, produces the
//!   request) and `parse_*` (checks status, decodes, maps to a domain model),
//!   so the I/O boundary is explicit.
//! - Products map to `Product::Standard` or `Product::Electronic` depending on
//!   their tags; articles map to `Article`. Counters on both are value-level.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod articles;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod models;
pub mod products;
pub mod service;
pub mod transport;
pub mod types;
pub mod validate;

pub use client::CatalogClient;
pub use config::{ClientConfig, ConfigError, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ApiError, ValidationError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use models::{Article, ElectronicProduct, Product, ProductInfo, ELECTRONICS_TAG};
pub use service::CatalogService;
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    ArticlePatch, ArticleRecord, ListQuery, NewArticle, NewProduct, ProductPatch, ProductRecord,
    ResourceId,
};
