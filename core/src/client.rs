//! Stateless HTTP request builder and response parser for the catalog API.
//!
//! # Design
//! `CatalogClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes an `HttpResponse`; the
//! per-resource methods live in `products` and `articles`. Every `build_*`
//! that sends a body or a query validates it first, so nothing invalid ever
//! reaches a transport.

use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::error::{ApiError, ValidationError};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{ListQuery, ResourceId};
use crate::validate;

/// Synchronous, stateless client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
}

impl CatalogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn collection_url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.base_url)
    }

    /// `{base_url}/{resource}/{id}` with the id percent-encoded as exactly one segment.
    pub(crate) fn item_url(&self, resource: &str, id: &ResourceId) -> Result<String, ApiError> {
        let id = id.as_str();
        if matches!(id, "" | "." | "..") {
            return Err(ValidationError::InvalidId(id.to_string()).into());
        }

        let mut url = Url::parse(&self.collection_url(resource))
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .push(id);
        Ok(url.to_string())
    }

    pub(crate) fn list_request(
        &self,
        resource: &str,
        query: &ListQuery,
    ) -> Result<HttpRequest, ApiError> {
        validate::validate_list_params(&validate::as_object(query)?)?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: self.collection_url(resource),
            query: query.to_pairs(),
            headers: Vec::new(),
            body: None,
        })
    }

    pub(crate) fn bodyless_request(&self, method: HttpMethod, url: String) -> HttpRequest {
        HttpRequest {
            method,
            url,
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn json_request<T: Serialize>(
        &self,
        method: HttpMethod,
        url: String,
        input: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input)
            .map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url,
            query: Vec::new(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

/// Check the status, then decode the JSON body.
pub(crate) fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_str(&response.body)
        .map_err(|e| ApiError::DeserializationError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> CatalogClient {
        CatalogClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CatalogClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.collection_url("products"), "http://localhost:3000/products");
    }

    #[test]
    fn any_2xx_status_is_success() {
        assert!(check_status(&response(200, "")).is_ok());
        assert!(check_status(&response(201, "")).is_ok());
        assert!(check_status(&response(204, "")).is_ok());
    }

    #[test]
    fn not_found_has_its_own_variant() {
        let err = check_status(&response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn other_statuses_keep_the_body() {
        let err = check_status(&response(500, "internal error")).unwrap_err();
        match err {
            ApiError::HttpError { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_json_reports_bad_bodies() {
        let err = parse_json::<serde_json::Value>(&response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn json_requests_carry_content_type() {
        let url = client().collection_url("articles");
        let req = client()
            .json_request(HttpMethod::Post, url, &serde_json::json!({"a": 1}))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        assert_eq!(req.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn item_url_keeps_plain_ids() {
        let url = client().item_url("products", &ResourceId::from(12)).unwrap();
        assert_eq!(url, "http://localhost:3000/products/12");
    }

    #[test]
    fn item_url_encodes_traversal_as_one_segment() {
        let url = client()
            .item_url("products", &ResourceId::from("../articles/1"))
            .unwrap();
        assert_eq!(url, "http://localhost:3000/products/..%2Farticles%2F1");
    }

    #[test]
    fn item_url_encodes_query_and_fragment_markers() {
        let url = client().item_url("articles", &ResourceId::from("a?b#c")).unwrap();
        assert_eq!(url, "http://localhost:3000/articles/a%3Fb%23c");
    }

    #[test]
    fn item_url_rejects_dot_segments_and_empty_ids() {
        for id in ["", ".", ".."] {
            let err = client().item_url("products", &ResourceId::from(id)).unwrap_err();
            assert!(
                matches!(
                    err,
                    ApiError::Validation(ValidationError::InvalidId(ref got)) if got == id
                ),
                "{id:?}: {err}"
            );
        }
    }
}
