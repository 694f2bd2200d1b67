//! Wire DTOs for the catalog API.
//!
//! # Design
//! These types mirror the JSON the remote API speaks (camelCase keys) and are
//! kept separate from the domain models in `models`. Records come back from
//! the server; `New*` and `*Patch` go out as request bodies. The mock-server
//! crate defines its own copies; integration tests catch schema drift.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::validate;

/// Server-assigned identifier.
///
/// The API hands out numeric ids but some responses carry them as strings;
/// both forms are accepted and kept as text, which is what ends up in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(u64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => ResourceId::from(n),
            RawId::Text(s) => ResourceId(s),
        })
    }
}

/// Envelope for list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ListResponse<T> {
    pub list: Vec<T>,
}

/// Body of `DELETE /articles/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct DeletedResponse {
    pub id: ResourceId,
}

/// Reads an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A product as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

/// An article as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub title: String,
    pub content: String,
    pub writer: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub image: String,
}

/// Request payload for creating a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub tags: Vec<String>,
    pub images: Vec<String>,
}

impl NewProduct {
    /// Validate an arbitrary JSON object and decode it.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        validate::validate_product(fields)?;
        decode(fields)
    }
}

/// Request payload for updating a product. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}

/// Request payload for creating an article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub writer: String,
    pub image: String,
}

impl NewArticle {
    /// Validate an arbitrary JSON object and decode it.
    pub fn from_fields(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        validate::validate_article(fields)?;
        decode(fields)
    }
}

/// Request payload for updating an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticlePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub writer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Query parameters accepted by both list endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl ListQuery {
    /// Validate a loosely-typed parameter object and decode it.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self, ValidationError> {
        validate::validate_list_params(params)?;
        decode(params)
    }

    /// The query as `(key, value)` pairs, in declaration order.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(page_size) = self.page_size {
            pairs.push(("pageSize".to_string(), page_size.to_string()));
        }
        if let Some(order_by) = &self.order_by {
            pairs.push(("orderBy".to_string(), order_by.clone()));
        }
        if let Some(keyword) = &self.keyword {
            pairs.push(("keyword".to_string(), keyword.clone()));
        }
        pairs
    }
}

fn decode<T: serde::de::DeserializeOwned>(
    fields: &Map<String, Value>,
) -> Result<T, ValidationError> {
    serde_json::from_value(Value::Object(fields.clone()))
        .map_err(|e| ValidationError::Malformed(e.to_string()))
}
