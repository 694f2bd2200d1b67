//! Domain models handed to callers.
//!
//! # Design
//! Models are plain values. Counters are never mutated in place: `favorite`
//! and `like` consume the value and return one with the count incremented,
//! and the current count is readable through an accessor.
//!
//! The product variant is decided once, when a `ProductRecord` is mapped:
//! a record tagged `"전자제품"` ("electronics") becomes `Product::Electronic`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::types::{ArticleRecord, NewProduct, ProductRecord, ResourceId};

/// Tag that marks a product as electronics.
pub const ELECTRONICS_TAG: &str = "전자제품";

/// Monotonic, caller-local counter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counter(u64);

impl Counter {
    pub fn value(self) -> u64 {
        self.0
    }

    pub fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Fields shared by every product variant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    favorite_count: Counter,
}

impl ProductInfo {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        tags: Vec<String>,
        images: Vec<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            tags,
            images,
            favorite_count: Counter::default(),
        }
    }

    pub fn favorite_count(&self) -> u64 {
        self.favorite_count.value()
    }

    fn favorited(self) -> Self {
        Self {
            favorite_count: self.favorite_count.incremented(),
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectronicProduct {
    #[serde(flatten)]
    pub info: ProductInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Product {
    Standard(ProductInfo),
    Electronic(ElectronicProduct),
}

impl Product {
    /// Map an API record onto the matching variant.
    pub fn from_record(record: ProductRecord) -> Self {
        let is_electronic = record.tags.iter().any(|tag| tag == ELECTRONICS_TAG);
        let info = ProductInfo {
            id: record.id,
            name: record.name,
            description: record.description,
            price: record.price,
            tags: record.tags,
            images: record.images,
            favorite_count: Counter::default(),
        };

        if is_electronic {
            Product::Electronic(ElectronicProduct {
                info,
                manufacturer: record.manufacturer,
            })
        } else {
            Product::Standard(info)
        }
    }

    pub fn info(&self) -> &ProductInfo {
        match self {
            Product::Standard(info) => info,
            Product::Electronic(product) => &product.info,
        }
    }

    pub fn id(&self) -> Option<&ResourceId> {
        self.info().id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.info().name
    }

    pub fn is_electronic(&self) -> bool {
        matches!(self, Product::Electronic(_))
    }

    pub fn favorite_count(&self) -> u64 {
        self.info().favorite_count()
    }

    /// Returns the product with its favorite count incremented.
    pub fn favorite(self) -> Self {
        match self {
            Product::Standard(info) => Product::Standard(info.favorited()),
            Product::Electronic(product) => {
                let info = product.info.favorited();
                info!(
                    manufacturer = product.manufacturer.as_deref().unwrap_or("unknown"),
                    name = %info.name,
                    favorites = info.favorite_count(),
                    "electronic product favorited"
                );
                Product::Electronic(ElectronicProduct {
                    info,
                    manufacturer: product.manufacturer,
                })
            }
        }
    }
}

impl From<&Product> for NewProduct {
    /// Manufacturer is not part of the create payload and is dropped.
    fn from(product: &Product) -> Self {
        let info = product.info();
        NewProduct {
            name: info.name.clone(),
            description: info.description.clone(),
            price: info.price,
            tags: info.tags.clone(),
            images: info.images.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ResourceId>,
    pub title: String,
    pub content: String,
    pub writer: String,
    pub image: String,
    like_count: Counter,
    created_at: DateTime<Utc>,
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        writer: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
            writer: writer.into(),
            image: image.into(),
            like_count: Counter::default(),
            created_at: Utc::now(),
        }
    }

    pub fn from_record(record: ArticleRecord) -> Self {
        Self {
            id: record.id,
            ..Self::new(record.title, record.content, record.writer, record.image)
        }
    }

    pub fn like_count(&self) -> u64 {
        self.like_count.value()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the article with its like count incremented.
    pub fn like(self) -> Self {
        Self {
            like_count: self.like_count.incremented(),
            ..self
        }
    }
}
