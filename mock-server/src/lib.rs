use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub tags: Vec<String>,
    pub images: Vec<String>,
    pub favorite_count: u64,
}

#[derive(Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

#[derive(Deserialize)]
pub struct UpdateProduct {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: u64,
    pub title: String,
    pub content: String,
    pub writer: String,
    pub image: String,
    pub like_count: u64,
}

#[derive(Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
    pub writer: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Deserialize)]
pub struct UpdateArticle {
    pub title: Option<String>,
    pub content: Option<String>,
    pub writer: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    pub page: Option<usize>,
    pub page_size: Option<usize>,
    pub order_by: Option<String>,
    pub keyword: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub list: Vec<T>,
    pub total_count: usize,
}

#[derive(Default)]
pub struct Store {
    products: BTreeMap<u64, Product>,
    articles: BTreeMap<u64, Article>,
    next_id: u64,
}

impl Store {
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type Db = Arc<RwLock<Store>>;

const DEFAULT_PAGE_SIZE: usize = 10;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product).patch(update_product).delete(delete_product),
        )
        .route("/articles", get(list_articles).post(create_article))
        .route(
            "/articles/{id}",
            get(get_article).patch(update_article).delete(delete_article),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Newest first unless `order_by` names a counter; then 1-based pagination.
fn paginate<T: Clone>(
    mut items: Vec<T>,
    params: &ListParams,
    counter: impl Fn(&T) -> u64,
    counter_order: &str,
) -> ListResponse<T> {
    items.reverse();
    if params.order_by.as_deref() == Some(counter_order) {
        items.sort_by_key(|item| std::cmp::Reverse(counter(item)));
    }

    let total_count = items.len();
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    let list = items
        .into_iter()
        .skip((page - 1).saturating_mul(page_size))
        .take(page_size)
        .collect();
    ListResponse { list, total_count }
}

fn matches_keyword(keyword: Option<&str>, fields: &[&str]) -> bool {
    match keyword {
        None | Some("") => true,
        Some(keyword) => fields.iter().any(|field| field.contains(keyword)),
    }
}

// --- products ---

async fn list_products(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<ListResponse<Product>> {
    let store = db.read().await;
    let matching: Vec<Product> = store
        .products
        .values()
        .filter(|p| {
            matches_keyword(params.keyword.as_deref(), &[p.name.as_str(), p.description.as_str()])
        })
        .cloned()
        .collect();
    Json(paginate(matching, &params, |p| p.favorite_count, "favorite"))
}

async fn create_product(
    State(db): State<Db>,
    Json(input): Json<CreateProduct>,
) -> (StatusCode, Json<Product>) {
    let mut store = db.write().await;
    let product = Product {
        id: store.allocate_id(),
        name: input.name,
        description: input.description,
        price: input.price,
        tags: input.tags,
        images: input.images,
        favorite_count: 0,
    };
    store.products.insert(product.id, product.clone());
    (StatusCode::CREATED, Json(product))
}

async fn get_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Product>, StatusCode> {
    let store = db.read().await;
    store.products.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateProduct>,
) -> Result<Json<Product>, StatusCode> {
    let mut store = db.write().await;
    let product = store.products.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        product.name = name;
    }
    if let Some(description) = input.description {
        product.description = description;
    }
    if let Some(price) = input.price {
        product.price = price;
    }
    if let Some(tags) = input.tags {
        product.tags = tags;
    }
    if let Some(images) = input.images {
        product.images = images;
    }
    Ok(Json(product.clone()))
}

async fn delete_product(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    store
        .products
        .remove(&id)
        .map(|_| Json(json!({})))
        .ok_or(StatusCode::NOT_FOUND)
}

// --- articles ---

async fn list_articles(
    State(db): State<Db>,
    Query(params): Query<ListParams>,
) -> Json<ListResponse<Article>> {
    let store = db.read().await;
    let matching: Vec<Article> = store
        .articles
        .values()
        .filter(|a| {
            matches_keyword(params.keyword.as_deref(), &[a.title.as_str(), a.content.as_str()])
        })
        .cloned()
        .collect();
    Json(paginate(matching, &params, |a| a.like_count, "like"))
}

async fn create_article(
    State(db): State<Db>,
    Json(input): Json<CreateArticle>,
) -> (StatusCode, Json<Article>) {
    let mut store = db.write().await;
    let article = Article {
        id: store.allocate_id(),
        title: input.title,
        content: input.content,
        writer: input.writer,
        image: input.image,
        like_count: 0,
    };
    store.articles.insert(article.id, article.clone());
    (StatusCode::CREATED, Json(article))
}

async fn get_article(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Article>, StatusCode> {
    let store = db.read().await;
    store.articles.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_article(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateArticle>,
) -> Result<Json<Article>, StatusCode> {
    let mut store = db.write().await;
    let article = store.articles.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(title) = input.title {
        article.title = title;
    }
    if let Some(content) = input.content {
        article.content = content;
    }
    if let Some(writer) = input.writer {
        article.writer = writer;
    }
    if let Some(image) = input.image {
        article.image = image;
    }
    Ok(Json(article.clone()))
}

async fn delete_article(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, StatusCode> {
    let mut store = db.write().await;
    store
        .articles
        .remove(&id)
        .map(|removed| Json(json!({ "id": removed.id })))
        .ok_or(StatusCode::NOT_FOUND)
}
