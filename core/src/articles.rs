//! Article endpoints: `{base_url}/articles`.

use crate::client::{parse_json, CatalogClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::Article;
use crate::types::{
    ArticlePatch, ArticleRecord, DeletedResponse, ListQuery, ListResponse, NewArticle, ResourceId,
};
use crate::validate;

const ARTICLES: &str = "articles";

impl CatalogClient {
    pub fn build_list_articles(&self, query: &ListQuery) -> Result<HttpRequest, ApiError> {
        self.list_request(ARTICLES, query)
    }

    pub fn build_get_article(&self, id: &ResourceId) -> Result<HttpRequest, ApiError> {
        Ok(self.bodyless_request(HttpMethod::Get, self.item_url(ARTICLES, id)?))
    }

    pub fn build_create_article(&self, input: &NewArticle) -> Result<HttpRequest, ApiError> {
        validate::validate_article(&validate::as_object(input)?)?;
        self.json_request(HttpMethod::Post, self.collection_url(ARTICLES), input)
    }

    pub fn build_patch_article(
        &self,
        id: &ResourceId,
        input: &ArticlePatch,
    ) -> Result<HttpRequest, ApiError> {
        validate::validate_article_patch(&validate::as_object(input)?)?;
        self.json_request(HttpMethod::Patch, self.item_url(ARTICLES, id)?, input)
    }

    pub fn build_delete_article(&self, id: &ResourceId) -> Result<HttpRequest, ApiError> {
        Ok(self.bodyless_request(HttpMethod::Delete, self.item_url(ARTICLES, id)?))
    }

    pub fn parse_list_articles(&self, response: HttpResponse) -> Result<Vec<Article>, ApiError> {
        let page: ListResponse<ArticleRecord> = parse_json(&response)?;
        Ok(page.list.into_iter().map(Article::from_record).collect())
    }

    pub fn parse_get_article(&self, response: HttpResponse) -> Result<Article, ApiError> {
        parse_json(&response).map(Article::from_record)
    }

    pub fn parse_create_article(&self, response: HttpResponse) -> Result<Article, ApiError> {
        parse_json(&response).map(Article::from_record)
    }

    pub fn parse_patch_article(&self, response: HttpResponse) -> Result<Article, ApiError> {
        parse_json(&response).map(Article::from_record)
    }

    /// Returns only the `id` echoed back by the server.
    pub fn parse_delete_article(&self, response: HttpResponse) -> Result<ResourceId, ApiError> {
        parse_json(&response).map(|deleted: DeletedResponse| deleted.id)
    }
}
