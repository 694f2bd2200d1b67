//! Product endpoints: `{base_url}/products`.

use crate::client::{check_status, parse_json, CatalogClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::models::Product;
use crate::types::{ListQuery, ListResponse, NewProduct, ProductPatch, ProductRecord, ResourceId};
use crate::validate;

const PRODUCTS: &str = "products";

impl CatalogClient {
    pub fn build_list_products(&self, query: &ListQuery) -> Result<HttpRequest, ApiError> {
        self.list_request(PRODUCTS, query)
    }

    pub fn build_get_product(&self, id: &ResourceId) -> Result<HttpRequest, ApiError> {
        Ok(self.bodyless_request(HttpMethod::Get, self.item_url(PRODUCTS, id)?))
    }

    pub fn build_create_product(&self, input: &NewProduct) -> Result<HttpRequest, ApiError> {
        validate::validate_product(&validate::as_object(input)?)?;
        self.json_request(HttpMethod::Post, self.collection_url(PRODUCTS), input)
    }

    pub fn build_patch_product(
        &self,
        id: &ResourceId,
        input: &ProductPatch,
    ) -> Result<HttpRequest, ApiError> {
        validate::validate_product_patch(&validate::as_object(input)?)?;
        self.json_request(HttpMethod::Patch, self.item_url(PRODUCTS, id)?, input)
    }

    pub fn build_delete_product(&self, id: &ResourceId) -> Result<HttpRequest, ApiError> {
        Ok(self.bodyless_request(HttpMethod::Delete, self.item_url(PRODUCTS, id)?))
    }

    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        let page: ListResponse<ProductRecord> = parse_json(&response)?;
        Ok(page.list.into_iter().map(Product::from_record).collect())
    }

    pub fn parse_get_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(&response).map(Product::from_record)
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(&response).map(Product::from_record)
    }

    pub fn parse_patch_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        parse_json(&response).map(Product::from_record)
    }

    /// The response body is ignored.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }
}
