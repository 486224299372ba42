//! Product service

use super::multipart_fields;
use crate::http::FilePart;
use crate::{ClientError, ClientResult, HttpClient};
use serde::Serialize;
use serde_json::Value;
use shared::models::{Product, ProductPayload, ProductWire};
use shared::response::{ListResult, extract_list};

const BASE_PATH: &str = "menu-items";

/// Derived statistics over a product collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductStats {
    pub total: usize,
    pub active: usize,
    pub out_of_stock: usize,
    pub with_variants: usize,
}

/// CRUD facade over `/menu-items/`
#[derive(Debug, Clone)]
pub struct ProductService {
    http: HttpClient,
}

impl ProductService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List all products, inactive ones included (the back office manages
    /// both).
    pub async fn list(&self) -> ClientResult<ListResult<Product>> {
        let payload = self
            .http
            .get_json(
                &format!("{BASE_PATH}/"),
                &[("includeInactive", Some("true".to_string()))],
            )
            .await?;
        Self::decode_list(&payload)
    }

    /// Products belonging to one category.
    pub async fn list_by_category(&self, category_id: i64) -> ClientResult<ListResult<Product>> {
        let payload = self
            .http
            .get_json(&format!("{BASE_PATH}/category/{category_id}"), &[])
            .await?;
        Self::decode_list(&payload)
    }

    /// Server-side search over name and description.
    pub async fn search(&self, query: &str) -> ClientResult<ListResult<Product>> {
        let payload = self
            .http
            .get_json(
                &format!("{BASE_PATH}/"),
                &[
                    ("includeInactive", Some("true".to_string())),
                    ("search", Some(query.to_string())),
                ],
            )
            .await?;
        Self::decode_list(&payload)
    }

    /// Create a product; multipart when an image file is staged.
    pub async fn create(
        &self,
        data: &ProductPayload,
        image: Option<FilePart>,
    ) -> ClientResult<Product> {
        let path = format!("{BASE_PATH}/");
        let payload = match image {
            Some(file) => {
                self.http
                    .post_multipart(&path, multipart_fields(data)?, file)
                    .await?
            }
            None => self.http.post_json(&path, serde_json::to_value(data)?).await?,
        };
        Self::decode_one(payload)
    }

    /// Full-record update; the API overwrites the whole record on PUT.
    pub async fn update(
        &self,
        id: i64,
        data: &ProductPayload,
        image: Option<FilePart>,
    ) -> ClientResult<Product> {
        let path = format!("{BASE_PATH}/{id}/");
        let payload = match image {
            Some(file) => {
                self.http
                    .put_multipart(&path, multipart_fields(data)?, file)
                    .await?
            }
            None => self.http.put_json(&path, serde_json::to_value(data)?).await?,
        };
        Self::decode_one(payload)
    }

    /// Hard delete. Confirmation is the caller's responsibility.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete_json(&format!("{BASE_PATH}/{id}/"))
            .await?;
        Ok(())
    }

    /// Derived statistics; pure computation over an already-fetched
    /// collection.
    pub fn stats(products: &[Product]) -> ProductStats {
        ProductStats {
            total: products.len(),
            active: products.iter().filter(|p| p.is_active).count(),
            out_of_stock: products.iter().filter(|p| p.stock == 0).count(),
            with_variants: products.iter().filter(|p| p.has_variants()).count(),
        }
    }

    fn decode_list(payload: &Value) -> ClientResult<ListResult<Product>> {
        let (items, total) = extract_list(payload)?;
        let products = items
            .into_iter()
            .map(|item| serde_json::from_value::<ProductWire>(item).map(ProductWire::into_domain))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(ListResult::new(products, total))
    }

    fn decode_one(payload: Value) -> ClientResult<Product> {
        serde_json::from_value::<ProductWire>(payload)
            .map(ProductWire::into_domain)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
