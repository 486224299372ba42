//! Category service

use super::multipart_fields;
use crate::http::FilePart;
use crate::{ClientError, ClientResult, HttpClient};
use serde::Serialize;
use serde_json::Value;
use shared::models::{Category, CategoryKind, CategoryPayload, CategoryWire};
use shared::response::{ListResult, extract_list};

const BASE_PATH: &str = "menu-categories";

/// Derived statistics over a category collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStats {
    pub total: usize,
    pub displayed: usize,
    pub food: usize,
    pub drink: usize,
    pub other: usize,
}

/// CRUD facade over `/menu-categories/`
#[derive(Debug, Clone)]
pub struct CategoryService {
    http: HttpClient,
}

impl CategoryService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List all categories with the total count (server metadata, falling
    /// back to the collection length).
    pub async fn list(&self) -> ClientResult<ListResult<Category>> {
        let payload = self.http.get_json(&format!("{BASE_PATH}/"), &[]).await?;
        Self::decode_list(&payload)
    }

    /// Server-side search over name and description.
    pub async fn search(&self, query: &str) -> ClientResult<ListResult<Category>> {
        let payload = self
            .http
            .get_json(
                &format!("{BASE_PATH}/"),
                &[("search", Some(query.to_string()))],
            )
            .await?;
        Self::decode_list(&payload)
    }

    /// Create a category; multipart when an image file is staged.
    pub async fn create(
        &self,
        data: &CategoryPayload,
        image: Option<FilePart>,
    ) -> ClientResult<Category> {
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
        data: &CategoryPayload,
        image: Option<FilePart>,
    ) -> ClientResult<Category> {
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

    /// Hard delete. Confirmation is the caller's responsibility; the
    /// service issues the request unconditionally.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http
            .delete_json(&format!("{BASE_PATH}/{id}/"))
            .await?;
        Ok(())
    }

    /// Derived statistics; pure computation over an already-fetched
    /// collection.
    pub fn stats(categories: &[Category]) -> CategoryStats {
        CategoryStats {
            total: categories.len(),
            displayed: categories.iter().filter(|c| c.is_displayed).count(),
            food: categories
                .iter()
                .filter(|c| c.kind == CategoryKind::Food)
                .count(),
            drink: categories
                .iter()
                .filter(|c| c.kind == CategoryKind::Drink)
                .count(),
            other: categories
                .iter()
                .filter(|c| {
                    !matches!(c.kind, CategoryKind::Food | CategoryKind::Drink)
                })
                .count(),
        }
    }

    fn decode_list(payload: &Value) -> ClientResult<ListResult<Category>> {
        let (items, total) = extract_list(payload)?;
        let categories = items
            .into_iter()
            .map(|item| {
                serde_json::from_value::<CategoryWire>(item).map(CategoryWire::into_domain)
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(ListResult::new(categories, total))
    }

    fn decode_one(payload: Value) -> ClientResult<Category> {
        serde_json::from_value::<CategoryWire>(payload)
            .map(CategoryWire::into_domain)
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(kind: CategoryKind, displayed: bool) -> Category {
        Category {
            id: 1,
            name: "x".to_string(),
            description: None,
            kind,
            is_displayed: displayed,
            self_order_visible: false,
            image_url: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_stats() {
        let categories = vec![
            category(CategoryKind::Food, true),
            category(CategoryKind::Drink, true),
            category(CategoryKind::Other, false),
            category(CategoryKind::Package, true),
        ];
        let stats = CategoryService::stats(&categories);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.displayed, 3);
        assert_eq!(stats.food, 1);
        assert_eq!(stats.drink, 1);
        assert_eq!(stats.other, 2);
    }
}
