//! Variant service

use crate::{ClientError, ClientResult, HttpClient};
use shared::models::{Variant, VariantPayload, VariantWire};
use shared::response::extract_list;

const BASE_PATH: &str = "menu-item-variants";

/// CRUD facade over `/menu-item-variants`
#[derive(Debug, Clone)]
pub struct VariantService {
    http: HttpClient,
}

impl VariantService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Variants of one product, freshly fetched.
    pub async fn list_for_product(&self, product_id: i64) -> ClientResult<Vec<Variant>> {
        let payload = self
            .http
            .get_json(&format!("{BASE_PATH}/menu-item/{product_id}"), &[])
            .await?;
        let (items, _) = extract_list(&payload)?;
        items
            .into_iter()
            .map(|item| {
                serde_json::from_value::<VariantWire>(item)
                    .map(|wire| wire.into_domain(Some(product_id)))
                    .map_err(|e| ClientError::InvalidResponse(e.to_string()))
            })
            .collect()
    }

    pub async fn create(&self, data: &VariantPayload) -> ClientResult<Variant> {
        let payload = self
            .http
            .post_json(BASE_PATH, serde_json::to_value(data)?)
            .await?;
        Self::decode_one(payload, data.product_id)
    }

    /// Full-record update; the API overwrites the whole record on PUT.
    pub async fn update(&self, id: i64, data: &VariantPayload) -> ClientResult<Variant> {
        let payload = self
            .http
            .put_json(&format!("{BASE_PATH}/{id}"), serde_json::to_value(data)?)
            .await?;
        Self::decode_one(payload, data.product_id)
    }

    /// Hard delete. Confirmation is the caller's responsibility.
    pub async fn delete(&self, id: i64) -> ClientResult<()> {
        self.http.delete_json(&format!("{BASE_PATH}/{id}")).await?;
        Ok(())
    }

    fn decode_one(payload: serde_json::Value, product_id: i64) -> ClientResult<Variant> {
        serde_json::from_value::<VariantWire>(payload)
            .map(|wire| wire.into_domain(Some(product_id)))
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}
