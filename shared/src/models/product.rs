//! Product (menu item) model

use crate::models::variant::{Variant, VariantWire};
use crate::serde_helpers::{
    bool_true, flexible_decimal, flexible_i64, opt_flexible_i64, opt_nonempty_string,
};
use crate::util::{format_price, parse_timestamp};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item. `price` is authoritative when there are no variants;
/// otherwise the display price is the range across active variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub category_id: i64,
    pub is_active: bool,
    /// Persisted image URL; a staged upload lives only on the form draft
    pub image_path: Option<String>,
    pub variants: Vec<Variant>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    pub fn active_variant_count(&self) -> usize {
        self.variants.iter().filter(|v| v.is_active).count()
    }

    pub fn min_active_price(&self) -> Option<Decimal> {
        self.variants
            .iter()
            .filter(|v| v.is_active)
            .map(|v| v.price)
            .min()
    }

    pub fn max_active_price(&self) -> Option<Decimal> {
        self.variants
            .iter()
            .filter(|v| v.is_active)
            .map(|v| v.price)
            .max()
    }

    /// Human-readable display price: the product price, or the active
    /// variants' range when variants exist.
    pub fn price_range_label(&self) -> String {
        match (self.min_active_price(), self.max_active_price()) {
            (Some(min), Some(max)) if min != max => {
                format!("{} - {}", format_price(min), format_price(max))
            }
            (Some(single), _) => format_price(single),
            _ => format_price(self.price),
        }
    }

    /// Rebuild the full payload from the cached record, e.g. for a toggle.
    pub fn to_payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
            is_active: self.is_active,
            image_path: self.image_path.clone(),
        }
    }
}

/// Raw wire record from `/menu-items/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductWire {
    #[serde(deserialize_with = "flexible_i64")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub price: Decimal,
    #[serde(default, deserialize_with = "opt_flexible_i64")]
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "opt_flexible_i64", alias = "menuCategoryId")]
    pub category_id: Option<i64>,
    #[serde(default = "default_true", deserialize_with = "bool_true")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "opt_nonempty_string", alias = "image")]
    pub image_path: Option<String>,
    #[serde(default)]
    pub variants: Vec<VariantWire>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl ProductWire {
    /// Total transform into the domain shape.
    pub fn into_domain(self) -> Product {
        let id = self.id;
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock.unwrap_or(0),
            category_id: self.category_id.unwrap_or(0),
            is_active: self.is_active,
            image_path: self.image_path,
            variants: self
                .variants
                .into_iter()
                .map(|v| v.into_domain(Some(id)))
                .collect(),
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Create/update payload. The API does whole-record replacement on PUT.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub stock: i64,
    pub category_id: i64,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn variant(id: i64, price: i64, active: bool) -> Variant {
        Variant {
            id,
            product_id: 1,
            name: format!("v{id}"),
            price: Decimal::from(price),
            is_active: active,
        }
    }

    fn product_with_variants(variants: Vec<Variant>) -> Product {
        Product {
            id: 1,
            name: "Nasi Goreng".to_string(),
            description: "Fried rice".to_string(),
            price: Decimal::from(30_000),
            stock: 10,
            category_id: 2,
            is_active: true,
            image_path: None,
            variants,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_price_range_without_variants() {
        let product = product_with_variants(vec![]);
        assert_eq!(product.price_range_label(), "Rp 30.000");
        assert!(!product.has_variants());
    }

    #[test]
    fn test_price_range_across_active_variants() {
        let product = product_with_variants(vec![
            variant(1, 25_000, true),
            variant(2, 40_000, true),
            variant(3, 90_000, false),
        ]);
        assert_eq!(product.active_variant_count(), 2);
        assert_eq!(product.min_active_price(), Some(Decimal::from(25_000)));
        assert_eq!(product.max_active_price(), Some(Decimal::from(40_000)));
        assert_eq!(product.price_range_label(), "Rp 25.000 - Rp 40.000");
    }

    #[test]
    fn test_price_range_single_active_variant() {
        let product = product_with_variants(vec![variant(1, 25_000, true)]);
        assert_eq!(product.price_range_label(), "Rp 25.000");
    }

    #[test]
    fn test_inactive_variants_fall_back_to_base_price() {
        let product = product_with_variants(vec![variant(1, 25_000, false)]);
        assert_eq!(product.price_range_label(), "Rp 30.000");
    }

    #[test]
    fn test_wire_normalization() {
        let wire: ProductWire = serde_json::from_value(json!({
            "id": "8",
            "name": "Sate Ayam",
            "description": "Chicken satay",
            "price": "28000",
            "categoryId": "3",
            "variants": [{"id": 1, "name": "Half", "price": 15000}]
        }))
        .unwrap();
        let product = wire.into_domain();
        assert_eq!(product.id, 8);
        assert_eq!(product.price, Decimal::from(28_000));
        assert_eq!(product.stock, 0);
        assert_eq!(product.category_id, 3);
        assert_eq!(product.variants.len(), 1);
        assert_eq!(product.variants[0].product_id, 8);
    }
}
