//! Variant model

use crate::serde_helpers::{bool_true, flexible_decimal, flexible_i64, opt_flexible_i64};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Named price option attached to one product.
///
/// A variant cannot exist without a persisted parent product id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}

/// Raw wire record from `/menu-item-variants/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantWire {
    #[serde(deserialize_with = "flexible_i64")]
    pub id: i64,
    /// Parent reference; some nested payloads omit it
    #[serde(
        default,
        deserialize_with = "opt_flexible_i64",
        alias = "menuItemId"
    )]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "flexible_decimal")]
    pub price: Decimal,
    #[serde(default = "default_true", deserialize_with = "bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl VariantWire {
    /// Total transform; `fallback_product` fills the parent id when the
    /// wire record omits it (nested listings).
    pub fn into_domain(self, fallback_product: Option<i64>) -> Variant {
        Variant {
            id: self.id,
            product_id: self.product_id.or(fallback_product).unwrap_or(0),
            name: self.name,
            price: self.price,
            is_active: self.is_active,
        }
    }
}

/// Create/update payload; full record, same as the other resources.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPayload {
    #[serde(rename = "menuItemId")]
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
}

impl Variant {
    pub fn to_payload(&self) -> VariantPayload {
        VariantPayload {
            product_id: self.product_id,
            name: self.name.clone(),
            price: self.price,
            is_active: self.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_fallback_product_id() {
        let wire: VariantWire =
            serde_json::from_value(json!({"id": 5, "name": "Large", "price": "18000"})).unwrap();
        let variant = wire.into_domain(Some(77));
        assert_eq!(variant.product_id, 77);
        assert_eq!(variant.price, Decimal::from(18000));
        assert!(variant.is_active);
    }

    #[test]
    fn test_wire_explicit_product_id_wins() {
        let wire: VariantWire = serde_json::from_value(
            json!({"id": 5, "menuItemId": 9, "name": "Small", "price": 12000, "isActive": false}),
        )
        .unwrap();
        let variant = wire.into_domain(Some(77));
        assert_eq!(variant.product_id, 9);
        assert!(!variant.is_active);
    }
}
