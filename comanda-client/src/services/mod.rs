//! Per-resource API services
//!
//! Translation layer between the wire schema and the domain shapes; every
//! operation returns domain data only, never raw wire records.

mod auth;
mod category;
mod product;
mod transaction;
mod variant;

pub use auth::AuthService;
pub use category::{CategoryService, CategoryStats};
pub use product::{ProductService, ProductStats};
pub use transaction::TransactionService;
pub use variant::VariantService;

use crate::{ClientError, ClientResult};
use serde::Serialize;
use serde_json::Value;

/// Flatten a payload struct into multipart text fields, dropping nulls.
pub(crate) fn multipart_fields<T: Serialize>(data: &T) -> ClientResult<Vec<(String, String)>> {
    let value = serde_json::to_value(data)?;
    let object = value
        .as_object()
        .ok_or_else(|| ClientError::InvalidResponse("payload is not an object".to_string()))?;
    Ok(object
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(key, v)| {
            let text = match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), text)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Payload {
        name: String,
        price: i64,
        image: Option<String>,
    }

    #[test]
    fn test_multipart_fields_drop_nulls() {
        let fields = multipart_fields(&Payload {
            name: "Sate".to_string(),
            price: 28000,
            image: None,
        })
        .unwrap();
        assert!(fields.contains(&("name".to_string(), "Sate".to_string())));
        assert!(fields.contains(&("price".to_string(), "28000".to_string())));
        assert!(!fields.iter().any(|(k, _)| k == "image"));
    }
}
