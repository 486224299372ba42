//! Category model

use crate::serde_helpers::{bool_false, bool_true, flexible_i64, opt_nonempty_string};
use crate::util::parse_timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Customer-facing grouping of menu items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub kind: CategoryKind,
    /// Whether the category is visible to customers
    pub is_displayed: bool,
    pub self_order_visible: bool,
    pub image_url: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Closed set of category kinds. Unknown wire values map to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Food,
    Drink,
    Package,
    Extra,
    #[default]
    Other,
}

const FOOD_KEYWORDS: &[&str] = &[
    "nasi", "ayam", "rendang", "sate", "bakso", "mie", "noodle", "rice", "pasta", "soup", "snack",
    "dessert", "cake", "bread", "roti", "burger", "pizza", "salad", "goreng", "beef", "chicken",
    "fish", "seafood",
];

const DRINK_KEYWORDS: &[&str] = &[
    "tea", "teh", "coffee", "kopi", "juice", "jus", "drink", "soda", "milk", "susu", "iced",
    "latte", "smoothie", "lemonade", "water",
];

impl CategoryKind {
    /// Map the server's free-form type field onto the closed set.
    pub fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "food" | "makanan" => Self::Food,
            "drink" | "beverage" | "minuman" => Self::Drink,
            "package" | "paket" => Self::Package,
            "extra" | "addon" | "add-on" => Self::Extra,
            _ => Self::Other,
        }
    }

    /// Advisory classification of free text into food/drink/other by keyword
    /// match. Not validated against the server.
    pub fn infer(text: &str) -> Self {
        let haystack = text.to_lowercase();
        if FOOD_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
            return Self::Food;
        }
        if DRINK_KEYWORDS.iter().any(|kw| haystack.contains(kw)) {
            return Self::Drink;
        }
        Self::Other
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Drink => "drink",
            Self::Package => "package",
            Self::Extra => "extra",
            Self::Other => "other",
        }
    }
}

/// Raw wire record as served by `/menu-categories/`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWire {
    #[serde(deserialize_with = "flexible_i64")]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "opt_nonempty_string")]
    pub description: Option<String>,
    /// Free-form type discriminator
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default = "default_true", deserialize_with = "bool_true")]
    pub is_displayed: bool,
    #[serde(default, deserialize_with = "bool_false")]
    pub self_order_visible: bool,
    #[serde(default, deserialize_with = "opt_nonempty_string", alias = "image")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

impl CategoryWire {
    /// Total transform into the domain shape.
    pub fn into_domain(self) -> Category {
        Category {
            id: self.id,
            name: self.name,
            description: self.description,
            kind: self
                .kind
                .as_deref()
                .map(CategoryKind::from_wire)
                .unwrap_or_default(),
            is_displayed: self.is_displayed,
            self_order_visible: self.self_order_visible,
            image_url: self.image_url,
            created_at: self.created_at.as_deref().and_then(parse_timestamp),
            updated_at: self.updated_at.as_deref().and_then(parse_timestamp),
        }
    }
}

/// Create/update payload. The API does whole-record replacement on PUT, so
/// every field is always sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPayload {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    pub is_displayed: bool,
    pub self_order_visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Category {
    /// Rebuild the full payload from the cached record, e.g. for a toggle.
    pub fn to_payload(&self) -> CategoryPayload {
        CategoryPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            kind: self.kind,
            is_displayed: self.is_displayed,
            self_order_visible: self.self_order_visible,
            image_url: self.image_url.clone(),
        }
    }
}
