//! Form drafts
//!
//! Editable working copies of one entity, owned exclusively by the form
//! until a validated payload is handed to a store at save time. Numeric
//! text input is coerced: empty input becomes `None` (distinct from zero)
//! and unparseable input is discarded silently.

mod category;
mod image;
mod product;
mod variant;

pub use category::{CategoryDraft, CategoryField, CategoryForm};
pub use image::{
    ALLOWED_IMAGE_MIME, ImageError, ImageField, MAX_IMAGE_BYTES, PreviewRegistry, PreviewUrl,
    StagedImage,
};
pub use product::{ProductDraft, ProductField, ProductForm};
pub use variant::{VariantDraft, VariantForm};

use crate::store::StoreError;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use thiserror::Error;

/// Per-field validation errors keyed by field name.
pub type FieldErrors = BTreeMap<&'static str, String>;

/// Form-level failures.
#[derive(Debug, Error)]
pub enum FormError {
    /// Per-field validation failures; the save was never issued
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// The form is closed; no draft to act on
    #[error("Form is not open")]
    Closed,

    /// Variants require a persisted parent product id
    #[error("Save the product before adding variants")]
    ParentNotSaved,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Form lifecycle. `Edit` carries the persisted id; a create promotes to
/// `Edit` once the server assigns one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Closed,
    Create,
    Edit {
        id: i64,
    },
}

impl FormMode {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Persisted id, once the entity exists on the server.
    pub fn saved_id(&self) -> Option<i64> {
        match self {
            Self::Edit { id } => Some(*id),
            _ => None,
        }
    }
}

/// Coerce decimal text input: empty → `None`, unparseable → `None`.
pub fn coerce_decimal(input: &str) -> Option<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// Coerce integer text input: empty → `None`, unparseable → `None`.
pub fn coerce_int(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}
