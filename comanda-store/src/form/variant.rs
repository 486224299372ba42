//! Variant form
//!
//! Variants require a persisted parent product id; opening the form is
//! blocked until the parent has been saved.

use super::{FieldErrors, FormError, FormMode, coerce_decimal};
use crate::store::{StoreError, VariantStore};
use rust_decimal::Decimal;
use shared::models::{Variant, VariantPayload};
use std::sync::Arc;

/// Editable draft fields.
#[derive(Debug, Clone, Default)]
pub struct VariantDraft {
    pub name: String,
    pub price: Option<Decimal>,
    pub is_active: bool,
}

/// Owns one editable variant draft, scoped to a parent product.
pub struct VariantForm {
    store: Arc<VariantStore>,
    parent_id: Option<i64>,
    mode: FormMode,
    draft: VariantDraft,
    errors: FieldErrors,
    submitting: bool,
}

impl VariantForm {
    pub fn new(store: Arc<VariantStore>) -> Self {
        Self {
            store,
            parent_id: None,
            mode: FormMode::Closed,
            draft: VariantDraft::default(),
            errors: FieldErrors::new(),
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &VariantDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_open()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    // ========== Lifecycle ==========

    /// Open an empty draft for `parent_id`. Fails with `ParentNotSaved`
    /// until the product exists on the server.
    pub fn open_create(&mut self, parent_id: Option<i64>) -> Result<(), FormError> {
        let Some(parent_id) = parent_id.filter(|id| *id > 0) else {
            return Err(FormError::ParentNotSaved);
        };
        self.parent_id = Some(parent_id);
        self.draft = VariantDraft {
            is_active: true,
            ..VariantDraft::default()
        };
        self.mode = FormMode::Create;
        self.errors.clear();
        self.submitting = false;
        Ok(())
    }

    /// Seed the draft from an existing variant.
    pub fn open_edit(&mut self, variant: &Variant) {
        self.parent_id = Some(variant.product_id);
        self.draft = VariantDraft {
            name: variant.name.clone(),
            price: Some(variant.price),
            is_active: variant.is_active,
        };
        self.mode = FormMode::Edit { id: variant.id };
        self.errors.clear();
        self.submitting = false;
    }

    pub fn close(&mut self) {
        self.draft = VariantDraft::default();
        self.mode = FormMode::Closed;
        self.parent_id = None;
        self.errors.clear();
        self.submitting = false;
    }

    // ========== Field updates ==========

    pub fn set_name(&mut self, value: &str) {
        if !self.is_open() {
            return;
        }
        self.draft.name = value.to_string();
        self.errors.remove("name");
    }

    /// Coerces empty input to `None` and discards garbage silently.
    pub fn set_price(&mut self, value: &str) {
        if !self.is_open() {
            return;
        }
        self.draft.price = coerce_decimal(value);
        self.errors.remove("price");
    }

    pub fn set_active(&mut self, active: bool) {
        if !self.is_open() {
            return;
        }
        self.draft.is_active = active;
    }

    // ========== Validation and save ==========

    pub fn validate(&mut self) -> Result<(), FormError> {
        let mut errors = FieldErrors::new();
        if self.draft.name.trim().is_empty() {
            errors.insert("name", "Name must not be empty".to_string());
        }
        match self.draft.price {
            Some(price) if price > Decimal::ZERO => {}
            _ => {
                errors.insert("price", "Price must be greater than zero".to_string());
            }
        }
        self.errors = errors;
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::Validation(self.errors.clone()))
        }
    }

    /// Validate and persist through the variant store.
    pub async fn save(&mut self) -> Result<Variant, FormError> {
        if !self.is_open() {
            return Err(FormError::Closed);
        }
        let Some(parent_id) = self.parent_id.filter(|id| *id > 0) else {
            return Err(FormError::ParentNotSaved);
        };
        self.validate()?;

        self.submitting = true;
        let payload = VariantPayload {
            product_id: parent_id,
            name: self.draft.name.trim().to_string(),
            price: self.draft.price.unwrap_or_default(),
            is_active: self.draft.is_active,
        };
        let result = match self.mode {
            FormMode::Create => self.store.create(payload).await,
            FormMode::Edit { id } => self.store.update(id, payload).await,
            FormMode::Closed => Err(StoreError::Request(
                comanda_client::ClientError::Validation("form is closed".to_string()),
            )),
        };
        self.submitting = false;

        match result {
            Ok(variant) => {
                self.mode = FormMode::Edit { id: variant.id };
                Ok(variant)
            }
            Err(err) => Err(err.into()),
        }
    }
}
