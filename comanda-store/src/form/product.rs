//! Product form
//!
//! Draft lifecycle: closed → open (create|edit) → submitting → closed,
//! returning to open on validation or save failure. On a successful
//! create the server-assigned id promotes the form to edit mode so
//! variant management unlocks without reopening.

use super::image::{ImageField, validate_image};
use super::{FieldErrors, FormError, FormMode, ImageError, PreviewRegistry, StagedImage,
    coerce_decimal, coerce_int};
use crate::store::{ProductStore, StoreError, StoreResult};
use rust_decimal::Decimal;
use shared::models::{Product, ProductPayload};
use std::sync::Arc;

/// Editable draft fields. Numeric fields are `None` when the input is
/// empty, which is distinct from zero.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Option<Decimal>,
    pub stock: Option<i64>,
    pub category_id: Option<i64>,
    pub is_active: bool,
    pub image: ImageField,
}

/// Draft fields addressable by the generic setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Name,
    Description,
    Price,
    Stock,
    Category,
    IsActive,
}

impl ProductField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Price => "price",
            Self::Stock => "stock",
            Self::Category => "category",
            Self::IsActive => "is_active",
        }
    }
}

/// Owns one editable product draft.
pub struct ProductForm {
    store: Arc<ProductStore>,
    previews: PreviewRegistry,
    mode: FormMode,
    draft: ProductDraft,
    errors: FieldErrors,
    dirty: bool,
    submitting: bool,
}

impl ProductForm {
    pub fn new(store: Arc<ProductStore>, previews: PreviewRegistry) -> Self {
        Self {
            store,
            previews,
            mode: FormMode::Closed,
            draft: ProductDraft::default(),
            errors: FieldErrors::new(),
            dirty: false,
            submitting: false,
        }
    }

    // ========== State accessors ==========

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_open(&self) -> bool {
        self.mode.is_open()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Persisted product id; variants become addable once this is `Some`.
    pub fn saved_product_id(&self) -> Option<i64> {
        self.mode.saved_id()
    }

    // ========== Lifecycle ==========

    /// Open with defaults. The first active category (or failing that,
    /// the first category) is pre-selected.
    pub async fn open_create(&mut self) {
        let categories = self.store.categories().await;
        let default_category = categories
            .iter()
            .find(|c| c.is_displayed)
            .or_else(|| categories.first())
            .map(|c| c.id);

        self.release_staged_preview();
        self.draft = ProductDraft {
            is_active: true,
            category_id: default_category,
            ..ProductDraft::default()
        };
        self.mode = FormMode::Create;
        self.errors.clear();
        self.dirty = false;
        self.submitting = false;
    }

    /// Seed the draft from an existing product. The preview shows the
    /// persisted image URL; nothing is staged.
    pub async fn open_edit(&mut self, product_id: i64) -> StoreResult<()> {
        let product = self.store.get(product_id).await.ok_or_else(|| {
            StoreError::Request(comanda_client::ClientError::NotFound(format!(
                "product {product_id}"
            )))
        })?;

        self.release_staged_preview();
        self.draft = ProductDraft {
            name: product.name.clone(),
            description: product.description.clone(),
            price: Some(product.price),
            stock: Some(product.stock),
            category_id: Some(product.category_id),
            is_active: product.is_active,
            image: product
                .image_path
                .clone()
                .map(ImageField::Persisted)
                .unwrap_or_default(),
        };
        self.mode = FormMode::Edit { id: product_id };
        self.errors.clear();
        self.dirty = false;
        self.submitting = false;
        Ok(())
    }

    /// Close and drop the draft, releasing any staged preview.
    pub fn close(&mut self) {
        self.release_staged_preview();
        self.draft = ProductDraft::default();
        self.mode = FormMode::Closed;
        self.errors.clear();
        self.dirty = false;
        self.submitting = false;
    }

    // ========== Field updates ==========

    /// Generic setter keyed by field. Numeric input coerces empty to
    /// `None` and discards garbage silently.
    pub fn set_field(&mut self, field: ProductField, value: &str) {
        if !self.is_open() {
            return;
        }
        match field {
            ProductField::Name => self.draft.name = value.to_string(),
            ProductField::Description => self.draft.description = value.to_string(),
            ProductField::Price => self.draft.price = coerce_decimal(value),
            ProductField::Stock => self.draft.stock = coerce_int(value),
            // UI select values are strings
            ProductField::Category => self.draft.category_id = coerce_int(value),
            ProductField::IsActive => {
                self.draft.is_active = matches!(value, "true" | "1" | "on")
            }
        }
        self.dirty = true;
        self.errors.remove(field.key());
    }

    /// Stage an image upload. The previous staged preview is released
    /// before the new one is created; a rejected file changes nothing.
    pub fn stage_image(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<(), ImageError> {
        if !self.is_open() {
            return Ok(());
        }
        let mime = validate_image(file_name, &bytes)?;
        self.release_staged_preview();
        let preview = self.previews.create(file_name);
        self.draft.image = ImageField::Staged(StagedImage {
            file_name: file_name.to_string(),
            mime,
            bytes,
            preview,
        });
        self.dirty = true;
        Ok(())
    }

    /// Clear the image slot, releasing any staged preview.
    pub fn clear_image(&mut self) {
        if !self.is_open() {
            return;
        }
        self.release_staged_preview();
        self.draft.image = ImageField::Empty;
        self.dirty = true;
    }

    fn release_staged_preview(&mut self) {
        if let ImageField::Staged(staged) = &self.draft.image {
            self.previews.release(&staged.preview);
        }
    }

    // ========== Validation and save ==========

    /// Pre-save validation. Fills the per-field error map; any entry
    /// blocks the save entirely.
    pub fn validate(&mut self) -> Result<(), FormError> {
        let mut errors = FieldErrors::new();

        if self.draft.name.trim().is_empty() {
            errors.insert("name", "Name must not be empty".to_string());
        }
        if self.draft.description.trim().is_empty() {
            errors.insert("description", "Description must not be empty".to_string());
        }
        match self.draft.price {
            Some(price) if price > Decimal::ZERO => {}
            _ => {
                errors.insert("price", "Price must be greater than zero".to_string());
            }
        }
        if self.draft.category_id.is_none() {
            errors.insert("category", "Category is required".to_string());
        }
        if let Some(stock) = self.draft.stock {
            if stock < 0 {
                errors.insert("stock", "Stock must not be negative".to_string());
            }
        }

        self.errors = errors;
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::Validation(self.errors.clone()))
        }
    }

    /// Validate and persist. Sends multipart when an image is staged; if
    /// that fails, retries once as JSON without the image (the image is
    /// simply not updated in that fallback).
    pub async fn save(&mut self) -> Result<Product, FormError> {
        if !self.is_open() {
            return Err(FormError::Closed);
        }
        self.validate()?;

        self.submitting = true;
        let payload = self.payload();
        let image = self.draft.image.staged().map(StagedImage::to_file_part);

        let first = self.persist(payload.clone(), image.clone()).await;
        let result = match first {
            Err(StoreError::Request(err)) if image.is_some() => {
                tracing::warn!(error = %err, "image upload failed, retrying without image");
                self.persist(payload, None).await
            }
            other => other,
        };
        self.submitting = false;

        match result {
            Ok(product) => {
                // capture the server-assigned id so child entities
                // (variants) become addable without reopening
                self.mode = FormMode::Edit { id: product.id };
                self.dirty = false;
                Ok(product)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(
        &self,
        payload: ProductPayload,
        image: Option<comanda_client::FilePart>,
    ) -> StoreResult<Product> {
        match self.mode {
            FormMode::Create => self.store.create(payload, image).await,
            FormMode::Edit { id } => self.store.update(id, payload, image).await,
            FormMode::Closed => Err(StoreError::Request(
                comanda_client::ClientError::Validation("form is closed".to_string()),
            )),
        }
    }

    fn payload(&self) -> ProductPayload {
        ProductPayload {
            name: self.draft.name.trim().to_string(),
            description: self.draft.description.trim().to_string(),
            price: self.draft.price.unwrap_or_default(),
            stock: self.draft.stock.unwrap_or(0),
            category_id: self.draft.category_id.unwrap_or_default(),
            is_active: self.draft.is_active,
            image_path: self.draft.image.persisted_url(),
        }
    }
}
