//! Category form

use super::image::{ImageField, validate_image};
use super::{FieldErrors, FormError, FormMode, ImageError, PreviewRegistry, StagedImage};
use crate::store::{CategoryStore, StoreError, StoreResult};
use shared::models::{Category, CategoryKind, CategoryPayload};
use std::sync::Arc;

/// Editable draft fields.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
    pub kind: CategoryKind,
    pub is_displayed: bool,
    pub self_order_visible: bool,
    pub image: ImageField,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            kind: CategoryKind::Other,
            is_displayed: true,
            self_order_visible: false,
            image: ImageField::Empty,
        }
    }
}

/// Draft fields addressable by the generic setter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryField {
    Name,
    Description,
    Kind,
    IsDisplayed,
    SelfOrderVisible,
}

impl CategoryField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::Kind => "kind",
            Self::IsDisplayed => "is_displayed",
            Self::SelfOrderVisible => "self_order_visible",
        }
    }
}

/// Owns one editable category draft.
pub struct CategoryForm {
    store: Arc<CategoryStore>,
    previews: PreviewRegistry,
    mode: FormMode,
    draft: CategoryDraft,
    errors: FieldErrors,
    dirty: bool,
    submitting: bool,
}

impl CategoryForm {
    pub fn new(store: Arc<CategoryStore>, previews: PreviewRegistry) -> Self {
        Self {
            store,
            previews,
            mode: FormMode::Closed,
            draft: CategoryDraft::default(),
            errors: FieldErrors::new(),
            dirty: false,
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &CategoryDraft {
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

    // ========== Lifecycle ==========

    pub fn open_create(&mut self) {
        self.release_staged_preview();
        self.draft = CategoryDraft::default();
        self.mode = FormMode::Create;
        self.errors.clear();
        self.dirty = false;
        self.submitting = false;
    }

    /// Seed the draft from an existing category; the preview shows the
    /// persisted image URL.
    pub async fn open_edit(&mut self, category_id: i64) -> StoreResult<()> {
        let category = self.store.get(category_id).await.ok_or_else(|| {
            StoreError::Request(comanda_client::ClientError::NotFound(format!(
                "category {category_id}"
            )))
        })?;

        self.release_staged_preview();
        self.draft = CategoryDraft {
            name: category.name.clone(),
            description: category.description.clone().unwrap_or_default(),
            kind: category.kind,
            is_displayed: category.is_displayed,
            self_order_visible: category.self_order_visible,
            image: category
                .image_url
                .clone()
                .map(ImageField::Persisted)
                .unwrap_or_default(),
        };
        self.mode = FormMode::Edit { id: category_id };
        self.errors.clear();
        self.dirty = false;
        self.submitting = false;
        Ok(())
    }

    pub fn close(&mut self) {
        self.release_staged_preview();
        self.draft = CategoryDraft::default();
        self.mode = FormMode::Closed;
        self.errors.clear();
        self.dirty = false;
        self.submitting = false;
    }

    // ========== Field updates ==========

    /// Generic setter keyed by field.
    pub fn set_field(&mut self, field: CategoryField, value: &str) {
        if !self.is_open() {
            return;
        }
        match field {
            CategoryField::Name => self.draft.name = value.to_string(),
            CategoryField::Description => self.draft.description = value.to_string(),
            CategoryField::Kind => self.draft.kind = CategoryKind::from_wire(value),
            CategoryField::IsDisplayed => {
                self.draft.is_displayed = matches!(value, "true" | "1" | "on")
            }
            CategoryField::SelfOrderVisible => {
                self.draft.self_order_visible = matches!(value, "true" | "1" | "on")
            }
        }
        self.dirty = true;
        self.errors.remove(field.key());
    }

    /// Stage an image upload; the previous staged preview is released
    /// first and a rejected file changes nothing.
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

    pub fn clear_image(&mut self) {
        if !self.is_open() {
            return;
        }
        self.release_staged_preview();
        self.draft.image = ImageField::Empty;
        self.dirty = true;
    }

    /// Advisory kind classification from the current description text.
    pub fn suggested_kind(&self) -> CategoryKind {
        CategoryKind::infer(&self.draft.description)
    }

    fn release_staged_preview(&mut self) {
        if let ImageField::Staged(staged) = &self.draft.image {
            self.previews.release(&staged.preview);
        }
    }

    // ========== Validation and save ==========

    pub fn validate(&mut self) -> Result<(), FormError> {
        let mut errors = FieldErrors::new();
        if self.draft.name.trim().is_empty() {
            errors.insert("name", "Name must not be empty".to_string());
        }
        self.errors = errors;
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(FormError::Validation(self.errors.clone()))
        }
    }

    /// Validate and persist, with the same multipart → JSON fallback as
    /// the product form.
    pub async fn save(&mut self) -> Result<Category, FormError> {
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
            Ok(category) => {
                self.mode = FormMode::Edit { id: category.id };
                self.dirty = false;
                Ok(category)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn persist(
        &self,
        payload: CategoryPayload,
        image: Option<comanda_client::FilePart>,
    ) -> StoreResult<Category> {
        match self.mode {
            FormMode::Create => self.store.create(payload, image).await,
            FormMode::Edit { id } => self.store.update(id, payload, image).await,
            FormMode::Closed => Err(StoreError::Request(
                comanda_client::ClientError::Validation("form is closed".to_string()),
            )),
        }
    }

    fn payload(&self) -> CategoryPayload {
        let description = self.draft.description.trim();
        CategoryPayload {
            name: self.draft.name.trim().to_string(),
            description: if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            },
            kind: self.draft.kind,
            is_displayed: self.draft.is_displayed,
            self_order_visible: self.draft.self_order_visible,
            image_url: self.draft.image.persisted_url(),
        }
    }
}
