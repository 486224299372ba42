//! Image staging
//!
//! Files are validated (type and size) before touching the draft. An
//! accepted file gets a preview URL from the registry; the registry
//! tracks every live URL so that replace/clear/close can release the
//! previous one and leaks stay observable.

use comanda_client::http::FilePart;
use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Upload size ceiling: 5 MB
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted upload types
pub const ALLOWED_IMAGE_MIME: &[&str] = &["image/jpeg", "image/png", "image/webp"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),

    #[error("Image too large: {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },
}

/// Issues and tracks preview URLs, standing in for the browser's object
/// URL table. Every `create` must be paired with a `release`.
#[derive(Debug, Clone, Default)]
pub struct PreviewRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

#[derive(Debug, Default)]
struct RegistryInner {
    next_id: u64,
    live: BTreeSet<u64>,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a preview URL for a staged file.
    pub fn create(&self, file_name: &str) -> PreviewUrl {
        let mut inner = self.inner.lock().expect("preview lock poisoned");
        inner.next_id += 1;
        let id = inner.next_id;
        inner.live.insert(id);
        PreviewUrl {
            id,
            url: format!("preview://{id}/{file_name}"),
        }
    }

    /// Release a preview URL. Returns false when it was already released.
    pub fn release(&self, preview: &PreviewUrl) -> bool {
        let mut inner = self.inner.lock().expect("preview lock poisoned");
        let removed = inner.live.remove(&preview.id);
        if !removed {
            tracing::warn!(url = %preview.url, "preview URL released twice");
        }
        removed
    }

    /// Number of URLs currently alive; zero means no leaks.
    pub fn live_count(&self) -> usize {
        self.inner.lock().expect("preview lock poisoned").live.len()
    }

    pub fn is_live(&self, preview: &PreviewUrl) -> bool {
        self.inner
            .lock()
            .expect("preview lock poisoned")
            .live
            .contains(&preview.id)
    }
}

/// A preview URL handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewUrl {
    id: u64,
    pub url: String,
}

/// A validated file staged for upload.
#[derive(Debug, Clone)]
pub struct StagedImage {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    pub preview: PreviewUrl,
}

impl StagedImage {
    /// Wire form for the multipart upload.
    pub fn to_file_part(&self) -> FilePart {
        FilePart {
            field: "image".to_string(),
            file_name: self.file_name.clone(),
            mime: self.mime.clone(),
            bytes: self.bytes.clone(),
        }
    }
}

/// Image slot on a draft.
#[derive(Debug, Clone, Default)]
pub enum ImageField {
    #[default]
    Empty,
    /// Existing persisted image (edit mode), previewed by its URL
    Persisted(String),
    /// Newly staged upload
    Staged(StagedImage),
}

impl ImageField {
    /// URL the presentation layer should preview, if any.
    pub fn preview(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Persisted(url) => Some(url),
            Self::Staged(staged) => Some(&staged.preview.url),
        }
    }

    pub fn staged(&self) -> Option<&StagedImage> {
        match self {
            Self::Staged(staged) => Some(staged),
            _ => None,
        }
    }

    /// Persisted URL to carry in a JSON payload, if any.
    pub fn persisted_url(&self) -> Option<String> {
        match self {
            Self::Persisted(url) => Some(url.clone()),
            _ => None,
        }
    }
}

/// Validate a candidate upload, returning its MIME type.
pub fn validate_image(file_name: &str, bytes: &[u8]) -> Result<String, ImageError> {
    let mime = mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or("application/octet-stream");
    if !ALLOWED_IMAGE_MIME.contains(&mime) {
        return Err(ImageError::UnsupportedType(mime.to_string()));
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(ImageError::TooLarge {
            size: bytes.len(),
            max: MAX_IMAGE_BYTES,
        });
    }
    Ok(mime.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_known_types() {
        assert_eq!(validate_image("a.jpg", &[0; 10]).unwrap(), "image/jpeg");
        assert_eq!(validate_image("a.png", &[0; 10]).unwrap(), "image/png");
        assert_eq!(validate_image("a.webp", &[0; 10]).unwrap(), "image/webp");
    }

    #[test]
    fn test_validate_rejects_other_types() {
        assert!(matches!(
            validate_image("a.gif", &[0; 10]),
            Err(ImageError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_image("a.pdf", &[0; 10]),
            Err(ImageError::UnsupportedType(_))
        ));
        assert!(matches!(
            validate_image("noext", &[0; 10]),
            Err(ImageError::UnsupportedType(_))
        ));
    }

    #[test]
    fn test_validate_rejects_oversized_files() {
        let bytes = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert!(matches!(
            validate_image("a.jpg", &bytes),
            Err(ImageError::TooLarge { .. })
        ));
    }

    #[test]
    fn test_registry_tracks_live_urls() {
        let registry = PreviewRegistry::new();
        let a = registry.create("a.jpg");
        let b = registry.create("b.jpg");
        assert_eq!(registry.live_count(), 2);
        assert!(registry.release(&a));
        assert_eq!(registry.live_count(), 1);
        assert!(!registry.is_live(&a));
        assert!(registry.is_live(&b));
        // double release is flagged, not fatal
        assert!(!registry.release(&a));
    }
}
