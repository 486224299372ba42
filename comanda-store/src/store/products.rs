//! Product store
//!
//! Products reference categories for display and form population, so the
//! initial fetch loads both collections concurrently.

use super::{LoadState, StoreError, StoreResult, guard_auth};
use crate::session::SessionStore;
use comanda_client::http::FilePart;
use comanda_client::{CategoryService, ClientError, ProductService};
use shared::models::{Category, Product, ProductPayload};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collection {
    products: Vec<Product>,
    categories: Vec<Category>,
    total: u64,
    load: LoadState,
}

/// Owns the in-memory product collection plus the category lookup used
/// for display.
#[derive(Clone)]
pub struct ProductStore {
    products: ProductService,
    categories: CategoryService,
    session: Arc<SessionStore>,
    state: Arc<RwLock<Collection>>,
}

impl ProductStore {
    pub fn new(
        products: ProductService,
        categories: CategoryService,
        session: Arc<SessionStore>,
    ) -> Self {
        Self {
            products,
            categories,
            session,
            state: Arc::new(RwLock::new(Collection::default())),
        }
    }

    // ========== Snapshots ==========

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load.clone()
    }

    pub async fn items(&self) -> Vec<Product> {
        self.state.read().await.products.clone()
    }

    pub async fn categories(&self) -> Vec<Category> {
        self.state.read().await.categories.clone()
    }

    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    pub async fn get(&self, id: i64) -> Option<Product> {
        self.state
            .read()
            .await
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    pub async fn category_name(&self, category_id: i64) -> Option<String> {
        self.state
            .read()
            .await
            .categories
            .iter()
            .find(|c| c.id == category_id)
            .map(|c| c.name.clone())
    }

    // ========== Fetch ==========

    /// Fetch products and categories concurrently.
    pub async fn refresh(&self) -> StoreResult<()> {
        self.state.write().await.load = LoadState::Loading;
        let (products, categories) =
            tokio::join!(self.products.list(), self.categories.list());

        match (products, categories) {
            (Ok(products), Ok(categories)) => {
                let mut state = self.state.write().await;
                state.total = products.total;
                state.products = products.items;
                state.categories = categories.items;
                state.load = LoadState::Ready;
                Ok(())
            }
            (Err(err), _) | (_, Err(err)) => self.fail(err).await,
        }
    }

    async fn fail(&self, err: ClientError) -> StoreResult<()> {
        let err = guard_auth(&self.session, err);
        let mut state = self.state.write().await;
        state.load = match &err {
            StoreError::SessionExpired => LoadState::Idle,
            other => LoadState::Error(other.to_string()),
        };
        Err(err)
    }

    // ========== Mutations ==========

    /// Create and insert the server's returned record.
    pub async fn create(
        &self,
        payload: ProductPayload,
        image: Option<FilePart>,
    ) -> StoreResult<Product> {
        match self.products.create(&payload, image).await {
            Ok(product) => {
                let mut state = self.state.write().await;
                state.products.push(product.clone());
                state.total += 1;
                tracing::debug!(id = product.id, "product created");
                Ok(product)
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Full-record update; the cached entry is replaced with the server's
    /// returned record.
    pub async fn update(
        &self,
        id: i64,
        payload: ProductPayload,
        image: Option<FilePart>,
    ) -> StoreResult<Product> {
        match self.products.update(id, &payload, image).await {
            Ok(product) => {
                let mut state = self.state.write().await;
                if let Some(slot) = state.products.iter_mut().find(|p| p.id == id) {
                    // variants are owned by the variant store; keep the
                    // cached list when the update response omits them
                    let mut fresh = product.clone();
                    if fresh.variants.is_empty() {
                        fresh.variants = slot.variants.clone();
                    }
                    *slot = fresh;
                }
                tracing::debug!(id, "product updated");
                Ok(product)
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Delete after the caller has confirmed; removes the cached entry
    /// only on success.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        match self.products.delete(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.products.retain(|p| p.id != id);
                state.total = state.total.saturating_sub(1);
                tracing::debug!(id, "product deleted");
                Ok(())
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Flip the active flag by resending the full record; the API only
    /// does whole-record replacement.
    pub async fn toggle_active(&self, id: i64) -> StoreResult<Product> {
        let current = self
            .get(id)
            .await
            .ok_or_else(|| StoreError::Request(ClientError::NotFound(format!("product {id}"))))?;
        let mut payload = current.to_payload();
        payload.is_active = !payload.is_active;
        self.update(id, payload, None).await
    }
}
