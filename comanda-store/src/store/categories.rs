//! Category store

use super::{LoadState, StoreError, StoreResult, guard_auth};
use crate::session::SessionStore;
use comanda_client::http::FilePart;
use comanda_client::{CategoryService, ClientError};
use shared::models::{Category, CategoryPayload};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collection {
    items: Vec<Category>,
    total: u64,
    load: LoadState,
}

/// Owns the in-memory category collection.
#[derive(Clone)]
pub struct CategoryStore {
    service: CategoryService,
    session: Arc<SessionStore>,
    state: Arc<RwLock<Collection>>,
}

impl CategoryStore {
    pub fn new(service: CategoryService, session: Arc<SessionStore>) -> Self {
        Self {
            service,
            session,
            state: Arc::new(RwLock::new(Collection::default())),
        }
    }

    // ========== Snapshots ==========

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load.clone()
    }

    pub async fn items(&self) -> Vec<Category> {
        self.state.read().await.items.clone()
    }

    pub async fn total(&self) -> u64 {
        self.state.read().await.total
    }

    pub async fn get(&self, id: i64) -> Option<Category> {
        self.state
            .read()
            .await
            .items
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    // ========== Fetch ==========

    /// Fetch the collection, entering `Loading` for the duration.
    pub async fn refresh(&self) -> StoreResult<()> {
        self.state.write().await.load = LoadState::Loading;
        match self.service.list().await {
            Ok(list) => {
                let mut state = self.state.write().await;
                state.items = list.items;
                state.total = list.total;
                state.load = LoadState::Ready;
                Ok(())
            }
            Err(err) => self.fail(err).await,
        }
    }

    async fn fail(&self, err: ClientError) -> StoreResult<()> {
        let err = guard_auth(&self.session, err);
        let mut state = self.state.write().await;
        state.load = match &err {
            // 401 forces a logout, not a page-local error panel
            StoreError::SessionExpired => LoadState::Idle,
            other => LoadState::Error(other.to_string()),
        };
        Err(err)
    }

    // ========== Mutations ==========

    /// Create and insert the server's returned record.
    pub async fn create(
        &self,
        payload: CategoryPayload,
        image: Option<FilePart>,
    ) -> StoreResult<Category> {
        match self.service.create(&payload, image).await {
            Ok(category) => {
                let mut state = self.state.write().await;
                state.items.push(category.clone());
                state.total += 1;
                tracing::debug!(id = category.id, "category created");
                Ok(category)
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Full-record update; the cached entry is replaced with the server's
    /// returned record.
    pub async fn update(
        &self,
        id: i64,
        payload: CategoryPayload,
        image: Option<FilePart>,
    ) -> StoreResult<Category> {
        match self.service.update(id, &payload, image).await {
            Ok(category) => {
                let mut state = self.state.write().await;
                if let Some(slot) = state.items.iter_mut().find(|c| c.id == id) {
                    *slot = category.clone();
                }
                tracing::debug!(id, "category updated");
                Ok(category)
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Delete after the caller has confirmed; removes the cached entry
    /// only on success.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.items.retain(|c| c.id != id);
                state.total = state.total.saturating_sub(1);
                tracing::debug!(id, "category deleted");
                Ok(())
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Flip customer visibility by resending the full record; the API only
    /// does whole-record replacement.
    pub async fn toggle_displayed(&self, id: i64) -> StoreResult<Category> {
        let current = self
            .get(id)
            .await
            .ok_or_else(|| StoreError::Request(ClientError::NotFound(format!("category {id}"))))?;
        let mut payload = current.to_payload();
        payload.is_displayed = !payload.is_displayed;
        self.update(id, payload, None).await
    }
}
