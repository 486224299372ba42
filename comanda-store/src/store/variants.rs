//! Variant store
//!
//! Keyed strictly by the parent product id. Switching parents clears the
//! list immediately and bumps a generation counter; a fetch result is
//! applied only if its generation is still current, so a slow response
//! for the previous product can never overwrite newer state.

use super::{LoadState, StoreError, StoreResult, guard_auth};
use crate::session::SessionStore;
use comanda_client::{ClientError, VariantService};
use shared::models::{Variant, VariantPayload};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collection {
    product_id: Option<i64>,
    items: Vec<Variant>,
    load: LoadState,
}

/// Owns the variant list of the product currently being edited.
#[derive(Clone)]
pub struct VariantStore {
    service: VariantService,
    session: Arc<SessionStore>,
    state: Arc<RwLock<Collection>>,
    generation: Arc<AtomicU64>,
}

impl VariantStore {
    pub fn new(service: VariantService, session: Arc<SessionStore>) -> Self {
        Self {
            service,
            session,
            state: Arc::new(RwLock::new(Collection::default())),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    // ========== Snapshots ==========

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load.clone()
    }

    pub async fn items(&self) -> Vec<Variant> {
        self.state.read().await.items.clone()
    }

    pub async fn product_id(&self) -> Option<i64> {
        self.state.read().await.product_id
    }

    // ========== Fetch ==========

    /// Switch to a new parent product. The previous list is cleared before
    /// the fetch starts, never left stale while the request is in flight.
    pub async fn set_product(&self, product_id: Option<i64>) -> StoreResult<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.product_id = product_id;
            state.items.clear();
            state.load = match product_id {
                Some(_) => LoadState::Loading,
                None => LoadState::Idle,
            };
        }

        let Some(id) = product_id else {
            return Ok(());
        };

        let result = self.service.list_for_product(id).await;

        // the parent changed again while this request was in flight
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(product_id = id, "discarded stale variant response");
            return Ok(());
        }

        match result {
            Ok(items) => {
                let mut state = self.state.write().await;
                state.items = items;
                state.load = LoadState::Ready;
                Ok(())
            }
            Err(err) => {
                let err = guard_auth(&self.session, err);
                let mut state = self.state.write().await;
                state.load = match &err {
                    StoreError::SessionExpired => LoadState::Idle,
                    other => LoadState::Error(other.to_string()),
                };
                Err(err)
            }
        }
    }

    /// Refetch the current parent's variants.
    pub async fn refresh(&self) -> StoreResult<()> {
        let current = self.product_id().await;
        self.set_product(current).await
    }

    // ========== Mutations ==========

    /// Create a variant; requires a persisted parent id on the payload.
    pub async fn create(&self, payload: VariantPayload) -> StoreResult<Variant> {
        if payload.product_id <= 0 {
            return Err(StoreError::Request(ClientError::Validation(
                "variant requires a saved product".to_string(),
            )));
        }
        match self.service.create(&payload).await {
            Ok(variant) => {
                let mut state = self.state.write().await;
                if state.product_id == Some(variant.product_id) {
                    state.items.push(variant.clone());
                }
                tracing::debug!(id = variant.id, "variant created");
                Ok(variant)
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Full-record update; the cached entry is replaced with the server's
    /// returned record.
    pub async fn update(&self, id: i64, payload: VariantPayload) -> StoreResult<Variant> {
        match self.service.update(id, &payload).await {
            Ok(variant) => {
                let mut state = self.state.write().await;
                if let Some(slot) = state.items.iter_mut().find(|v| v.id == id) {
                    *slot = variant.clone();
                }
                tracing::debug!(id, "variant updated");
                Ok(variant)
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Delete after the caller has confirmed.
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        match self.service.delete(id).await {
            Ok(()) => {
                let mut state = self.state.write().await;
                state.items.retain(|v| v.id != id);
                tracing::debug!(id, "variant deleted");
                Ok(())
            }
            Err(err) => Err(guard_auth(&self.session, err)),
        }
    }

    /// Flip the active flag by resending the full record.
    pub async fn toggle_active(&self, id: i64) -> StoreResult<Variant> {
        let current = self
            .state
            .read()
            .await
            .items
            .iter()
            .find(|v| v.id == id)
            .cloned()
            .ok_or_else(|| StoreError::Request(ClientError::NotFound(format!("variant {id}"))))?;
        let mut payload = current.to_payload();
        payload.is_active = !payload.is_active;
        self.update(id, payload).await
    }
}
