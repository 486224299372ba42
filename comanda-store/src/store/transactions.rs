//! Transaction store
//!
//! Read-only projection: no mutations, only periodic refetch.

use super::{LoadState, StoreError, StoreResult, guard_auth};
use crate::session::SessionStore;
use comanda_client::TransactionService;
use shared::models::Transaction;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Collection {
    items: Vec<Transaction>,
    load: LoadState,
}

/// Owns the flattened transaction list.
#[derive(Clone)]
pub struct TransactionStore {
    service: TransactionService,
    session: Arc<SessionStore>,
    state: Arc<RwLock<Collection>>,
}

impl TransactionStore {
    pub fn new(service: TransactionService, session: Arc<SessionStore>) -> Self {
        Self {
            service,
            session,
            state: Arc::new(RwLock::new(Collection::default())),
        }
    }

    pub async fn load_state(&self) -> LoadState {
        self.state.read().await.load.clone()
    }

    pub async fn items(&self) -> Vec<Transaction> {
        self.state.read().await.items.clone()
    }

    /// Fetch the flattened report, entering `Loading` for the duration.
    pub async fn refresh(&self) -> StoreResult<()> {
        self.state.write().await.load = LoadState::Loading;
        match self.service.list().await {
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
}
