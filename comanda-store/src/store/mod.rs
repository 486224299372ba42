//! Resource stores
//!
//! Each store exclusively owns one in-memory collection and drives it
//! through `idle → loading → {ready | error}`. Mutations patch the
//! collection from the server's returned record instead of forcing a full
//! refetch. A 401 anywhere clears the shared session instead of landing
//! as a page-local error.

mod categories;
mod products;
mod transactions;
mod variants;

pub use categories::CategoryStore;
pub use products::ProductStore;
pub use transactions::TransactionStore;
pub use variants::VariantStore;

use crate::session::SessionStore;
use comanda_client::ClientError;
use thiserror::Error;

/// Collection load state machine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Error(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Store-level failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The API answered 401; the session has been cleared
    #[error("Session expired")]
    SessionExpired,

    #[error(transparent)]
    Request(#[from] ClientError),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Map a client error, clearing the session on authorization failure.
pub(crate) fn guard_auth(session: &SessionStore, err: ClientError) -> StoreError {
    if err.is_auth() {
        tracing::warn!("authorization failure, clearing session");
        session.clear();
        StoreError::SessionExpired
    } else {
        StoreError::Request(err)
    }
}
