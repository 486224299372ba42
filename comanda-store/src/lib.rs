//! Comanda Store - client-side state layer for the back-office panel
//!
//! In-memory resource stores with a load-state machine and optimistic
//! patching, editable form drafts with validation and image staging,
//! derived filter/sort views, and the persisted session.
//!
//! Construction follows one pattern: build a single [`HttpClient`] from a
//! [`ClientConfig`], hand it to the services, and share one
//! [`SessionStore`] across the stores so an authorization failure clears
//! the session everywhere at once.
//!
//! [`HttpClient`]: comanda_client::HttpClient
//! [`ClientConfig`]: comanda_client::ClientConfig

pub mod filter;
pub mod form;
pub mod logging;
pub mod session;
pub mod store;

pub use session::{SessionError, SessionStore};
pub use store::{
    CategoryStore, LoadState, ProductStore, StoreError, StoreResult, TransactionStore,
    VariantStore,
};
