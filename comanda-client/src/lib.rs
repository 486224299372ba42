//! Comanda Client - HTTP client for the back-office API
//!
//! Provides the retrying HTTP client and the per-resource services that
//! translate the wire schema into domain shapes.

pub mod config;
pub mod error;
pub mod http;
pub mod services;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{FilePart, HttpClient};
pub use services::{
    AuthService, CategoryService, CategoryStats, ProductService, ProductStats, TransactionService,
    VariantService,
};

// Re-export shared types for convenience
pub use shared::models::{LoginResponse, TenantInfo, UserInfo};
