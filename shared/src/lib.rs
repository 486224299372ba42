//! Shared types for the comanda back-office
//!
//! Domain models, wire-format normalization and the API response envelope
//! shared between the network client and the state layer.

pub mod models;
pub mod response;
pub mod serde_helpers;
pub mod util;

pub use models::{
    Category, CategoryKind, CategoryPayload, CategoryWire, LoginRequest, LoginResponse, OrderLine,
    PaymentMode, Product, ProductPayload, ProductWire, SessionWire, TenantInfo, Transaction,
    UserInfo, Variant, VariantPayload, VariantWire,
};
pub use response::{EnvelopeError, ListResult, extract_list, split_envelope};
