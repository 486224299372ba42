//! Domain models
//!
//! Each resource has a wire struct mirroring what the API actually sends
//! and a domain struct the rest of the system works with. Wire structs
//! convert through `into_domain`, which is total: every field either maps
//! or gets an explicit default.

mod auth;
mod category;
mod product;
mod transaction;
mod variant;

pub use auth::{LoginRequest, LoginResponse, TenantInfo, UserInfo};
pub use category::{Category, CategoryKind, CategoryPayload, CategoryWire};
pub use product::{Product, ProductPayload, ProductWire};
pub use transaction::{
    OrderLine, PaymentMode, PaymentWire, SessionWire, Transaction, flatten_sessions,
};
pub use variant::{Variant, VariantPayload, VariantWire};
