//! Token lifecycle: issuance, revocation-aware verification, rotation.

pub mod manager;

pub use manager::{TokenLifecycleManager, TokenState};
