//! Core traits defined in `tollgate-core` and implemented by other crates.

pub mod revocation;
pub mod user_store;

pub use revocation::{Denylist, RevocationStore};
pub use user_store::UserStore;
