//! Shared value types.

pub mod identity;

pub use identity::{AccountType, Claims, NewAddress, NewUser, StoredCredentials};
