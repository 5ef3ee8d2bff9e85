//! # tollgate-store
//!
//! Revocation store backends for Tollgate. Supports two providers:
//!
//! - **memory**: in-process map, for single-instance deployments and tests
//! - **redis**: shared Redis store using the [redis](https://crates.io/crates/redis) crate
//!
//! The provider is selected at runtime based on configuration. Both keep
//! exactly two entries, one per [`Denylist`](tollgate_core::traits::Denylist),
//! each with a single list-level TTL.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;
#[cfg(feature = "redis-backend")]
pub mod redis;

pub use provider::RevocationStoreManager;
