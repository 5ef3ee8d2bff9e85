//! # tollgate-database
//!
//! PostgreSQL connection management and the relational implementation of
//! the [`UserStore`](tollgate_core::traits::UserStore) collaborator.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::UserRepository;
