//! Session flows composed from credential verification and the token lifecycle.

pub mod manager;

pub use manager::{LoginResult, SessionManager};
