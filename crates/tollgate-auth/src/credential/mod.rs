//! Credential verification and account registration.

pub mod registration;
pub mod verifier;

pub use registration::{Registration, UserRegistrar};
pub use verifier::CredentialVerifier;
