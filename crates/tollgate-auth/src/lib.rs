//! # tollgate-auth
//!
//! Token codec, token lifecycle, and credential verification for Tollgate.
//!
//! ## Modules
//!
//! - `jwt`: HS256 token creation and validation
//! - `lifecycle`: issuance, denylist-aware verification, and rotation
//! - `credential`: password verification and account registration
//! - `password`: Argon2id hashing and password policy
//! - `session`: the flows exposed over HTTP

pub mod credential;
pub mod jwt;
pub mod lifecycle;
pub mod password;
pub mod session;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use credential::{CredentialVerifier, Registration, UserRegistrar};
pub use jwt::{JwtDecoder, JwtEncoder, TokenClaims, TokenKind, TokenPair};
pub use lifecycle::{TokenLifecycleManager, TokenState};
pub use password::{PasswordHasher, PasswordValidator};
pub use session::{LoginResult, SessionManager};
