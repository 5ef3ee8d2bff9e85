//! Token codec: signed, expiring tokens carrying identity claims.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::{TokenClaims, TokenKind};
pub use decoder::{JwtDecoder, ensure_kind};
pub use encoder::{JwtEncoder, TokenPair};
