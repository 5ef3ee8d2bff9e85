//! Identity types: token claims and the records exchanged with the user store.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Kind of marketplace account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Books stays.
    Guest,
    /// Lists properties.
    Host,
}

impl AccountType {
    /// Return the account type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Guest => "guest",
            Self::Host => "host",
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "guest" => Ok(Self::Guest),
            "host" => Ok(Self::Host),
            other => Err(AppError::validation(format!(
                "Unknown account type: '{other}'"
            ))),
        }
    }
}

/// Identity payload embedded in every token.
///
/// Immutable once a token is issued; rotation copies it verbatim into the
/// new pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User primary key.
    #[serde(rename = "id")]
    pub subject_id: i64,
    /// Login email.
    pub email: String,
    /// Account type at issuance.
    #[serde(rename = "type")]
    pub account_type: AccountType,
}

impl Claims {
    pub fn new(subject_id: i64, email: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            subject_id,
            email: email.into(),
            account_type,
        }
    }
}

/// What the user store returns for a known identifier.
#[derive(Clone)]
pub struct StoredCredentials {
    /// PHC-formatted password hash.
    pub password_hash: String,
    /// Claims to embed in issued tokens.
    pub claims: Claims,
}

impl fmt::Debug for StoredCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoredCredentials")
            .field("password_hash", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}

/// Address captured at registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAddress {
    pub line1: String,
    pub line2: Option<String>,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
}

/// A user ready to be persisted. The password is already hashed.
#[derive(Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub account_type: AccountType,
    pub address: NewAddress,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone", &self.phone)
            .field("account_type", &self.account_type)
            .field("address", &self.address)
            .finish()
    }
}
