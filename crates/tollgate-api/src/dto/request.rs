//! Request DTOs with validation.

use serde::{Deserialize, Serialize};
use validator::Validate;

use tollgate_auth::credential::Registration;
use tollgate_core::types::{AccountType, NewAddress};

/// Registration body for `POST /api/v1/auth/`.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    /// Strength is checked by the password policy, not here.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub last_name: String,
    #[validate(length(max = 32))]
    pub phone: Option<String>,
    pub account_type: AccountType,
    #[validate(nested)]
    pub address: AddressRequest,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("account_type", &self.account_type)
            .finish_non_exhaustive()
    }
}

/// Postal address captured at registration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddressRequest {
    #[validate(length(min = 1, max = 200))]
    pub line1: String,
    #[validate(length(max = 200))]
    pub line2: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub city: String,
    #[validate(length(min = 1, max = 100))]
    pub state: String,
    #[validate(length(min = 2, max = 100))]
    pub country: String,
    #[validate(length(min = 1, max = 20))]
    pub postal_code: String,
}

impl From<RegisterRequest> for Registration {
    fn from(req: RegisterRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
            phone: req.phone,
            account_type: req.account_type,
            address: NewAddress {
                line1: req.address.line1,
                line2: req.address.line2,
                city: req.address.city,
                state: req.address.state,
                country: req.address.country,
                postal_code: req.address.postal_code,
            },
        }
    }
}

/// Body of `POST /api/v1/auth/refresh`.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

impl std::fmt::Debug for RefreshRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RefreshRequest { .. }")
    }
}
