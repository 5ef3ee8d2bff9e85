//! New account registration: policy check, hashing, persistence.

use std::sync::Arc;

use tracing::info;

use tollgate_core::result::AppResult;
use tollgate_core::traits::UserStore;
use tollgate_core::types::{AccountType, NewAddress, NewUser};

use crate::password::{PasswordHasher, PasswordValidator};

/// A registration request with the plaintext password.
#[derive(Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub account_type: AccountType,
    pub address: NewAddress,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("email", &self.email)
            .field("account_type", &self.account_type)
            .finish_non_exhaustive()
    }
}

/// Creates user accounts.
#[derive(Debug, Clone)]
pub struct UserRegistrar {
    users: Arc<dyn UserStore>,
    hasher: PasswordHasher,
    validator: PasswordValidator,
}

impl UserRegistrar {
    pub fn new(
        users: Arc<dyn UserStore>,
        hasher: PasswordHasher,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            users,
            hasher,
            validator,
        }
    }

    /// Validates the password, hashes it and persists the account.
    ///
    /// An already registered email surfaces as `Conflict` from the store.
    pub async fn register(&self, registration: Registration) -> AppResult<()> {
        let email = registration.email.trim().to_lowercase();
        self.validator.validate(
            &registration.password,
            &[&email, &registration.first_name, &registration.last_name],
        )?;

        let password_hash = self.hasher.hash_password(&registration.password)?;

        let user = NewUser {
            email,
            password_hash,
            first_name: registration.first_name,
            last_name: registration.last_name,
            phone: registration.phone,
            account_type: registration.account_type,
            address: registration.address,
        };
        self.users.persist_user(&user).await?;

        info!(email = %user.email, account_type = %user.account_type, "Registered user");
        Ok(())
    }
}
