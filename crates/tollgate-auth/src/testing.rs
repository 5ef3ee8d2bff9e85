//! In-process fixtures shared by unit and integration tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use tollgate_core::config::AuthConfig;
use tollgate_core::error::AppError;
use tollgate_core::result::AppResult;
use tollgate_core::traits::UserStore;
use tollgate_core::types::{AccountType, Claims, NewAddress, NewUser, StoredCredentials};

use crate::credential::Registration;

/// Auth configuration with the cheapest legal Argon2 cost.
pub fn cheap_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret-do-not-use".to_string(),
        argon2_memory_kib: 8,
        argon2_iterations: 1,
        argon2_parallelism: 1,
        ..AuthConfig::default()
    }
}

/// A registration that passes the password policy.
pub fn sample_registration(email: &str) -> Registration {
    Registration {
        email: email.to_string(),
        password: "violet-Anchor-harbor-42".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Lopez".to_string(),
        phone: Some("+34 600 000 000".to_string()),
        account_type: AccountType::Guest,
        address: NewAddress {
            line1: "Calle Mayor 1".to_string(),
            line2: None,
            city: "Madrid".to_string(),
            state: "Madrid".to_string(),
            country: "ES".to_string(),
            postal_code: "28013".to_string(),
        },
    }
}

/// User store kept in a map keyed by email.
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    users: RwLock<HashMap<String, StoredCredentials>>,
}

impl InMemoryUsers {
    /// Insert a user directly, bypassing registration.
    pub async fn insert(&self, email: &str, password_hash: &str, claims: Claims) {
        self.users.write().await.insert(
            email.to_string(),
            StoredCredentials {
                password_hash: password_hash.to_string(),
                claims,
            },
        );
    }
}

#[async_trait]
impl UserStore for InMemoryUsers {
    async fn lookup_credentials(&self, identifier: &str) -> AppResult<Option<StoredCredentials>> {
        Ok(self.users.read().await.get(identifier).cloned())
    }

    async fn persist_user(&self, user: &NewUser) -> AppResult<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.email) {
            return Err(AppError::conflict(format!(
                "Email '{}' is already registered",
                user.email
            )));
        }
        let id = users.len() as i64 + 1;
        users.insert(
            user.email.clone(),
            StoredCredentials {
                password_hash: user.password_hash.clone(),
                claims: Claims::new(id, user.email.clone(), user.account_type),
            },
        );
        Ok(())
    }
}
