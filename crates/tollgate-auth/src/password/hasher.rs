//! Argon2id password hashing and verification.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{
        PasswordHash, PasswordHasher as ArgonHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use tollgate_core::config::AuthConfig;
use tollgate_core::error::AppError;

/// Handles password hashing and verification using Argon2id.
///
/// Cost parameters only apply to new hashes; verification reads the
/// parameters embedded in the stored PHC string.
#[derive(Clone)]
pub struct PasswordHasher {
    /// Configured Argon2id instance.
    argon2: Argon2<'static>,
}

impl std::fmt::Debug for PasswordHasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordHasher").finish_non_exhaustive()
    }
}

impl PasswordHasher {
    /// Creates a hasher with the cost parameters from auth configuration.
    pub fn new(config: &AuthConfig) -> Result<Self, AppError> {
        let params = Params::new(
            config.argon2_memory_kib,
            config.argon2_iterations,
            config.argon2_parallelism,
            None,
        )
        .map_err(|e| AppError::configuration(format!("Invalid Argon2 parameters: {e}")))?;

        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a plaintext password with a random salt.
    pub fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

        Ok(hash.to_string())
    }

    /// Verifies a plaintext password against a stored Argon2id hash.
    ///
    /// Returns `Ok(true)` if the password matches, `Ok(false)` if not.
    pub fn verify_password(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid password hash format: {e}")))?;

        match self.argon2.verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AppError::internal(format!(
                "Password verification failed: {e}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Minimum legal cost so the tests stay fast.
    fn cheap() -> AuthConfig {
        AuthConfig {
            argon2_memory_kib: 8,
            argon2_iterations: 1,
            argon2_parallelism: 1,
            ..AuthConfig::default()
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(&cheap()).unwrap();
        let hash = hasher.hash_password("correct horse battery").unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(hasher.verify_password("correct horse battery", &hash).unwrap());
        assert!(!hasher.verify_password("wrong horse battery", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let hasher = PasswordHasher::new(&cheap()).unwrap();
        let a = hasher.hash_password("same").unwrap();
        let b = hasher.hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_verify_uses_embedded_params() {
        let strong = PasswordHasher::new(&AuthConfig {
            argon2_memory_kib: 64,
            argon2_iterations: 2,
            ..cheap()
        })
        .unwrap();
        let hash = strong.hash_password("pw").unwrap();

        let weak = PasswordHasher::new(&cheap()).unwrap();
        assert!(weak.verify_password("pw", &hash).unwrap());
    }

    #[test]
    fn test_garbage_hash_is_internal_error() {
        let hasher = PasswordHasher::new(&cheap()).unwrap();
        assert!(hasher.verify_password("pw", "not-a-phc-string").is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = AuthConfig {
            argon2_parallelism: 0,
            ..cheap()
        };
        assert!(PasswordHasher::new(&config).is_err());
    }
}
