use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::error::{AppError, AppResult};

pub async fn hash_password(password: &str) -> AppResult<String> {
    let password = password.to_string();

    tokio::task::spawn_blocking(move || {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Auth(format!("Failed to hash password: {}", e)))
    })
    .await
    .map_err(|e| AppError::Other(format!("Task join error: {}", e)))?
}

/// Compares a candidate password against a stored PHC-string hash. A
/// mismatch is always [`AppError::InvalidCredentials`] so login failures are
/// indistinguishable from unknown usernames.
pub async fn verify_password(password: &str, password_hash: &str) -> AppResult<()> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();

    tokio::task::spawn_blocking(move || {
        let parsed_hash = PasswordHash::new(&password_hash)
            .map_err(|e| AppError::Auth(format!("Invalid password hash: {}", e)))?;

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::InvalidCredentials)
    })
    .await
    .map_err(|e| AppError::Other(format!("Task join error: {}", e)))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify_roundtrips() {
        let hash = hash_password("pw123456").await.unwrap();

        assert_ne!(hash, "pw123456");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("pw123456", &hash).await.is_ok());
    }

    #[tokio::test]
    async fn wrong_password_fails_with_invalid_credentials() {
        let hash = hash_password("pw123456").await.unwrap();

        match verify_password("pw1234567", &hash).await {
            Err(AppError::InvalidCredentials) => {}
            other => panic!("expected InvalidCredentials, got {:?}", other.err()),
        }
    }

    #[tokio::test]
    async fn same_password_hashes_differently_per_salt() {
        let a = hash_password("pw123456").await.unwrap();
        let b = hash_password("pw123456").await.unwrap();
        assert_ne!(a, b);
    }
}
