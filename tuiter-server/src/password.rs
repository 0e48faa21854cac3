use anyhow::{anyhow, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tokio::task;

/// Hashes `password` into an argon2id PHC string.
pub fn hash(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("Error hashing password: {e}"))
}

/// A stored value that is not a valid PHC string never verifies.
pub fn verify(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// [`hash`] on the blocking pool, for use from handlers.
pub async fn spawn_hash(password: String) -> Result<String> {
    task::spawn_blocking(move || hash(&password)).await?
}

/// [`verify`] on the blocking pool, for use from handlers.
pub async fn spawn_verify(password: String, hash: String) -> Result<bool> {
    Ok(task::spawn_blocking(move || verify(&password, &hash)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() -> Result<()> {
        let hashed = hash("hunter2")?;
        assert!(hashed.starts_with("$argon2id$"));
        assert!(verify("hunter2", &hashed));
        assert!(!verify("hunter3", &hashed));
        Ok(())
    }

    #[test]
    fn plaintext_in_store_never_verifies() {
        assert!(!verify("hunter2", "hunter2"));
        assert!(!verify("", ""));
    }

    #[tokio::test]
    async fn spawned_hashing_matches_inline_verify() -> Result<()> {
        let hashed = spawn_hash("hunter2".to_string()).await?;
        assert!(verify("hunter2", &hashed));
        assert!(spawn_verify("hunter2".to_string(), hashed.clone()).await?);
        assert!(!spawn_verify("hunter3".to_string(), hashed).await?);
        Ok(())
    }
}
