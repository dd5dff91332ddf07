use anyhow::{Context, Result};
use tokio::task;

/// Hash a password with bcrypt. The salt is generated internally, so
/// two hashes of the same password never match.
pub fn hash(plain: &str, cost: u32) -> Result<String> {
    bcrypt::hash(plain, cost).context("Failed to hash password")
}

/// Verify a password against a stored hash. A wrong password is
/// `Ok(false)`; only a malformed hash is an error.
pub fn verify(plain: &str, hashed: &str) -> Result<bool> {
    bcrypt::verify(plain, hashed).context("Invalid password hash format")
}

/// Hash on a blocking thread. Bcrypt is CPU-intensive by design and
/// would stall the async runtime if run inline.
pub async fn hash_blocking(plain: &str, cost: u32) -> Result<String> {
    let plain = plain.to_string();
    task::spawn_blocking(move || hash(&plain, cost))
        .await
        .context("Password hashing task panicked")?
}

/// Verify on a blocking thread, see [`hash_blocking`].
pub async fn verify_blocking(plain: &str, hashed: &str) -> Result<bool> {
    let plain = plain.to_string();
    let hashed = hashed.to_string();
    task::spawn_blocking(move || verify(&plain, &hashed))
        .await
        .context("Password verification task panicked")?
}
