use rand::RngCore;
use sha2::{Digest, Sha256};

/// Raw reset-token length in bytes before hex encoding.
const RESET_TOKEN_BYTES: usize = 32;

/// Generate a high-entropy password-reset token.
///
/// The raw value is emailed to the user and never persisted; only
/// [`hash_token`] of it is stored, so a database leak cannot be replayed.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Hash a token using SHA-256 for storage
/// Never store raw tokens in the database!
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
