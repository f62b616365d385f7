pub mod argon2_hasher;
pub mod ethereum_verifier;
