use async_trait::async_trait;
use rand::Rng;
use serde::Serialize;

use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::gate::application::ports::outgoing::SettingsRepository;

/// Generated secret length in characters.
const PASSWORD_LEN: usize = 16;

/// Unambiguous alphabet: no 0/O, 1/l/I pairs, since the secret is shared
/// with people over side channels.
const ALPHABET: &[u8] = b"abcdefghjkmnpqrstuvwxyzABCDEFGHJKMNPQRSTUVWXYZ23456789";

fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    (0..PASSWORD_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[derive(Debug, Clone)]
pub enum GenerateAccessPasswordError {
    HashingFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for GenerateAccessPasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerateAccessPasswordError::HashingFailed(msg) => {
                write!(f, "Hashing failed: {}", msg)
            }
            GenerateAccessPasswordError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GenerateAccessPasswordError {}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedAccessPassword {
    /// Shown exactly once; only the hash survives this call.
    pub password: String,
}

#[async_trait]
pub trait IGenerateAccessPasswordUseCase: Send + Sync {
    async fn execute(&self) -> Result<GeneratedAccessPassword, GenerateAccessPasswordError>;
}

/// Rotates the shared gate secret. Existing site-access tokens stay valid
/// until they expire; only future password exchanges see the new secret.
pub struct GenerateAccessPasswordUseCase<S, H>
where
    S: SettingsRepository,
    H: PasswordHasher,
{
    settings: S,
    hasher: H,
}

impl<S, H> GenerateAccessPasswordUseCase<S, H>
where
    S: SettingsRepository,
    H: PasswordHasher,
{
    pub fn new(settings: S, hasher: H) -> Self {
        Self { settings, hasher }
    }
}

#[async_trait]
impl<S, H> IGenerateAccessPasswordUseCase for GenerateAccessPasswordUseCase<S, H>
where
    S: SettingsRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
{
    async fn execute(&self) -> Result<GeneratedAccessPassword, GenerateAccessPasswordError> {
        let password = generate_password();

        let hash = self
            .hasher
            .hash_password(&password)
            .await
            .map_err(|e| GenerateAccessPasswordError::HashingFailed(e.to_string()))?;

        self.settings
            .set_access_password_hash(hash)
            .await
            .map_err(|e| GenerateAccessPasswordError::RepositoryError(e.to_string()))?;

        tracing::info!("Site access password rotated");

        Ok(GeneratedAccessPassword { password })
    }
}
