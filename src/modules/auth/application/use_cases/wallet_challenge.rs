use async_trait::async_trait;
use rand::RngCore;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};

/// Nonce length in bytes before hex encoding.
const NONCE_BYTES: usize = 16;

/// The exact text the wallet is asked to sign. Both sides must agree on it
/// byte for byte, so the nonce and address are interpolated nowhere else.
pub fn challenge_message(address: &str, nonce: &str) -> String {
    format!(
        "Sign this message to link your wallet to your Oriro account.\n\nWallet: {}\nNonce: {}",
        address, nonce
    )
}

/// `0x` followed by 40 hex characters.
pub fn is_valid_address(address: &str) -> bool {
    address.len() == 42
        && address.starts_with("0x")
        && address[2..].chars().all(|c| c.is_ascii_hexdigit())
}

fn generate_nonce() -> String {
    let mut bytes = [0u8; NONCE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

// ========================= Error =========================
#[derive(Debug, Clone)]
pub enum WalletChallengeError {
    MalformedAddress,
    UserNotFound,
    RepositoryError(String),
}

impl std::fmt::Display for WalletChallengeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalletChallengeError::MalformedAddress => write!(f, "Malformed wallet address"),
            WalletChallengeError::UserNotFound => write!(f, "User not found"),
            WalletChallengeError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for WalletChallengeError {}

// ========================= Response =========================
#[derive(Debug, Clone, Serialize)]
pub struct WalletChallengeResponse {
    pub message: String,
}

// ========================= Use Case =========================
#[async_trait]
pub trait IWalletChallengeUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        address: &str,
    ) -> Result<WalletChallengeResponse, WalletChallengeError>;
}

/// First leg of wallet linkage: mint a nonce, store it on the user and
/// return the message the wallet must sign. Asking again simply replaces
/// the pending nonce.
pub struct WalletChallengeUseCase<R>
where
    R: UserRepository,
{
    repository: R,
}

impl<R> WalletChallengeUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R> IWalletChallengeUseCase for WalletChallengeUseCase<R>
where
    R: UserRepository + Send + Sync,
{
    async fn execute(
        &self,
        user_id: Uuid,
        address: &str,
    ) -> Result<WalletChallengeResponse, WalletChallengeError> {
        let address = address.trim().to_lowercase();
        if !is_valid_address(&address) {
            return Err(WalletChallengeError::MalformedAddress);
        }

        let nonce = generate_nonce();

        self.repository
            .store_wallet_nonce(user_id, nonce.clone())
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => WalletChallengeError::UserNotFound,
                other => WalletChallengeError::RepositoryError(other.to_string()),
            })?;

        Ok(WalletChallengeResponse {
            message: challenge_message(&address, &nonce),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::mocks::MockUserRepositoryPort;

    const ADDRESS: &str = "0x52908400098527886e0f7030069857d2e4169ee7";

    #[test]
    fn test_address_validation() {
        assert!(is_valid_address(ADDRESS));
        assert!(!is_valid_address("52908400098527886e0f7030069857d2e4169ee7"));
        assert!(!is_valid_address("0x5290"));
        assert!(!is_valid_address("0xZZ908400098527886e0f7030069857d2e4169ee7"));
    }

    #[tokio::test]
    async fn test_challenge_contains_address_and_stored_nonce() {
        let user_id = Uuid::new_v4();

        let stored = std::sync::Arc::new(std::sync::Mutex::new(None::<String>));
        let stored_clone = stored.clone();
        let mut repository = MockUserRepositoryPort::new();
        repository
            .expect_store_wallet_nonce()
            .times(1)
            .returning(move |_, nonce| {
                *stored_clone.lock().unwrap() = Some(nonce);
                Ok(())
            });

        let use_case = WalletChallengeUseCase::new(repository);
        let response = use_case.execute(user_id, ADDRESS).await.expect("Expected Ok");

        let nonce = stored.lock().unwrap().clone().expect("Nonce stored");
        assert_eq!(response.message, challenge_message(ADDRESS, &nonce));
    }

    #[tokio::test]
    async fn test_address_is_lowercased() {
        let mixed = "0x52908400098527886E0F7030069857D2E4169EE7";

        let mut repository = MockUserRepositoryPort::new();
        repository
            .expect_store_wallet_nonce()
            .returning(|_, _| Ok(()));

        let use_case = WalletChallengeUseCase::new(repository);
        let response = use_case
            .execute(Uuid::new_v4(), mixed)
            .await
            .expect("Expected Ok");

        assert!(response.message.contains(ADDRESS));
    }

    #[tokio::test]
    async fn test_malformed_address_rejected() {
        let use_case = WalletChallengeUseCase::new(MockUserRepositoryPort::new());

        let result = use_case.execute(Uuid::new_v4(), "0xnope").await;

        assert!(matches!(result, Err(WalletChallengeError::MalformedAddress)));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let mut repository = MockUserRepositoryPort::new();
        repository
            .expect_store_wallet_nonce()
            .returning(|_, _| Err(UserRepositoryError::UserNotFound));

        let use_case = WalletChallengeUseCase::new(repository);
        let result = use_case.execute(Uuid::new_v4(), ADDRESS).await;

        assert!(matches!(result, Err(WalletChallengeError::UserNotFound)));
    }
}
