use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::wallet_challenge::{challenge_message, is_valid_address};
use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_query::UserQuery;
use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};
use crate::auth::application::ports::outgoing::wallet_verifier::WalletSignatureVerifier;

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct ConnectWalletRequest {
    address: String,
    signature: String,
}

#[derive(Debug, Clone)]
pub enum ConnectWalletRequestError {
    MalformedAddress,
    EmptySignature,
}

impl std::fmt::Display for ConnectWalletRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectWalletRequestError::MalformedAddress => write!(f, "Malformed wallet address"),
            ConnectWalletRequestError::EmptySignature => write!(f, "Signature cannot be empty"),
        }
    }
}

impl std::error::Error for ConnectWalletRequestError {}

impl ConnectWalletRequest {
    pub fn new(address: String, signature: String) -> Result<Self, ConnectWalletRequestError> {
        let address = address.trim().to_lowercase();
        if !is_valid_address(&address) {
            return Err(ConnectWalletRequestError::MalformedAddress);
        }

        let signature = signature.trim().to_string();
        if signature.is_empty() {
            return Err(ConnectWalletRequestError::EmptySignature);
        }

        Ok(Self { address, signature })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }
}

impl<'de> Deserialize<'de> for ConnectWalletRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            address: String,
            signature: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        ConnectWalletRequest::new(helper.address, helper.signature)
            .map_err(serde::de::Error::custom)
    }
}

// ========================= Error =========================
#[derive(Debug, Clone)]
pub enum ConnectWalletError {
    NoPendingChallenge,
    InvalidSignature,
    UserNotFound,
    QueryError(String),
    RepositoryError(String),
}

impl std::fmt::Display for ConnectWalletError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectWalletError::NoPendingChallenge => {
                write!(f, "No wallet challenge is pending for this account")
            }
            ConnectWalletError::InvalidSignature => write!(f, "Signature verification failed"),
            ConnectWalletError::UserNotFound => write!(f, "User not found"),
            ConnectWalletError::QueryError(msg) => write!(f, "Query error: {}", msg),
            ConnectWalletError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ConnectWalletError {}

// ========================= Use Case =========================
#[async_trait]
pub trait IConnectWalletUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        request: ConnectWalletRequest,
    ) -> Result<User, ConnectWalletError>;
}

/// Second leg of wallet linkage. The signature must recover to the claimed
/// address over the exact challenge text built from the stored nonce; the
/// nonce is cleared on success so a captured signature cannot be replayed.
pub struct ConnectWalletUseCase<Q, R, V>
where
    Q: UserQuery,
    R: UserRepository,
    V: WalletSignatureVerifier,
{
    query: Q,
    repository: R,
    verifier: V,
}

impl<Q, R, V> ConnectWalletUseCase<Q, R, V>
where
    Q: UserQuery,
    R: UserRepository,
    V: WalletSignatureVerifier,
{
    pub fn new(query: Q, repository: R, verifier: V) -> Self {
        Self {
            query,
            repository,
            verifier,
        }
    }
}

#[async_trait]
impl<Q, R, V> IConnectWalletUseCase for ConnectWalletUseCase<Q, R, V>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    V: WalletSignatureVerifier + Send + Sync,
{
    async fn execute(
        &self,
        user_id: Uuid,
        request: ConnectWalletRequest,
    ) -> Result<User, ConnectWalletError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| ConnectWalletError::QueryError(e.to_string()))?
            .ok_or(ConnectWalletError::UserNotFound)?;

        let nonce = user
            .wallet_nonce
            .as_deref()
            .ok_or(ConnectWalletError::NoPendingChallenge)?;

        let message = challenge_message(request.address(), nonce);

        self.verifier
            .verify(request.address(), &message, request.signature())
            .map_err(|e| {
                tracing::warn!(user_id = %user_id, error = %e, "Wallet signature rejected");
                ConnectWalletError::InvalidSignature
            })?;

        let user = self
            .repository
            .connect_wallet(user_id, request.address().to_string())
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => ConnectWalletError::UserNotFound,
                other => ConnectWalletError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %user_id, "Wallet linked");

        Ok(user)
    }
}
