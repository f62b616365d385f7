use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Deserializer};

use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::auth::application::ports::outgoing::user_query::UserQuery;
use crate::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::auth::application::services::hash::hash_token;

/// Minimum length for a replacement password. Applies only here, not at
/// registration.
const MIN_PASSWORD_LEN: usize = 8;

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct ResetPasswordRequest {
    token: String,
    new_password: String,
}

#[derive(Debug, Clone)]
pub enum ResetPasswordRequestError {
    EmptyToken,
    PasswordTooShort,
}

impl std::fmt::Display for ResetPasswordRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetPasswordRequestError::EmptyToken => write!(f, "Token cannot be empty"),
            ResetPasswordRequestError::PasswordTooShort => {
                write!(f, "Password must be at least {} characters", MIN_PASSWORD_LEN)
            }
        }
    }
}

impl std::error::Error for ResetPasswordRequestError {}

impl ResetPasswordRequest {
    pub fn new(token: String, new_password: String) -> Result<Self, ResetPasswordRequestError> {
        let token = token.trim().to_string();
        if token.is_empty() {
            return Err(ResetPasswordRequestError::EmptyToken);
        }

        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ResetPasswordRequestError::PasswordTooShort);
        }

        Ok(Self {
            token,
            new_password,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn new_password(&self) -> &str {
        &self.new_password
    }
}

impl<'de> Deserialize<'de> for ResetPasswordRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper {
            token: String,
            new_password: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        ResetPasswordRequest::new(helper.token, helper.new_password)
            .map_err(serde::de::Error::custom)
    }
}

// ========================= Error =========================
#[derive(Debug, Clone)]
pub enum ResetPasswordError {
    InvalidOrExpiredToken,
    HashingFailed(String),
    QueryError(String),
    RepositoryError(String),
}

impl std::fmt::Display for ResetPasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResetPasswordError::InvalidOrExpiredToken => {
                write!(f, "Reset token is invalid or has expired")
            }
            ResetPasswordError::HashingFailed(msg) => write!(f, "Hashing failed: {}", msg),
            ResetPasswordError::QueryError(msg) => write!(f, "Query error: {}", msg),
            ResetPasswordError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ResetPasswordError {}

// ========================= Use Case =========================
#[async_trait]
pub trait IResetPasswordUseCase: Send + Sync {
    async fn execute(&self, request: ResetPasswordRequest) -> Result<(), ResetPasswordError>;
}

/// Completes the reset flow. A successful reset clears the stored token
/// hash, so each link is single-use.
pub struct ResetPasswordUseCase<Q, R, H>
where
    Q: UserQuery,
    R: UserRepository,
    H: PasswordHasher,
{
    query: Q,
    repository: R,
    hasher: H,
}

impl<Q, R, H> ResetPasswordUseCase<Q, R, H>
where
    Q: UserQuery,
    R: UserRepository,
    H: PasswordHasher,
{
    pub fn new(query: Q, repository: R, hasher: H) -> Self {
        Self {
            query,
            repository,
            hasher,
        }
    }
}

#[async_trait]
impl<Q, R, H> IResetPasswordUseCase for ResetPasswordUseCase<Q, R, H>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
{
    async fn execute(&self, request: ResetPasswordRequest) -> Result<(), ResetPasswordError> {
        let user = self
            .query
            .find_by_reset_token_hash(&hash_token(request.token()))
            .await
            .map_err(|e| ResetPasswordError::QueryError(e.to_string()))?
            .ok_or(ResetPasswordError::InvalidOrExpiredToken)?;

        match user.reset_password_expires {
            Some(expires) if expires > Utc::now() => {}
            _ => return Err(ResetPasswordError::InvalidOrExpiredToken),
        }

        let password_hash = self
            .hasher
            .hash_password(request.new_password())
            .await
            .map_err(|e| ResetPasswordError::HashingFailed(e.to_string()))?;

        self.repository
            .update_password(user.id, password_hash)
            .await
            .map_err(|e| ResetPasswordError::RepositoryError(e.to_string()))?;

        tracing::info!(user_id = %user.id, "Password reset completed");

        Ok(())
    }
}
