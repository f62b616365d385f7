use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};

use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::auth::application::ports::outgoing::user_query::UserQuery;
use crate::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotifier, VerificationEmail,
};

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct ResendVerificationRequest {
    email: String,
}

#[derive(Debug, Clone)]
pub enum ResendVerificationRequestError {
    EmptyEmail,
    InvalidEmailFormat,
}

impl std::fmt::Display for ResendVerificationRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResendVerificationRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            ResendVerificationRequestError::InvalidEmailFormat => {
                write!(f, "Invalid email format")
            }
        }
    }
}

impl std::error::Error for ResendVerificationRequestError {}

impl ResendVerificationRequest {
    pub fn new(email: String) -> Result<Self, ResendVerificationRequestError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ResendVerificationRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(&email) {
            return Err(ResendVerificationRequestError::InvalidEmailFormat);
        }
        Ok(Self { email })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl<'de> Deserialize<'de> for ResendVerificationRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            email: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        ResendVerificationRequest::new(helper.email).map_err(serde::de::Error::custom)
    }
}

// ========================= Error =========================
#[derive(Debug, Clone)]
pub enum ResendVerificationError {
    TokenGenerationFailed(String),
    QueryError(String),
    RepositoryError(String),
}

impl std::fmt::Display for ResendVerificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResendVerificationError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            ResendVerificationError::QueryError(msg) => write!(f, "Query error: {}", msg),
            ResendVerificationError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ResendVerificationError {}

// ========================= Use Case =========================
#[async_trait]
pub trait IResendVerificationUseCase: Send + Sync {
    async fn execute(&self, request: ResendVerificationRequest)
        -> Result<(), ResendVerificationError>;
}

/// Always answers success for unknown or already-verified addresses so the
/// endpoint cannot be used to probe which emails are registered.
///
/// A fresh token overwrites the stored one, invalidating every link sent
/// before it.
pub struct ResendVerificationUseCase<Q, R, T, N>
where
    Q: UserQuery,
    R: UserRepository,
    T: TokenProvider,
    N: UserEmailNotifier,
{
    query: Q,
    repository: R,
    tokens: T,
    notifier: N,
}

impl<Q, R, T, N> ResendVerificationUseCase<Q, R, T, N>
where
    Q: UserQuery,
    R: UserRepository,
    T: TokenProvider,
    N: UserEmailNotifier,
{
    pub fn new(query: Q, repository: R, tokens: T, notifier: N) -> Self {
        Self {
            query,
            repository,
            tokens,
            notifier,
        }
    }
}

#[async_trait]
impl<Q, R, T, N> IResendVerificationUseCase for ResendVerificationUseCase<Q, R, T, N>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    T: TokenProvider + Send + Sync,
    N: UserEmailNotifier + Send + Sync,
{
    async fn execute(
        &self,
        request: ResendVerificationRequest,
    ) -> Result<(), ResendVerificationError> {
        let user = match self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| ResendVerificationError::QueryError(e.to_string()))?
        {
            Some(user) if !user.is_verified => user,
            _ => return Ok(()),
        };

        let token = self
            .tokens
            .issue_verification_token(user.id)
            .map_err(|e| ResendVerificationError::TokenGenerationFailed(e.to_string()))?;

        self.repository
            .store_verification_token(user.id, token.clone())
            .await
            .map_err(|e| ResendVerificationError::RepositoryError(e.to_string()))?;

        // The new token is already persisted, so a delivery failure is
        // recoverable by asking again. Log it, do not fail the request.
        if let Err(e) = self
            .notifier
            .send_verification_email(VerificationEmail {
                user_id: user.id,
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                token,
            })
            .await
        {
            tracing::warn!(
                user_id = %user.id,
                error = %e,
                "Failed to resend verification email"
            );
        }

        Ok(())
    }
}
