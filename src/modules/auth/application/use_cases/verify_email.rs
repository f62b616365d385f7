use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::ports::outgoing::token_provider::{
    TokenError, TokenProvider, TokenPurpose,
};
use crate::auth::application::ports::outgoing::user_query::UserQuery;
use crate::auth::application::ports::outgoing::user_repository::UserRepository;

#[derive(Debug, Clone)]
pub enum VerifyEmailError {
    InvalidToken,
    TokenExpired,
    UserNotFound,
    QueryError(String),
    RepositoryError(String),
}

impl std::fmt::Display for VerifyEmailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyEmailError::InvalidToken => write!(f, "Invalid verification token"),
            VerifyEmailError::TokenExpired => write!(f, "Verification token has expired"),
            VerifyEmailError::UserNotFound => write!(f, "User not found"),
            VerifyEmailError::QueryError(msg) => write!(f, "Query error: {}", msg),
            VerifyEmailError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for VerifyEmailError {}

#[derive(Debug, Clone)]
pub struct VerifyEmailResponse {
    pub user_id: Uuid,
    pub email: String,
    /// True when the account was verified before this call; the operation is
    /// idempotent.
    pub already_verified: bool,
}

#[async_trait]
pub trait IVerifyEmailUseCase: Send + Sync {
    async fn execute(&self, token: &str) -> Result<VerifyEmailResponse, VerifyEmailError>;
}

/// Email verification checks two things: the token must verify as a
/// current email-verification token, and it must byte-match the token
/// stored on the user row. The second check invalidates superseded tokens
/// after a resend even though they still verify cryptographically.
pub struct VerifyEmailUseCase<T, Q, R>
where
    T: TokenProvider,
    Q: UserQuery,
    R: UserRepository,
{
    tokens: T,
    query: Q,
    repository: R,
}

impl<T, Q, R> VerifyEmailUseCase<T, Q, R>
where
    T: TokenProvider,
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(tokens: T, query: Q, repository: R) -> Self {
        Self {
            tokens,
            query,
            repository,
        }
    }
}

#[async_trait]
impl<T, Q, R> IVerifyEmailUseCase for VerifyEmailUseCase<T, Q, R>
where
    T: TokenProvider + Send + Sync,
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
{
    async fn execute(&self, token: &str) -> Result<VerifyEmailResponse, VerifyEmailError> {
        let claims = self
            .tokens
            .verify(token, TokenPurpose::EmailVerification)
            .map_err(|e| match e {
                TokenError::Expired => VerifyEmailError::TokenExpired,
                _ => VerifyEmailError::InvalidToken,
            })?;

        let user_id = claims
            .subject_user_id()
            .ok_or(VerifyEmailError::InvalidToken)?;

        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| VerifyEmailError::QueryError(e.to_string()))?
            .ok_or(VerifyEmailError::UserNotFound)?;

        if user.is_verified {
            return Ok(VerifyEmailResponse {
                user_id,
                email: user.email,
                already_verified: true,
            });
        }

        match &user.email_verification_token {
            Some(stored) if stored == token => {}
            _ => return Err(VerifyEmailError::InvalidToken),
        }

        self.repository
            .mark_email_verified(user_id)
            .await
            .map_err(|e| VerifyEmailError::RepositoryError(e.to_string()))?;

        Ok(VerifyEmailResponse {
            user_id,
            email: user.email,
            already_verified: false,
        })
    }
}
