use async_trait::async_trait;
use chrono::Utc;

use crate::auth::application::ports::outgoing::user_query::UserQuery;
use crate::auth::application::services::hash::hash_token;

#[derive(Debug, Clone)]
pub enum VerifyResetTokenError {
    QueryError(String),
}

impl std::fmt::Display for VerifyResetTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifyResetTokenError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for VerifyResetTokenError {}

#[async_trait]
pub trait IVerifyResetTokenUseCase: Send + Sync {
    /// Returns whether the raw token matches a stored, unexpired reset hash.
    async fn execute(&self, token: &str) -> Result<bool, VerifyResetTokenError>;
}

/// Read-only precheck so the reset form can reject dead links before asking
/// for a new password.
pub struct VerifyResetTokenUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> VerifyResetTokenUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IVerifyResetTokenUseCase for VerifyResetTokenUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self, token: &str) -> Result<bool, VerifyResetTokenError> {
        if token.trim().is_empty() {
            return Ok(false);
        }

        let user = match self
            .query
            .find_by_reset_token_hash(&hash_token(token))
            .await
            .map_err(|e| VerifyResetTokenError::QueryError(e.to_string()))?
        {
            Some(user) => user,
            None => return Ok(false),
        };

        let valid = matches!(user.reset_password_expires, Some(expires) if expires > Utc::now());
        Ok(valid)
    }
}
