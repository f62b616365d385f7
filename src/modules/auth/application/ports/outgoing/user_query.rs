use async_trait::async_trait;
use std::fmt;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::User;

/// Aggregated counters for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct UserStats {
    pub total_users: u64,
    pub verified_users: u64,
    pub kyc_pending: u64,
    pub kyc_approved: u64,
    pub kyc_rejected: u64,
    pub wallets_connected: u64,
}

#[async_trait]
pub trait UserQuery: Send + Sync {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError>;

    /// Lookup is case-insensitive; callers pass the raw address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, UserQueryError>;

    async fn list_all(&self) -> Result<Vec<User>, UserQueryError>;

    async fn list_kyc_pending(&self) -> Result<Vec<User>, UserQueryError>;

    async fn count_stats(&self) -> Result<UserStats, UserQueryError>;
}

#[derive(Debug)]
pub enum UserQueryError {
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for UserQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserQueryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}
