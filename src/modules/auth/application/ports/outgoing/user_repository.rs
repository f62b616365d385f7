use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use crate::kyc::application::domain::entities::{KycDocuments, KycStatus};
use crate::modules::auth::application::domain::entities::{User, UserRole};

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

/// Field-scoped admin patch; only `Some` fields are written.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<UserRole>,
    pub is_verified: Option<bool>,
}

/// Mutations are expressed per concern so only the touched columns are
/// written, instead of whole-row read-modify-write saves.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

    async fn store_verification_token(
        &self,
        user_id: Uuid,
        token: String,
    ) -> Result<(), UserRepositoryError>;

    /// Sets `is_verified` and clears the stored verification token in one
    /// update.
    async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;

    /// Overwrites the password hash and clears both reset-token fields.
    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError>;

    async fn store_reset_token(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError>;

    async fn store_wallet_nonce(
        &self,
        user_id: Uuid,
        nonce: String,
    ) -> Result<(), UserRepositoryError>;

    /// Persists the wallet linkage and clears the challenge nonce.
    async fn connect_wallet(
        &self,
        user_id: Uuid,
        address: String,
    ) -> Result<User, UserRepositoryError>;

    /// Overwrites the KYC bundle wholesale, sets status to `pending` and
    /// clears any prior rejection message.
    async fn store_kyc_submission(
        &self,
        user_id: Uuid,
        documents: KycDocuments,
    ) -> Result<User, UserRepositoryError>;

    /// Administrative status transition. When `clear_documents` is set the
    /// whole bundle is nulled out together with the status change.
    async fn set_kyc_status(
        &self,
        user_id: Uuid,
        status: KycStatus,
        message: Option<String>,
        clear_documents: bool,
    ) -> Result<User, UserRepositoryError>;

    async fn update_user(
        &self,
        user_id: Uuid,
        changes: UserChanges,
    ) -> Result<User, UserRepositoryError>;

    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;
}

#[derive(Debug)]
pub enum UserRepositoryError {
    UserAlreadyExists,
    UserNotFound,
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for UserRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRepositoryError::UserAlreadyExists => write!(f, "User already exists"),
            UserRepositoryError::UserNotFound => write!(f, "User not found"),
            UserRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}
