//! mockall doubles for the outgoing ports, shared across use-case and route
//! tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use super::user_query::{UserQuery, UserQueryError, UserStats};
use super::user_repository::{NewUser, UserChanges, UserRepository, UserRepositoryError};
use crate::auth::application::domain::entities::User;
use crate::kyc::application::domain::entities::{KycDocuments, KycStatus};

mock! {
    pub UserRepositoryPort {}

    #[async_trait]
    impl UserRepository for UserRepositoryPort {
        async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;

        async fn store_verification_token(
            &self,
            user_id: Uuid,
            token: String,
        ) -> Result<(), UserRepositoryError>;

        async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), UserRepositoryError>;

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

        async fn connect_wallet(
            &self,
            user_id: Uuid,
            address: String,
        ) -> Result<User, UserRepositoryError>;

        async fn store_kyc_submission(
            &self,
            user_id: Uuid,
            documents: KycDocuments,
        ) -> Result<User, UserRepositoryError>;

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
}

mock! {
    pub UserQueryPort {}

    #[async_trait]
    impl UserQuery for UserQueryPort {
        async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError>;

        async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;

        async fn find_by_reset_token_hash(
            &self,
            token_hash: &str,
        ) -> Result<Option<User>, UserQueryError>;

        async fn list_all(&self) -> Result<Vec<User>, UserQueryError>;

        async fn list_kyc_pending(&self) -> Result<Vec<User>, UserQueryError>;

        async fn count_stats(&self) -> Result<UserStats, UserQueryError>;
    }
}
