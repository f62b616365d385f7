use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_repository::{
    NewUser, UserChanges, UserRepository, UserRepositoryError,
};
use crate::kyc::application::domain::entities::{KycDocuments, KycStatus};

#[derive(Clone)]
pub struct UserRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    async fn load_active(&self, user_id: Uuid) -> Result<users::ActiveModel, UserRepositoryError> {
        let model = users::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(UserRepositoryError::UserNotFound)?;

        Ok(model.into())
    }

    async fn save(&self, active: users::ActiveModel) -> Result<User, UserRepositoryError> {
        let updated = active
            .update(self.db.as_ref())
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(updated.into_user())
    }
}

fn is_duplicate_key(message: &str) -> bool {
    message.contains("23505")
        || message.contains("duplicate key")
        || message.contains("unique constraint")
}

#[async_trait]
impl UserRepository for UserRepositoryPostgres {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let now = Utc::now();

        let active = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            first_name: Set(user.first_name),
            last_name: Set(user.last_name),
            role: Set(user.role.as_str().to_string()),
            is_verified: Set(false),
            email_verification_token: Set(None),
            kyc_status: Set(KycStatus::NotSubmitted.as_str().to_string()),
            kyc_status_message: Set(None),
            kyc_id_document_url: Set(None),
            kyc_id_document_public_id: Set(None),
            kyc_address_document_url: Set(None),
            kyc_address_document_public_id: Set(None),
            kyc_contact_email: Set(None),
            kyc_contact_phone: Set(None),
            kyc_submitted_at: Set(None),
            wallet_address: Set(None),
            wallet_connected: Set(false),
            wallet_nonce: Set(None),
            reset_password_token_hash: Set(None),
            reset_password_expires: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let inserted = active.insert(self.db.as_ref()).await.map_err(|e| {
            let message = e.to_string();
            if is_duplicate_key(&message) {
                UserRepositoryError::UserAlreadyExists
            } else {
                UserRepositoryError::DatabaseError(message)
            }
        })?;

        Ok(inserted.into_user())
    }

    async fn store_verification_token(
        &self,
        user_id: Uuid,
        token: String,
    ) -> Result<(), UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        active.email_verification_token = Set(Some(token));
        self.save(active).await?;
        Ok(())
    }

    async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        active.is_verified = Set(true);
        active.email_verification_token = Set(None);
        self.save(active).await?;
        Ok(())
    }

    async fn update_password(
        &self,
        user_id: Uuid,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        active.password_hash = Set(new_password_hash);
        active.reset_password_token_hash = Set(None);
        active.reset_password_expires = Set(None);
        self.save(active).await?;
        Ok(())
    }

    async fn store_reset_token(
        &self,
        user_id: Uuid,
        token_hash: String,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        active.reset_password_token_hash = Set(Some(token_hash));
        active.reset_password_expires = Set(Some(expires_at.into()));
        self.save(active).await?;
        Ok(())
    }

    async fn store_wallet_nonce(
        &self,
        user_id: Uuid,
        nonce: String,
    ) -> Result<(), UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        active.wallet_nonce = Set(Some(nonce));
        self.save(active).await?;
        Ok(())
    }

    async fn connect_wallet(
        &self,
        user_id: Uuid,
        address: String,
    ) -> Result<User, UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        active.wallet_address = Set(Some(address));
        active.wallet_connected = Set(true);
        active.wallet_nonce = Set(None);
        self.save(active).await
    }

    async fn store_kyc_submission(
        &self,
        user_id: Uuid,
        documents: KycDocuments,
    ) -> Result<User, UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        active.kyc_status = Set(KycStatus::Pending.as_str().to_string());
        active.kyc_status_message = Set(None);
        active.kyc_id_document_url = Set(Some(documents.id_document_url));
        active.kyc_id_document_public_id = Set(Some(documents.id_document_public_id));
        active.kyc_address_document_url = Set(Some(documents.address_document_url));
        active.kyc_address_document_public_id = Set(Some(documents.address_document_public_id));
        active.kyc_contact_email = Set(Some(documents.contact_email));
        active.kyc_contact_phone = Set(documents.contact_phone);
        active.kyc_submitted_at = Set(Some(documents.submitted_at.into()));
        self.save(active).await
    }

    async fn set_kyc_status(
        &self,
        user_id: Uuid,
        status: KycStatus,
        message: Option<String>,
        clear_documents: bool,
    ) -> Result<User, UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        active.kyc_status = Set(status.as_str().to_string());
        active.kyc_status_message = Set(message);
        if clear_documents {
            active.kyc_id_document_url = Set(None);
            active.kyc_id_document_public_id = Set(None);
            active.kyc_address_document_url = Set(None);
            active.kyc_address_document_public_id = Set(None);
            active.kyc_contact_email = Set(None);
            active.kyc_contact_phone = Set(None);
            active.kyc_submitted_at = Set(None);
        }
        self.save(active).await
    }

    async fn update_user(
        &self,
        user_id: Uuid,
        changes: UserChanges,
    ) -> Result<User, UserRepositoryError> {
        let mut active = self.load_active(user_id).await?;
        if let Some(first_name) = changes.first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = changes.last_name {
            active.last_name = Set(last_name);
        }
        if let Some(role) = changes.role {
            active.role = Set(role.as_str().to_string());
        }
        if let Some(is_verified) = changes.is_verified {
            active.is_verified = Set(is_verified);
        }
        self.save(active).await
    }

    async fn delete_user(&self, user_id: Uuid) -> Result<(), UserRepositoryError> {
        let model = users::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?
            .ok_or(UserRepositoryError::UserNotFound)?;

        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| UserRepositoryError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::sea_orm_entity::users::test_fixtures::sample_model;
    use crate::auth::application::domain::entities::UserRole;
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

    fn repo(db: sea_orm::DatabaseConnection) -> UserRepositoryPostgres {
        UserRepositoryPostgres::new(Arc::new(db))
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut inserted = sample_model();
        inserted.email = "new@example.com".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![inserted.clone()]])
            .into_connection();

        let new_user = NewUser {
            email: "new@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: UserRole::User,
        };

        let user = repo(db).create_user(new_user).await.unwrap();

        assert_eq!(user.email, "new@example.com");
        assert!(!user.is_verified);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Query(RuntimeErr::Internal(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ))])
            .into_connection();

        let new_user = NewUser {
            email: "taken@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            role: UserRole::User,
        };

        let err = repo(db).create_user(new_user).await.unwrap_err();

        assert!(matches!(err, UserRepositoryError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_mark_email_verified_clears_token() {
        let mut existing = sample_model();
        existing.email_verification_token = Some("stale-token".to_string());

        let mut updated = existing.clone();
        updated.is_verified = true;
        updated.email_verification_token = None;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()], vec![updated]])
            .into_connection();

        repo(db).mark_email_verified(existing.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_missing_user() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let err = repo(db)
            .store_verification_token(Uuid::new_v4(), "token".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, UserRepositoryError::UserNotFound));
    }

    #[tokio::test]
    async fn test_connect_wallet_clears_nonce() {
        let mut existing = sample_model();
        existing.wallet_nonce = Some("abcd".to_string());

        let mut updated = existing.clone();
        updated.wallet_address = Some("0x1234".to_string());
        updated.wallet_connected = true;
        updated.wallet_nonce = None;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()], vec![updated]])
            .into_connection();

        let user = repo(db)
            .connect_wallet(existing.id, "0x1234".to_string())
            .await
            .unwrap();

        assert!(user.wallet_connected);
        assert!(user.wallet_nonce.is_none());
        assert_eq!(user.wallet_address.as_deref(), Some("0x1234"));
    }

    #[tokio::test]
    async fn test_set_kyc_status_rejected_clears_bundle() {
        let mut existing = sample_model();
        existing.kyc_status = "pending".to_string();
        existing.kyc_id_document_url = Some("https://cdn.example.com/id.png".to_string());
        existing.kyc_id_document_public_id = Some("kyc/x/id.png".to_string());
        existing.kyc_address_document_url = Some("https://cdn.example.com/addr.pdf".to_string());
        existing.kyc_address_document_public_id = Some("kyc/x/addr.pdf".to_string());
        existing.kyc_contact_email = Some("contact@example.com".to_string());
        existing.kyc_submitted_at = Some(Utc::now().into());

        let mut updated = existing.clone();
        updated.kyc_status = "rejected".to_string();
        updated.kyc_status_message = Some("Blurry scan".to_string());
        updated.kyc_id_document_url = None;
        updated.kyc_id_document_public_id = None;
        updated.kyc_address_document_url = None;
        updated.kyc_address_document_public_id = None;
        updated.kyc_contact_email = None;
        updated.kyc_contact_phone = None;
        updated.kyc_submitted_at = None;

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()], vec![updated]])
            .into_connection();

        let user = repo(db)
            .set_kyc_status(
                existing.id,
                KycStatus::Rejected,
                Some("Blurry scan".to_string()),
                true,
            )
            .await
            .unwrap();

        assert_eq!(user.kyc_status, KycStatus::Rejected);
        assert!(user.kyc_documents.is_none());
    }

    #[tokio::test]
    async fn test_delete_user_success() {
        let existing = sample_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing.clone()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        repo(db).delete_user(existing.id).await.unwrap();
    }
}
