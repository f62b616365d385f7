use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_query::{
    UserQuery, UserQueryError, UserStats,
};
use crate::kyc::application::domain::entities::KycStatus;

#[derive(Clone)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_err(e: sea_orm::DbErr) -> UserQueryError {
    UserQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, UserQueryError> {
        let model = users::Entity::find_by_id(user_id)
            .one(self.db.as_ref())
            .await
            .map_err(map_err)?;

        Ok(model.map(users::Model::into_user))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let model = users::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(users::Column::Email)))
                    .eq(email.to_lowercase()),
            )
            .one(self.db.as_ref())
            .await
            .map_err(map_err)?;

        Ok(model.map(users::Model::into_user))
    }

    async fn find_by_reset_token_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<User>, UserQueryError> {
        let model = users::Entity::find()
            .filter(users::Column::ResetPasswordTokenHash.eq(token_hash))
            .one(self.db.as_ref())
            .await
            .map_err(map_err)?;

        Ok(model.map(users::Model::into_user))
    }

    async fn list_all(&self) -> Result<Vec<User>, UserQueryError> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_err)?;

        Ok(models.into_iter().map(users::Model::into_user).collect())
    }

    async fn list_kyc_pending(&self) -> Result<Vec<User>, UserQueryError> {
        let models = users::Entity::find()
            .filter(users::Column::KycStatus.eq(KycStatus::Pending.as_str()))
            .order_by_asc(users::Column::KycSubmittedAt)
            .all(self.db.as_ref())
            .await
            .map_err(map_err)?;

        Ok(models.into_iter().map(users::Model::into_user).collect())
    }

    async fn count_stats(&self) -> Result<UserStats, UserQueryError> {
        let db = self.db.as_ref();

        let total_users = users::Entity::find().count(db).await.map_err(map_err)?;

        let verified_users = users::Entity::find()
            .filter(users::Column::IsVerified.eq(true))
            .count(db)
            .await
            .map_err(map_err)?;

        let kyc_pending = users::Entity::find()
            .filter(users::Column::KycStatus.eq(KycStatus::Pending.as_str()))
            .count(db)
            .await
            .map_err(map_err)?;

        let kyc_approved = users::Entity::find()
            .filter(users::Column::KycStatus.eq(KycStatus::Approved.as_str()))
            .count(db)
            .await
            .map_err(map_err)?;

        let kyc_rejected = users::Entity::find()
            .filter(users::Column::KycStatus.eq(KycStatus::Rejected.as_str()))
            .count(db)
            .await
            .map_err(map_err)?;

        let wallets_connected = users::Entity::find()
            .filter(users::Column::WalletConnected.eq(true))
            .count(db)
            .await
            .map_err(map_err)?;

        Ok(UserStats {
            total_users,
            verified_users,
            kyc_pending,
            kyc_approved,
            kyc_rejected,
            wallets_connected,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::sea_orm_entity::users::test_fixtures::sample_model;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn query(db: sea_orm::DatabaseConnection) -> UserQueryPostgres {
        UserQueryPostgres::new(Arc::new(db))
    }

    #[tokio::test]
    async fn test_find_by_email_found() {
        let model = sample_model();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model.clone()]])
            .into_connection();

        let user = query(db).find_by_email("USER@example.com").await.unwrap();

        assert_eq!(user.unwrap().email, model.email);
    }

    #[tokio::test]
    async fn test_find_by_email_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<users::Model>::new()])
            .into_connection();

        let user = query(db).find_by_email("ghost@example.com").await.unwrap();

        assert!(user.is_none());
    }

    #[tokio::test]
    async fn test_list_kyc_pending_maps_models() {
        let mut model = sample_model();
        model.kyc_status = "pending".to_string();

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model.clone(), model.clone()]])
            .into_connection();

        let users = query(db).list_kyc_pending().await.unwrap();

        assert_eq!(users.len(), 2);
        assert_eq!(users[0].kyc_status, KycStatus::Pending);
    }
}
