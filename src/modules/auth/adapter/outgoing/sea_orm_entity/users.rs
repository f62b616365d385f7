use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::auth::application::domain::entities::{User, UserRole};
use crate::kyc::application::domain::entities::{KycDocuments, KycStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_verified: bool,
    pub email_verification_token: Option<String>,
    pub kyc_status: String,
    pub kyc_status_message: Option<String>,
    pub kyc_id_document_url: Option<String>,
    pub kyc_id_document_public_id: Option<String>,
    pub kyc_address_document_url: Option<String>,
    pub kyc_address_document_public_id: Option<String>,
    pub kyc_contact_email: Option<String>,
    pub kyc_contact_phone: Option<String>,
    pub kyc_submitted_at: Option<DateTimeWithTimeZone>,
    pub wallet_address: Option<String>,
    pub wallet_connected: bool,
    pub wallet_nonce: Option<String>,
    pub reset_password_token_hash: Option<String>,
    pub reset_password_expires: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        use chrono::Utc;
        use sea_orm::ActiveValue::Set;

        if !insert {
            // Only update updated_at on UPDATE, not INSERT
            self.updated_at = Set(Utc::now().into());
        }

        Ok(self)
    }
}

impl Model {
    /// The bundle is only reported when every mandatory column is present;
    /// a half-written row maps to no bundle at all.
    fn kyc_documents(&self) -> Option<KycDocuments> {
        Some(KycDocuments {
            id_document_url: self.kyc_id_document_url.clone()?,
            id_document_public_id: self.kyc_id_document_public_id.clone()?,
            address_document_url: self.kyc_address_document_url.clone()?,
            address_document_public_id: self.kyc_address_document_public_id.clone()?,
            contact_email: self.kyc_contact_email.clone()?,
            contact_phone: self.kyc_contact_phone.clone(),
            submitted_at: self.kyc_submitted_at?.to_utc(),
        })
    }

    pub fn into_user(self) -> User {
        let kyc_documents = self.kyc_documents();
        User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            first_name: self.first_name,
            last_name: self.last_name,
            role: UserRole::from_str(&self.role).unwrap_or(UserRole::User),
            is_verified: self.is_verified,
            email_verification_token: self.email_verification_token,
            kyc_status: KycStatus::from_str(&self.kyc_status).unwrap_or(KycStatus::NotSubmitted),
            kyc_status_message: self.kyc_status_message,
            kyc_documents,
            wallet_address: self.wallet_address,
            wallet_connected: self.wallet_connected,
            wallet_nonce: self.wallet_nonce,
            reset_password_token_hash: self.reset_password_token_hash,
            reset_password_expires: self.reset_password_expires.map(|dt| dt.to_utc()),
            created_at: self.created_at.to_utc(),
            updated_at: self.updated_at.to_utc(),
        }
    }
}
