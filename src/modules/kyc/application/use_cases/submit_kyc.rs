use async_trait::async_trait;
use chrono::Utc;
use email_address::EmailAddress;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_query::UserQuery;
use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};
use crate::kyc::application::domain::entities::{KycDocuments, KycStatus};
use crate::kyc::application::domain::policies::document_policy::{
    validate_document, DocumentPolicyError,
};
use crate::kyc::application::ports::outgoing::{
    DocumentStore, DocumentUpload, StoredDocument,
};

// ========================= Request =========================
/// Validated submission. Both documents have already passed the document
/// policy when this exists.
#[derive(Debug, Clone)]
pub struct SubmitKycRequest {
    id_document: DocumentUpload,
    address_document: DocumentUpload,
    contact_email: String,
    contact_phone: Option<String>,
}

#[derive(Debug, Clone)]
pub enum SubmitKycRequestError {
    InvalidIdDocument(DocumentPolicyError),
    InvalidAddressDocument(DocumentPolicyError),
    InvalidContactEmail,
}

impl std::fmt::Display for SubmitKycRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitKycRequestError::InvalidIdDocument(e) => {
                write!(f, "Identity document rejected: {}", e)
            }
            SubmitKycRequestError::InvalidAddressDocument(e) => {
                write!(f, "Address document rejected: {}", e)
            }
            SubmitKycRequestError::InvalidContactEmail => write!(f, "Invalid contact email"),
        }
    }
}

impl std::error::Error for SubmitKycRequestError {}

impl SubmitKycRequest {
    pub fn new(
        id_document: DocumentUpload,
        address_document: DocumentUpload,
        contact_email: String,
        contact_phone: Option<String>,
    ) -> Result<Self, SubmitKycRequestError> {
        validate_document(&id_document.content_type, id_document.bytes.len())
            .map_err(SubmitKycRequestError::InvalidIdDocument)?;
        validate_document(&address_document.content_type, address_document.bytes.len())
            .map_err(SubmitKycRequestError::InvalidAddressDocument)?;

        let contact_email = contact_email.trim().to_lowercase();
        if !EmailAddress::is_valid(&contact_email) {
            return Err(SubmitKycRequestError::InvalidContactEmail);
        }

        let contact_phone = contact_phone
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty());

        Ok(Self {
            id_document,
            address_document,
            contact_email,
            contact_phone,
        })
    }
}

// ========================= Error =========================
#[derive(Debug)]
pub enum SubmitKycError {
    AlreadyApproved,
    UserNotFound,
    UploadFailed(String),
    QueryError(String),
    RepositoryError(String),
}

impl std::fmt::Display for SubmitKycError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitKycError::AlreadyApproved => {
                write!(f, "KYC is already approved for this account")
            }
            SubmitKycError::UserNotFound => write!(f, "User not found"),
            SubmitKycError::UploadFailed(msg) => write!(f, "Document upload failed: {}", msg),
            SubmitKycError::QueryError(msg) => write!(f, "Query error: {}", msg),
            SubmitKycError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for SubmitKycError {}

// ========================= Use Case =========================
#[async_trait]
pub trait ISubmitKycUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        request: SubmitKycRequest,
    ) -> Result<User, SubmitKycError>;
}

/// Uploads both documents concurrently, then persists the bundle and flips
/// the status to pending in a single repository call.
///
/// The uploads run through `join!` rather than `try_join!` on purpose: when
/// one side fails the other result is still needed, so the lone stored
/// object can be deleted instead of leaking.
pub struct SubmitKycUseCase<Q, R, D>
where
    Q: UserQuery,
    R: UserRepository,
    D: DocumentStore,
{
    query: Q,
    repository: R,
    store: D,
}

impl<Q, R, D> SubmitKycUseCase<Q, R, D>
where
    Q: UserQuery,
    R: UserRepository,
    D: DocumentStore,
{
    pub fn new(query: Q, repository: R, store: D) -> Self {
        Self {
            query,
            repository,
            store,
        }
    }

    async fn rollback(&self, user_id: Uuid, stored: &StoredDocument) {
        if let Err(e) = self.store.delete(&stored.public_id).await {
            tracing::error!(
                user_id = %user_id,
                public_id = %stored.public_id,
                error = %e,
                "Failed to delete orphaned KYC document after partial upload"
            );
        }
    }
}

#[async_trait]
impl<Q, R, D> ISubmitKycUseCase for SubmitKycUseCase<Q, R, D>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    D: DocumentStore + Send + Sync,
{
    async fn execute(
        &self,
        user_id: Uuid,
        request: SubmitKycRequest,
    ) -> Result<User, SubmitKycError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| SubmitKycError::QueryError(e.to_string()))?
            .ok_or(SubmitKycError::UserNotFound)?;

        if user.kyc_status == KycStatus::Approved {
            return Err(SubmitKycError::AlreadyApproved);
        }

        let (id_result, address_result) = futures::join!(
            self.store.upload(user_id, request.id_document.clone()),
            self.store.upload(user_id, request.address_document.clone()),
        );

        let (id_stored, address_stored) = match (id_result, address_result) {
            (Ok(id_stored), Ok(address_stored)) => (id_stored, address_stored),
            (Ok(id_stored), Err(e)) => {
                self.rollback(user_id, &id_stored).await;
                return Err(SubmitKycError::UploadFailed(e.to_string()));
            }
            (Err(e), Ok(address_stored)) => {
                self.rollback(user_id, &address_stored).await;
                return Err(SubmitKycError::UploadFailed(e.to_string()));
            }
            (Err(e), Err(_)) => {
                return Err(SubmitKycError::UploadFailed(e.to_string()));
            }
        };

        let documents = KycDocuments {
            id_document_url: id_stored.url,
            id_document_public_id: id_stored.public_id,
            address_document_url: address_stored.url,
            address_document_public_id: address_stored.public_id,
            contact_email: request.contact_email.clone(),
            contact_phone: request.contact_phone.clone(),
            submitted_at: Utc::now(),
        };

        let user = self
            .repository
            .store_kyc_submission(user_id, documents)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => SubmitKycError::UserNotFound,
                other => SubmitKycError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %user_id, "KYC submission stored, awaiting review");

        Ok(user)
    }
}
