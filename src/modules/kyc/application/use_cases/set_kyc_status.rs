use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_query::UserQuery;
use crate::auth::application::ports::outgoing::user_repository::{
    UserRepository, UserRepositoryError,
};
use crate::kyc::application::domain::entities::KycStatus;
use crate::kyc::application::ports::outgoing::DocumentStore;

/// Admin verdict on a pending submission.
#[derive(Debug, Clone)]
pub enum KycDecision {
    Approve,
    Reject { message: Option<String> },
}

#[derive(Debug)]
pub enum SetKycStatusError {
    UserNotFound,
    QueryError(String),
    RepositoryError(String),
}

impl std::fmt::Display for SetKycStatusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetKycStatusError::UserNotFound => write!(f, "User not found"),
            SetKycStatusError::QueryError(msg) => write!(f, "Query error: {}", msg),
            SetKycStatusError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for SetKycStatusError {}

#[async_trait]
pub trait ISetKycStatusUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        decision: KycDecision,
    ) -> Result<User, SetKycStatusError>;
}

/// Applies an admin verdict. The verdict is an override: it applies
/// whatever the current status is, not only to pending submissions.
///
/// Approval keeps the bundle intact for audit. Rejection purges both
/// documents from object storage and clears the bundle; the deletes are
/// best-effort so a storage hiccup cannot block the verdict itself.
pub struct SetKycStatusUseCase<Q, R, D>
where
    Q: UserQuery,
    R: UserRepository,
    D: DocumentStore,
{
    query: Q,
    repository: R,
    store: D,
}

impl<Q, R, D> SetKycStatusUseCase<Q, R, D>
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
}

#[async_trait]
impl<Q, R, D> ISetKycStatusUseCase for SetKycStatusUseCase<Q, R, D>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    D: DocumentStore + Send + Sync,
{
    async fn execute(
        &self,
        user_id: Uuid,
        decision: KycDecision,
    ) -> Result<User, SetKycStatusError> {
        let user = self
            .query
            .find_by_id(user_id)
            .await
            .map_err(|e| SetKycStatusError::QueryError(e.to_string()))?
            .ok_or(SetKycStatusError::UserNotFound)?;

        let (status, message, clear_documents) = match decision {
            KycDecision::Approve => (KycStatus::Approved, None, false),
            KycDecision::Reject { ref message } => {
                if let Some(documents) = &user.kyc_documents {
                    for public_id in [
                        &documents.id_document_public_id,
                        &documents.address_document_public_id,
                    ] {
                        if let Err(e) = self.store.delete(public_id).await {
                            tracing::error!(
                                user_id = %user_id,
                                public_id = %public_id,
                                error = %e,
                                "Failed to purge rejected KYC document"
                            );
                        }
                    }
                }
                (KycStatus::Rejected, message.clone(), true)
            }
        };

        let user = self
            .repository
            .set_kyc_status(user_id, status, message, clear_documents)
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserNotFound => SetKycStatusError::UserNotFound,
                other => SetKycStatusError::RepositoryError(other.to_string()),
            })?;

        tracing::info!(user_id = %user_id, status = %status, "KYC verdict applied");

        Ok(user)
    }
}
