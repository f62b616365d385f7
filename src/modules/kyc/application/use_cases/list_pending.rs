use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;
use crate::auth::application::ports::outgoing::user_query::UserQuery;

/// One row in the admin review queue.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KycReviewItem {
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub contact_email: String,
    pub contact_phone: Option<String>,
    pub id_document_url: String,
    pub address_document_url: String,
    pub submitted_at: DateTime<Utc>,
}

impl KycReviewItem {
    /// A pending user without a document bundle is a data inconsistency;
    /// such rows are skipped rather than rendered half-empty.
    fn from_user(user: &User) -> Option<Self> {
        let documents = user.kyc_documents.as_ref()?;
        Some(Self {
            user_id: user.id,
            email: user.email.clone(),
            full_name: user.full_name(),
            contact_email: documents.contact_email.clone(),
            contact_phone: documents.contact_phone.clone(),
            id_document_url: documents.id_document_url.clone(),
            address_document_url: documents.address_document_url.clone(),
            submitted_at: documents.submitted_at,
        })
    }
}

#[derive(Debug, Clone)]
pub enum ListPendingKycError {
    QueryError(String),
}

impl std::fmt::Display for ListPendingKycError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListPendingKycError::QueryError(msg) => write!(f, "Query error: {}", msg),
        }
    }
}

impl std::error::Error for ListPendingKycError {}

#[async_trait]
pub trait IListPendingKycUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<KycReviewItem>, ListPendingKycError>;
}

pub struct ListPendingKycUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> ListPendingKycUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IListPendingKycUseCase for ListPendingKycUseCase<Q>
where
    Q: UserQuery + Send + Sync,
{
    async fn execute(&self) -> Result<Vec<KycReviewItem>, ListPendingKycError> {
        let users = self
            .query
            .list_kyc_pending()
            .await
            .map_err(|e| ListPendingKycError::QueryError(e.to_string()))?;

        let items = users
            .iter()
            .filter_map(|user| {
                let item = KycReviewItem::from_user(user);
                if item.is_none() {
                    tracing::warn!(
                        user_id = %user.id,
                        "Pending KYC user has no document bundle, skipping"
                    );
                }
                item
            })
            .collect();

        Ok(items)
    }
}
