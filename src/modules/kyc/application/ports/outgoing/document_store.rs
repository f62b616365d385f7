use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

/// One document as received from the client, validated and held in memory.
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Bytes,
}

/// Handle to a stored document. `public_id` is the storage-side name used
/// for later deletion; `url` is what gets persisted on the user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentStoreError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn upload(
        &self,
        user_id: Uuid,
        document: DocumentUpload,
    ) -> Result<StoredDocument, DocumentStoreError>;

    async fn delete(&self, public_id: &str) -> Result<(), DocumentStoreError>;
}
