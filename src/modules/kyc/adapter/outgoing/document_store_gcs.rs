use async_trait::async_trait;
use bytes::Bytes;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::kyc::application::ports::outgoing::{
    DocumentStore, DocumentStoreError, DocumentUpload, StoredDocument,
};

/// Bucket that holds identity verification documents. Objects in it are
/// never served publicly; the stored URL is only meaningful to admins with
/// bucket access.
const DEFAULT_KYC_BUCKET: &str = "oriro-kyc-documents";

/// Client-side cap on a single upload attempt.
const UPLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Backoff before each retry. Two retries, then the failure propagates.
const RETRY_BACKOFF: [Duration; 2] = [Duration::from_secs(1), Duration::from_secs(2)];

fn object_key(user_id: Uuid, file_name: &str) -> String {
    // Clients may send a full path; only the final segment is kept.
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();

    format!("kyc/{}/{}-{}", user_id, Uuid::new_v4(), base)
}

/// google-cloud-storage uses a bucket resource name format:
/// `projects/_/buckets/{bucket}`
///
/// Keeping this here makes it hard to accidentally pass a raw bucket name.
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn object_url(bucket: &str, object: &str) -> String {
    format!("https://storage.googleapis.com/{}/{}", bucket, object)
}

fn is_retriable(msg: &str) -> bool {
    let m = msg.to_lowercase();

    m.contains("timeout")
        || m.contains("timed out")
        || m.contains("connection")
        || m.contains("network")
        || m.contains("unavailable")
        || m.contains("503")
        || m.contains("500")
}

/// Internal seam to make the adapter testable without mocking
/// google-cloud-storage types/streams.
///
/// Tests will implement this trait with a fake client.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), String>;

    async fn delete_object(&self, bucket_resource: &str, object_name: &str)
        -> Result<(), String>;
}

#[cfg(test)]
struct ArcGcsClient(Arc<dyn GcsClient>);

#[cfg(test)]
#[async_trait]
impl GcsClient for ArcGcsClient {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), String> {
        self.0
            .upload_object(bucket_resource, object_name, content_type, data)
            .await
    }

    async fn delete_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
    ) -> Result<(), String> {
        self.0.delete_object(bucket_resource, object_name).await
    }
}

/// Production adapter: implements the DocumentStore port on Google Cloud
/// Storage.
#[derive(Clone)]
pub struct GcsDocumentStore {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
    bucket: String,
    upload_timeout: Duration,
    retry_backoff: [Duration; 2],
}

impl GcsDocumentStore {
    /// Synchronous constructor - client is initialized lazily on first use.
    /// The bucket name comes from `KYC_DOCUMENTS_BUCKET` when set.
    pub fn new() -> Self {
        let bucket = std::env::var("KYC_DOCUMENTS_BUCKET")
            .unwrap_or_else(|_| DEFAULT_KYC_BUCKET.to_string());

        Self {
            client: Arc::new(OnceCell::new()),
            bucket,
            upload_timeout: UPLOAD_TIMEOUT,
            retry_backoff: RETRY_BACKOFF,
        }
    }

    /// Get or initialize the GCS client.
    async fn get_client(&self) -> Result<&dyn GcsClient, Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok(Box::new(real_client) as Box<dyn GcsClient>)
            })
            .await
            .map(|boxed| &**boxed)
    }

    /// Test-friendly constructor with pre-initialized client.
    #[cfg(test)]
    fn with_client(
        client: Arc<dyn GcsClient>,
        bucket: &str,
        upload_timeout: Duration,
        retry_backoff: [Duration; 2],
    ) -> Self {
        let once = OnceCell::new();
        let _ = once.set(Box::new(ArcGcsClient(client)) as Box<dyn GcsClient>);

        Self {
            client: Arc::new(once),
            bucket: bucket.to_string(),
            upload_timeout,
            retry_backoff,
        }
    }

    /// One upload with a client-side timeout, retried on transient failures.
    async fn upload_with_retry(
        &self,
        client: &dyn GcsClient,
        resource: &str,
        object: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), String> {
        let mut attempt = 0usize;

        loop {
            let outcome = tokio::time::timeout(
                self.upload_timeout,
                client.upload_object(resource, object, content_type, data.clone()),
            )
            .await;

            let message = match outcome {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(msg)) if !is_retriable(&msg) => return Err(msg),
                Ok(Err(msg)) => msg,
                Err(_) => format!(
                    "upload timed out after {} seconds",
                    self.upload_timeout.as_secs()
                ),
            };

            if attempt >= self.retry_backoff.len() {
                return Err(message);
            }

            tracing::warn!(
                object = %object,
                attempt = attempt + 1,
                error = %message,
                "KYC document upload failed, retrying"
            );

            tokio::time::sleep(self.retry_backoff[attempt]).await;
            attempt += 1;
        }
    }
}

impl Default for GcsDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for GcsDocumentStore {
    async fn upload(
        &self,
        user_id: Uuid,
        document: DocumentUpload,
    ) -> Result<StoredDocument, DocumentStoreError> {
        let client = self
            .get_client()
            .await
            .map_err(|e| DocumentStoreError::UploadFailed(e.to_string()))?;

        let object = object_key(user_id, &document.file_name);
        let resource = bucket_resource(&self.bucket);

        self.upload_with_retry(
            client,
            &resource,
            &object,
            &document.content_type,
            document.bytes,
        )
        .await
        .map_err(DocumentStoreError::UploadFailed)?;

        tracing::info!(
            user_id = %user_id,
            object = %object,
            "KYC document uploaded"
        );

        Ok(StoredDocument {
            url: object_url(&self.bucket, &object),
            public_id: object,
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), DocumentStoreError> {
        let client = self
            .get_client()
            .await
            .map_err(|e| DocumentStoreError::DeleteFailed(e.to_string()))?;

        let resource = bucket_resource(&self.bucket);

        match client.delete_object(&resource, public_id).await {
            Ok(()) => Ok(()),
            // An already-missing object satisfies a purge.
            Err(msg)
                if msg.to_lowercase().contains("404")
                    || msg.to_lowercase().contains("not found") =>
            {
                tracing::debug!(public_id = %public_id, "KYC document already absent");
                Ok(())
            }
            Err(msg) => Err(DocumentStoreError::DeleteFailed(msg)),
        }
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-storage)
// ============================================================================

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
    control: google_cloud_storage::client::StorageControl,
}

impl RealGcsClient {
    async fn new() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                e
            })?;

        let control = google_cloud_storage::client::StorageControl::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS control client: {:?}", e);
                e
            })?;

        tracing::info!("GCS clients created");

        Ok(Self { storage, control })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn upload_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        data: Bytes,
    ) -> Result<(), String> {
        self.storage
            .write_object(bucket_resource.to_string(), object_name.to_string(), data)
            .set_content_type(content_type.to_string())
            .send_unbuffered()
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }

    async fn delete_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
    ) -> Result<(), String> {
        self.control
            .delete_object()
            .set_bucket(bucket_resource.to_string())
            .set_object(object_name.to_string())
            .send()
            .await
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const NO_BACKOFF: [Duration; 2] = [Duration::ZERO, Duration::ZERO];

    /// Upload results are consumed front-to-back; once the script runs out
    /// every further call succeeds.
    struct FakeGcsClient {
        upload_calls: Mutex<Vec<(String, String, String, usize)>>,
        last_delete_call: Mutex<Option<(String, String)>>,
        upload_script: Mutex<VecDeque<Result<(), String>>>,
        delete_result: Mutex<Result<(), String>>,
    }

    impl Default for FakeGcsClient {
        fn default() -> Self {
            Self {
                upload_calls: Mutex::new(Vec::new()),
                last_delete_call: Mutex::new(None),
                upload_script: Mutex::new(VecDeque::new()),
                delete_result: Mutex::new(Ok(())),
            }
        }
    }

    impl FakeGcsClient {
        fn new() -> Self {
            Self::default()
        }

        fn script_uploads(&self, results: Vec<Result<(), String>>) {
            *self.upload_script.lock().unwrap() = results.into();
        }

        fn set_delete_result(&self, r: Result<(), String>) {
            *self.delete_result.lock().unwrap() = r;
        }

        fn upload_call_count(&self) -> usize {
            self.upload_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GcsClient for FakeGcsClient {
        async fn upload_object(
            &self,
            bucket_resource: &str,
            object_name: &str,
            content_type: &str,
            data: Bytes,
        ) -> Result<(), String> {
            self.upload_calls.lock().unwrap().push((
                bucket_resource.to_string(),
                object_name.to_string(),
                content_type.to_string(),
                data.len(),
            ));

            self.upload_script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Ok(()))
        }

        async fn delete_object(
            &self,
            bucket_resource: &str,
            object_name: &str,
        ) -> Result<(), String> {
            *self.last_delete_call.lock().unwrap() =
                Some((bucket_resource.to_string(), object_name.to_string()));

            self.delete_result.lock().unwrap().clone()
        }
    }

    fn store_with(fake: Arc<FakeGcsClient>) -> GcsDocumentStore {
        GcsDocumentStore::with_client(fake, "kyc-bucket", UPLOAD_TIMEOUT, NO_BACKOFF)
    }

    fn sample_upload() -> DocumentUpload {
        DocumentUpload {
            file_name: "passport.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: Bytes::from_static(b"\x89PNG fake"),
        }
    }

    #[tokio::test]
    async fn test_upload_uses_bucket_resource_and_scoped_object_key() {
        let fake = Arc::new(FakeGcsClient::new());
        let store = store_with(fake.clone());
        let user_id = Uuid::new_v4();

        let stored = store.upload(user_id, sample_upload()).await.unwrap();

        let calls = fake.upload_calls.lock().unwrap();
        let call = calls.last().unwrap();
        assert_eq!(call.0, "projects/_/buckets/kyc-bucket");
        assert!(call.1.starts_with(&format!("kyc/{}/", user_id)));
        assert!(call.1.ends_with("-passport.png"));
        assert_eq!(call.2, "image/png");
        assert_eq!(call.3, b"\x89PNG fake".len());

        assert_eq!(stored.public_id, call.1);
        assert_eq!(
            stored.url,
            format!("https://storage.googleapis.com/kyc-bucket/{}", call.1)
        );
    }

    #[tokio::test]
    async fn test_upload_strips_client_supplied_path() {
        let fake = Arc::new(FakeGcsClient::new());
        let store = store_with(fake.clone());

        let mut upload = sample_upload();
        upload.file_name = "C:\\Users\\me\\Documents/passport.png".to_string();

        store.upload(Uuid::new_v4(), upload).await.unwrap();

        let calls = fake.upload_calls.lock().unwrap();
        let call = calls.last().unwrap();
        assert!(call.1.ends_with("-passport.png"));
        assert!(!call.1.contains('\\'));
    }

    #[tokio::test]
    async fn test_two_uploads_of_the_same_file_get_distinct_keys() {
        let fake = Arc::new(FakeGcsClient::new());
        let store = store_with(fake.clone());
        let user_id = Uuid::new_v4();

        let first = store.upload(user_id, sample_upload()).await.unwrap();
        let second = store.upload(user_id, sample_upload()).await.unwrap();

        assert_ne!(first.public_id, second.public_id);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried_until_success() {
        let fake = Arc::new(FakeGcsClient::new());
        fake.script_uploads(vec![
            Err("connection reset".to_string()),
            Err("service unavailable (503)".to_string()),
            Ok(()),
        ]);

        let store = store_with(fake.clone());

        let stored = store.upload(Uuid::new_v4(), sample_upload()).await.unwrap();

        assert_eq!(fake.upload_call_count(), 3);
        assert!(stored.public_id.ends_with("-passport.png"));
    }

    #[tokio::test]
    async fn test_retries_are_exhausted_after_two_attempts() {
        let fake = Arc::new(FakeGcsClient::new());
        fake.script_uploads(vec![
            Err("connection reset".to_string()),
            Err("connection reset".to_string()),
            Err("connection reset".to_string()),
        ]);

        let store = store_with(fake.clone());

        let err = store
            .upload(Uuid::new_v4(), sample_upload())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::UploadFailed(_)));
        assert_eq!(fake.upload_call_count(), 3);
    }

    #[tokio::test]
    async fn test_non_retriable_failure_is_not_retried() {
        let fake = Arc::new(FakeGcsClient::new());
        fake.script_uploads(vec![Err("permission denied".to_string())]);

        let store = store_with(fake.clone());

        let err = store
            .upload(Uuid::new_v4(), sample_upload())
            .await
            .unwrap_err();

        assert!(matches!(err, DocumentStoreError::UploadFailed(_)));
        assert_eq!(fake.upload_call_count(), 1);
    }

    #[tokio::test]
    async fn test_delete_passes_public_id_as_object_name() {
        let fake = Arc::new(FakeGcsClient::new());
        let store = store_with(fake.clone());

        store.delete("kyc/user/abc-passport.png").await.unwrap();

        let call = fake.last_delete_call.lock().unwrap().clone().unwrap();
        assert_eq!(call.0, "projects/_/buckets/kyc-bucket");
        assert_eq!(call.1, "kyc/user/abc-passport.png");
    }

    #[tokio::test]
    async fn test_delete_of_missing_object_is_ok() {
        let fake = Arc::new(FakeGcsClient::new());
        fake.set_delete_result(Err("Not Found (404)".to_string()));

        let store = store_with(fake);

        assert!(store.delete("kyc/user/gone.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_failure_maps_to_delete_failed() {
        let fake = Arc::new(FakeGcsClient::new());
        fake.set_delete_result(Err("Permission denied".to_string()));

        let store = store_with(fake);

        let err = store.delete("kyc/user/abc.png").await.unwrap_err();
        assert!(matches!(err, DocumentStoreError::DeleteFailed(_)));
    }
}
