use actix_multipart::{Field, Multipart};
use actix_web::{post, web, HttpResponse, Responder};
use bytes::{Bytes, BytesMut};
use futures::{StreamExt, TryStreamExt};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::adapter::incoming::web::routes::UserSummary;
use crate::kyc::application::domain::policies::document_policy::MAX_DOCUMENT_BYTES;
use crate::kyc::application::ports::outgoing::DocumentUpload;
use crate::kyc::application::use_cases::submit_kyc::{SubmitKycError, SubmitKycRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Oversized fields are truncated at one byte past the limit; the document
/// policy then rejects them without the handler buffering the full body.
const BUFFER_CAP: usize = MAX_DOCUMENT_BYTES + 1;

/// Documentation-only schema for the multipart form.
#[derive(serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct SubmitKycForm {
    /// Identity document (JPEG, PNG or PDF, max 5 MB)
    #[schema(value_type = String, format = Binary)]
    id_document: String,
    /// Proof-of-address document (JPEG, PNG or PDF, max 5 MB)
    #[schema(value_type = String, format = Binary)]
    address_document: String,
    /// Contact email for review follow-up
    contact_email: String,
    /// Optional contact phone
    contact_phone: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitKycResponseBody {
    message: String,
    user: UserSummary,
}

fn validation_error(message: &str) -> HttpResponse {
    ApiResponse::bad_request("VALIDATION_ERROR", message)
}

async fn read_field(field: &mut Field) -> Result<Bytes, HttpResponse> {
    let mut buf = BytesMut::new();

    while let Some(chunk) = field.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(error = %e, "Malformed multipart payload");
            validation_error("Malformed multipart payload")
        })?;

        if buf.len() < BUFFER_CAP {
            let take = (BUFFER_CAP - buf.len()).min(chunk.len());
            buf.extend_from_slice(&chunk[..take]);
        }
    }

    Ok(buf.freeze())
}

async fn read_text_field(field: &mut Field) -> Result<String, HttpResponse> {
    let bytes = read_field(field).await?;

    String::from_utf8(bytes.to_vec())
        .map(|s| s.trim().to_string())
        .map_err(|_| validation_error("Form fields must be valid UTF-8"))
}

async fn read_document_field(field: &mut Field) -> Result<DocumentUpload, HttpResponse> {
    let file_name = field
        .content_disposition()
        .and_then(|cd| cd.get_filename())
        .unwrap_or("document")
        .to_string();

    let content_type = field
        .content_type()
        .map(|m| m.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    let bytes = read_field(field).await?;

    Ok(DocumentUpload {
        file_name,
        content_type,
        bytes,
    })
}

fn map_submit_error(err: &SubmitKycError) -> HttpResponse {
    match err {
        SubmitKycError::AlreadyApproved => ApiResponse::bad_request(
            "KYC_ALREADY_APPROVED",
            "KYC is already approved for this account",
        ),
        SubmitKycError::UserNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        SubmitKycError::UploadFailed(msg) => {
            error!(error = %msg, "KYC document upload failed");
            ApiResponse::upstream_error("Could not store the submitted documents")
        }
        other => {
            error!(error = %other, "KYC submission failed");
            ApiResponse::internal_error()
        }
    }
}

/// Submit KYC documents
///
/// Both documents are validated locally before anything is uploaded.
/// Resubmission after a rejection is allowed and returns the status to
/// pending.
#[utoipa::path(
    post,
    path = "/api/auth/kyc",
    tag = "kyc",
    request_body(content = SubmitKycForm, content_type = "multipart/form-data"),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Documents submitted for review", body = SubmitKycResponseBody),
        (status = 400, description = "Invalid documents or form fields", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 400, description = "KYC already approved", body = ErrorResponse),
        (status = 500, description = "Upstream storage failure", body = ErrorResponse),
    )
)]
#[post("/api/auth/kyc")]
pub async fn submit_kyc_handler(
    user: AuthenticatedUser,
    mut payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let mut id_document: Option<DocumentUpload> = None;
    let mut address_document: Option<DocumentUpload> = None;
    let mut contact_email: Option<String> = None;
    let mut contact_phone: Option<String> = None;

    loop {
        let mut field = match payload.try_next().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "Malformed multipart payload");
                return validation_error("Malformed multipart payload");
            }
        };

        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        let outcome = match name.as_str() {
            "idDocument" => read_document_field(&mut field)
                .await
                .map(|doc| id_document = Some(doc)),
            "addressDocument" => read_document_field(&mut field)
                .await
                .map(|doc| address_document = Some(doc)),
            "contactEmail" => read_text_field(&mut field)
                .await
                .map(|value| contact_email = Some(value)),
            "contactPhone" => read_text_field(&mut field)
                .await
                .map(|value| contact_phone = Some(value)),
            // Unknown parts are drained and ignored.
            _ => read_field(&mut field).await.map(|_| ()),
        };

        if let Err(response) = outcome {
            return response;
        }
    }

    let Some(id_document) = id_document else {
        return validation_error("Missing required file: idDocument");
    };
    let Some(address_document) = address_document else {
        return validation_error("Missing required file: addressDocument");
    };
    let Some(contact_email) = contact_email else {
        return validation_error("Missing required field: contactEmail");
    };

    let request =
        match SubmitKycRequest::new(id_document, address_document, contact_email, contact_phone) {
            Ok(request) => request,
            Err(e) => {
                warn!(user_id = %user.user_id, error = %e, "KYC submission rejected");
                return validation_error(&e.to_string());
            }
        };

    match data.submit_kyc_use_case.execute(user.user_id, request).await {
        Ok(updated) => {
            info!(user_id = %user.user_id, "KYC documents submitted");
            ApiResponse::success(SubmitKycResponseBody {
                message: "Documents submitted for review".to_string(),
                user: UserSummary::from(updated),
            })
        }
        Err(e) => map_submit_error(&e),
    }
}
