use actix_web::{get, put, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::adapter::incoming::web::routes::UserSummary;
use crate::kyc::application::use_cases::list_pending::KycReviewItem;
use crate::kyc::application::use_cases::set_kyc_status::{KycDecision, SetKycStatusError};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct PendingKycResponseBody {
    #[schema(value_type = Vec<Object>)]
    requests: Vec<KycReviewItem>,
}

#[derive(Deserialize, ToSchema)]
pub struct KycDecisionBody {
    /// `approve` or `reject`
    action: String,
    /// Stored verbatim as the user-facing status message
    message: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct KycDecisionResponseBody {
    user: UserSummary,
}

fn map_decision_error(err: &SetKycStatusError) -> HttpResponse {
    match err {
        SetKycStatusError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        other => {
            error!(error = %other, "KYC verdict failed");
            ApiResponse::internal_error()
        }
    }
}

/// List pending KYC submissions
#[utoipa::path(
    get,
    path = "/api/admin/kyc/pending",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Review queue, oldest first", body = PendingKycResponseBody),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/admin/kyc/pending")]
pub async fn list_pending_kyc_handler(
    _admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.list_pending_kyc_use_case.execute().await {
        Ok(requests) => ApiResponse::success(PendingKycResponseBody { requests }),
        Err(e) => {
            error!(error = %e, "Listing pending KYC failed");
            ApiResponse::internal_error()
        }
    }
}

/// Apply a KYC verdict
///
/// Rejection purges the stored documents and clears the bundle; approval
/// leaves them intact.
#[utoipa::path(
    put,
    path = "/api/admin/kyc/{user_id}",
    tag = "admin",
    params(("user_id" = Uuid, Path, description = "User id")),
    request_body = KycDecisionBody,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Verdict applied", body = KycDecisionResponseBody),
        (status = 400, description = "Unknown action", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/admin/kyc/{user_id}")]
pub async fn decide_kyc_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    body: web::Json<KycDecisionBody>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();
    let body = body.into_inner();

    let decision = match body.action.as_str() {
        "approve" => KycDecision::Approve,
        "reject" => KycDecision::Reject {
            message: body.message,
        },
        other => {
            return ApiResponse::bad_request(
                "VALIDATION_ERROR",
                &format!("Unknown action: {}", other),
            )
        }
    };

    match data.set_kyc_status_use_case.execute(user_id, decision).await {
        Ok(user) => {
            info!(admin_id = %admin.user_id, user_id = %user_id, "KYC verdict applied by admin");
            ApiResponse::success(KycDecisionResponseBody {
                user: UserSummary::from(user),
            })
        }
        Err(e) => map_decision_error(&e),
    }
}
