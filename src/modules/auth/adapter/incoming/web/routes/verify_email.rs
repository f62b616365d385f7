use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::verify_email::VerifyEmailError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct VerifyEmailResponseBody {
    /// Verified user id
    user_id: Uuid,

    /// Verified email address
    email: String,

    /// True when the account was already verified before this call
    already_verified: bool,
}

fn map_verify_error(err: &VerifyEmailError) -> HttpResponse {
    match err {
        VerifyEmailError::InvalidToken => {
            warn!("Email verification with invalid token");
            ApiResponse::bad_request("INVALID_TOKEN", "Verification token is invalid")
        }
        VerifyEmailError::TokenExpired => {
            warn!("Email verification with expired token");
            ApiResponse::bad_request("TOKEN_EXPIRED", "Verification token has expired")
        }
        VerifyEmailError::UserNotFound => {
            warn!("Email verification for unknown user");
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        other => {
            error!(error = %other, "Email verification failed");
            ApiResponse::internal_error()
        }
    }
}

/// Verify an email address
///
/// Consumes the token from the verification email. Idempotent: verifying an
/// already-verified account succeeds.
#[utoipa::path(
    get,
    path = "/api/auth/verify-email/{token}",
    tag = "auth",
    params(("token" = String, Path, description = "Signed verification token")),
    responses(
        (status = 200, description = "Email verified", body = VerifyEmailResponseBody),
        (status = 400, description = "Invalid or expired token", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/auth/verify-email/{token}")]
pub async fn verify_email_handler(
    token: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.verify_email_use_case.execute(&token).await {
        Ok(response) => {
            info!(
                user_id = %response.user_id,
                already_verified = response.already_verified,
                "Email verified"
            );
            ApiResponse::success(VerifyEmailResponseBody {
                user_id: response.user_id,
                email: response.email,
                already_verified: response.already_verified,
            })
        }
        Err(e) => map_verify_error(&e),
    }
}
