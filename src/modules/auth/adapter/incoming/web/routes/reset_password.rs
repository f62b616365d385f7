use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::reset_password::{
    ResetPasswordError, ResetPasswordRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct ResetPasswordBody {
    /// Raw reset token from the email link
    token: String,

    /// Replacement password (at least 8 characters)
    #[schema(example = "NewSecurePass123!")]
    new_password: String,
}

#[derive(Serialize, ToSchema)]
pub struct ResetPasswordResponseBody {
    message: String,
}

fn map_reset_error(err: &ResetPasswordError) -> HttpResponse {
    match err {
        ResetPasswordError::InvalidOrExpiredToken => {
            warn!("Password reset with invalid or expired token");
            ApiResponse::bad_request(
                "INVALID_RESET_TOKEN",
                "Reset token is invalid or has expired",
            )
        }
        other => {
            error!(error = %other, "Password reset failed");
            ApiResponse::internal_error()
        }
    }
}

/// Reset the password with an emailed token
///
/// Single use: a successful reset clears the stored token hash.
#[utoipa::path(
    post,
    path = "/api/auth/reset-password",
    tag = "auth",
    request_body = ResetPasswordBody,
    responses(
        (status = 200, description = "Password updated", body = ResetPasswordResponseBody),
        (status = 400, description = "Invalid token or password too short", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/reset-password")]
pub async fn reset_password_handler(
    req: web::Json<ResetPasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .reset_password_use_case
        .execute(req.into_inner())
        .await
    {
        Ok(()) => {
            info!("Password reset completed");
            ApiResponse::success(ResetPasswordResponseBody {
                message: "Password has been reset. You can now log in.".to_string(),
            })
        }
        Err(e) => map_reset_error(&e),
    }
}
