use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct VerifyResetTokenResponseBody {
    /// Whether the token is usable right now
    valid: bool,
}

/// Pre-check a password reset token
///
/// Lets the reset form fail fast before asking the user to type a new
/// password. Does not consume the token.
#[utoipa::path(
    get,
    path = "/api/auth/verify-reset-token/{token}",
    tag = "auth",
    params(("token" = String, Path, description = "Raw reset token from the email link")),
    responses(
        (status = 200, description = "Token checked", body = VerifyResetTokenResponseBody),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/auth/verify-reset-token/{token}")]
pub async fn verify_reset_token_handler(
    token: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.verify_reset_token_use_case.execute(&token).await {
        Ok(valid) => ApiResponse::success(VerifyResetTokenResponseBody { valid }),
        Err(e) => {
            error!(error = %e, "Reset token check failed");
            ApiResponse::internal_error()
        }
    }
}
