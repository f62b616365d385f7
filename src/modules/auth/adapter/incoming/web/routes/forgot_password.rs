use actix_web::{post, HttpResponse, Responder};
use actix_web::web;
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::forgot_password::{
    ForgotPasswordError, ForgotPasswordRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(serde::Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct ForgotPasswordBody {
    /// Email address
    #[schema(example = "jane@example.com")]
    email: String,
}

#[derive(Serialize, ToSchema)]
pub struct ForgotPasswordResponseBody {
    message: String,
}

fn map_forgot_error(err: &ForgotPasswordError) -> HttpResponse {
    match err {
        // The raw token exists only inside the email; a delivery failure
        // must surface so the user retries instead of waiting forever.
        ForgotPasswordError::EmailSendingFailed(msg) => {
            error!(error = %msg, "Password reset email failed to send");
            ApiResponse::upstream_error("Could not send the password reset email")
        }
        other => {
            error!(error = %other, "Forgot password failed");
            ApiResponse::internal_error()
        }
    }
}

/// Request a password reset email
///
/// Unknown addresses still get a 200 so the endpoint cannot be used to
/// enumerate accounts.
#[utoipa::path(
    post,
    path = "/api/auth/forgot-password",
    tag = "auth",
    request_body = ForgotPasswordBody,
    responses(
        (status = 200, description = "Request accepted", body = ForgotPasswordResponseBody),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Email delivery or internal failure", body = ErrorResponse),
    )
)]
#[post("/api/auth/forgot-password")]
pub async fn forgot_password_handler(
    req: web::Json<ForgotPasswordRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .forgot_password_use_case
        .execute(req.into_inner())
        .await
    {
        Ok(()) => {
            info!("Forgot password request processed");
            ApiResponse::success(ForgotPasswordResponseBody {
                message: "If that email is registered, a password reset email has been sent."
                    .to_string(),
            })
        }
        Err(e) => map_forgot_error(&e),
    }
}
