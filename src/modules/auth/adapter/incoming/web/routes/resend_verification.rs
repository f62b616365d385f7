use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::resend_verification::ResendVerificationRequest;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(serde::Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct ResendVerificationBody {
    /// Email address
    #[schema(example = "jane@example.com")]
    email: String,
}

#[derive(Serialize, ToSchema)]
pub struct ResendVerificationResponseBody {
    /// Always the same wording, whether or not the email is registered
    message: String,
}

/// Resend the verification email
///
/// Always answers 200 with the same message, so the endpoint cannot be used
/// to probe which addresses are registered.
#[utoipa::path(
    post,
    path = "/api/auth/resend-verification",
    tag = "auth",
    request_body = ResendVerificationBody,
    responses(
        (status = 200, description = "Request accepted", body = ResendVerificationResponseBody),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/resend-verification")]
pub async fn resend_verification_handler(
    req: web::Json<ResendVerificationRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = req.into_inner();

    match data.resend_verification_use_case.execute(request).await {
        Ok(()) => {
            info!("Resend verification request processed");
            ApiResponse::success(ResendVerificationResponseBody {
                message: "If that email is registered, a verification email has been sent."
                    .to_string(),
            })
        }
        Err(e) => {
            error!(error = %e, "Resend verification failed");
            ApiResponse::internal_error()
        }
    }
}
