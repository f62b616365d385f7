use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::application::orchestrator::user_registration::UserRegistrationError;
use crate::auth::application::use_cases::register_user::{RegisterUserError, RegisterUserRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Documentation-only request schema; the handler deserializes into the
/// validating use-case type.
#[derive(serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct RegisterRequestBody {
    /// Email address
    #[schema(example = "jane@example.com")]
    email: String,

    /// Password
    #[schema(example = "SecurePass123!")]
    password: String,

    /// Given name
    #[schema(example = "Jane")]
    first_name: String,

    /// Family name
    #[schema(example = "Doe")]
    last_name: String,
}

#[derive(Serialize, ToSchema)]
pub struct RegisterResponseBody {
    /// Success message
    #[schema(
        example = "User created successfully. Please check your email to verify your account."
    )]
    message: String,

    /// Created user id
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    user_id: Uuid,

    /// Registered email address
    #[schema(example = "jane@example.com")]
    email: String,
}

fn map_register_error(err: &RegisterUserError, email: &str) -> HttpResponse {
    match err {
        RegisterUserError::RegistrationDisabled => {
            warn!(email = %email, "Registration attempt while disabled");
            ApiResponse::forbidden(
                "REGISTRATION_DISABLED",
                "Registration is currently disabled",
            )
        }
        RegisterUserError::EmailAlreadyRegistered => {
            warn!(email = %email, "Registration with already registered email");
            ApiResponse::bad_request("EMAIL_ALREADY_REGISTERED", "Email is already registered")
        }
        other => {
            error!(email = %email, error = %other, "User registration failed");
            ApiResponse::internal_error()
        }
    }
}

/// Register a new account
///
/// Creates an unverified account and sends a verification email in the
/// background. Responds before the email leaves the server.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "auth",
    request_body = RegisterRequestBody,
    responses(
        (status = 201, description = "Account created", body = inline(SuccessResponse<RegisterResponseBody>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 403, description = "Registration disabled", body = ErrorResponse),
        (status = 400, description = "Email already registered", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/register")]
pub async fn register_user_handler(
    req: web::Json<RegisterUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = req.into_inner();
    let email = request.email().to_string();

    info!(email = %email, "User registration attempt");

    match data
        .register_user_orchestrator
        .register_user(request)
        .await
    {
        Ok(output) => {
            info!(user_id = %output.user_id, email = %output.email, "User created");
            ApiResponse::created(RegisterResponseBody {
                message: output.message,
                user_id: output.user_id,
                email: output.email,
            })
        }
        Err(UserRegistrationError::RegistrationFailed(e)) => map_register_error(&e, &email),
    }
}
