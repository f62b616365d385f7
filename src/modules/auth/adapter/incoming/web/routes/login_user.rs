use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::application::use_cases::login_user::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

use super::UserSummary;

#[derive(serde::Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct LoginRequestBody {
    /// Email address
    #[schema(example = "jane@example.com")]
    email: String,

    /// Password
    #[schema(example = "SecurePass123!")]
    password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponseBody {
    /// Signed access token
    token: String,

    /// Authenticated user
    user: UserSummary,
}

fn map_login_error(err: &LoginError, email: &str) -> HttpResponse {
    match err {
        LoginError::InvalidCredentials => {
            warn!(email = %email, "Login with invalid credentials");
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }
        LoginError::EmailNotVerified => {
            warn!(email = %email, "Login before email verification");
            ApiResponse::forbidden("EMAIL_NOT_VERIFIED", "Email address is not verified")
        }
        other => {
            error!(email = %email, error = %other, "Login failed");
            ApiResponse::internal_error()
        }
    }
}

/// Log in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestBody,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponseBody),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Email not verified", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/login")]
pub async fn login_user_handler(
    req: web::Json<LoginRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let request = req.into_inner();
    let email = request.email().to_string();

    match data.login_user_use_case.execute(request).await {
        Ok(response) => {
            info!(user_id = %response.user.id, "User logged in");
            ApiResponse::success(LoginResponseBody {
                token: response.token,
                user: UserSummary::from(response.user),
            })
        }
        Err(e) => map_login_error(&e, &email),
    }
}
