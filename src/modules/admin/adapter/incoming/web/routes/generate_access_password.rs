use actix_web::{post, web, Responder};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct GenerateAccessPasswordResponseBody {
    /// Shown exactly once; only its hash is stored
    password: String,
}

/// Rotate the site access password
///
/// Generates a fresh shared secret, stores its hash and returns the
/// plaintext a single time. Outstanding site-access tokens stay valid
/// until they expire.
#[utoipa::path(
    post,
    path = "/api/admin/site-settings/access-password",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New password generated", body = GenerateAccessPasswordResponseBody),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/admin/site-settings/access-password")]
pub async fn generate_access_password_handler(
    admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.generate_access_password_use_case.execute().await {
        Ok(generated) => {
            info!(admin_id = %admin.user_id, "Site access password rotated by admin");
            ApiResponse::success(GenerateAccessPasswordResponseBody {
                password: generated.password,
            })
        }
        Err(e) => {
            error!(error = %e, "Access password rotation failed");
            ApiResponse::internal_error()
        }
    }
}
