use actix_web::{patch, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::admin::application::use_cases::update_user::{UpdateUserError, UpdateUserRequest};
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::adapter::incoming::web::routes::UserSummary;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Documentation-only schema; the handler deserializes straight into the
/// validated request type.
#[derive(serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UpdateUserBody {
    first_name: Option<String>,
    last_name: Option<String>,
    /// `user` or `admin`
    role: Option<String>,
    /// Forced verification toggle
    is_verified: Option<bool>,
}

#[derive(Serialize, ToSchema)]
pub struct UpdateUserResponseBody {
    user: UserSummary,
}

fn map_update_error(err: &UpdateUserError) -> HttpResponse {
    match err {
        UpdateUserError::UserNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        other => {
            error!(error = %other, "Updating user failed");
            ApiResponse::internal_error()
        }
    }
}

/// Update a user
///
/// Field-scoped patch: only the provided fields change.
#[utoipa::path(
    patch,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateUserBody,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User updated", body = UpdateUserResponseBody),
        (status = 400, description = "Empty or invalid patch", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[patch("/api/admin/users/{id}")]
pub async fn update_user_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let user_id = path.into_inner();

    match data
        .update_user_use_case
        .execute(user_id, request.into_inner())
        .await
    {
        Ok(user) => {
            info!(admin_id = %admin.user_id, user_id = %user_id, "User patched by admin");
            ApiResponse::success(UpdateUserResponseBody {
                user: UserSummary::from(user),
            })
        }
        Err(e) => map_update_error(&e),
    }
}
