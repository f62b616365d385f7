use actix_web::{delete, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::admin::application::use_cases::delete_user::DeleteUserError;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct DeleteUserResponseBody {
    message: String,
}

fn map_delete_error(err: &DeleteUserError) -> HttpResponse {
    match err {
        DeleteUserError::SelfDeleteForbidden => ApiResponse::bad_request(
            "SELF_DELETE_FORBIDDEN",
            "Admins cannot delete their own account",
        ),
        DeleteUserError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        other => {
            error!(error = %other, "Deleting user failed");
            ApiResponse::internal_error()
        }
    }
}

/// Delete a user
///
/// Hard delete. Self-deletion is refused.
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponseBody),
        (status = 400, description = "Self-deletion refused", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[delete("/api/admin/users/{id}")]
pub async fn delete_user_handler(
    admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    let target = path.into_inner();

    match data
        .delete_user_use_case
        .execute(admin.user_id, target)
        .await
    {
        Ok(()) => ApiResponse::success(DeleteUserResponseBody {
            message: "User deleted".to_string(),
        }),
        Err(e) => {
            if matches!(e, DeleteUserError::SelfDeleteForbidden) {
                warn!(admin_id = %admin.user_id, "Admin attempted self-deletion");
            }
            map_delete_error(&e)
        }
    }
}
