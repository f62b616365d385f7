use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::adapter::incoming::web::routes::UserSummary;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct ListUsersResponseBody {
    users: Vec<UserSummary>,
}

/// List all users
#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All users, newest first", body = ListUsersResponseBody),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/admin/users")]
pub async fn list_users_handler(_admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    match data.list_users_use_case.execute().await {
        Ok(users) => ApiResponse::success(ListUsersResponseBody {
            users: users.into_iter().map(UserSummary::from).collect(),
        }),
        Err(e) => {
            error!(error = %e, "Listing users failed");
            ApiResponse::internal_error()
        }
    }
}
