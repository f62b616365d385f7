use actix_web::{get, web, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::application::ports::outgoing::user_query::UserStats;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponseBody {
    total_users: u64,
    verified_users: u64,
    kyc_pending: u64,
    kyc_approved: u64,
    kyc_rejected: u64,
    wallets_connected: u64,
}

impl From<UserStats> for DashboardStatsResponseBody {
    fn from(stats: UserStats) -> Self {
        Self {
            total_users: stats.total_users,
            verified_users: stats.verified_users,
            kyc_pending: stats.kyc_pending,
            kyc_approved: stats.kyc_approved,
            kyc_rejected: stats.kyc_rejected,
            wallets_connected: stats.wallets_connected,
        }
    }
}

/// Dashboard counters
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Aggregate user counters", body = DashboardStatsResponseBody),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/admin/dashboard")]
pub async fn dashboard_stats_handler(
    _admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.dashboard_stats_use_case.execute().await {
        Ok(stats) => ApiResponse::success(DashboardStatsResponseBody::from(stats)),
        Err(e) => {
            error!(error = %e, "Dashboard stats failed");
            ApiResponse::internal_error()
        }
    }
}
