use actix_web::{get, put, web, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::admin::application::use_cases::update_site_settings::UpdateSiteSettingsRequest;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::gate::application::domain::entities::SiteSettings;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Settings projection for clients. The access-password hash never leaves
/// the server.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SiteSettingsBody {
    site_access_enabled: bool,
    registration_enabled: bool,
    maintenance_mode: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    maintenance_message: Option<String>,
    show_hero: bool,
    show_marketplace: bool,
    show_staking: bool,
    updated_at: DateTime<Utc>,
}

impl From<SiteSettings> for SiteSettingsBody {
    fn from(settings: SiteSettings) -> Self {
        Self {
            site_access_enabled: settings.site_access_enabled,
            registration_enabled: settings.registration_enabled,
            maintenance_mode: settings.maintenance_mode,
            maintenance_message: settings.maintenance_message,
            show_hero: settings.show_hero,
            show_marketplace: settings.show_marketplace,
            show_staking: settings.show_staking,
            updated_at: settings.updated_at,
        }
    }
}

/// Documentation-only schema; the handler deserializes straight into the
/// validated request type.
#[derive(serde::Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UpdateSiteSettingsBody {
    site_access_enabled: Option<bool>,
    registration_enabled: Option<bool>,
    maintenance_mode: Option<bool>,
    /// An empty string clears the stored message
    maintenance_message: Option<String>,
    show_hero: Option<bool>,
    show_marketplace: Option<bool>,
    show_staking: Option<bool>,
}

/// Read site settings
#[utoipa::path(
    get,
    path = "/api/admin/site-settings",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current settings", body = SiteSettingsBody),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/admin/site-settings")]
pub async fn get_site_settings_handler(
    _admin: AdminUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.get_site_settings_use_case.execute().await {
        Ok(settings) => ApiResponse::success(SiteSettingsBody::from(settings)),
        Err(e) => {
            error!(error = %e, "Loading site settings failed");
            ApiResponse::internal_error()
        }
    }
}

/// Update site settings
///
/// Field-scoped patch. The access-password hash cannot be written here;
/// it only changes through the regeneration endpoint.
#[utoipa::path(
    put,
    path = "/api/admin/site-settings",
    tag = "admin",
    request_body = UpdateSiteSettingsBody,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Updated settings", body = SiteSettingsBody),
        (status = 400, description = "Empty patch", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[put("/api/admin/site-settings")]
pub async fn update_site_settings_handler(
    admin: AdminUser,
    request: web::Json<UpdateSiteSettingsRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .update_site_settings_use_case
        .execute(request.into_inner())
        .await
    {
        Ok(settings) => {
            info!(admin_id = %admin.user_id, "Site settings updated by admin");
            ApiResponse::success(SiteSettingsBody::from(settings))
        }
        Err(e) => {
            error!(error = %e, "Updating site settings failed");
            ApiResponse::internal_error()
        }
    }
}
