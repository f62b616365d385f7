use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::gate::application::use_cases::verify_site_access::{
    VerifySiteAccessError, VerifySiteAccessRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(serde::Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct SiteAccessBody {
    /// Shared site password
    password: String,
}

#[derive(Serialize, ToSchema)]
pub struct SiteAccessResponseBody {
    /// Signed site-access token for subsequent requests
    token: String,
}

fn map_verify_error(err: &VerifySiteAccessError) -> HttpResponse {
    match err {
        // Wrong password and no configured secret answer identically, so
        // the response does not reveal whether a secret exists.
        VerifySiteAccessError::InvalidPassword => {
            warn!("Site access attempt with invalid password");
            ApiResponse::unauthorized("INVALID_PASSWORD", "Invalid site password")
        }
        other => {
            error!(error = %other, "Site access verification failed");
            ApiResponse::internal_error()
        }
    }
}

/// Exchange the shared site password for a site-access token
#[utoipa::path(
    post,
    path = "/api/auth/site-access",
    tag = "gate",
    request_body = SiteAccessBody,
    responses(
        (status = 200, description = "Password accepted", body = SiteAccessResponseBody),
        (status = 401, description = "Invalid password", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/site-access")]
pub async fn site_access_handler(
    req: web::Json<VerifySiteAccessRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .verify_site_access_use_case
        .execute(req.into_inner())
        .await
    {
        Ok(response) => {
            info!("Site access granted");
            ApiResponse::success(SiteAccessResponseBody {
                token: response.token,
            })
        }
        Err(e) => map_verify_error(&e),
    }
}
