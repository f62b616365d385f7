use actix_web::body::{BoxBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{HeaderName, HeaderValue};
use actix_web::middleware::Next;
use actix_web::{web, Error};
use tracing::error;

use crate::gate::application::use_cases::check_site_access::{
    CheckSiteAccessError, GateAdmission,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

pub const SITE_ACCESS_TOKEN_HEADER: &str = "x-site-access-token";
pub const SITE_ACCESS_PASSWORD_HEADER: &str = "x-site-access-password";

/// Paths that must stay reachable without gate credentials: health probes,
/// API docs and the password exchange endpoint itself.
fn is_exempt(path: &str) -> bool {
    path == "/api/auth/site-access"
        || path.starts_with("/health")
        || path.starts_with("/ready")
        || path.starts_with("/swagger")
        || path.starts_with("/api-docs")
}

fn header_value(req: &ServiceRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)?
        .to_str()
        .ok()
        .map(|s| s.to_string())
}

/// Pre-auth barrier in front of every route. Admission is re-decided on
/// each request from the current settings row; a password admission echoes
/// a fresh token back so the client can stop sending the password.
pub async fn site_gate_middleware(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    if is_exempt(req.path()) {
        return Ok(next.call(req).await?.map_into_boxed_body());
    }

    let state = match req.app_data::<web::Data<AppState>>() {
        Some(state) => state.clone(),
        None => {
            error!("Site gate middleware running without AppState");
            return Ok(req
                .into_response(ApiResponse::internal_error())
                .map_into_boxed_body());
        }
    };

    let token = header_value(&req, SITE_ACCESS_TOKEN_HEADER);
    let password = header_value(&req, SITE_ACCESS_PASSWORD_HEADER);

    match state
        .check_site_access_use_case
        .execute(token.as_deref(), password.as_deref())
        .await
    {
        Ok(GateAdmission::Open) | Ok(GateAdmission::TokenAccepted) => {
            Ok(next.call(req).await?.map_into_boxed_body())
        }
        Ok(GateAdmission::FreshToken(fresh)) => {
            let mut res = next.call(req).await?.map_into_boxed_body();
            if let Ok(value) = HeaderValue::from_str(&fresh) {
                res.headers_mut()
                    .insert(HeaderName::from_static(SITE_ACCESS_TOKEN_HEADER), value);
            }
            Ok(res)
        }
        Err(CheckSiteAccessError::AccessRequired) => Ok(req
            .into_response(ApiResponse::unauthorized(
                "SITE_ACCESS_REQUIRED",
                "Site access required",
            ))
            .map_into_boxed_body()),
        Err(e) => {
            error!(error = %e, "Site gate check failed");
            Ok(req
                .into_response(ApiResponse::internal_error())
                .map_into_boxed_body())
        }
    }
}
