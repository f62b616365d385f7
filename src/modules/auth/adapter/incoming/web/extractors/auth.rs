use actix_web::{dev::Payload, Error as ActixError, FromRequest, HttpRequest, HttpResponse};
use std::{
    future::{ready, Ready},
    sync::Arc,
};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::outgoing::token_provider::{TokenProvider, TokenPurpose};
use crate::shared::api::ApiResponse;

/// Caller identified by a valid access token (verified or not).
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
    pub is_verified: bool,
}

fn create_api_error(response: HttpResponse) -> ActixError {
    actix_web::error::InternalError::from_response("", response).into()
}

fn extract_token_from_header(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ActixError> {
    let token_provider =
        match req.app_data::<actix_web::web::Data<Arc<dyn TokenProvider + Send + Sync>>>() {
            Some(provider) => provider,
            None => return Err(create_api_error(ApiResponse::internal_error())),
        };

    let token = extract_token_from_header(req).ok_or_else(|| {
        create_api_error(ApiResponse::unauthorized(
            "MISSING_AUTH_HEADER",
            "Missing or invalid authorization header",
        ))
    })?;

    let claims = token_provider
        .verify(&token, TokenPurpose::Access)
        .map_err(|_| {
            create_api_error(ApiResponse::unauthorized(
                "INVALID_TOKEN",
                "Invalid or expired token",
            ))
        })?;

    let user_id = claims.subject_user_id().ok_or_else(|| {
        create_api_error(ApiResponse::unauthorized(
            "INVALID_TOKEN",
            "Invalid or expired token",
        ))
    })?;

    let role = claims
        .role
        .as_deref()
        .and_then(UserRole::from_str)
        .unwrap_or(UserRole::User);

    Ok(AuthenticatedUser {
        user_id,
        role,
        is_verified: claims.is_verified.unwrap_or(false),
    })
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

/// Caller whose access token carries the admin role.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user_id: Uuid,
}

impl FromRequest for AdminUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match authenticate(req) {
            Ok(user) if user.role.is_admin() => ready(Ok(AdminUser {
                user_id: user.user_id,
            })),
            Ok(_) => ready(Err(create_api_error(ApiResponse::forbidden(
                "ADMIN_REQUIRED",
                "Administrator privileges required",
            )))),
            Err(e) => ready(Err(e)),
        }
    }
}

/// Caller with a verified email address.
#[derive(Debug, Clone)]
pub struct VerifiedUser {
    pub user_id: Uuid,
}

impl FromRequest for VerifiedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match authenticate(req) {
            Ok(user) if user.is_verified => ready(Ok(VerifiedUser {
                user_id: user.user_id,
            })),
            Ok(_) => ready(Err(create_api_error(ApiResponse::forbidden(
                "EMAIL_NOT_VERIFIED",
                "Email verification required",
            )))),
            Err(e) => ready(Err(e)),
        }
    }
}
