use actix_web::{post, web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::use_cases::wallet_challenge::WalletChallengeError;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Deserialize, ToSchema)]
pub struct WalletChallengeBody {
    /// EVM address the caller wants to link (0x-prefixed, 40 hex chars)
    #[schema(example = "0x52908400098527886e0f7030069857d2e4169ee7")]
    address: String,
}

#[derive(Serialize, ToSchema)]
pub struct WalletChallengeResponseBody {
    /// Challenge text to sign with the wallet
    message: String,
}

fn map_challenge_error(err: &WalletChallengeError) -> HttpResponse {
    match err {
        WalletChallengeError::MalformedAddress => {
            warn!("Wallet challenge with malformed address");
            ApiResponse::bad_request("INVALID_WALLET_ADDRESS", "Malformed wallet address")
        }
        WalletChallengeError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        other => {
            error!(error = %other, "Wallet challenge failed");
            ApiResponse::internal_error()
        }
    }
}

/// Start wallet linkage
///
/// Issues a one-time challenge message bound to a fresh nonce. A new call
/// overwrites any previous pending challenge.
#[utoipa::path(
    post,
    path = "/api/auth/wallet/challenge",
    tag = "wallet",
    request_body = WalletChallengeBody,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Challenge issued", body = WalletChallengeResponseBody),
        (status = 400, description = "Malformed address", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/wallet/challenge")]
pub async fn wallet_challenge_handler(
    user: AuthenticatedUser,
    req: web::Json<WalletChallengeBody>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .wallet_challenge_use_case
        .execute(user.user_id, &req.address)
        .await
    {
        Ok(response) => {
            info!(user_id = %user.user_id, "Wallet challenge issued");
            ApiResponse::success(WalletChallengeResponseBody {
                message: response.message,
            })
        }
        Err(e) => map_challenge_error(&e),
    }
}
