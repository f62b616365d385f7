use actix_web::{post, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AuthenticatedUser;
use crate::auth::application::use_cases::connect_wallet::{
    ConnectWalletError, ConnectWalletRequest,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

use super::UserSummary;

#[derive(serde::Deserialize, ToSchema)]
#[allow(dead_code)]
pub struct ConnectWalletBody {
    /// Address from the challenge step
    #[schema(example = "0x52908400098527886e0f7030069857d2e4169ee7")]
    address: String,

    /// Hex-encoded 65-byte signature over the challenge message
    signature: String,
}

#[derive(Serialize, ToSchema)]
pub struct ConnectWalletResponseBody {
    user: UserSummary,
}

fn map_connect_error(err: &ConnectWalletError) -> HttpResponse {
    match err {
        ConnectWalletError::NoPendingChallenge => {
            warn!("Wallet connect without a pending challenge");
            ApiResponse::bad_request(
                "NO_PENDING_CHALLENGE",
                "No wallet challenge is pending for this account",
            )
        }
        ConnectWalletError::InvalidSignature => {
            warn!("Wallet connect with invalid signature");
            ApiResponse::bad_request("INVALID_SIGNATURE", "Signature verification failed")
        }
        ConnectWalletError::UserNotFound => {
            ApiResponse::not_found("USER_NOT_FOUND", "User not found")
        }
        other => {
            error!(error = %other, "Wallet connect failed");
            ApiResponse::internal_error()
        }
    }
}

/// Complete wallet linkage
///
/// Verifies the signature against the pending challenge and stores the
/// wallet address on the account. A successful linkage clears the nonce,
/// so the challenge cannot be replayed.
#[utoipa::path(
    post,
    path = "/api/auth/wallet/connect",
    tag = "wallet",
    request_body = ConnectWalletBody,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Wallet linked", body = ConnectWalletResponseBody),
        (status = 400, description = "Bad signature or no pending challenge", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[post("/api/auth/wallet/connect")]
pub async fn connect_wallet_handler(
    user: AuthenticatedUser,
    req: web::Json<ConnectWalletRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .connect_wallet_use_case
        .execute(user.user_id, req.into_inner())
        .await
    {
        Ok(updated) => {
            info!(user_id = %updated.id, "Wallet linked");
            ApiResponse::success(ConnectWalletResponseBody {
                user: UserSummary::from(updated),
            })
        }
        Err(e) => map_connect_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::test_fixtures::sample_user;
    use crate::auth::application::domain::entities::User;
    use crate::auth::application::use_cases::connect_wallet::IConnectWalletUseCase;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::{authenticated_token_provider, bearer};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use uuid::Uuid;

    struct StubConnect {
        result: Result<User, ConnectWalletError>,
    }

    #[async_trait]
    impl IConnectWalletUseCase for StubConnect {
        async fn execute(
            &self,
            _user_id: Uuid,
            _request: ConnectWalletRequest,
        ) -> Result<User, ConnectWalletError> {
            self.result.clone()
        }
    }

    fn body() -> serde_json::Value {
        serde_json::json!({
            "address": "0x52908400098527886e0f7030069857d2e4169ee7",
            "signature": format!("0x{}", "ab".repeat(65))
        })
    }

    #[actix_web::test]
    async fn test_connect_wallet_success() {
        let mut user = sample_user();
        user.wallet_address = Some("0x52908400098527886e0f7030069857d2e4169ee7".to_string());
        user.wallet_connected = true;

        let app_state = TestAppStateBuilder::default()
            .with_connect_wallet(StubConnect { result: Ok(user) })
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(authenticated_token_provider(Uuid::new_v4(), true))
                .service(connect_wallet_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/wallet/connect")
            .insert_header(bearer())
            .set_json(body())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["walletConnected"], true);
    }

    #[actix_web::test]
    async fn test_connect_wallet_invalid_signature() {
        let app_state = TestAppStateBuilder::default()
            .with_connect_wallet(StubConnect {
                result: Err(ConnectWalletError::InvalidSignature),
            })
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(authenticated_token_provider(Uuid::new_v4(), true))
                .service(connect_wallet_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/wallet/connect")
            .insert_header(bearer())
            .set_json(body())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "INVALID_SIGNATURE");
    }

    #[actix_web::test]
    async fn test_connect_wallet_no_pending_challenge() {
        let app_state = TestAppStateBuilder::default()
            .with_connect_wallet(StubConnect {
                result: Err(ConnectWalletError::NoPendingChallenge),
            })
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(authenticated_token_provider(Uuid::new_v4(), true))
                .service(connect_wallet_handler),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/auth/wallet/connect")
            .insert_header(bearer())
            .set_json(body())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "NO_PENDING_CHALLENGE");
    }
}
