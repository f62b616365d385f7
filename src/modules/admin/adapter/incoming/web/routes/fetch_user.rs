use actix_web::{get, web, HttpResponse, Responder};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::admin::application::use_cases::fetch_user::FetchUserError;
use crate::api::schemas::ErrorResponse;
use crate::auth::adapter::incoming::web::extractors::auth::AdminUser;
use crate::auth::adapter::incoming::web::routes::UserSummary;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Serialize, ToSchema)]
pub struct FetchUserResponseBody {
    user: UserSummary,
}

fn map_fetch_error(err: &FetchUserError) -> HttpResponse {
    match err {
        FetchUserError::UserNotFound => ApiResponse::not_found("USER_NOT_FOUND", "User not found"),
        other => {
            error!(error = %other, "Fetching user failed");
            ApiResponse::internal_error()
        }
    }
}

/// Fetch a single user
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    tag = "admin",
    params(("id" = Uuid, Path, description = "User id")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User found", body = FetchUserResponseBody),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/admin/users/{id}")]
pub async fn fetch_user_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.fetch_user_use_case.execute(path.into_inner()).await {
        Ok(user) => ApiResponse::success(FetchUserResponseBody {
            user: UserSummary::from(user),
        }),
        Err(e) => map_fetch_error(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::application::use_cases::fetch_user::IFetchUserUseCase;
    use crate::auth::application::domain::entities::test_fixtures::sample_user;
    use crate::auth::application::domain::entities::User;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::stubs::{admin_token_provider, bearer};
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct StubFetchUser {
        result: Result<(), FetchUserError>,
    }

    #[async_trait]
    impl IFetchUserUseCase for StubFetchUser {
        async fn execute(&self, user_id: Uuid) -> Result<User, FetchUserError> {
            match &self.result {
                Ok(()) => {
                    let mut user = sample_user();
                    user.id = user_id;
                    Ok(user)
                }
                Err(e) => Err(e.clone()),
            }
        }
    }

    #[actix_web::test]
    async fn test_fetch_user_success() {
        let app_state = TestAppStateBuilder::default()
            .with_fetch_user(StubFetchUser { result: Ok(()) })
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(admin_token_provider(Uuid::new_v4()))
                .service(fetch_user_handler),
        )
        .await;

        let user_id = Uuid::new_v4();
        let req = test::TestRequest::get()
            .uri(&format!("/api/admin/users/{}", user_id))
            .insert_header(bearer())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["id"], user_id.to_string());
    }

    #[actix_web::test]
    async fn test_fetch_unknown_user() {
        let app_state = TestAppStateBuilder::default()
            .with_fetch_user(StubFetchUser {
                result: Err(FetchUserError::UserNotFound),
            })
            .build();

        let app = test::init_service(
            App::new()
                .app_data(app_state)
                .app_data(admin_token_provider(Uuid::new_v4()))
                .service(fetch_user_handler),
        )
        .await;

        let req = test::TestRequest::get()
            .uri(&format!("/api/admin/users/{}", Uuid::new_v4()))
            .insert_header(bearer())
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "USER_NOT_FOUND");
    }
}
