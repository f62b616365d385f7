use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::api::schemas::{ErrorDetail, ErrorResponse, SuccessResponse};

use crate::admin::adapter::incoming::web::routes::dashboard_stats::DashboardStatsResponseBody;
use crate::admin::adapter::incoming::web::routes::delete_user::DeleteUserResponseBody;
use crate::admin::adapter::incoming::web::routes::fetch_user::FetchUserResponseBody;
use crate::admin::adapter::incoming::web::routes::generate_access_password::GenerateAccessPasswordResponseBody;
use crate::admin::adapter::incoming::web::routes::kyc_moderation::{
    KycDecisionBody, KycDecisionResponseBody, PendingKycResponseBody,
};
use crate::admin::adapter::incoming::web::routes::list_users::ListUsersResponseBody;
use crate::admin::adapter::incoming::web::routes::site_settings::{
    SiteSettingsBody, UpdateSiteSettingsBody,
};
use crate::admin::adapter::incoming::web::routes::update_user::{
    UpdateUserBody, UpdateUserResponseBody,
};
use crate::auth::adapter::incoming::web::routes::connect_wallet::{
    ConnectWalletBody, ConnectWalletResponseBody,
};
use crate::auth::adapter::incoming::web::routes::forgot_password::{
    ForgotPasswordBody, ForgotPasswordResponseBody,
};
use crate::auth::adapter::incoming::web::routes::login_user::{LoginRequestBody, LoginResponseBody};
use crate::auth::adapter::incoming::web::routes::register_user::{
    RegisterRequestBody, RegisterResponseBody,
};
use crate::auth::adapter::incoming::web::routes::resend_verification::{
    ResendVerificationBody, ResendVerificationResponseBody,
};
use crate::auth::adapter::incoming::web::routes::reset_password::{
    ResetPasswordBody, ResetPasswordResponseBody,
};
use crate::auth::adapter::incoming::web::routes::verify_email::VerifyEmailResponseBody;
use crate::auth::adapter::incoming::web::routes::verify_reset_token::VerifyResetTokenResponseBody;
use crate::auth::adapter::incoming::web::routes::wallet_challenge::{
    WalletChallengeBody, WalletChallengeResponseBody,
};
use crate::auth::adapter::incoming::web::routes::UserSummary;
use crate::gate::adapter::incoming::web::routes::site_access::{
    SiteAccessBody, SiteAccessResponseBody,
};
use crate::kyc::adapter::incoming::web::routes::submit_kyc::{
    SubmitKycForm, SubmitKycResponseBody,
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Oriro Access & Identity API",
        version = "1.0.0",
        description = "Site gate, account lifecycle and KYC approval workflow"
    ),
    paths(
        // Gate
        crate::gate::adapter::incoming::web::routes::site_access::site_access_handler,

        // Auth
        crate::auth::adapter::incoming::web::routes::register_user::register_user_handler,
        crate::auth::adapter::incoming::web::routes::verify_email::verify_email_handler,
        crate::auth::adapter::incoming::web::routes::resend_verification::resend_verification_handler,
        crate::auth::adapter::incoming::web::routes::login_user::login_user_handler,
        crate::auth::adapter::incoming::web::routes::forgot_password::forgot_password_handler,
        crate::auth::adapter::incoming::web::routes::verify_reset_token::verify_reset_token_handler,
        crate::auth::adapter::incoming::web::routes::reset_password::reset_password_handler,
        crate::auth::adapter::incoming::web::routes::wallet_challenge::wallet_challenge_handler,
        crate::auth::adapter::incoming::web::routes::connect_wallet::connect_wallet_handler,

        // KYC
        crate::kyc::adapter::incoming::web::routes::submit_kyc::submit_kyc_handler,

        // Admin
        crate::admin::adapter::incoming::web::routes::list_users::list_users_handler,
        crate::admin::adapter::incoming::web::routes::fetch_user::fetch_user_handler,
        crate::admin::adapter::incoming::web::routes::update_user::update_user_handler,
        crate::admin::adapter::incoming::web::routes::delete_user::delete_user_handler,
        crate::admin::adapter::incoming::web::routes::dashboard_stats::dashboard_stats_handler,
        crate::admin::adapter::incoming::web::routes::site_settings::get_site_settings_handler,
        crate::admin::adapter::incoming::web::routes::site_settings::update_site_settings_handler,
        crate::admin::adapter::incoming::web::routes::generate_access_password::generate_access_password_handler,
        crate::admin::adapter::incoming::web::routes::kyc_moderation::list_pending_kyc_handler,
        crate::admin::adapter::incoming::web::routes::kyc_moderation::decide_kyc_handler,
    ),
    components(
        schemas(
            // Response wrappers
            SuccessResponse<LoginResponseBody>,
            ErrorResponse,
            ErrorDetail,

            // Shared projections
            UserSummary,

            // Gate DTOs
            SiteAccessBody,
            SiteAccessResponseBody,

            // Auth DTOs
            RegisterRequestBody,
            RegisterResponseBody,
            VerifyEmailResponseBody,
            ResendVerificationBody,
            ResendVerificationResponseBody,
            LoginRequestBody,
            LoginResponseBody,
            ForgotPasswordBody,
            ForgotPasswordResponseBody,
            VerifyResetTokenResponseBody,
            ResetPasswordBody,
            ResetPasswordResponseBody,
            WalletChallengeBody,
            WalletChallengeResponseBody,
            ConnectWalletBody,
            ConnectWalletResponseBody,

            // KYC DTOs
            SubmitKycForm,
            SubmitKycResponseBody,

            // Admin DTOs
            ListUsersResponseBody,
            FetchUserResponseBody,
            UpdateUserBody,
            UpdateUserResponseBody,
            DeleteUserResponseBody,
            DashboardStatsResponseBody,
            SiteSettingsBody,
            UpdateSiteSettingsBody,
            GenerateAccessPasswordResponseBody,
            PendingKycResponseBody,
            KycDecisionBody,
            KycDecisionResponseBody,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "gate", description = "Site gate pre-auth barrier"),
        (name = "auth", description = "Account lifecycle endpoints"),
        (name = "wallet", description = "Wallet linkage endpoints"),
        (name = "kyc", description = "KYC submission endpoints"),
        (name = "admin", description = "Administrative endpoints"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
