pub mod api;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::admin;
pub use modules::auth;
pub use modules::email;
pub use modules::gate;
pub use modules::kyc;

use crate::admin::application::use_cases::dashboard_stats::IDashboardStatsUseCase;
use crate::admin::application::use_cases::delete_user::IDeleteUserUseCase;
use crate::admin::application::use_cases::fetch_user::IFetchUserUseCase;
use crate::admin::application::use_cases::generate_access_password::IGenerateAccessPasswordUseCase;
use crate::admin::application::use_cases::get_site_settings::IGetSiteSettingsUseCase;
use crate::admin::application::use_cases::list_users::IListUsersUseCase;
use crate::admin::application::use_cases::update_site_settings::IUpdateSiteSettingsUseCase;
use crate::admin::application::use_cases::update_user::IUpdateUserUseCase;
use crate::auth::application::orchestrator::user_registration::UserRegistrationOrchestrator;
use crate::auth::application::use_cases::connect_wallet::IConnectWalletUseCase;
use crate::auth::application::use_cases::forgot_password::IForgotPasswordUseCase;
use crate::auth::application::use_cases::login_user::ILoginUserUseCase;
use crate::auth::application::use_cases::resend_verification::IResendVerificationUseCase;
use crate::auth::application::use_cases::reset_password::IResetPasswordUseCase;
use crate::auth::application::use_cases::verify_email::IVerifyEmailUseCase;
use crate::auth::application::use_cases::verify_reset_token::IVerifyResetTokenUseCase;
use crate::auth::application::use_cases::wallet_challenge::IWalletChallengeUseCase;
use crate::gate::application::use_cases::check_site_access::ICheckSiteAccessUseCase;
use crate::gate::application::use_cases::verify_site_access::IVerifySiteAccessUseCase;
use crate::kyc::application::use_cases::list_pending::IListPendingKycUseCase;
use crate::kyc::application::use_cases::set_kyc_status::ISetKycStatusUseCase;
use crate::kyc::application::use_cases::submit_kyc::ISubmitKycUseCase;

use actix_web::{web, App, HttpServer};
use sea_orm::{ConnectOptions, Database};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub register_user_orchestrator: Arc<UserRegistrationOrchestrator>,
    pub login_user_use_case: Arc<dyn ILoginUserUseCase + Send + Sync>,
    pub verify_email_use_case: Arc<dyn IVerifyEmailUseCase + Send + Sync>,
    pub resend_verification_use_case: Arc<dyn IResendVerificationUseCase + Send + Sync>,
    pub forgot_password_use_case: Arc<dyn IForgotPasswordUseCase + Send + Sync>,
    pub verify_reset_token_use_case: Arc<dyn IVerifyResetTokenUseCase + Send + Sync>,
    pub reset_password_use_case: Arc<dyn IResetPasswordUseCase + Send + Sync>,
    pub wallet_challenge_use_case: Arc<dyn IWalletChallengeUseCase + Send + Sync>,
    pub connect_wallet_use_case: Arc<dyn IConnectWalletUseCase + Send + Sync>,
    pub check_site_access_use_case: Arc<dyn ICheckSiteAccessUseCase + Send + Sync>,
    pub verify_site_access_use_case: Arc<dyn IVerifySiteAccessUseCase + Send + Sync>,
    pub submit_kyc_use_case: Arc<dyn ISubmitKycUseCase + Send + Sync>,
    pub list_pending_kyc_use_case: Arc<dyn IListPendingKycUseCase + Send + Sync>,
    pub set_kyc_status_use_case: Arc<dyn ISetKycStatusUseCase + Send + Sync>,
    pub list_users_use_case: Arc<dyn IListUsersUseCase + Send + Sync>,
    pub fetch_user_use_case: Arc<dyn IFetchUserUseCase + Send + Sync>,
    pub update_user_use_case: Arc<dyn IUpdateUserUseCase + Send + Sync>,
    pub delete_user_use_case: Arc<dyn IDeleteUserUseCase + Send + Sync>,
    pub dashboard_stats_use_case: Arc<dyn IDashboardStatsUseCase + Send + Sync>,
    pub get_site_settings_use_case: Arc<dyn IGetSiteSettingsUseCase + Send + Sync>,
    pub update_site_settings_use_case: Arc<dyn IUpdateSiteSettingsUseCase + Send + Sync>,
    pub generate_access_password_use_case: Arc<dyn IGenerateAccessPasswordUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    use crate::admin::application::use_cases::dashboard_stats::DashboardStatsUseCase;
    use crate::admin::application::use_cases::delete_user::DeleteUserUseCase;
    use crate::admin::application::use_cases::fetch_user::FetchUserUseCase;
    use crate::admin::application::use_cases::generate_access_password::GenerateAccessPasswordUseCase;
    use crate::admin::application::use_cases::get_site_settings::GetSiteSettingsUseCase;
    use crate::admin::application::use_cases::list_users::ListUsersUseCase;
    use crate::admin::application::use_cases::update_site_settings::UpdateSiteSettingsUseCase;
    use crate::admin::application::use_cases::update_user::UpdateUserUseCase;
    use crate::api::openapi::ApiDoc;
    use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
    use crate::auth::adapter::outgoing::security::ethereum_verifier::EthereumSignatureVerifier;
    use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
    use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
    use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
    use crate::auth::application::services::token::{TokenConfig, TokenService};
    use crate::auth::application::use_cases::connect_wallet::ConnectWalletUseCase;
    use crate::auth::application::use_cases::forgot_password::ForgotPasswordUseCase;
    use crate::auth::application::use_cases::login_user::LoginUserUseCase;
    use crate::auth::application::use_cases::register_user::{
        IRegisterUserUseCase, RegisterUserUseCase,
    };
    use crate::auth::application::use_cases::resend_verification::ResendVerificationUseCase;
    use crate::auth::application::use_cases::reset_password::ResetPasswordUseCase;
    use crate::auth::application::use_cases::verify_email::VerifyEmailUseCase;
    use crate::auth::application::use_cases::verify_reset_token::VerifyResetTokenUseCase;
    use crate::auth::application::use_cases::wallet_challenge::WalletChallengeUseCase;
    use crate::email::adapter::outgoing::SmtpEmailSender;
    use crate::email::application::ports::outgoing::user_email_notifier::UserEmailNotifier;
    use crate::email::application::services::UserEmailService;
    use crate::gate::adapter::incoming::web::middleware::site_gate_middleware;
    use crate::gate::adapter::outgoing::settings_repository_postgres::SettingsRepositoryPostgres;
    use crate::gate::application::use_cases::check_site_access::CheckSiteAccessUseCase;
    use crate::gate::application::use_cases::verify_site_access::VerifySiteAccessUseCase;
    use crate::kyc::adapter::outgoing::GcsDocumentStore;
    use crate::kyc::application::use_cases::list_pending::ListPendingKycUseCase;
    use crate::kyc::application::use_cases::set_kyc_status::SetKycStatusUseCase;
    use crate::kyc::application::use_cases::submit_kyc::SubmitKycUseCase;
    use crate::shared::api::custom_json_config;
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting application...");

    // Environment variable loading
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // Try .env.{environment} first, then fall back to .env
    let env_file = format!(".env.{}", env);
    if dotenvy::from_filename(&env_file).is_err() {
        dotenvy::dotenv().ok();
    }

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL is not set in .env file");
    let host = env::var("HOST").expect("HOST is not set in .env file");
    let port = env::var("PORT").expect("PORT is not set in .env file");

    // SMTP SETUPS
    let from_email = std::env::var("EMAIL_FROM").expect("EMAIL_FROM not set");
    let smtp_sender = if std::env::var("RUST_ENV").as_deref() == Ok("test") {
        // Local Mailpit
        let smtp_host = std::env::var("SMTP_HOST").unwrap_or_else(|_| "localhost".to_string());
        let smtp_port: u16 = std::env::var("SMTP_PORT")
            .unwrap_or_else(|_| "1025".to_string())
            .parse()
            .expect("Invalid SMTP_PORT");

        SmtpEmailSender::new_local(&smtp_host, smtp_port, &from_email)
    } else {
        let smtp_server = std::env::var("SMTP_SERVER").expect("SMTP_SERVER not set");
        let smtp_user = std::env::var("SMTP_USERNAME").expect("SMTP_USERNAME not set");
        let smtp_pass = std::env::var("SMTP_PASSWORD").expect("SMTP_PASSWORD not set");

        SmtpEmailSender::new(&smtp_server, &smtp_user, &smtp_pass, &from_email)
            .expect("Failed to build SMTP transport")
    };

    let server_url = format!("{host}:{port}");
    info!("Server run on: {}", server_url);

    // Database connection
    let mut opt = ConnectOptions::new(db_url);
    opt.max_connections(50)
        .min_connections(10)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let conn = Database::connect(opt)
        .await
        .expect("Failed to connect to database");

    let db_arc = Arc::new(conn);

    // Outgoing adapters
    let user_repo = UserRepositoryPostgres::new(Arc::clone(&db_arc));
    let user_query = UserQueryPostgres::new(Arc::clone(&db_arc));
    let settings_repo = SettingsRepositoryPostgres::new(Arc::clone(&db_arc));
    let hasher = Argon2Hasher::from_env();
    let token_service = TokenService::new(TokenConfig::from_env());
    let signature_verifier = EthereumSignatureVerifier::new();
    let document_store = GcsDocumentStore::new();

    let app_url = env::var("APP_URL").unwrap_or_else(|_| format!("http://{}", server_url));
    let user_email_service = UserEmailService::new(Arc::new(smtp_sender), app_url);

    // Registration components
    let register_use_case = RegisterUserUseCase::new(
        user_repo.clone(),
        hasher.clone(),
        settings_repo.clone(),
        token_service.clone(),
    );
    let register_uc_arc: Arc<dyn IRegisterUserUseCase + Send + Sync> = Arc::new(register_use_case);
    let email_notifier_arc: Arc<dyn UserEmailNotifier + Send + Sync> =
        Arc::new(user_email_service.clone());
    let register_user_orchestrator =
        UserRegistrationOrchestrator::new(register_uc_arc, email_notifier_arc);

    // Account lifecycle
    let verify_email_use_case = VerifyEmailUseCase::new(
        token_service.clone(),
        user_query.clone(),
        user_repo.clone(),
    );
    let resend_verification_use_case = ResendVerificationUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        token_service.clone(),
        user_email_service.clone(),
    );
    let login_user_use_case = LoginUserUseCase::new(
        user_query.clone(),
        hasher.clone(),
        token_service.clone(),
    );
    let forgot_password_use_case = ForgotPasswordUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        user_email_service.clone(),
    );
    let verify_reset_token_use_case = VerifyResetTokenUseCase::new(user_query.clone());
    let reset_password_use_case =
        ResetPasswordUseCase::new(user_query.clone(), user_repo.clone(), hasher.clone());

    // Wallet linkage
    let wallet_challenge_use_case = WalletChallengeUseCase::new(user_repo.clone());
    let connect_wallet_use_case = ConnectWalletUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        signature_verifier,
    );

    // Site gate
    let check_site_access_use_case = CheckSiteAccessUseCase::new(
        settings_repo.clone(),
        hasher.clone(),
        token_service.clone(),
    );
    let verify_site_access_use_case = VerifySiteAccessUseCase::new(
        settings_repo.clone(),
        hasher.clone(),
        token_service.clone(),
    );

    // KYC workflow
    let submit_kyc_use_case = SubmitKycUseCase::new(
        user_query.clone(),
        user_repo.clone(),
        document_store.clone(),
    );
    let list_pending_kyc_use_case = ListPendingKycUseCase::new(user_query.clone());
    let set_kyc_status_use_case =
        SetKycStatusUseCase::new(user_query.clone(), user_repo.clone(), document_store);

    // Admin surface
    let list_users_use_case = ListUsersUseCase::new(user_query.clone());
    let fetch_user_use_case = FetchUserUseCase::new(user_query.clone());
    let update_user_use_case = UpdateUserUseCase::new(user_repo.clone());
    let delete_user_use_case = DeleteUserUseCase::new(user_repo.clone());
    let dashboard_stats_use_case = DashboardStatsUseCase::new(user_query);
    let get_site_settings_use_case = GetSiteSettingsUseCase::new(settings_repo.clone());
    let update_site_settings_use_case = UpdateSiteSettingsUseCase::new(settings_repo.clone());
    let generate_access_password_use_case =
        GenerateAccessPasswordUseCase::new(settings_repo, hasher);

    let state = AppState {
        register_user_orchestrator: Arc::new(register_user_orchestrator),
        login_user_use_case: Arc::new(login_user_use_case),
        verify_email_use_case: Arc::new(verify_email_use_case),
        resend_verification_use_case: Arc::new(resend_verification_use_case),
        forgot_password_use_case: Arc::new(forgot_password_use_case),
        verify_reset_token_use_case: Arc::new(verify_reset_token_use_case),
        reset_password_use_case: Arc::new(reset_password_use_case),
        wallet_challenge_use_case: Arc::new(wallet_challenge_use_case),
        connect_wallet_use_case: Arc::new(connect_wallet_use_case),
        check_site_access_use_case: Arc::new(check_site_access_use_case),
        verify_site_access_use_case: Arc::new(verify_site_access_use_case),
        submit_kyc_use_case: Arc::new(submit_kyc_use_case),
        list_pending_kyc_use_case: Arc::new(list_pending_kyc_use_case),
        set_kyc_status_use_case: Arc::new(set_kyc_status_use_case),
        list_users_use_case: Arc::new(list_users_use_case),
        fetch_user_use_case: Arc::new(fetch_user_use_case),
        update_user_use_case: Arc::new(update_user_use_case),
        delete_user_use_case: Arc::new(delete_user_use_case),
        dashboard_stats_use_case: Arc::new(dashboard_stats_use_case),
        get_site_settings_use_case: Arc::new(get_site_settings_use_case),
        update_site_settings_use_case: Arc::new(update_site_settings_use_case),
        generate_access_password_use_case: Arc::new(generate_access_password_use_case),
    };

    let token_provider_arc: Arc<dyn TokenProvider + Send + Sync> = Arc::new(token_service);
    let db_for_server = Arc::clone(&db_arc);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider_arc)))
            .app_data(web::Data::new(Arc::clone(&db_for_server)))
            .app_data(custom_json_config())
            .wrap(actix_web::middleware::from_fn(site_gate_middleware))
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(server_url)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Gate
    cfg.service(crate::gate::adapter::incoming::web::routes::site_access_handler);
    // Auth
    cfg.service(crate::auth::adapter::incoming::web::routes::register_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_email_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::resend_verification_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::login_user_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::forgot_password_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::verify_reset_token_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::reset_password_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::wallet_challenge_handler);
    cfg.service(crate::auth::adapter::incoming::web::routes::connect_wallet_handler);
    // KYC
    cfg.service(crate::kyc::adapter::incoming::web::routes::submit_kyc_handler);
    // Admin
    cfg.service(crate::admin::adapter::incoming::web::routes::list_users_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::fetch_user_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::update_user_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::delete_user_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::dashboard_stats_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::get_site_settings_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::update_site_settings_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::generate_access_password_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::list_pending_kyc_handler);
    cfg.service(crate::admin::adapter::incoming::web::routes::decide_kyc_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
