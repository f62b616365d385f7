use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;
use uuid::Uuid;

use crate::admin::application::use_cases::dashboard_stats::{
    DashboardStatsError, IDashboardStatsUseCase,
};
use crate::admin::application::use_cases::delete_user::{DeleteUserError, IDeleteUserUseCase};
use crate::admin::application::use_cases::fetch_user::{FetchUserError, IFetchUserUseCase};
use crate::admin::application::use_cases::generate_access_password::{
    GenerateAccessPasswordError, GeneratedAccessPassword, IGenerateAccessPasswordUseCase,
};
use crate::admin::application::use_cases::get_site_settings::{
    GetSiteSettingsError, IGetSiteSettingsUseCase,
};
use crate::admin::application::use_cases::list_users::{IListUsersUseCase, ListUsersError};
use crate::admin::application::use_cases::update_site_settings::{
    IUpdateSiteSettingsUseCase, UpdateSiteSettingsError, UpdateSiteSettingsRequest,
};
use crate::admin::application::use_cases::update_user::{
    IUpdateUserUseCase, UpdateUserError, UpdateUserRequest,
};
use crate::auth::application::domain::entities::{User, UserRole};
use crate::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider, TokenPurpose,
};
use crate::auth::application::ports::outgoing::user_query::UserStats;
use crate::auth::application::use_cases::connect_wallet::{
    ConnectWalletError, ConnectWalletRequest, IConnectWalletUseCase,
};
use crate::auth::application::use_cases::forgot_password::{
    ForgotPasswordError, ForgotPasswordRequest, IForgotPasswordUseCase,
};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterUserError, RegisterUserRequest, RegisterUserResponse,
};
use crate::auth::application::use_cases::resend_verification::{
    IResendVerificationUseCase, ResendVerificationError, ResendVerificationRequest,
};
use crate::auth::application::use_cases::reset_password::{
    IResetPasswordUseCase, ResetPasswordError, ResetPasswordRequest,
};
use crate::auth::application::use_cases::verify_email::{
    IVerifyEmailUseCase, VerifyEmailError, VerifyEmailResponse,
};
use crate::auth::application::use_cases::verify_reset_token::{
    IVerifyResetTokenUseCase, VerifyResetTokenError,
};
use crate::auth::application::use_cases::wallet_challenge::{
    IWalletChallengeUseCase, WalletChallengeError, WalletChallengeResponse,
};
use crate::email::application::ports::outgoing::user_email_notifier::{
    PasswordResetEmail, UserEmailNotificationError, UserEmailNotifier, VerificationEmail,
};
use crate::gate::application::domain::entities::SiteSettings;
use crate::gate::application::use_cases::check_site_access::{
    CheckSiteAccessError, GateAdmission, ICheckSiteAccessUseCase,
};
use crate::gate::application::use_cases::verify_site_access::{
    IVerifySiteAccessUseCase, VerifySiteAccessError, VerifySiteAccessRequest,
    VerifySiteAccessResponse,
};
use crate::kyc::application::use_cases::list_pending::{
    IListPendingKycUseCase, KycReviewItem, ListPendingKycError,
};
use crate::kyc::application::use_cases::set_kyc_status::{
    ISetKycStatusUseCase, KycDecision, SetKycStatusError,
};
use crate::kyc::application::use_cases::submit_kyc::{
    ISubmitKycUseCase, SubmitKycError, SubmitKycRequest,
};

// ============================================================================
// Token provider helpers
// ============================================================================

/// Accepts any bearer token and answers with fixed claims for the given
/// identity. Route tests pair it with [`bearer`] so the extractor chain runs
/// without real signing keys.
#[derive(Debug, Clone)]
pub struct StubTokenProvider {
    pub user_id: Uuid,
    pub role: UserRole,
    pub is_verified: bool,
}

// 2100-01-01T00:00:00Z
const FAR_FUTURE_EXP: i64 = 4_102_444_800;

impl TokenProvider for StubTokenProvider {
    fn issue_access_token(
        &self,
        _user_id: Uuid,
        _role: UserRole,
        _is_verified: bool,
    ) -> Result<String, TokenError> {
        Ok("stub.access.token".to_string())
    }

    fn issue_site_access_token(&self) -> Result<String, TokenError> {
        Ok("stub.site-access.token".to_string())
    }

    fn issue_verification_token(&self, _user_id: Uuid) -> Result<String, TokenError> {
        Ok("stub.verification.token".to_string())
    }

    fn verify(&self, _token: &str, expected: TokenPurpose) -> Result<TokenClaims, TokenError> {
        Ok(TokenClaims {
            sub: self.user_id.to_string(),
            exp: FAR_FUTURE_EXP,
            purpose: expected.as_str().to_string(),
            role: Some(self.role.as_str().to_string()),
            is_verified: Some(self.is_verified),
        })
    }
}

fn token_provider_data(
    user_id: Uuid,
    role: UserRole,
    is_verified: bool,
) -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(StubTokenProvider {
        user_id,
        role,
        is_verified,
    });
    web::Data::new(provider)
}

pub fn authenticated_token_provider(
    user_id: Uuid,
    is_verified: bool,
) -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    token_provider_data(user_id, UserRole::User, is_verified)
}

pub fn admin_token_provider(user_id: Uuid) -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    token_provider_data(user_id, UserRole::Admin, true)
}

pub fn bearer() -> (&'static str, &'static str) {
    ("Authorization", "Bearer test-token")
}

// ============================================================================
// Default use-case stubs
// ============================================================================
//
// One per AppState slot. Every method panics; a test that reaches a stub it
// did not replace is asserting against the wrong handler.

#[derive(Default, Clone)]
pub struct StubRegisterUserUseCase;

#[async_trait]
impl IRegisterUserUseCase for StubRegisterUserUseCase {
    async fn execute(
        &self,
        _request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, RegisterUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubUserEmailNotifier;

#[async_trait]
impl UserEmailNotifier for StubUserEmailNotifier {
    async fn send_verification_email(
        &self,
        _mail: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError> {
        Ok(())
    }

    async fn send_password_reset_email(
        &self,
        _mail: PasswordResetEmail,
    ) -> Result<(), UserEmailNotificationError> {
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct StubLoginUserUseCase;

#[async_trait]
impl ILoginUserUseCase for StubLoginUserUseCase {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubVerifyEmailUseCase;

#[async_trait]
impl IVerifyEmailUseCase for StubVerifyEmailUseCase {
    async fn execute(&self, _token: &str) -> Result<VerifyEmailResponse, VerifyEmailError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubResendVerificationUseCase;

#[async_trait]
impl IResendVerificationUseCase for StubResendVerificationUseCase {
    async fn execute(
        &self,
        _request: ResendVerificationRequest,
    ) -> Result<(), ResendVerificationError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubForgotPasswordUseCase;

#[async_trait]
impl IForgotPasswordUseCase for StubForgotPasswordUseCase {
    async fn execute(&self, _request: ForgotPasswordRequest) -> Result<(), ForgotPasswordError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubVerifyResetTokenUseCase;

#[async_trait]
impl IVerifyResetTokenUseCase for StubVerifyResetTokenUseCase {
    async fn execute(&self, _token: &str) -> Result<bool, VerifyResetTokenError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubResetPasswordUseCase;

#[async_trait]
impl IResetPasswordUseCase for StubResetPasswordUseCase {
    async fn execute(&self, _request: ResetPasswordRequest) -> Result<(), ResetPasswordError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubWalletChallengeUseCase;

#[async_trait]
impl IWalletChallengeUseCase for StubWalletChallengeUseCase {
    async fn execute(
        &self,
        _user_id: Uuid,
        _address: &str,
    ) -> Result<WalletChallengeResponse, WalletChallengeError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubConnectWalletUseCase;

#[async_trait]
impl IConnectWalletUseCase for StubConnectWalletUseCase {
    async fn execute(
        &self,
        _user_id: Uuid,
        _request: ConnectWalletRequest,
    ) -> Result<User, ConnectWalletError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubCheckSiteAccessUseCase;

#[async_trait]
impl ICheckSiteAccessUseCase for StubCheckSiteAccessUseCase {
    async fn execute(
        &self,
        _token: Option<&str>,
        _password: Option<&str>,
    ) -> Result<GateAdmission, CheckSiteAccessError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubVerifySiteAccessUseCase;

#[async_trait]
impl IVerifySiteAccessUseCase for StubVerifySiteAccessUseCase {
    async fn execute(
        &self,
        _request: VerifySiteAccessRequest,
    ) -> Result<VerifySiteAccessResponse, VerifySiteAccessError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubSubmitKycUseCase;

#[async_trait]
impl ISubmitKycUseCase for StubSubmitKycUseCase {
    async fn execute(
        &self,
        _user_id: Uuid,
        _request: SubmitKycRequest,
    ) -> Result<User, SubmitKycError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubListPendingKycUseCase;

#[async_trait]
impl IListPendingKycUseCase for StubListPendingKycUseCase {
    async fn execute(&self) -> Result<Vec<KycReviewItem>, ListPendingKycError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubSetKycStatusUseCase;

#[async_trait]
impl ISetKycStatusUseCase for StubSetKycStatusUseCase {
    async fn execute(
        &self,
        _user_id: Uuid,
        _decision: KycDecision,
    ) -> Result<User, SetKycStatusError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubListUsersUseCase;

#[async_trait]
impl IListUsersUseCase for StubListUsersUseCase {
    async fn execute(&self) -> Result<Vec<User>, ListUsersError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubFetchUserUseCase;

#[async_trait]
impl IFetchUserUseCase for StubFetchUserUseCase {
    async fn execute(&self, _user_id: Uuid) -> Result<User, FetchUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubUpdateUserUseCase;

#[async_trait]
impl IUpdateUserUseCase for StubUpdateUserUseCase {
    async fn execute(
        &self,
        _user_id: Uuid,
        _request: UpdateUserRequest,
    ) -> Result<User, UpdateUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubDeleteUserUseCase;

#[async_trait]
impl IDeleteUserUseCase for StubDeleteUserUseCase {
    async fn execute(&self, _acting_admin: Uuid, _target: Uuid) -> Result<(), DeleteUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubDashboardStatsUseCase;

#[async_trait]
impl IDashboardStatsUseCase for StubDashboardStatsUseCase {
    async fn execute(&self) -> Result<UserStats, DashboardStatsError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubGetSiteSettingsUseCase;

#[async_trait]
impl IGetSiteSettingsUseCase for StubGetSiteSettingsUseCase {
    async fn execute(&self) -> Result<SiteSettings, GetSiteSettingsError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubUpdateSiteSettingsUseCase;

#[async_trait]
impl IUpdateSiteSettingsUseCase for StubUpdateSiteSettingsUseCase {
    async fn execute(
        &self,
        _request: UpdateSiteSettingsRequest,
    ) -> Result<SiteSettings, UpdateSiteSettingsError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Default, Clone)]
pub struct StubGenerateAccessPasswordUseCase;

#[async_trait]
impl IGenerateAccessPasswordUseCase for StubGenerateAccessPasswordUseCase {
    async fn execute(&self) -> Result<GeneratedAccessPassword, GenerateAccessPasswordError> {
        unimplemented!("Not used in this test")
    }
}
