use std::sync::Arc;

use actix_web::web;

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
use crate::tests::support::stubs::*;
use crate::AppState;

pub fn default_test_user_registration_orchestrator() -> Arc<UserRegistrationOrchestrator> {
    Arc::new(UserRegistrationOrchestrator::new(
        Arc::new(StubRegisterUserUseCase),
        Arc::new(StubUserEmailNotifier),
    ))
}

/// Assembles an [`AppState`] where every slot defaults to a panicking stub.
/// A test overrides only the use case behind the route under test.
pub struct TestAppStateBuilder {
    register_user_orchestrator: Option<Arc<UserRegistrationOrchestrator>>,
    login_user: Option<Arc<dyn ILoginUserUseCase + Send + Sync>>,
    verify_email: Option<Arc<dyn IVerifyEmailUseCase + Send + Sync>>,
    resend_verification: Option<Arc<dyn IResendVerificationUseCase + Send + Sync>>,
    forgot_password: Option<Arc<dyn IForgotPasswordUseCase + Send + Sync>>,
    verify_reset_token: Option<Arc<dyn IVerifyResetTokenUseCase + Send + Sync>>,
    reset_password: Option<Arc<dyn IResetPasswordUseCase + Send + Sync>>,
    wallet_challenge: Option<Arc<dyn IWalletChallengeUseCase + Send + Sync>>,
    connect_wallet: Option<Arc<dyn IConnectWalletUseCase + Send + Sync>>,
    check_site_access: Option<Arc<dyn ICheckSiteAccessUseCase + Send + Sync>>,
    verify_site_access: Option<Arc<dyn IVerifySiteAccessUseCase + Send + Sync>>,
    submit_kyc: Option<Arc<dyn ISubmitKycUseCase + Send + Sync>>,
    list_pending_kyc: Option<Arc<dyn IListPendingKycUseCase + Send + Sync>>,
    set_kyc_status: Option<Arc<dyn ISetKycStatusUseCase + Send + Sync>>,
    list_users: Option<Arc<dyn IListUsersUseCase + Send + Sync>>,
    fetch_user: Option<Arc<dyn IFetchUserUseCase + Send + Sync>>,
    update_user: Option<Arc<dyn IUpdateUserUseCase + Send + Sync>>,
    delete_user: Option<Arc<dyn IDeleteUserUseCase + Send + Sync>>,
    dashboard_stats: Option<Arc<dyn IDashboardStatsUseCase + Send + Sync>>,
    get_site_settings: Option<Arc<dyn IGetSiteSettingsUseCase + Send + Sync>>,
    update_site_settings: Option<Arc<dyn IUpdateSiteSettingsUseCase + Send + Sync>>,
    generate_access_password: Option<Arc<dyn IGenerateAccessPasswordUseCase + Send + Sync>>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            register_user_orchestrator: Some(default_test_user_registration_orchestrator()),
            login_user: Some(Arc::new(StubLoginUserUseCase)),
            verify_email: Some(Arc::new(StubVerifyEmailUseCase)),
            resend_verification: Some(Arc::new(StubResendVerificationUseCase)),
            forgot_password: Some(Arc::new(StubForgotPasswordUseCase)),
            verify_reset_token: Some(Arc::new(StubVerifyResetTokenUseCase)),
            reset_password: Some(Arc::new(StubResetPasswordUseCase)),
            wallet_challenge: Some(Arc::new(StubWalletChallengeUseCase)),
            connect_wallet: Some(Arc::new(StubConnectWalletUseCase)),
            check_site_access: Some(Arc::new(StubCheckSiteAccessUseCase)),
            verify_site_access: Some(Arc::new(StubVerifySiteAccessUseCase)),
            submit_kyc: Some(Arc::new(StubSubmitKycUseCase)),
            list_pending_kyc: Some(Arc::new(StubListPendingKycUseCase)),
            set_kyc_status: Some(Arc::new(StubSetKycStatusUseCase)),
            list_users: Some(Arc::new(StubListUsersUseCase)),
            fetch_user: Some(Arc::new(StubFetchUserUseCase)),
            update_user: Some(Arc::new(StubUpdateUserUseCase)),
            delete_user: Some(Arc::new(StubDeleteUserUseCase)),
            dashboard_stats: Some(Arc::new(StubDashboardStatsUseCase)),
            get_site_settings: Some(Arc::new(StubGetSiteSettingsUseCase)),
            update_site_settings: Some(Arc::new(StubUpdateSiteSettingsUseCase)),
            generate_access_password: Some(Arc::new(StubGenerateAccessPasswordUseCase)),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register_user_orchestrator(
        mut self,
        orchestrator: Arc<UserRegistrationOrchestrator>,
    ) -> Self {
        self.register_user_orchestrator = Some(orchestrator);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + Send + Sync + 'static) -> Self {
        self.login_user = Some(Arc::new(uc));
        self
    }

    pub fn with_verify_email(
        mut self,
        uc: impl IVerifyEmailUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verify_email = Some(Arc::new(uc));
        self
    }

    pub fn with_resend_verification(
        mut self,
        uc: impl IResendVerificationUseCase + Send + Sync + 'static,
    ) -> Self {
        self.resend_verification = Some(Arc::new(uc));
        self
    }

    pub fn with_forgot_password(
        mut self,
        uc: impl IForgotPasswordUseCase + Send + Sync + 'static,
    ) -> Self {
        self.forgot_password = Some(Arc::new(uc));
        self
    }

    pub fn with_verify_reset_token(
        mut self,
        uc: impl IVerifyResetTokenUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verify_reset_token = Some(Arc::new(uc));
        self
    }

    pub fn with_reset_password(
        mut self,
        uc: impl IResetPasswordUseCase + Send + Sync + 'static,
    ) -> Self {
        self.reset_password = Some(Arc::new(uc));
        self
    }

    pub fn with_wallet_challenge(
        mut self,
        uc: impl IWalletChallengeUseCase + Send + Sync + 'static,
    ) -> Self {
        self.wallet_challenge = Some(Arc::new(uc));
        self
    }

    pub fn with_connect_wallet(
        mut self,
        uc: impl IConnectWalletUseCase + Send + Sync + 'static,
    ) -> Self {
        self.connect_wallet = Some(Arc::new(uc));
        self
    }

    pub fn with_check_site_access(
        mut self,
        uc: impl ICheckSiteAccessUseCase + Send + Sync + 'static,
    ) -> Self {
        self.check_site_access = Some(Arc::new(uc));
        self
    }

    pub fn with_verify_site_access(
        mut self,
        uc: impl IVerifySiteAccessUseCase + Send + Sync + 'static,
    ) -> Self {
        self.verify_site_access = Some(Arc::new(uc));
        self
    }

    pub fn with_submit_kyc(mut self, uc: impl ISubmitKycUseCase + Send + Sync + 'static) -> Self {
        self.submit_kyc = Some(Arc::new(uc));
        self
    }

    pub fn with_list_pending_kyc(
        mut self,
        uc: impl IListPendingKycUseCase + Send + Sync + 'static,
    ) -> Self {
        self.list_pending_kyc = Some(Arc::new(uc));
        self
    }

    pub fn with_set_kyc_status(
        mut self,
        uc: impl ISetKycStatusUseCase + Send + Sync + 'static,
    ) -> Self {
        self.set_kyc_status = Some(Arc::new(uc));
        self
    }

    pub fn with_list_users(mut self, uc: impl IListUsersUseCase + Send + Sync + 'static) -> Self {
        self.list_users = Some(Arc::new(uc));
        self
    }

    pub fn with_fetch_user(mut self, uc: impl IFetchUserUseCase + Send + Sync + 'static) -> Self {
        self.fetch_user = Some(Arc::new(uc));
        self
    }

    pub fn with_update_user(
        mut self,
        uc: impl IUpdateUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.update_user = Some(Arc::new(uc));
        self
    }

    pub fn with_delete_user(
        mut self,
        uc: impl IDeleteUserUseCase + Send + Sync + 'static,
    ) -> Self {
        self.delete_user = Some(Arc::new(uc));
        self
    }

    pub fn with_dashboard_stats(
        mut self,
        uc: impl IDashboardStatsUseCase + Send + Sync + 'static,
    ) -> Self {
        self.dashboard_stats = Some(Arc::new(uc));
        self
    }

    pub fn with_get_site_settings(
        mut self,
        uc: impl IGetSiteSettingsUseCase + Send + Sync + 'static,
    ) -> Self {
        self.get_site_settings = Some(Arc::new(uc));
        self
    }

    pub fn with_update_site_settings(
        mut self,
        uc: impl IUpdateSiteSettingsUseCase + Send + Sync + 'static,
    ) -> Self {
        self.update_site_settings = Some(Arc::new(uc));
        self
    }

    pub fn with_generate_access_password(
        mut self,
        uc: impl IGenerateAccessPasswordUseCase + Send + Sync + 'static,
    ) -> Self {
        self.generate_access_password = Some(Arc::new(uc));
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            register_user_orchestrator: self.register_user_orchestrator.unwrap(),
            login_user_use_case: self.login_user.unwrap(),
            verify_email_use_case: self.verify_email.unwrap(),
            resend_verification_use_case: self.resend_verification.unwrap(),
            forgot_password_use_case: self.forgot_password.unwrap(),
            verify_reset_token_use_case: self.verify_reset_token.unwrap(),
            reset_password_use_case: self.reset_password.unwrap(),
            wallet_challenge_use_case: self.wallet_challenge.unwrap(),
            connect_wallet_use_case: self.connect_wallet.unwrap(),
            check_site_access_use_case: self.check_site_access.unwrap(),
            verify_site_access_use_case: self.verify_site_access.unwrap(),
            submit_kyc_use_case: self.submit_kyc.unwrap(),
            list_pending_kyc_use_case: self.list_pending_kyc.unwrap(),
            set_kyc_status_use_case: self.set_kyc_status.unwrap(),
            list_users_use_case: self.list_users.unwrap(),
            fetch_user_use_case: self.fetch_user.unwrap(),
            update_user_use_case: self.update_user.unwrap(),
            delete_user_use_case: self.delete_user.unwrap(),
            dashboard_stats_use_case: self.dashboard_stats.unwrap(),
            get_site_settings_use_case: self.get_site_settings.unwrap(),
            update_site_settings_use_case: self.update_site_settings.unwrap(),
            generate_access_password_use_case: self.generate_access_password.unwrap(),
        })
    }
}
