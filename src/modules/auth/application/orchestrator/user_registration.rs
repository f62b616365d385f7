use std::sync::Arc;
use std::time::Duration;

use crate::auth::application::use_cases::register_user::{
    IRegisterUserUseCase, RegisterUserError, RegisterUserRequest, RegisterUserResponse,
};
use crate::email::application::ports::outgoing::user_email_notifier::{
    UserEmailNotifier, VerificationEmail,
};

// ============================================================================
// Registration Output with Message
// ============================================================================
#[derive(Debug)]
pub struct UserRegistrationOutput {
    pub user_id: uuid::Uuid,
    pub email: String,
    pub first_name: String,
    pub message: String,
}

impl From<&RegisterUserResponse> for UserRegistrationOutput {
    fn from(response: &RegisterUserResponse) -> Self {
        Self {
            user_id: response.user_id,
            email: response.email.clone(),
            first_name: response.first_name.clone(),
            message: "User created successfully. Please check your email to verify your account."
                .to_string(),
        }
    }
}

// ============================================================================
// Registration Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum UserRegistrationError {
    #[error("User creation failed: {0}")]
    RegistrationFailed(#[from] RegisterUserError),
}

// ============================================================================
// User Registration Orchestrator
// ============================================================================

/// Creates the account, then delivers the verification email in a
/// fire-and-forget background task with retries. The registration response
/// never waits on SMTP; the verification token is recoverable through the
/// resend endpoint.
#[derive(Clone)]
pub struct UserRegistrationOrchestrator {
    register_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
    email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
}

impl UserRegistrationOrchestrator {
    pub fn new(
        register_use_case: Arc<dyn IRegisterUserUseCase + Send + Sync>,
        email_service: Arc<dyn UserEmailNotifier + Send + Sync>,
    ) -> Self {
        Self {
            register_use_case,
            email_service,
        }
    }

    pub async fn register_user(
        &self,
        request: RegisterUserRequest,
    ) -> Result<UserRegistrationOutput, UserRegistrationError> {
        let created = self.register_use_case.execute(request).await?;
        let output = UserRegistrationOutput::from(&created);

        let email_service = self.email_service.clone();
        let mail = VerificationEmail {
            user_id: created.user_id,
            email: created.email,
            first_name: created.first_name,
            token: created.verification_token,
        };

        tokio::spawn(async move {
            let max_retries = 3;
            for attempt in 1..=max_retries {
                match email_service.send_verification_email(mail.clone()).await {
                    Ok(_) => return,
                    Err(e) if attempt < max_retries => {
                        tracing::warn!(
                            user_id = %mail.user_id,
                            attempt,
                            max_retries,
                            error = %e,
                            "Verification email attempt failed, retrying"
                        );
                        tokio::time::sleep(Duration::from_secs(2_u64.pow(attempt))).await;
                    }
                    Err(e) => {
                        tracing::error!(
                            user_id = %mail.user_id,
                            max_retries,
                            error = %e,
                            "All verification email attempts failed"
                        );
                    }
                }
            }
        });

        Ok(output)
    }
}
