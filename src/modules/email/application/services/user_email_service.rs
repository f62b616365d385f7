use std::fmt;
use std::sync::Arc;

use crate::email::application::ports::outgoing::email_sender::EmailSender;
use crate::email::application::ports::outgoing::user_email_notifier::{
    PasswordResetEmail, UserEmailNotificationError, UserEmailNotifier, VerificationEmail,
};

/// Builds and dispatches the account-lifecycle emails.
#[derive(Clone)]
pub struct UserEmailService {
    sender: Arc<dyn EmailSender + Send + Sync>,
    app_url: String,
}

impl fmt::Debug for UserEmailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserEmailService")
            .field("sender", &"<dyn EmailSender>")
            .field("app_url", &self.app_url)
            .finish()
    }
}

impl UserEmailService {
    pub fn new(sender: Arc<dyn EmailSender + Send + Sync>, app_url: String) -> Self {
        Self { sender, app_url }
    }

    fn verification_body(&self, first_name: &str, token: &str) -> String {
        let link = format!("{}/api/auth/verify-email/{}", self.app_url, token);
        format!(
            r#"
            <p>Hi {},</p>
            <p>Welcome to Oriro!</p>
            <p>To complete your registration, click the button below:</p>
            <p>
                <a href="{}" style="
                    display: inline-block;
                    padding: 10px 20px;
                    background-color: #1A6AFF;
                    color: white;
                    text-decoration: none;
                    border-radius: 5px;
                ">Verify Your Email</a>
            </p>
            <p>
                <strong>Note:</strong> This link is valid for 24 hours. If it
                expires, request a new one from the login screen.
            </p>
            <p>Thanks,<br>The Oriro Team</p>
            "#,
            first_name, link
        )
    }

    fn reset_body(&self, first_name: &str, token: &str) -> String {
        let link = format!("{}/reset-password/{}", self.app_url, token);
        format!(
            r#"
            <p>Hi {},</p>
            <p>We received a request to reset your Oriro password.</p>
            <p>
                <a href="{}" style="
                    display: inline-block;
                    padding: 10px 20px;
                    background-color: #1A6AFF;
                    color: white;
                    text-decoration: none;
                    border-radius: 5px;
                ">Reset Your Password</a>
            </p>
            <p>
                This link is valid for 1 hour. If you did not request a
                reset, you can safely ignore this email.
            </p>
            <p>Thanks,<br>The Oriro Team</p>
            "#,
            first_name, link
        )
    }
}

#[async_trait::async_trait]
impl UserEmailNotifier for UserEmailService {
    async fn send_verification_email(
        &self,
        mail: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError> {
        let body = self.verification_body(&mail.first_name, &mail.token);

        self.sender
            .send_email(&mail.email, "Verify your Oriro account", &body)
            .await
            .map_err(UserEmailNotificationError::EmailSendingFailed)
    }

    async fn send_password_reset_email(
        &self,
        mail: PasswordResetEmail,
    ) -> Result<(), UserEmailNotificationError> {
        let body = self.reset_body(&mail.first_name, &mail.token);

        self.sender
            .send_email(&mail.email, "Reset your Oriro password", &body)
            .await
            .map_err(UserEmailNotificationError::EmailSendingFailed)
    }
}
