use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct VerificationEmail {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    pub token: String,
}

#[derive(Debug, Clone)]
pub struct PasswordResetEmail {
    pub email: String,
    pub first_name: String,
    /// Raw reset token; only its hash is ever persisted.
    pub token: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UserEmailNotificationError {
    #[error("Email sending failed: {0}")]
    EmailSendingFailed(String),
}

#[async_trait::async_trait]
pub trait UserEmailNotifier: Send + Sync {
    async fn send_verification_email(
        &self,
        mail: VerificationEmail,
    ) -> Result<(), UserEmailNotificationError>;

    async fn send_password_reset_email(
        &self,
        mail: PasswordResetEmail,
    ) -> Result<(), UserEmailNotificationError>;
}
