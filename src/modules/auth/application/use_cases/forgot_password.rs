use async_trait::async_trait;
use chrono::{Duration, Utc};
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};

use crate::auth::application::ports::outgoing::user_query::UserQuery;
use crate::auth::application::ports::outgoing::user_repository::UserRepository;
use crate::auth::application::services::hash::{generate_reset_token, hash_token};
use crate::email::application::ports::outgoing::user_email_notifier::{
    PasswordResetEmail, UserEmailNotifier,
};

/// Reset links stay valid for one hour.
const RESET_TOKEN_TTL_SECS: i64 = 3600;

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct ForgotPasswordRequest {
    email: String,
}

#[derive(Debug, Clone)]
pub enum ForgotPasswordRequestError {
    EmptyEmail,
    InvalidEmailFormat,
}

impl std::fmt::Display for ForgotPasswordRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForgotPasswordRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            ForgotPasswordRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
        }
    }
}

impl std::error::Error for ForgotPasswordRequestError {}

impl ForgotPasswordRequest {
    pub fn new(email: String) -> Result<Self, ForgotPasswordRequestError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(ForgotPasswordRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(&email) {
            return Err(ForgotPasswordRequestError::InvalidEmailFormat);
        }
        Ok(Self { email })
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

impl<'de> Deserialize<'de> for ForgotPasswordRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            email: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        ForgotPasswordRequest::new(helper.email).map_err(serde::de::Error::custom)
    }
}

// ========================= Error =========================
#[derive(Debug, Clone)]
pub enum ForgotPasswordError {
    EmailSendingFailed(String),
    QueryError(String),
    RepositoryError(String),
}

impl std::fmt::Display for ForgotPasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForgotPasswordError::EmailSendingFailed(msg) => {
                write!(f, "Email sending failed: {}", msg)
            }
            ForgotPasswordError::QueryError(msg) => write!(f, "Query error: {}", msg),
            ForgotPasswordError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for ForgotPasswordError {}

// ========================= Use Case =========================
#[async_trait]
pub trait IForgotPasswordUseCase: Send + Sync {
    async fn execute(&self, request: ForgotPasswordRequest) -> Result<(), ForgotPasswordError>;
}

/// Starts the password-reset flow. Unknown addresses succeed silently.
///
/// Unlike a verification resend, a delivery failure here is surfaced: the
/// raw token exists nowhere but this email, so a lost message leaves the
/// user with a dead flow until they ask again.
pub struct ForgotPasswordUseCase<Q, R, N>
where
    Q: UserQuery,
    R: UserRepository,
    N: UserEmailNotifier,
{
    query: Q,
    repository: R,
    notifier: N,
}

impl<Q, R, N> ForgotPasswordUseCase<Q, R, N>
where
    Q: UserQuery,
    R: UserRepository,
    N: UserEmailNotifier,
{
    pub fn new(query: Q, repository: R, notifier: N) -> Self {
        Self {
            query,
            repository,
            notifier,
        }
    }
}

#[async_trait]
impl<Q, R, N> IForgotPasswordUseCase for ForgotPasswordUseCase<Q, R, N>
where
    Q: UserQuery + Send + Sync,
    R: UserRepository + Send + Sync,
    N: UserEmailNotifier + Send + Sync,
{
    async fn execute(&self, request: ForgotPasswordRequest) -> Result<(), ForgotPasswordError> {
        let user = match self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| ForgotPasswordError::QueryError(e.to_string()))?
        {
            Some(user) => user,
            None => return Ok(()),
        };

        let token = generate_reset_token();
        let token_hash = hash_token(&token);
        let expires_at = Utc::now() + Duration::seconds(RESET_TOKEN_TTL_SECS);

        self.repository
            .store_reset_token(user.id, token_hash, expires_at)
            .await
            .map_err(|e| ForgotPasswordError::RepositoryError(e.to_string()))?;

        self.notifier
            .send_password_reset_email(PasswordResetEmail {
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                token,
            })
            .await
            .map_err(|e| ForgotPasswordError::EmailSendingFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::test_fixtures::sample_user;
    use crate::auth::application::ports::outgoing::mocks::{
        MockUserQueryPort, MockUserRepositoryPort,
    };
    use crate::email::application::ports::outgoing::user_email_notifier::{
        UserEmailNotificationError, VerificationEmail,
    };
    use std::sync::{Arc, Mutex};

    struct CapturingNotifier {
        captured: Arc<Mutex<Option<PasswordResetEmail>>>,
        fail: bool,
    }

    #[async_trait]
    impl UserEmailNotifier for CapturingNotifier {
        async fn send_verification_email(
            &self,
            _mail: VerificationEmail,
        ) -> Result<(), UserEmailNotificationError> {
            unimplemented!("not exercised here")
        }

        async fn send_password_reset_email(
            &self,
            mail: PasswordResetEmail,
        ) -> Result<(), UserEmailNotificationError> {
            if self.fail {
                return Err(UserEmailNotificationError::EmailSendingFailed(
                    "smtp down".to_string(),
                ));
            }
            *self.captured.lock().unwrap() = Some(mail);
            Ok(())
        }
    }

    fn request() -> ForgotPasswordRequest {
        ForgotPasswordRequest::new("user@example.com".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_forgot_password_stores_hash_not_raw_token() {
        let user = sample_user();

        let mut query = MockUserQueryPort::new();
        query
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let stored_hash = Arc::new(Mutex::new(None::<String>));
        let stored_hash_clone = stored_hash.clone();
        let mut repository = MockUserRepositoryPort::new();
        repository
            .expect_store_reset_token()
            .times(1)
            .returning(move |_, hash, expires| {
                assert!(expires > Utc::now());
                *stored_hash_clone.lock().unwrap() = Some(hash);
                Ok(())
            });

        let captured = Arc::new(Mutex::new(None));
        let notifier = CapturingNotifier {
            captured: captured.clone(),
            fail: false,
        };

        let use_case = ForgotPasswordUseCase::new(query, repository, notifier);
        use_case.execute(request()).await.expect("Expected Ok");

        let mail = captured.lock().unwrap().clone().expect("Email captured");
        let hash = stored_hash.lock().unwrap().clone().expect("Hash stored");

        // Raw token goes to the user, its hash goes to the store.
        assert_ne!(mail.token, hash);
        assert_eq!(hash_token(&mail.token), hash);
    }

    #[tokio::test]
    async fn test_unknown_email_silently_succeeds() {
        let mut query = MockUserQueryPort::new();
        query.expect_find_by_email().returning(|_| Ok(None));

        let notifier = CapturingNotifier {
            captured: Arc::new(Mutex::new(None)),
            fail: false,
        };

        let use_case =
            ForgotPasswordUseCase::new(query, MockUserRepositoryPort::new(), notifier);

        assert!(use_case.execute(request()).await.is_ok());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_surfaced() {
        let user = sample_user();

        let mut query = MockUserQueryPort::new();
        query
            .expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let mut repository = MockUserRepositoryPort::new();
        repository
            .expect_store_reset_token()
            .returning(|_, _, _| Ok(()));

        let notifier = CapturingNotifier {
            captured: Arc::new(Mutex::new(None)),
            fail: true,
        };

        let use_case = ForgotPasswordUseCase::new(query, repository, notifier);
        let result = use_case.execute(request()).await;

        assert!(matches!(
            result,
            Err(ForgotPasswordError::EmailSendingFailed(_))
        ));
    }
}
