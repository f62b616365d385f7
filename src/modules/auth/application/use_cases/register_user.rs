use async_trait::async_trait;
use email_address::EmailAddress;
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use crate::auth::application::domain::entities::UserRole;
use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::auth::application::ports::outgoing::user_repository::{
    NewUser, UserRepository, UserRepositoryError,
};
use crate::gate::application::ports::outgoing::SettingsRepository;

// ========================= Register Request =========================
/// Validated registration request - can be deserialized directly from JSON
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    email: String,
    password: String,
    first_name: String,
    last_name: String,
}

#[derive(Debug, Clone)]
pub enum RegisterRequestError {
    EmptyEmail,
    InvalidEmailFormat,
    EmptyPassword,
    EmptyFirstName,
    EmptyLastName,
}

impl std::fmt::Display for RegisterRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterRequestError::EmptyEmail => write!(f, "Email cannot be empty"),
            RegisterRequestError::InvalidEmailFormat => write!(f, "Invalid email format"),
            RegisterRequestError::EmptyPassword => write!(f, "Password cannot be empty"),
            RegisterRequestError::EmptyFirstName => write!(f, "First name cannot be empty"),
            RegisterRequestError::EmptyLastName => write!(f, "Last name cannot be empty"),
        }
    }
}

impl std::error::Error for RegisterRequestError {}

impl RegisterUserRequest {
    pub fn new(
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    ) -> Result<Self, RegisterRequestError> {
        let email = email.trim().to_lowercase();
        if email.is_empty() {
            return Err(RegisterRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(&email) {
            return Err(RegisterRequestError::InvalidEmailFormat);
        }

        // No length floor here; only the reset flow enforces one.
        if password.is_empty() {
            return Err(RegisterRequestError::EmptyPassword);
        }

        let first_name = first_name.trim().to_string();
        if first_name.is_empty() {
            return Err(RegisterRequestError::EmptyFirstName);
        }

        let last_name = last_name.trim().to_string();
        if last_name.is_empty() {
            return Err(RegisterRequestError::EmptyLastName);
        }

        Ok(Self {
            email,
            password,
            first_name,
            last_name,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl<'de> Deserialize<'de> for RegisterUserRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper {
            email: String,
            password: String,
            first_name: String,
            last_name: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        RegisterUserRequest::new(
            helper.email,
            helper.password,
            helper.first_name,
            helper.last_name,
        )
        .map_err(serde::de::Error::custom)
    }
}

// ========================= Register Error =========================
#[derive(Debug, Clone)]
pub enum RegisterUserError {
    RegistrationDisabled,
    EmailAlreadyRegistered,
    HashingFailed(String),
    TokenGenerationFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for RegisterUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegisterUserError::RegistrationDisabled => {
                write!(f, "Registration is currently disabled")
            }
            RegisterUserError::EmailAlreadyRegistered => {
                write!(f, "Email is already registered")
            }
            RegisterUserError::HashingFailed(msg) => write!(f, "Hashing failed: {}", msg),
            RegisterUserError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            RegisterUserError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for RegisterUserError {}

// ========================= Register Response =========================
#[derive(Debug, Clone)]
pub struct RegisterUserResponse {
    pub user_id: Uuid,
    pub email: String,
    pub first_name: String,
    /// Signed verification token; the orchestrator hands it to the mailer.
    pub verification_token: String,
}

// ========================= Use Case =========================
#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    async fn execute(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, RegisterUserError>;
}

pub struct RegisterUserUseCase<R, H, S, T>
where
    R: UserRepository,
    H: PasswordHasher,
    S: SettingsRepository,
    T: TokenProvider,
{
    repository: R,
    hasher: H,
    settings: S,
    tokens: T,
}

impl<R, H, S, T> RegisterUserUseCase<R, H, S, T>
where
    R: UserRepository,
    H: PasswordHasher,
    S: SettingsRepository,
    T: TokenProvider,
{
    pub fn new(repository: R, hasher: H, settings: S, tokens: T) -> Self {
        Self {
            repository,
            hasher,
            settings,
            tokens,
        }
    }
}

#[async_trait]
impl<R, H, S, T> IRegisterUserUseCase for RegisterUserUseCase<R, H, S, T>
where
    R: UserRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
    S: SettingsRepository + Send + Sync,
    T: TokenProvider + Send + Sync,
{
    async fn execute(
        &self,
        request: RegisterUserRequest,
    ) -> Result<RegisterUserResponse, RegisterUserError> {
        let settings = self
            .settings
            .load()
            .await
            .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?;

        if !settings.registration_enabled {
            return Err(RegisterUserError::RegistrationDisabled);
        }

        let password_hash = self
            .hasher
            .hash_password(request.password())
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        let user = self
            .repository
            .create_user(NewUser {
                email: request.email().to_string(),
                password_hash,
                first_name: request.first_name().to_string(),
                last_name: request.last_name().to_string(),
                role: UserRole::User,
            })
            .await
            .map_err(|e| match e {
                UserRepositoryError::UserAlreadyExists => RegisterUserError::EmailAlreadyRegistered,
                other => RegisterUserError::RepositoryError(other.to_string()),
            })?;

        let verification_token = self
            .tokens
            .issue_verification_token(user.id)
            .map_err(|e| RegisterUserError::TokenGenerationFailed(e.to_string()))?;

        // Persisted so a superseded token can be told apart from the current
        // one even while both still verify cryptographically.
        self.repository
            .store_verification_token(user.id, verification_token.clone())
            .await
            .map_err(|e| RegisterUserError::RepositoryError(e.to_string()))?;

        Ok(RegisterUserResponse {
            user_id: user.id,
            email: user.email,
            first_name: user.first_name,
            verification_token,
        })
    }
}
