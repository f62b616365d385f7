use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::auth::application::ports::outgoing::token_provider::TokenProvider;
use crate::gate::application::ports::outgoing::SettingsRepository;

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct VerifySiteAccessRequest {
    password: String,
}

#[derive(Debug, Clone)]
pub enum VerifySiteAccessRequestError {
    EmptyPassword,
}

impl std::fmt::Display for VerifySiteAccessRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifySiteAccessRequestError::EmptyPassword => write!(f, "Password cannot be empty"),
        }
    }
}

impl std::error::Error for VerifySiteAccessRequestError {}

impl VerifySiteAccessRequest {
    pub fn new(password: String) -> Result<Self, VerifySiteAccessRequestError> {
        let password = password.trim().to_string();
        if password.is_empty() {
            return Err(VerifySiteAccessRequestError::EmptyPassword);
        }
        Ok(Self { password })
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl<'de> Deserialize<'de> for VerifySiteAccessRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            password: String,
        }

        let helper = Helper::deserialize(deserializer)?;
        VerifySiteAccessRequest::new(helper.password).map_err(serde::de::Error::custom)
    }
}

// ========================= Error =========================
#[derive(Debug, Clone)]
pub enum VerifySiteAccessError {
    InvalidPassword,
    TokenGenerationFailed(String),
    HashingFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for VerifySiteAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerifySiteAccessError::InvalidPassword => write!(f, "Invalid site access password"),
            VerifySiteAccessError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            VerifySiteAccessError::HashingFailed(msg) => write!(f, "Hashing failed: {}", msg),
            VerifySiteAccessError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for VerifySiteAccessError {}

// ========================= Response =========================
#[derive(Debug, Clone, Serialize)]
pub struct VerifySiteAccessResponse {
    pub token: String,
}

// ========================= Use Case =========================
#[async_trait]
pub trait IVerifySiteAccessUseCase: Send + Sync {
    async fn execute(
        &self,
        request: VerifySiteAccessRequest,
    ) -> Result<VerifySiteAccessResponse, VerifySiteAccessError>;
}

/// Explicit password exchange: trade the shared secret for a site-access
/// token. An unconfigured secret is indistinguishable from a wrong one.
#[derive(Debug, Clone)]
pub struct VerifySiteAccessUseCase<S, H, T>
where
    S: SettingsRepository,
    H: PasswordHasher,
    T: TokenProvider,
{
    settings: S,
    hasher: H,
    tokens: T,
}

impl<S, H, T> VerifySiteAccessUseCase<S, H, T>
where
    S: SettingsRepository,
    H: PasswordHasher,
    T: TokenProvider,
{
    pub fn new(settings: S, hasher: H, tokens: T) -> Self {
        Self {
            settings,
            hasher,
            tokens,
        }
    }
}

#[async_trait]
impl<S, H, T> IVerifySiteAccessUseCase for VerifySiteAccessUseCase<S, H, T>
where
    S: SettingsRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
    T: TokenProvider + Send + Sync,
{
    async fn execute(
        &self,
        request: VerifySiteAccessRequest,
    ) -> Result<VerifySiteAccessResponse, VerifySiteAccessError> {
        let settings = self
            .settings
            .load()
            .await
            .map_err(|e| VerifySiteAccessError::RepositoryError(e.to_string()))?;

        // Disabled gate: the exchange succeeds whatever the password says.
        // The client still gets a token so it can stop resending the form.
        if !settings.site_access_enabled {
            let token = self
                .tokens
                .issue_site_access_token()
                .map_err(|e| VerifySiteAccessError::TokenGenerationFailed(e.to_string()))?;
            return Ok(VerifySiteAccessResponse { token });
        }

        let hash = settings
            .site_access_password_hash
            .ok_or(VerifySiteAccessError::InvalidPassword)?;

        let matched = self
            .hasher
            .verify_password(request.password(), &hash)
            .await
            .map_err(|e| VerifySiteAccessError::HashingFailed(e.to_string()))?;

        if !matched {
            return Err(VerifySiteAccessError::InvalidPassword);
        }

        let token = self
            .tokens
            .issue_site_access_token()
            .map_err(|e| VerifySiteAccessError::TokenGenerationFailed(e.to_string()))?;

        Ok(VerifySiteAccessResponse { token })
    }
}
