use async_trait::async_trait;

use crate::auth::application::ports::outgoing::password_hasher::PasswordHasher;
use crate::auth::application::ports::outgoing::token_provider::{
    TokenProvider, TokenPurpose, SITE_ACCESS_SUBJECT,
};
use crate::gate::application::ports::outgoing::SettingsRepository;

/// Outcome of a gate check for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAdmission {
    /// The gate is disabled; everything passes.
    Open,
    /// The presented site-access token is valid.
    TokenAccepted,
    /// The shared secret matched; a freshly minted token the caller should
    /// use from now on.
    FreshToken(String),
}

#[derive(Debug, Clone)]
pub enum CheckSiteAccessError {
    AccessRequired,
    TokenGenerationFailed(String),
    HashingFailed(String),
    RepositoryError(String),
}

impl std::fmt::Display for CheckSiteAccessError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CheckSiteAccessError::AccessRequired => write!(f, "Site access required"),
            CheckSiteAccessError::TokenGenerationFailed(msg) => {
                write!(f, "Token generation failed: {}", msg)
            }
            CheckSiteAccessError::HashingFailed(msg) => write!(f, "Hashing failed: {}", msg),
            CheckSiteAccessError::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
        }
    }
}

impl std::error::Error for CheckSiteAccessError {}

#[async_trait]
pub trait ICheckSiteAccessUseCase: Send + Sync {
    async fn execute(
        &self,
        token: Option<&str>,
        password: Option<&str>,
    ) -> Result<GateAdmission, CheckSiteAccessError>;
}

/// Per-request gate decision.
///
/// Settings are re-read from the store on every check so that disabling the
/// gate or rotating the secret takes effect immediately, without a restart.
#[derive(Debug, Clone)]
pub struct CheckSiteAccessUseCase<S, H, T>
where
    S: SettingsRepository,
    H: PasswordHasher,
    T: TokenProvider,
{
    settings: S,
    hasher: H,
    tokens: T,
}

impl<S, H, T> CheckSiteAccessUseCase<S, H, T>
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
impl<S, H, T> ICheckSiteAccessUseCase for CheckSiteAccessUseCase<S, H, T>
where
    S: SettingsRepository + Send + Sync,
    H: PasswordHasher + Send + Sync,
    T: TokenProvider + Send + Sync,
{
    async fn execute(
        &self,
        token: Option<&str>,
        password: Option<&str>,
    ) -> Result<GateAdmission, CheckSiteAccessError> {
        let settings = self
            .settings
            .load()
            .await
            .map_err(|e| CheckSiteAccessError::RepositoryError(e.to_string()))?;

        if !settings.site_access_enabled {
            return Ok(GateAdmission::Open);
        }

        if let Some(token) = token {
            if let Ok(claims) = self.tokens.verify(token, TokenPurpose::SiteAccess) {
                if claims.sub == SITE_ACCESS_SUBJECT {
                    return Ok(GateAdmission::TokenAccepted);
                }
            }
            // A stale or malformed token falls through to the password, if
            // one was also supplied.
        }

        if let Some(password) = password {
            let hash = match &settings.site_access_password_hash {
                Some(hash) => hash.clone(),
                None => return Err(CheckSiteAccessError::AccessRequired),
            };

            let matched = self
                .hasher
                .verify_password(password, &hash)
                .await
                .map_err(|e| CheckSiteAccessError::HashingFailed(e.to_string()))?;

            if matched {
                let fresh = self
                    .tokens
                    .issue_site_access_token()
                    .map_err(|e| CheckSiteAccessError::TokenGenerationFailed(e.to_string()))?;
                return Ok(GateAdmission::FreshToken(fresh));
            }
        }

        Err(CheckSiteAccessError::AccessRequired)
    }
}
