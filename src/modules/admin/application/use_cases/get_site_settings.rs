use async_trait::async_trait;

use crate::gate::application::domain::entities::SiteSettings;
use crate::gate::application::ports::outgoing::SettingsRepository;

#[derive(Debug, Clone)]
pub enum GetSiteSettingsError {
    RepositoryError(String),
}

impl std::fmt::Display for GetSiteSettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GetSiteSettingsError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for GetSiteSettingsError {}

#[async_trait]
pub trait IGetSiteSettingsUseCase: Send + Sync {
    async fn execute(&self) -> Result<SiteSettings, GetSiteSettingsError>;
}

pub struct GetSiteSettingsUseCase<S>
where
    S: SettingsRepository,
{
    settings: S,
}

impl<S> GetSiteSettingsUseCase<S>
where
    S: SettingsRepository,
{
    pub fn new(settings: S) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl<S> IGetSiteSettingsUseCase for GetSiteSettingsUseCase<S>
where
    S: SettingsRepository + Send + Sync,
{
    async fn execute(&self) -> Result<SiteSettings, GetSiteSettingsError> {
        self.settings
            .load()
            .await
            .map_err(|e| GetSiteSettingsError::RepositoryError(e.to_string()))
    }
}
