use async_trait::async_trait;
use serde::{Deserialize, Deserializer};

use crate::gate::application::domain::entities::{SiteSettings, SiteSettingsUpdate};
use crate::gate::application::ports::outgoing::SettingsRepository;

// ========================= Request =========================
#[derive(Debug, Clone)]
pub struct UpdateSiteSettingsRequest {
    changes: SiteSettingsUpdate,
}

#[derive(Debug, Clone)]
pub enum UpdateSiteSettingsRequestError {
    EmptyUpdate,
}

impl std::fmt::Display for UpdateSiteSettingsRequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateSiteSettingsRequestError::EmptyUpdate => write!(f, "No fields to update"),
        }
    }
}

impl std::error::Error for UpdateSiteSettingsRequestError {}

impl UpdateSiteSettingsRequest {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        site_access_enabled: Option<bool>,
        registration_enabled: Option<bool>,
        maintenance_mode: Option<bool>,
        maintenance_message: Option<String>,
        show_hero: Option<bool>,
        show_marketplace: Option<bool>,
        show_staking: Option<bool>,
    ) -> Result<Self, UpdateSiteSettingsRequestError> {
        // A provided empty message clears the stored one.
        let maintenance_message = maintenance_message.map(|message| {
            let message = message.trim().to_string();
            if message.is_empty() {
                None
            } else {
                Some(message)
            }
        });

        let changes = SiteSettingsUpdate {
            site_access_enabled,
            registration_enabled,
            maintenance_mode,
            maintenance_message,
            show_hero,
            show_marketplace,
            show_staking,
        };

        if changes.is_empty() {
            return Err(UpdateSiteSettingsRequestError::EmptyUpdate);
        }

        Ok(Self { changes })
    }

    pub fn changes(&self) -> &SiteSettingsUpdate {
        &self.changes
    }
}

impl<'de> Deserialize<'de> for UpdateSiteSettingsRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Helper {
            site_access_enabled: Option<bool>,
            registration_enabled: Option<bool>,
            maintenance_mode: Option<bool>,
            maintenance_message: Option<String>,
            show_hero: Option<bool>,
            show_marketplace: Option<bool>,
            show_staking: Option<bool>,
        }

        let helper = Helper::deserialize(deserializer)?;
        UpdateSiteSettingsRequest::new(
            helper.site_access_enabled,
            helper.registration_enabled,
            helper.maintenance_mode,
            helper.maintenance_message,
            helper.show_hero,
            helper.show_marketplace,
            helper.show_staking,
        )
        .map_err(serde::de::Error::custom)
    }
}

// ========================= Error =========================
#[derive(Debug, Clone)]
pub enum UpdateSiteSettingsError {
    RepositoryError(String),
}

impl std::fmt::Display for UpdateSiteSettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpdateSiteSettingsError::RepositoryError(msg) => {
                write!(f, "Repository error: {}", msg)
            }
        }
    }
}

impl std::error::Error for UpdateSiteSettingsError {}

// ========================= Use Case =========================
#[async_trait]
pub trait IUpdateSiteSettingsUseCase: Send + Sync {
    async fn execute(
        &self,
        request: UpdateSiteSettingsRequest,
    ) -> Result<SiteSettings, UpdateSiteSettingsError>;
}

pub struct UpdateSiteSettingsUseCase<S>
where
    S: SettingsRepository,
{
    settings: S,
}

impl<S> UpdateSiteSettingsUseCase<S>
where
    S: SettingsRepository,
{
    pub fn new(settings: S) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl<S> IUpdateSiteSettingsUseCase for UpdateSiteSettingsUseCase<S>
where
    S: SettingsRepository + Send + Sync,
{
    async fn execute(
        &self,
        request: UpdateSiteSettingsRequest,
    ) -> Result<SiteSettings, UpdateSiteSettingsError> {
        let settings = self
            .settings
            .update(request.changes().clone())
            .await
            .map_err(|e| UpdateSiteSettingsError::RepositoryError(e.to_string()))?;

        tracing::info!(
            site_access_enabled = settings.site_access_enabled,
            registration_enabled = settings.registration_enabled,
            maintenance_mode = settings.maintenance_mode,
            "Site settings updated"
        );

        Ok(settings)
    }
}
