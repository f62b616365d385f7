use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait};
use std::sync::Arc;

use crate::gate::adapter::outgoing::sea_orm_entity::site_settings;
use crate::gate::application::domain::entities::{SiteSettings, SiteSettingsUpdate};
use crate::gate::application::ports::outgoing::{SettingsRepository, SettingsRepositoryError};

/// The settings table holds exactly one row.
const SETTINGS_ROW_ID: i32 = 1;

#[derive(Clone)]
pub struct SettingsRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl SettingsRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    fn map_err(e: sea_orm::DbErr) -> SettingsRepositoryError {
        SettingsRepositoryError::DatabaseError(e.to_string())
    }

    async fn load_model(&self) -> Result<site_settings::Model, SettingsRepositoryError> {
        let existing = site_settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(self.db.as_ref())
            .await
            .map_err(Self::map_err)?;

        match existing {
            Some(model) if !model.site_access_enabled => {
                // Always-on policy: a disabled gate flag is flipped back on
                // every read and the flip is persisted.
                tracing::warn!("site_access_enabled found disabled, re-enabling");
                let mut active: site_settings::ActiveModel = model.into();
                active.site_access_enabled = Set(true);
                active.update(self.db.as_ref()).await.map_err(Self::map_err)
            }
            Some(model) => Ok(model),
            None => {
                let defaults = site_settings::ActiveModel {
                    id: Set(SETTINGS_ROW_ID),
                    site_access_enabled: Set(true),
                    registration_enabled: Set(true),
                    maintenance_mode: Set(false),
                    maintenance_message: Set(None),
                    site_access_password_hash: Set(None),
                    show_hero: Set(true),
                    show_marketplace: Set(true),
                    show_staking: Set(true),
                    updated_at: Set(Utc::now().into()),
                };
                defaults
                    .insert(self.db.as_ref())
                    .await
                    .map_err(Self::map_err)
            }
        }
    }
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryPostgres {
    async fn load(&self) -> Result<SiteSettings, SettingsRepositoryError> {
        Ok(self.load_model().await?.into_settings())
    }

    async fn update(
        &self,
        changes: SiteSettingsUpdate,
    ) -> Result<SiteSettings, SettingsRepositoryError> {
        let mut active: site_settings::ActiveModel = self.load_model().await?.into();

        if let Some(enabled) = changes.site_access_enabled {
            active.site_access_enabled = Set(enabled);
        }
        if let Some(enabled) = changes.registration_enabled {
            active.registration_enabled = Set(enabled);
        }
        if let Some(enabled) = changes.maintenance_mode {
            active.maintenance_mode = Set(enabled);
        }
        if let Some(message) = changes.maintenance_message {
            active.maintenance_message = Set(message);
        }
        if let Some(visible) = changes.show_hero {
            active.show_hero = Set(visible);
        }
        if let Some(visible) = changes.show_marketplace {
            active.show_marketplace = Set(visible);
        }
        if let Some(visible) = changes.show_staking {
            active.show_staking = Set(visible);
        }

        let updated = active.update(self.db.as_ref()).await.map_err(Self::map_err)?;
        Ok(updated.into_settings())
    }

    async fn set_access_password_hash(
        &self,
        password_hash: String,
    ) -> Result<(), SettingsRepositoryError> {
        let mut active: site_settings::ActiveModel = self.load_model().await?.into();
        active.site_access_password_hash = Set(Some(password_hash));
        active.update(self.db.as_ref()).await.map_err(Self::map_err)?;
        Ok(())
    }
}
