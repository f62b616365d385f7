use async_trait::async_trait;
use std::fmt;

use crate::gate::application::domain::entities::{SiteSettings, SiteSettingsUpdate};

#[derive(Debug)]
pub enum SettingsRepositoryError {
    DatabaseError(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for SettingsRepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsRepositoryError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

/// Access to the singleton settings row.
///
/// `load` must always return a row: implementations create the singleton with
/// defaults when it does not exist yet.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn load(&self) -> Result<SiteSettings, SettingsRepositoryError>;

    async fn update(
        &self,
        changes: SiteSettingsUpdate,
    ) -> Result<SiteSettings, SettingsRepositoryError>;

    /// Replaces the stored gate-secret hash, invalidating the old secret for
    /// every future password check.
    async fn set_access_password_hash(
        &self,
        password_hash: String,
    ) -> Result<(), SettingsRepositoryError>;
}
