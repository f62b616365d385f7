use chrono::{DateTime, Utc};

/// Singleton site configuration row.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteSettings {
    pub id: i32,
    pub site_access_enabled: bool,
    pub registration_enabled: bool,
    pub maintenance_mode: bool,
    pub maintenance_message: Option<String>,
    /// Argon2 hash of the shared gate secret; never the plaintext.
    pub site_access_password_hash: Option<String>,
    pub show_hero: bool,
    pub show_marketplace: bool,
    pub show_staking: bool,
    pub updated_at: DateTime<Utc>,
}

/// Field-scoped settings patch; only `Some` fields are written.
///
/// The access-password hash is deliberately absent here. It can only be
/// replaced through the dedicated regeneration flow.
#[derive(Debug, Clone, Default)]
pub struct SiteSettingsUpdate {
    pub site_access_enabled: Option<bool>,
    pub registration_enabled: Option<bool>,
    pub maintenance_mode: Option<bool>,
    pub maintenance_message: Option<Option<String>>,
    pub show_hero: Option<bool>,
    pub show_marketplace: Option<bool>,
    pub show_staking: Option<bool>,
}

impl SiteSettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.site_access_enabled.is_none()
            && self.registration_enabled.is_none()
            && self.maintenance_mode.is_none()
            && self.maintenance_message.is_none()
            && self.show_hero.is_none()
            && self.show_marketplace.is_none()
            && self.show_staking.is_none()
    }
}
