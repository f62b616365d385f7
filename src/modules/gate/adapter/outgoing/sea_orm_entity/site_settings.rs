use sea_orm::entity::prelude::*;

use crate::gate::application::domain::entities::SiteSettings;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "site_settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub site_access_enabled: bool,
    pub registration_enabled: bool,
    pub maintenance_mode: bool,
    pub maintenance_message: Option<String>,
    pub site_access_password_hash: Option<String>,
    pub show_hero: bool,
    pub show_marketplace: bool,
    pub show_staking: bool,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        use chrono::Utc;
        use sea_orm::ActiveValue::Set;

        if !insert {
            self.updated_at = Set(Utc::now().into());
        }

        Ok(self)
    }
}

impl Model {
    pub fn into_settings(self) -> SiteSettings {
        SiteSettings {
            id: self.id,
            site_access_enabled: self.site_access_enabled,
            registration_enabled: self.registration_enabled,
            maintenance_mode: self.maintenance_mode,
            maintenance_message: self.maintenance_message,
            site_access_password_hash: self.site_access_password_hash,
            show_hero: self.show_hero,
            show_marketplace: self.show_marketplace,
            show_staking: self.show_staking,
            updated_at: self.updated_at.to_utc(),
        }
    }
}
