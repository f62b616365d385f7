pub mod dashboard_stats;
pub mod delete_user;
pub mod fetch_user;
pub mod generate_access_password;
pub mod kyc_moderation;
pub mod list_users;
pub mod site_settings;
pub mod update_user;

pub use dashboard_stats::dashboard_stats_handler;
pub use delete_user::delete_user_handler;
pub use fetch_user::fetch_user_handler;
pub use generate_access_password::generate_access_password_handler;
pub use kyc_moderation::{decide_kyc_handler, list_pending_kyc_handler};
pub use list_users::list_users_handler;
pub use site_settings::{get_site_settings_handler, update_site_settings_handler};
pub use update_user::update_user_handler;
