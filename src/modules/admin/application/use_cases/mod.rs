pub mod dashboard_stats;
pub mod delete_user;
pub mod fetch_user;
pub mod generate_access_password;
pub mod get_site_settings;
pub mod list_users;
pub mod update_site_settings;
pub mod update_user;
