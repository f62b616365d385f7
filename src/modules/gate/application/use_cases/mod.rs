pub mod check_site_access;
pub mod verify_site_access;
