pub mod site_access;

pub use site_access::site_access_handler;
