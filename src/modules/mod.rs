pub mod admin;
pub mod auth;
pub mod email;
pub mod gate;
pub mod kyc;
