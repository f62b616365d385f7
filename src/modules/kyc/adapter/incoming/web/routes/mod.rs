pub mod submit_kyc;

pub use submit_kyc::submit_kyc_handler;
