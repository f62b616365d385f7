pub mod list_pending;
pub mod set_kyc_status;
pub mod submit_kyc;
