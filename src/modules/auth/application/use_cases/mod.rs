pub mod connect_wallet;
pub mod forgot_password;
pub mod login_user;
pub mod register_user;
pub mod resend_verification;
pub mod reset_password;
pub mod verify_email;
pub mod verify_reset_token;
pub mod wallet_challenge;
