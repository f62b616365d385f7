pub mod connect_wallet;
pub mod forgot_password;
pub mod login_user;
pub mod register_user;
pub mod resend_verification;
pub mod reset_password;
pub mod verify_email;
pub mod verify_reset_token;
pub mod wallet_challenge;

pub use connect_wallet::connect_wallet_handler;
pub use forgot_password::forgot_password_handler;
pub use login_user::login_user_handler;
pub use register_user::register_user_handler;
pub use resend_verification::resend_verification_handler;
pub use reset_password::reset_password_handler;
pub use verify_email::verify_email_handler;
pub use verify_reset_token::verify_reset_token_handler;
pub use wallet_challenge::wallet_challenge_handler;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::auth::application::domain::entities::User;

/// Client-facing user projection; never carries the password hash or any
/// token material.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_verified: bool,
    pub kyc_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kyc_status_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    pub wallet_connected: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role.as_str().to_string(),
            is_verified: user.is_verified,
            kyc_status: user.kyc_status.as_str().to_string(),
            kyc_status_message: user.kyc_status_message,
            wallet_address: user.wallet_address,
            wallet_connected: user.wallet_connected,
            created_at: user.created_at,
        }
    }
}
