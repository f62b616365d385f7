use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::kyc::application::domain::entities::{KycDocuments, KycStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One platform identity.
///
/// The KYC bundle and the wallet linkage are embedded here rather than in
/// separate aggregates; the user row is the unit of mutation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub is_verified: bool,
    /// Stored verbatim so a superseded verification token can be detected
    /// even when it still verifies cryptographically.
    pub email_verification_token: Option<String>,
    pub kyc_status: KycStatus,
    pub kyc_status_message: Option<String>,
    pub kyc_documents: Option<KycDocuments>,
    pub wallet_address: Option<String>,
    pub wallet_connected: bool,
    pub wallet_nonce: Option<String>,
    pub reset_password_token_hash: Option<String>,
    pub reset_password_expires: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
