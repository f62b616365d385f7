use std::fmt;
use uuid::Uuid;

use crate::modules::auth::application::domain::entities::UserRole;

/// Subject used for site-access tokens, which carry no user identity.
pub const SITE_ACCESS_SUBJECT: &str = "site-access";

/// Intent marker carried by every signed token and checked on verification,
/// so a token minted for one flow cannot be replayed into another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    Access,
    SiteAccess,
    EmailVerification,
}

impl TokenPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenPurpose::Access => "access",
            TokenPurpose::SiteAccess => "site-access",
            TokenPurpose::EmailVerification => "email-verification",
        }
    }
}

#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: i64,
    pub purpose: String,
    pub role: Option<String>,
    pub is_verified: Option<bool>,
}

impl TokenClaims {
    pub fn subject_user_id(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.sub).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
    WrongPurpose,
    EncodingFailed(String),
}

#[cfg(not(tarpaulin_include))]
impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::Expired => write!(f, "Token has expired"),
            TokenError::Invalid => write!(f, "Token is invalid"),
            TokenError::WrongPurpose => write!(f, "Token purpose mismatch"),
            TokenError::EncodingFailed(msg) => write!(f, "Token encoding failed: {}", msg),
        }
    }
}

/// Single issue/verify path for all signed, purpose-tagged tokens.
///
/// Password-reset deliberately does not go through here: it uses the
/// store-a-hash scheme, which is revocable and unforgeable without server
/// state.
pub trait TokenProvider: Send + Sync {
    fn issue_access_token(
        &self,
        user_id: Uuid,
        role: UserRole,
        is_verified: bool,
    ) -> Result<String, TokenError>;

    fn issue_site_access_token(&self) -> Result<String, TokenError>;

    fn issue_verification_token(&self, user_id: Uuid) -> Result<String, TokenError>;

    fn verify(&self, token: &str, expected: TokenPurpose) -> Result<TokenClaims, TokenError>;
}
