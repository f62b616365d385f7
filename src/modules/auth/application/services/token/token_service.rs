use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::token_config::TokenConfig;
use crate::modules::auth::application::domain::entities::UserRole;
use crate::modules::auth::application::ports::outgoing::token_provider::{
    TokenClaims, TokenError, TokenProvider, TokenPurpose, SITE_ACCESS_SUBJECT,
};

/// Wire format of the signed claims.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    exp: i64,
    purpose: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_verified: Option<bool>,
}

#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(config: TokenConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret_key.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn issue(
        &self,
        sub: String,
        purpose: TokenPurpose,
        expiry_secs: i64,
        role: Option<String>,
        is_verified: Option<bool>,
    ) -> Result<String, TokenError> {
        let expiration = Utc::now() + Duration::seconds(expiry_secs);
        let claims = Claims {
            sub,
            iss: self.config.issuer.clone(),
            exp: expiration.timestamp(),
            purpose: purpose.as_str().to_string(),
            role,
            is_verified,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}

impl TokenProvider for TokenService {
    fn issue_access_token(
        &self,
        user_id: Uuid,
        role: UserRole,
        is_verified: bool,
    ) -> Result<String, TokenError> {
        self.issue(
            user_id.to_string(),
            TokenPurpose::Access,
            self.config.access_token_expiry,
            Some(role.as_str().to_string()),
            Some(is_verified),
        )
    }

    fn issue_site_access_token(&self) -> Result<String, TokenError> {
        self.issue(
            SITE_ACCESS_SUBJECT.to_string(),
            TokenPurpose::SiteAccess,
            self.config.site_access_expiry,
            None,
            None,
        )
    }

    fn issue_verification_token(&self, user_id: Uuid) -> Result<String, TokenError> {
        self.issue(
            user_id.to_string(),
            TokenPurpose::EmailVerification,
            self.config.verification_expiry,
            None,
            None,
        )
    }

    fn verify(&self, token: &str, expected: TokenPurpose) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false; // enforced manually below

        let decoded = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|_| TokenError::Invalid)?;

        if decoded.claims.iss != self.config.issuer {
            return Err(TokenError::Invalid);
        }

        if decoded.claims.exp < Utc::now().timestamp() {
            return Err(TokenError::Expired);
        }

        if decoded.claims.purpose != expected.as_str() {
            return Err(TokenError::WrongPurpose);
        }

        Ok(TokenClaims {
            sub: decoded.claims.sub,
            exp: decoded.claims.exp,
            purpose: decoded.claims.purpose,
            role: decoded.claims.role,
            is_verified: decoded.claims.is_verified,
        })
    }
}
