/// Signing configuration, loaded from the environment.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub secret_key: String,
    pub issuer: String,
    /// Identity ("access") token lifetime in seconds. Default 7 days.
    pub access_token_expiry: i64,
    /// Site-access token lifetime in seconds. Default 24 hours.
    pub site_access_expiry: i64,
    /// Email-verification token lifetime in seconds. Default 24 hours.
    pub verification_expiry: i64,
}

impl TokenConfig {
    pub fn from_env() -> Self {
        let secret_key = std::env::var("TOKEN_SECRET").expect("TOKEN_SECRET is not set");
        let issuer = std::env::var("TOKEN_ISSUER").unwrap_or_else(|_| "oriro".to_string());

        let access_token_expiry = std::env::var("ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(7 * 24 * 3600);

        let site_access_expiry = std::env::var("SITE_ACCESS_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24 * 3600);

        let verification_expiry = std::env::var("VERIFICATION_TOKEN_EXPIRY")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24 * 3600);

        Self {
            secret_key,
            issuer,
            access_token_expiry,
            site_access_expiry,
            verification_expiry,
        }
    }
}
