//! JWT token handling
//!
//! Access and refresh tokens share one signing secret and are told apart by
//! the `token_type` claim.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::errors::{Error, ErrorKind};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecuritySettings;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Issuer claim
    pub issuer: String,
    pub access_token_expire_minutes: u64,
    pub refresh_token_expire_minutes: u64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self::from(&SecuritySettings::default())
    }
}

impl From<&SecuritySettings> for JwtConfig {
    fn from(settings: &SecuritySettings) -> Self {
        Self {
            secret: settings.jwt_secret.clone(),
            issuer: settings.jwt_issuer.clone(),
            access_token_expire_minutes: settings.access_token_expire_minutes,
            refresh_token_expire_minutes: settings.refresh_token_expire_minutes,
        }
    }
}

impl JwtConfig {
    pub fn access_lifetime(&self) -> Duration {
        Duration::from_secs(self.access_token_expire_minutes * 60)
    }

    pub fn refresh_lifetime(&self) -> Duration {
        Duration::from_secs(self.refresh_token_expire_minutes * 60)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (user ID)
    pub sub: String,
    pub token_type: TokenType,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
}

impl TokenClaims {
    pub fn new(user_id: i64, token_type: TokenType, ttl: Duration, config: &JwtConfig) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            token_type,
            exp: now + ttl.as_secs() as i64,
            iat: now,
            iss: config.issuer.clone(),
        }
    }

    pub fn user_id(&self) -> Result<i64, Error> {
        self.sub
            .parse()
            .map_err(|_| Error::from(ErrorKind::InvalidSubject))
    }
}

/// Sign a token of `token_type` for `user_id`, valid for `ttl`.
pub fn create_token(
    user_id: i64,
    token_type: TokenType,
    ttl: Duration,
    config: &JwtConfig,
) -> Result<String, Error> {
    let claims = TokenClaims::new(user_id, token_type, ttl, config);

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Verify signature, expiry and issuer, and that the token is of the
/// expected type.
pub fn verify_token(
    token: &str,
    expected: TokenType,
    config: &JwtConfig,
) -> Result<TokenClaims, Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let claims = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?
    .claims;

    if claims.token_type != expected {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(claims)
}
