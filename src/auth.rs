//! Token issuance and bearer validation for protected routes.

use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Identity claims carried by issued tokens.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 tokens with a server-held symmetric key.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    issuer: String,
    audience: String,
    lifetime_secs: i64,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        TokenService {
            encoding_key: Arc::new(EncodingKey::from_secret(config.key.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(config.key.as_bytes())),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            lifetime_secs: config.lifetime_secs,
        }
    }

    /// Issue a token carrying the username as subject.
    pub fn issue(&self, username: &str) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: now,
            exp: now + self.lifetime_secs,
        };
        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    /// Verify signature, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| ApiError::Unauthorized(e.to_string()))?;
        Ok(data.claims)
    }
}

/// Extractor requiring a valid `Authorization: Bearer` token.
pub struct AuthUser(pub Claims);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;
        let token = value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Unauthorized("missing bearer token".into()))?;
        let claims = state.tokens.verify(token.trim())?;
        Ok(AuthUser(claims))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtConfig;

    fn jwt_config(key: &str) -> JwtConfig {
        JwtConfig {
            key: key.into(),
            issuer: "catalogo-api".into(),
            audience: "catalogo-api".into(),
            lifetime_secs: 7200,
        }
    }

    #[test]
    fn issue_then_verify_round_trip() {
        let tokens = TokenService::new(&jwt_config("test-signing-key"));
        let token = tokens.issue("lvgvspe").unwrap();
        assert!(!token.is_empty());
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "lvgvspe");
        assert_eq!(claims.iss, "catalogo-api");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_key_rejected() {
        let issuer = TokenService::new(&jwt_config("key-a"));
        let verifier = TokenService::new(&jwt_config("key-b"));
        let token = issuer.issue("lvgvspe").unwrap();
        assert!(matches!(
            verifier.verify(&token),
            Err(ApiError::Unauthorized(_))
        ));
    }

    #[test]
    fn wrong_audience_rejected() {
        let issuer = TokenService::new(&jwt_config("shared-key"));
        let mut other = jwt_config("shared-key");
        other.audience = "outra-api".into();
        let verifier = TokenService::new(&other);
        let token = issuer.issue("lvgvspe").unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn expired_token_rejected() {
        // Well past the default validation leeway.
        let mut config = jwt_config("test-signing-key");
        config.lifetime_secs = -3600;
        let tokens = TokenService::new(&config);
        let token = tokens.issue("lvgvspe").unwrap();
        assert!(tokens.verify(&token).is_err());
    }

    #[test]
    fn garbage_token_rejected() {
        let tokens = TokenService::new(&jwt_config("test-signing-key"));
        assert!(tokens.verify("not-a-token").is_err());
    }
}
