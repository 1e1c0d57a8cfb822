//! Bearer token authentication.
//!
//! Tokens are HS256 JWTs whose `sub` claim is the user id. Handlers take an
//! [`AuthUser`] argument to require a valid `Authorization: Bearer <token>`
//! header; the router state only has to expose an `Arc<TokenService>` through
//! [`FromRef`].

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use stayhub_http::error::AppError;
use stayhub_kernel::settings::AuthSettings;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid bearer token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),

    #[error("token subject is empty")]
    EmptySubject,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        tracing::debug!(error = %err, "rejecting request");
        AppError::unauthorized(err.to_string())
    }
}

/// Issues and verifies bearer tokens with a shared secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
            ttl_secs,
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(&settings.jwt_secret, settings.token_ttl_secs)
    }

    /// Mint a token for `user_id` valid for the configured lifetime.
    pub fn issue(&self, user_id: &str) -> Result<String, AuthError> {
        if user_id.trim().is_empty() {
            return Err(AuthError::EmptySubject);
        }
        let now = jsonwebtoken::get_current_timestamp();
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + self.ttl_secs,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = decode::<Claims>(token, &self.decoding, &self.validation)?.claims;
        if claims.sub.trim().is_empty() {
            return Err(AuthError::EmptySubject);
        }
        Ok(claims)
    }
}

/// The authenticated caller, taken from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: String,
}

fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MissingToken)
}

impl<S> FromRequestParts<S> for AuthUser
where
    Arc<TokenService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = Arc::<TokenService>::from_ref(state);
        let claims = tokens.verify(bearer_token(parts)?)?;
        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
