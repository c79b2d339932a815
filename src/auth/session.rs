//! Session tokens.
//!
//! A session is an HS256 JWT whose subject is the caller's Discord id. It arrives
//! either as the `dash_session` cookie or as a bearer token. Verification never
//! touches storage.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::bearer_token;
use crate::errors::{messages, AppError};
use crate::AppState;

/// Cookie carrying the session token.
pub const SESSION_COOKIE: &str = "dash_session";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Mint a session token for a Discord id.
pub fn issue_session_token(
    secret: &str,
    discord_id: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as usize;
    let claims = SessionClaims {
        sub: discord_id.to_string(),
        iat: now,
        exp: now + ttl.as_secs() as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verify a token and return the Discord id it was issued for.
pub fn verify_session_token(secret: &str, token: &str) -> Option<String> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    match decode::<SessionClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
    {
        Ok(data) if !data.claims.sub.is_empty() => Some(data.claims.sub),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Rejected session token: {}", e);
            None
        }
    }
}

/// The authenticated caller's Discord id.
#[derive(Debug, Clone)]
pub struct CallerIdentity(pub String);

impl FromRequestParts<AppState> for CallerIdentity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let unauthorized = || AppError::Unauthorized(messages::UNAUTHORIZED.to_string());

        let Some(secret) = state.config.session_secret.as_deref() else {
            return Err(unauthorized());
        };

        let jar = CookieJar::from_headers(&parts.headers);
        let token = bearer_token(&parts.headers)
            .map(str::to_string)
            .or_else(|| jar.get(SESSION_COOKIE).map(|c| c.value().to_string()))
            .ok_or_else(unauthorized)?;

        verify_session_token(secret, &token)
            .map(CallerIdentity)
            .ok_or_else(unauthorized)
    }
}
