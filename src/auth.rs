//! Inspection of the bearer token the login page leaves in the `token` cookie.
//!
//! The signature is the backend's business; the client only reads the payload
//! to learn who is signed in and whether the token has already expired.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Subject of a token; the backend has issued both numeric and string ids.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(untagged)]
pub enum UserId {
    Text(String),
    Number(i64),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Text(id) => f.write_str(id),
            UserId::Number(id) => write!(f, "{}", id),
        }
    }
}

/// Claims carried by a Kelas Santai access token.
///
/// Only the payload shape is checked loosely: a token without `user_id` or
/// `exp` still counts as signed in.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuthClaims {
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub role: String,
    /// Expiry, seconds since the epoch.
    #[serde(default, deserialize_with = "lenient_exp")]
    pub exp: Option<i64>,
}

impl AuthClaims {
    /// A token without `exp` never expires client-side.
    pub fn is_expired(&self, now_secs: i64) -> bool {
        self.exp.map_or(false, |exp| exp < now_secs)
    }
}

// Some issuers write `exp` as a float.
fn lenient_exp<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|exp| exp as i64))
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("token is not a three-part JWT")]
    Shape,
    #[error("token payload is not base64url: {0}")]
    Encoding(String),
    #[error("token payload is not valid claims: {0}")]
    Claims(String),
}

/// Decode the payload segment of a JWT without verifying it.
pub fn decode_claims(token: &str) -> Result<AuthClaims, TokenError> {
    let mut parts = token.split('.');
    let payload = match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(payload), Some(_), None) if !payload.is_empty() => payload,
        _ => return Err(TokenError::Shape),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| TokenError::Encoding(e.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|e| TokenError::Claims(e.to_string()))
}

/// Claims of `token` if it decodes and is still valid at `now_secs`.
pub fn live_claims(token: &str, now_secs: i64) -> Option<AuthClaims> {
    match decode_claims(token) {
        Ok(claims) if !claims.is_expired(now_secs) => Some(claims),
        Ok(claims) => {
            log::info!(
                "auth token for user {} expired at {}",
                claims.user_id.as_ref().map(ToString::to_string).unwrap_or_default(),
                claims.exp.unwrap_or_default()
            );
            None
        }
        Err(err) => {
            log::warn!("discarding unreadable auth token: {}", err);
            None
        }
    }
}

#[cfg(test)]
pub(crate) fn sign_for_tests(claims: serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{}.{}.signature", header, payload)
}
