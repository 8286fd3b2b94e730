//! JWT claims decoding
//!
//! The admin API issues HS256 tokens whose payload carries the identity id
//! under one of several keys. Views only need the payload for routing and
//! display, so the signature is not verified here; the backend verifies it on
//! every request.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::{lenient_i64, lenient_id, lenient_string, now_secs};

/// Token decoding errors
#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("token is not a JWT (expected 3 segments, got {0})")]
    Malformed(usize),

    #[error("token payload is not base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("token payload is not a JSON object: {0}")]
    Json(#[from] serde_json::Error),
}

/// Claims carried by an admin token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(default, deserialize_with = "lenient_id")]
    pub userid: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub user_id: Option<String>,
    #[serde(rename = "userId", default, deserialize_with = "lenient_id")]
    pub user_id_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub canteenid: Option<String>,
    #[serde(rename = "canteenId", default, deserialize_with = "lenient_id")]
    pub canteen_id_camel: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub sub: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub exp: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// Identity id: `userId`, `userid`, `user_id`, `sub`, then `id`
    pub fn subject_id(&self) -> Option<&str> {
        self.user_id_camel
            .as_deref()
            .or(self.userid.as_deref())
            .or(self.user_id.as_deref())
            .or(self.sub.as_deref())
            .or(self.id.as_deref())
    }

    /// Canteen scope: `userid`, `canteenid`, `canteenId`, then `id`
    pub fn canteen_id(&self) -> Option<&str> {
        self.userid
            .as_deref()
            .or(self.canteenid.as_deref())
            .or(self.canteen_id_camel.as_deref())
            .or(self.id.as_deref())
    }

    /// Expired at `now` (unix seconds). Tokens without `exp` never expire.
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp.is_some_and(|exp| exp <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(now_secs())
    }
}

/// Decode the payload segment of a JWT into [`TokenClaims`].
pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 {
        return Err(ClaimsError::Malformed(parts.len()));
    }

    // Tolerate padding and the standard alphabet
    let payload: String = parts[1]
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            c => c,
        })
        .collect();
    let bytes = URL_SAFE_NO_PAD.decode(payload.as_bytes())?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn token_with(payload: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn test_decode_numeric_userid() {
        let claims = decode_claims(&token_with(json!({"userid": 12, "exp": 4102444800i64}))).unwrap();
        assert_eq!(claims.canteen_id(), Some("12"));
        assert_eq!(claims.subject_id(), Some("12"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_subject_precedence() {
        let claims = decode_claims(&token_with(json!({"userId": "u-1", "userid": 2, "sub": "s"}))).unwrap();
        assert_eq!(claims.subject_id(), Some("u-1"));
        assert_eq!(claims.canteen_id(), Some("2"));

        let claims = decode_claims(&token_with(json!({"sub": "s", "canteenId": 5}))).unwrap();
        assert_eq!(claims.subject_id(), Some("s"));
        assert_eq!(claims.canteen_id(), Some("5"));
    }

    #[test]
    fn test_expiry() {
        let claims = decode_claims(&token_with(json!({"exp": 100}))).unwrap();
        assert!(claims.is_expired_at(100));
        assert!(!claims.is_expired_at(99));
        assert!(!TokenClaims::default().is_expired());
    }

    #[test]
    fn test_malformed_tokens() {
        assert!(matches!(decode_claims("abc"), Err(ClaimsError::Malformed(1))));
        assert!(matches!(decode_claims("a.!!!.c"), Err(ClaimsError::Base64(_))));
        let not_json = format!("a.{}.c", URL_SAFE_NO_PAD.encode("\"hello\""));
        assert!(matches!(decode_claims(&not_json), Err(ClaimsError::Json(_))));
    }
}
