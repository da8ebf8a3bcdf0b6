//! Compact HS256 JSON Web Tokens.
//!
//! Only the subset needed for bearer auth is supported: a fixed
//! `{"alg":"HS256","typ":"JWT"}` header and `sub`/`iat`/`exp` claims.
//! Segments are base64url without padding.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::api::UserId;

type HmacSha256 = Hmac<Sha256>;

/// Default token lifetime (24 hours).
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("malformed token")]
    Malformed,
    #[error("invalid token signature")]
    BadSignature,
    #[error("token expired")]
    Expired,
    #[error("token subject is not a user id")]
    InvalidSubject,
    #[error("unsupported token algorithm '{0}'")]
    UnsupportedAlgorithm(String),
    #[error("invalid signing key")]
    InvalidKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id as a decimal string.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn user_id(&self) -> Result<UserId, TokenError> {
        self.sub
            .parse::<i64>()
            .map(UserId::new)
            .map_err(|_| TokenError::InvalidSubject)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Header {
    alg: String,
    #[serde(default)]
    typ: Option<String>,
}

/// Issues and verifies access tokens with one shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"<redacted>")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user_id: UserId) -> Result<String, TokenError> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    /// Issue a token as if the current time were `now` (unix seconds).
    pub fn issue_at(&self, user_id: UserId, now: i64) -> Result<String, TokenError> {
        let header = Header {
            alg: "HS256".to_string(),
            typ: Some("JWT".to_string()),
        };
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now.saturating_add(i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX)),
        };

        let header = serde_json::to_vec(&header).map_err(|_| TokenError::Malformed)?;
        let claims = serde_json::to_vec(&claims).map_err(|_| TokenError::Malformed)?;
        let signing_input = format!(
            "{}.{}",
            URL_SAFE_NO_PAD.encode(header),
            URL_SAFE_NO_PAD.encode(claims)
        );
        let signature = self.mac(&signing_input)?.finalize().into_bytes();

        Ok(format!(
            "{}.{}",
            signing_input,
            URL_SAFE_NO_PAD.encode(signature)
        ))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token against the clock value `now` (unix seconds).
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (header_b64, claims_b64, signature_b64) =
            match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some(h), Some(c), Some(s), None) => (h, c, s),
                _ => return Err(TokenError::Malformed),
            };

        let header: Header = decode_segment(header_b64)?;
        if header.alg != "HS256" {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| TokenError::Malformed)?;
        let signing_input = &token[..header_b64.len() + 1 + claims_b64.len()];
        self.mac(signing_input)?
            .verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims: Claims = decode_segment(claims_b64)?;
        if claims.exp <= now {
            return Err(TokenError::Expired);
        }
        claims.user_id()?;
        Ok(claims)
    }

    fn mac(&self, signing_input: &str) -> Result<HmacSha256, TokenError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| TokenError::InvalidKey)?;
        mac.update(signing_input.as_bytes());
        Ok(mac)
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_770_000_000;

    fn signer() -> TokenSigner {
        TokenSigner::new("test-secret", DEFAULT_TTL)
    }

    #[test]
    fn test_issue_and_verify() {
        let token = signer().issue_at(UserId::new(7), NOW).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = signer().verify_at(&token, NOW + 60).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.iat, NOW);
        assert_eq!(claims.exp, NOW + 86_400);
        assert_eq!(claims.user_id().unwrap(), UserId::new(7));
    }

    #[test]
    fn test_header_is_hs256() {
        let token = signer().issue_at(UserId::new(1), NOW).unwrap();
        let header = token.split('.').next().unwrap();
        let decoded = URL_SAFE_NO_PAD.decode(header).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(value["alg"], "HS256");
        assert_eq!(value["typ"], "JWT");
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = signer().issue_at(UserId::new(1), NOW).unwrap();
        assert_eq!(
            signer().verify_at(&token, NOW + 86_400),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_oversized_ttl_never_issues_expired_tokens() {
        let signer = TokenSigner::new("test-secret", Duration::from_secs(u64::MAX));
        let token = signer.issue_at(UserId::new(3), NOW).unwrap();
        let claims = signer.verify_at(&token, NOW + 86_400).unwrap();
        assert_eq!(claims.exp, i64::MAX);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = signer().issue_at(UserId::new(1), NOW).unwrap();
        let other = TokenSigner::new("another-secret", DEFAULT_TTL);
        assert_eq!(other.verify_at(&token, NOW), Err(TokenError::BadSignature));
    }

    #[test]
    fn test_tampered_claims_rejected() {
        let token = signer().issue_at(UserId::new(1), NOW).unwrap();
        let parts: Vec<&str> = token.split('.').collect();
        let forged_claims = URL_SAFE_NO_PAD
            .encode(format!(r#"{{"sub":"2","iat":{NOW},"exp":{}}}"#, NOW + 100));
        let forged = format!("{}.{}.{}", parts[0], forged_claims, parts[2]);
        assert_eq!(
            signer().verify_at(&forged, NOW),
            Err(TokenError::BadSignature)
        );
    }

    #[test]
    fn test_malformed_tokens() {
        for bad in ["", "abc", "a.b", "a.b.c.d", "!!.??.**"] {
            assert_eq!(
                signer().verify_at(bad, NOW),
                Err(TokenError::Malformed),
                "token {bad:?}"
            );
        }
    }

    #[test]
    fn test_unsupported_algorithm() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let claims = URL_SAFE_NO_PAD.encode(r#"{"sub":"1","iat":0,"exp":9999999999}"#);
        let token = format!("{header}.{claims}.");
        assert_eq!(
            signer().verify_at(&token, NOW),
            Err(TokenError::UnsupportedAlgorithm("none".to_string()))
        );
    }

    #[test]
    fn test_non_numeric_subject_rejected() {
        let s = signer();
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let claims = URL_SAFE_NO_PAD.encode(format!(
            r#"{{"sub":"alice","iat":{NOW},"exp":{}}}"#,
            NOW + 100
        ));
        let input = format!("{header}.{claims}");
        let sig = s.mac(&input).unwrap().finalize().into_bytes();
        let token = format!("{input}.{}", URL_SAFE_NO_PAD.encode(sig));
        assert_eq!(s.verify_at(&token, NOW), Err(TokenError::InvalidSubject));
    }
}
