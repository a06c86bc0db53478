//! Token claims and the value handed back on issuance.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Login name of the subject
    pub username: String,

    /// Role identifier
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp, always `iat + ttl`
    pub exp: i64,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates claims valid from `issued_at` for `ttl_seconds`
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        role: impl Into<String>,
        issued_at: DateTime<Utc>,
        ttl_seconds: i64,
    ) -> Self {
        let iat = issued_at.timestamp();
        Self {
            sub: user_id.into(),
            username: username.into(),
            role: role.into(),
            iat,
            exp: iat.saturating_add(ttl_seconds),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Checks whether the validity window has closed at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Issued-at as a timestamp
    pub fn issued_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.iat, 0).single().unwrap_or_default()
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.exp, 0).single().unwrap_or_default()
    }
}

/// A freshly minted token together with its expiry metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedToken {
    /// Signed compact JWT
    pub token: String,
    /// Seconds until expiry at the time of issuance
    pub expires_in: i64,
    /// Absolute expiry
    pub expires_at: DateTime<Utc>,
}
