use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, instrument};

use super::types::{SessionClaims, SessionRecord};
use crate::config::AppConfig;
use crate::shared::AppError;

/// Tokens longer than this are rejected before any parsing.
pub const MAX_TOKEN_LEN: usize = 4096;

/// Signs and verifies session tokens (HS256 JWT with a mandatory `exp`)
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.session_secret,
            Duration::hours(config.session_ttl_hours),
        )
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issues a token for the given record using the configured lifetime
    pub fn encode(&self, record: &SessionRecord) -> Result<String, AppError> {
        self.encode_with_ttl(record, self.ttl)
    }

    /// Issues a token that expires `ttl` from now; a negative ttl yields an expired token
    #[instrument(skip(self, record), fields(official_id = %record.official_id))]
    pub fn encode_with_ttl(&self, record: &SessionRecord, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            record: record.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
        };

        debug!(exp_timestamp = claims.exp, "Creating session token");

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            debug!(error = %e, "Failed to encode session token");
            AppError::JwtError(e.to_string())
        })
    }

    /// Decodes a token into its session record
    ///
    /// Returns `None` for anything that is not a well-formed, correctly signed,
    /// unexpired token with a non-empty official id.
    pub fn decode(&self, token: &str) -> Option<SessionRecord> {
        if token.is_empty() || token.len() > MAX_TOKEN_LEN {
            debug!(token_length = token.len(), "Session token rejected by length bound");
            return None;
        }

        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if !data.claims.record.official_id.is_empty() => {
                debug!(
                    official_id = %data.claims.record.official_id,
                    exp = data.claims.exp,
                    "Session token decoded successfully"
                );
                Some(data.claims.record)
            }
            Ok(_) => {
                debug!("Session token carries an empty official id");
                None
            }
            Err(e) => {
                debug!(error = %e, "Failed to decode session token");
                None
            }
        }
    }
}
