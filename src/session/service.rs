use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::{
    token::TokenCodec,
    types::{
        SessionRecord, ACCOUNT_UNAVAILABLE_MESSAGE, INVALID_SESSION_MESSAGE, NO_SESSION_MESSAGE,
    },
};
use crate::{
    official::{OfficialAccount, OfficialRepository},
    shared::AppError,
};

/// A request that passed both the token check and the live account check
#[derive(Debug, Clone, PartialEq)]
pub struct AuthenticatedOfficial {
    pub session: SessionRecord,
    pub official: OfficialAccount,
}

/// Result of running a request token through the verification pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum VerificationOutcome {
    Unauthenticated,
    ExpiredOrInvalid,
    AccountUnavailable,
    Authenticated(AuthenticatedOfficial),
}

impl VerificationOutcome {
    /// Converts every rejection into the 401 error clients see
    pub fn into_authenticated(self) -> Result<AuthenticatedOfficial, AppError> {
        match self {
            VerificationOutcome::Authenticated(authenticated) => Ok(authenticated),
            VerificationOutcome::Unauthenticated => {
                Err(AppError::Unauthorized(NO_SESSION_MESSAGE.to_string()))
            }
            VerificationOutcome::ExpiredOrInvalid => {
                Err(AppError::Unauthorized(INVALID_SESSION_MESSAGE.to_string()))
            }
            VerificationOutcome::AccountUnavailable => {
                Err(AppError::Unauthorized(ACCOUNT_UNAVAILABLE_MESSAGE.to_string()))
            }
        }
    }
}

/// Decides whether a request is authenticated, and by whom
///
/// A token alone is not enough: the official it names is looked up on every
/// call, so deactivating an account takes effect immediately even for tokens
/// that are still cryptographically valid.
pub struct SessionVerifier {
    token_codec: TokenCodec,
    official_repository: Arc<dyn OfficialRepository + Send + Sync>,
}

impl SessionVerifier {
    pub fn new(
        token_codec: TokenCodec,
        official_repository: Arc<dyn OfficialRepository + Send + Sync>,
    ) -> Self {
        Self {
            token_codec,
            official_repository,
        }
    }

    pub fn token_codec(&self) -> &TokenCodec {
        &self.token_codec
    }

    /// Runs the token through the codec and then the live directory
    ///
    /// Only a directory store failure produces an `Err`.
    #[instrument(skip(self, token))]
    pub async fn verify_request(
        &self,
        token: Option<&str>,
    ) -> Result<VerificationOutcome, AppError> {
        let token = match token.filter(|t| !t.is_empty()) {
            Some(token) => token,
            None => {
                debug!("No session token presented");
                return Ok(VerificationOutcome::Unauthenticated);
            }
        };

        let session = match self.token_codec.decode(token) {
            Some(session) => session,
            None => {
                info!("Session token failed verification");
                return Ok(VerificationOutcome::ExpiredOrInvalid);
            }
        };

        let official = self
            .official_repository
            .get_official_by_id(&session.official_id)
            .await?;

        match official {
            Some(official) if official.is_active => {
                debug!(official_id = %official.id, "Session verified against directory");
                Ok(VerificationOutcome::Authenticated(AuthenticatedOfficial {
                    session,
                    official,
                }))
            }
            Some(_) => {
                warn!(official_id = %session.official_id, "Session presented for inactive official");
                Ok(VerificationOutcome::AccountUnavailable)
            }
            None => {
                warn!(official_id = %session.official_id, "Session presented for unknown official");
                Ok(VerificationOutcome::AccountUnavailable)
            }
        }
    }
}
