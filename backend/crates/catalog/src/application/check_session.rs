//! Check Session Use Case
//!
//! Resolves a session cookie value to a live session.

use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::SessionRepository;
use crate::error::CatalogResult;

/// Check session use case
pub struct CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<CatalogConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<CatalogConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// `None` for a missing, forged, unknown, or expired session.
    ///
    /// Only store failures are errors; an expired session is removed.
    pub async fn execute(&self, session_token: Option<&str>) -> CatalogResult<Option<Session>> {
        let Some(token) = session_token else {
            return Ok(None);
        };

        let session_id = match session_token::verify(&self.config.session_secret, token) {
            Ok(id) => id,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session cookie");
                return Ok(None);
            }
        };

        let Some(session) = self.session_repo.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            self.session_repo.delete(session_id).await?;
            tracing::debug!(session_id = %session_id, "Removed expired session");
            return Ok(None);
        }

        Ok(Some(session))
    }
}
