//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use kernel::id::SessionId;

use crate::domain::repository::SessionRepository;
use crate::error::CatalogResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>) -> Self {
        Self { session_repo }
    }

    /// Signing out without a session is a no-op
    pub async fn execute(&self, session_id: Option<SessionId>) -> CatalogResult<()> {
        let Some(session_id) = session_id else {
            tracing::debug!("Sign out without an active session");
            return Ok(());
        };

        self.session_repo.delete(session_id).await?;

        tracing::info!(session_id = %session_id, "User signed out");
        Ok(())
    }
}
