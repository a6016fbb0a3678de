//! Sign In Use Case
//!
//! Authenticates a user by name and password and opens a session.

use std::sync::Arc;

use kernel::id::SessionId;
use platform::password::ClearTextPassword;

use crate::application::config::CatalogConfig;
use crate::application::session_token;
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{CatalogError, CatalogResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
    /// Session presented with the login request, revoked on success
    pub previous_session: Option<SessionId>,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed value for the session cookie
    pub session_token: String,
    pub session: Session,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<CatalogConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<CatalogConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    /// Unknown user and wrong password both end in `InvalidCredentials`.
    pub async fn execute(&self, input: SignInInput) -> CatalogResult<SignInOutput> {
        let password = ClearTextPassword::new(input.password);

        // A name that could never have been stored cannot match anyone
        let Ok(user_name) = UserName::new(input.user_name) else {
            tracing::info!("Sign in rejected: malformed user name");
            return Err(CatalogError::InvalidCredentials);
        };

        let Some(user) = self.user_repo.find_by_user_name(&user_name).await? else {
            tracing::info!(user_name = %user_name, "Sign in rejected: unknown user");
            return Err(CatalogError::InvalidCredentials);
        };

        let password_valid = user
            .password_hash
            .verify_blocking(password, self.config.password_pepper.clone())
            .await?;

        if !password_valid {
            tracing::info!(user_name = %user_name, "Sign in rejected: wrong password");
            return Err(CatalogError::InvalidCredentials);
        }

        if let Some(previous) = input.previous_session {
            self.session_repo.delete(previous).await?;
        }

        let session = Session::new(&user, self.config.session_ttl_chrono());
        self.session_repo.create(&session).await?;

        let session_token = session_token::sign(&self.config.session_secret, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            user_role = %user.user_role,
            session_id = %session.session_id,
            "User signed in"
        );

        if user.password_hash.needs_rehash() {
            tracing::debug!(user_id = %user.user_id, "Stored password hash uses a legacy scheme");
        }

        Ok(SignInOutput {
            session_token,
            session,
        })
    }
}
