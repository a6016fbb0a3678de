//! Access Gate Middleware
//!
//! Resolves the session cookie once per request, evaluates the access
//! policy, and hands the result to handlers as a [`RequestContext`].

use std::convert::Infallible;

use axum::body::Body;
use axum::extract::{FromRequestParts, State};
use axum::http::{Request, request::Parts};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use kernel::id::SessionId;
use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::domain::entity::session::{CurrentUser, Session};
use crate::domain::repository::CatalogStore;
use crate::presentation::handlers::CatalogAppState;
use crate::presentation::paths;
use crate::presentation::policy::Decision;

/// Who is making this request, as established by the access gate
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub current_user: Option<CurrentUser>,
    pub session_id: Option<SessionId>,
}

impl RequestContext {
    fn from_session(session: Option<&Session>) -> Self {
        Self {
            current_user: session.map(Session::current_user),
            session_id: session.map(|s| s.session_id),
        }
    }
}

/// Anonymous when the gate did not run
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .unwrap_or_default())
    }
}

/// Gate every request through the access policy
///
/// Denied requests never reach a handler; they are redirected to the
/// login page.
pub async fn access_gate<R>(
    State(state): State<CatalogAppState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: CatalogStore,
{
    let token = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let session = match use_case.execute(token.as_deref()).await {
        Ok(session) => session,
        Err(e) => return e.into_response(),
    };

    let context = RequestContext::from_session(session.as_ref());

    match state
        .policy
        .evaluate(req.method(), req.uri().path(), context.current_user.as_ref())
    {
        Decision::Allow => {
            req.extensions_mut().insert(context);
            next.run(req).await
        }
        Decision::Deny(denial) => {
            tracing::info!(
                method = %req.method(),
                path = %req.uri().path(),
                user_id = ?context.current_user.as_ref().map(|u| u.user_id),
                ?denial,
                "Access denied"
            );
            Redirect::to(paths::LOGIN).into_response()
        }
    }
}
