//! HTTP Handlers
//!
//! Every handler ends in either a rendered view or a redirect. The gate
//! middleware has already applied the access policy; the role-restricted
//! handlers still check the caller's role themselves.

use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, header};
use axum::response::{AppendHeaders, IntoResponse, Redirect, Response};
use std::sync::Arc;

use kernel::error::app_error::AppError;
use platform::cookie::extract_cookie;

use crate::application::config::CatalogConfig;
use crate::application::{
    AddProductUseCase, DeleteProductUseCase, ListProductsUseCase, ListUsersUseCase, SignInInput,
    SignInUseCase, SignOutUseCase,
};
use crate::domain::repository::CatalogStore;
use crate::domain::value_object::user_role::UserRole;
use crate::domain::value_object::product_id::ProductId;
use crate::error::{CatalogError, CatalogResult};
use crate::presentation::dto::{CurrentUserDto, ProductForm, ProductTemplate, SignInForm};
use crate::presentation::flash::FlashMessage;
use crate::presentation::middleware::RequestContext;
use crate::presentation::paths;
use crate::presentation::policy::AccessPolicy;
use crate::presentation::view::{
    ADMIN_VIEW, AdminModel, LOGIN_VIEW, LoginModel, PRODUCTS_VIEW, ProductsModel, View,
};

/// Shared state for catalog handlers
#[derive(Clone)]
pub struct CatalogAppState<R>
where
    R: CatalogStore,
{
    pub repo: Arc<R>,
    pub config: Arc<CatalogConfig>,
    pub policy: Arc<AccessPolicy>,
}

// ============================================================================
// Navigation
// ============================================================================

/// GET / and GET /products/
pub async fn root_redirect() -> Redirect {
    Redirect::to(paths::LISTING)
}

pub async fn not_found() -> AppError {
    AppError::not_found("Page not found")
}

// ============================================================================
// Login / Logout
// ============================================================================

/// GET /products/login
pub async fn login_form<R>(State(state): State<CatalogAppState<R>>, headers: HeaderMap) -> Response
where
    R: CatalogStore,
{
    let flash_cookie = state.config.flash_cookie();
    let view = View::new(
        LOGIN_VIEW,
        LoginModel {
            error: FlashMessage::pending(&headers, &flash_cookie).map(|f| f.message()),
        },
    );

    // Shown once: clear whatever flash cookie came with the request
    if extract_cookie(&headers, &flash_cookie.name).is_some() {
        (
            AppendHeaders([(header::SET_COOKIE, flash_cookie.build_delete_cookie())]),
            view,
        )
            .into_response()
    } else {
        view.into_response()
    }
}

/// POST /products/login
pub async fn sign_in<R>(
    State(state): State<CatalogAppState<R>>,
    context: RequestContext,
    Form(form): Form<SignInForm>,
) -> CatalogResult<Response>
where
    R: CatalogStore,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        user_name: form.username,
        password: form.password,
        previous_session: context.session_id,
    };

    match use_case.execute(input).await {
        Ok(output) => {
            let cookie = state
                .config
                .session_cookie()
                .build_set_cookie(&output.session_token);

            Ok((
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                Redirect::to(paths::LISTING),
            )
                .into_response())
        }
        Err(CatalogError::InvalidCredentials) => {
            let cookie = FlashMessage::InvalidCredentials.set_cookie(&state.config.flash_cookie());

            Ok((
                AppendHeaders([(header::SET_COOKIE, cookie)]),
                Redirect::to(paths::LOGIN),
            )
                .into_response())
        }
        Err(e) => Err(e),
    }
}

/// GET /products/logout
pub async fn sign_out<R>(
    State(state): State<CatalogAppState<R>>,
    context: RequestContext,
) -> impl IntoResponse
where
    R: CatalogStore,
{
    let use_case = SignOutUseCase::new(state.repo.clone());

    // The cookie is cleared even if the store could not be reached
    if let Err(e) = use_case.execute(context.session_id).await {
        tracing::warn!(error = %e, "Failed to delete session on sign out");
    }

    let cookie = state.config.session_cookie().build_delete_cookie();

    (
        AppendHeaders([(header::SET_COOKIE, cookie)]),
        Redirect::to(paths::LOGIN),
    )
}

// ============================================================================
// Products
// ============================================================================

/// GET /products
pub async fn list_products<R>(
    State(state): State<CatalogAppState<R>>,
    context: RequestContext,
) -> CatalogResult<View<ProductsModel>>
where
    R: CatalogStore,
{
    let products = ListProductsUseCase::new(state.repo.clone()).execute().await?;

    Ok(View::new(
        PRODUCTS_VIEW,
        ProductsModel {
            products: products.into_iter().map(Into::into).collect(),
            product: ProductTemplate::default(),
            current_user: context.current_user.as_ref().map(CurrentUserDto::from),
        },
    ))
}

/// POST /products
pub async fn add_product<R>(
    State(state): State<CatalogAppState<R>>,
    Form(form): Form<ProductForm>,
) -> CatalogResult<Redirect>
where
    R: CatalogStore,
{
    AddProductUseCase::new(state.repo.clone())
        .execute(form.into())
        .await?;

    Ok(Redirect::to(paths::LISTING))
}

/// POST /products/delete/{id}
pub async fn delete_product<R>(
    State(state): State<CatalogAppState<R>>,
    context: RequestContext,
    Path(id): Path<i64>,
) -> CatalogResult<Redirect>
where
    R: CatalogStore,
{
    if context.current_user.as_ref().map(|u| u.user_role) != Some(UserRole::User) {
        tracing::info!(product_id = id, "Delete refused: caller is not a USER");
        return Ok(Redirect::to(paths::LOGIN));
    }

    DeleteProductUseCase::new(state.repo.clone())
        .execute(ProductId::new(id))
        .await?;

    Ok(Redirect::to(paths::LISTING))
}

// ============================================================================
// Admin
// ============================================================================

/// GET /products/admin
pub async fn admin_panel<R>(
    State(state): State<CatalogAppState<R>>,
    context: RequestContext,
) -> CatalogResult<Response>
where
    R: CatalogStore,
{
    let Some(UserRole::Admin) = context.current_user.as_ref().map(|u| u.user_role) else {
        tracing::info!("Admin panel refused: caller is not an ADMIN");
        return Ok(Redirect::to(paths::LOGIN).into_response());
    };

    let users = ListUsersUseCase::new(state.repo.clone()).execute().await?;

    Ok(View::new(
        ADMIN_VIEW,
        AdminModel {
            users: users.into_iter().map(Into::into).collect(),
        },
    )
    .into_response())
}
