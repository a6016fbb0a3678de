//! Catalog Router

use axum::{
    Router, middleware,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::domain::repository::CatalogStore;
use crate::infra::postgres::PgCatalogRepository;
use crate::presentation::handlers::{self, CatalogAppState};
use crate::presentation::middleware::access_gate;
use crate::presentation::paths;
use crate::presentation::policy::AccessPolicy;

/// Create the catalog router with PostgreSQL repository
pub fn catalog_router(repo: PgCatalogRepository, config: CatalogConfig) -> Router {
    catalog_router_generic(repo, config)
}

/// Create a catalog router for any store, with the default access policy
pub fn catalog_router_generic<R>(repo: R, config: CatalogConfig) -> Router
where
    R: CatalogStore,
{
    catalog_router_with_policy(repo, config, AccessPolicy::default())
}

pub fn catalog_router_with_policy<R>(repo: R, config: CatalogConfig, policy: AccessPolicy) -> Router
where
    R: CatalogStore,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
        policy: Arc::new(policy),
    };

    // The gate is layered last so it also covers the fallback
    Router::new()
        .route(paths::ROOT, get(handlers::root_redirect))
        .route(paths::LISTING_SLASH, get(handlers::root_redirect))
        .route(
            paths::LISTING,
            get(handlers::list_products::<R>).post(handlers::add_product::<R>),
        )
        .route(
            paths::LOGIN,
            get(handlers::login_form::<R>).post(handlers::sign_in::<R>),
        )
        .route(paths::LOGOUT, get(handlers::sign_out::<R>))
        .route(paths::DELETE, post(handlers::delete_product::<R>))
        .route(paths::ADMIN, get(handlers::admin_panel::<R>))
        .fallback(handlers::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_gate::<R>,
        ))
        .with_state(state)
}
