//! Route tree for the API.

pub mod auth;
pub mod health;
pub mod invoice;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup          signup (public)
/// /auth/login           login (public)
/// /auth/refresh         refresh (public)
/// /auth/logout          logout (requires auth)
///
/// /invoices             list, create (requires auth)
/// /invoices/{id}        get, update, delete (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (signup, login, refresh, logout).
        .nest("/auth", auth::router())
        // Owner-scoped invoice CRUD.
        .nest("/invoices", invoice::router())
}
