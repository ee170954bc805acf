pub mod auth;
pub mod communities;
pub mod events;
pub mod health;
pub mod reports;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/search?q=                      substring user search
///
/// /reports ...                         personal reports + expenses
/// /events ...                          events + nested communities
/// /communities/member-of/{email}       membership listing
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/reports", reports::router())
        .nest("/events", events::router())
        .nest("/communities", communities::router())
}
