//! Route definitions for the `/communities` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::communities;
use crate::state::AppState;

/// Routes mounted at `/communities`.
///
/// ```text
/// GET /member-of/{email} -> list_member_of
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/member-of/{email}", get(communities::list_member_of))
}
