//! Route definitions for the `/events` resource.
//!
//! Also nests community creation under `/events/{event_id}/communities`.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::events;
use crate::state::AppState;

/// Routes mounted at `/events`.
///
/// ```text
/// POST   /                     -> create
/// GET    /{id}                 -> get_by_id (organizer resolved)
/// DELETE /{id}                 -> delete (transactional cascade)
/// GET    /organizer/{email}    -> list_by_organizer
/// POST   /{id}/communities     -> create_community
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(events::create))
        .route("/organizer/{email}", get(events::list_by_organizer))
        .route("/{id}", get(events::get_by_id).delete(events::delete))
        .route("/{id}/communities", post(events::create_community))
}
