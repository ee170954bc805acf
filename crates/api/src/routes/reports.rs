//! Route definitions for the `/reports` resource.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// POST   /                              -> create
/// GET    /user/{email}                  -> list_by_owner
/// GET    /{id}                          -> get_by_id
/// DELETE /{id}                          -> delete
/// POST   /{id}/expenses                 -> append_expense
/// PUT    /{id}/expenses/{expense_id}    -> update_expense
/// DELETE /{id}/expenses/{expense_id}    -> delete_expense
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(reports::create))
        .route("/user/{email}", get(reports::list_by_owner))
        .route("/{id}", get(reports::get_by_id).delete(reports::delete))
        .route("/{id}/expenses", post(reports::append_expense))
        .route(
            "/{id}/expenses/{expense_id}",
            delete(reports::delete_expense).put(reports::update_expense),
        )
}
