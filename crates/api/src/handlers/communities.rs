//! Handlers for the `/communities` resource.

use axum::extract::{Path, State};
use axum::Json;
use tally_core::error::CoreError;
use tally_db::models::community::CommunityWithEvent;
use tally_db::repositories::{CommunityRepo, UserRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/communities/member-of/{email}
///
/// Every community the user belongs to, newest first, with the parent
/// event resolved to its display fields.
pub async fn list_member_of(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<CommunityWithEvent>>> {
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_email("User", &email)))?;

    let communities = CommunityRepo::list_member_of(&state.pool, user.id).await?;
    Ok(Json(communities))
}
