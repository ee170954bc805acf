//! Handlers for the `/events` resource, including community creation
//! nested under an event.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use tally_core::error::CoreError;
use tally_core::types::DbId;
use tally_db::models::community::{Community, CreateCommunity};
use tally_db::models::contact::{Approver, AttendeeRoster, ContactPerson};
use tally_db::models::event::{CreateEvent, Event, EventWithOrganizer};
use tally_db::repositories::{CommunityRepo, EventRepo, UserRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /events`. The organizer travels as an email and
/// is resolved to a user before the event is stored.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(email(message = "a valid organizer email is required"))]
    pub organizer_email: String,
    #[validate(length(min = 1, message = "event name is required"))]
    pub event_name: String,
    #[validate(length(min = 1, message = "organization name is required"))]
    pub organization_name: String,
    pub venue: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "number of days must be at least 1"))]
    pub number_of_days: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub event_time: Option<String>,
    pub head_name: Option<String>,
    pub head_phone: Option<String>,
    pub head_designation: Option<String>,
    #[serde(default)]
    pub total_allocated_amount: f64,
    #[serde(default)]
    pub attendees: AttendeeRoster,
    #[serde(default)]
    pub mentor: ContactPerson,
    #[serde(default)]
    pub permission_from: Approver,
}

impl CreateEventRequest {
    fn into_model(self) -> (String, CreateEvent) {
        let organizer_email = self.organizer_email;
        let event = CreateEvent {
            event_name: self.event_name,
            organization_name: self.organization_name,
            venue: self.venue,
            description: self.description,
            number_of_days: self.number_of_days,
            start_date: self.start_date,
            end_date: self.end_date,
            event_time: self.event_time,
            head_name: self.head_name,
            head_phone: self.head_phone,
            head_designation: self.head_designation,
            total_allocated_amount: self.total_allocated_amount,
            attendees: self.attendees,
            mentor: self.mentor,
            permission_from: self.permission_from,
        };
        (organizer_email, event)
    }
}

/// Request body for `POST /events/{event_id}/communities`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommunityRequest {
    #[validate(length(min = 1, message = "community name is required"))]
    pub community_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub allocated_budget: f64,
    pub head_user_id: DbId,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/events
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    input.validate()?;
    let (organizer_email, event) = input.into_model();

    let organizer = UserRepo::find_by_email(&state.pool, &organizer_email)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found_email("Organizer user", &organizer_email))
        })?;

    let event = EventRepo::create(&state.pool, organizer.id, &event).await?;
    tracing::info!(event_id = event.id, organizer_id = organizer.id, "Created event");
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<EventWithOrganizer>> {
    let event = EventRepo::find_with_organizer(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_id("Event", id)))?;
    Ok(Json(event))
}

/// GET /api/events/organizer/{email}
pub async fn list_by_organizer(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<Event>>> {
    let organizer = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_email("User", &email)))?;

    let events = EventRepo::list_by_organizer(&state.pool, organizer.id).await?;
    Ok(Json(events))
}

/// DELETE /api/events/{id}
///
/// Cascade-delete the event, its communities, and their expenses. The
/// three ordered deletes run in one transaction.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let outcome = EventRepo::delete_cascade(&state.pool, id).await?;
    if !outcome.deleted {
        return Err(AppError::Core(CoreError::not_found_id("Event", id)));
    }
    Ok(Json(MessageResponse::new(
        "Event and all associated communities and expenses deleted successfully.",
    )))
}

/// POST /api/events/{event_id}/communities
///
/// Create a community under an event. The event and the designated head
/// user are checked independently; each absence has its own NotFound.
pub async fn create_community(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateCommunityRequest>,
) -> AppResult<(StatusCode, Json<Community>)> {
    input.validate()?;

    EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_id("Parent event", event_id)))?;

    UserRepo::find_by_id(&state.pool, input.head_user_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::not_found_id("Head user", input.head_user_id))
        })?;

    let community = CommunityRepo::create(
        &state.pool,
        event_id,
        &CreateCommunity {
            community_name: input.community_name,
            description: input.description,
            allocated_budget: input.allocated_budget,
            head_user_id: input.head_user_id,
        },
    )
    .await?;
    Ok((StatusCode::CREATED, Json(community)))
}
