//! Event entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

use crate::models::contact::{Approver, AttendeeRoster, ContactPerson};

/// Full event row from the `events` table. Communities reference events;
/// an event embeds nothing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub event_name: String,
    pub organization_name: String,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub number_of_days: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Optional time of day for single-day events.
    pub event_time: Option<String>,
    pub head_name: Option<String>,
    pub head_phone: Option<String>,
    pub head_designation: Option<String>,
    pub total_allocated_amount: f64,
    pub organizer_id: DbId,
    pub attendees: Json<AttendeeRoster>,
    pub mentor: Json<ContactPerson>,
    pub permission_from: Json<Approver>,
    pub created_at: Timestamp,
}

/// Organizer reference resolved for event detail reads.
#[derive(Debug, Clone, Serialize)]
pub struct OrganizerRef {
    pub name: String,
    pub email: String,
}

/// An event with its organizer reference resolved.
#[derive(Debug, Clone, Serialize)]
pub struct EventWithOrganizer {
    #[serde(flatten)]
    pub event: Event,
    pub organizer: OrganizerRef,
}

/// Flat row produced by the event-plus-organizer join.
#[derive(Debug, FromRow)]
pub(crate) struct EventOrganizerRow {
    #[sqlx(flatten)]
    pub event: Event,
    pub organizer_name: String,
    pub organizer_email: String,
}

impl From<EventOrganizerRow> for EventWithOrganizer {
    fn from(row: EventOrganizerRow) -> Self {
        EventWithOrganizer {
            event: row.event,
            organizer: OrganizerRef {
                name: row.organizer_name,
                email: row.organizer_email,
            },
        }
    }
}

/// DTO for creating an event. The organizer is resolved from an email by
/// the handler before this reaches the repository.
#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    pub event_name: String,
    pub organization_name: String,
    pub venue: Option<String>,
    pub description: Option<String>,
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
