//! Personal report entity model and DTOs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

use crate::models::contact::{Approver, AttendeeRoster, ContactPerson};

/// Full report row from the `reports` table.
///
/// Expenses live in the unified `expenses` table keyed by `report_id`;
/// read paths join them back on via
/// [`ExpenseRepo`](crate::repositories::ExpenseRepo).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Report {
    pub id: DbId,
    pub owner_email: String,
    pub organization_name: String,
    pub event_name: String,
    pub venue: Option<String>,
    pub description: Option<String>,
    pub number_of_days: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub attendees: Json<AttendeeRoster>,
    pub mentor: Json<ContactPerson>,
    pub permission_from: Json<Approver>,
    pub allocated_amount: f64,
    pub created_at: Timestamp,
}

/// DTO for creating a report. The report is created whole in one step;
/// expenses are appended afterwards.
#[derive(Debug, Deserialize)]
pub struct CreateReport {
    pub owner_email: String,
    pub organization_name: String,
    pub event_name: String,
    pub venue: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_number_of_days")]
    pub number_of_days: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub attendees: AttendeeRoster,
    #[serde(default)]
    pub mentor: ContactPerson,
    #[serde(default)]
    pub permission_from: Approver,
    #[serde(default)]
    pub allocated_amount: f64,
}

fn default_number_of_days() -> i32 {
    1
}
