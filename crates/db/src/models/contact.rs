//! JSONB sub-document shapes shared by reports and events.

use serde::{Deserialize, Serialize};

/// A single named attendee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attendee {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub roll_or_emp_number: Option<String>,
}

/// Attendee headcounts plus an optional named list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendeeRoster {
    #[serde(default)]
    pub total: i32,
    #[serde(default)]
    pub girls: i32,
    #[serde(default)]
    pub boys: i32,
    #[serde(default)]
    pub list: Vec<Attendee>,
}

/// Contact details for a mentor or staff member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContactPerson {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub roll_or_emp_number: Option<String>,
}

/// The authority a report or event sought permission from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Approver {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub designation: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
