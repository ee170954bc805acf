//! Expense entity model and DTOs.
//!
//! One table holds every expense; each row is owned by exactly one
//! report or one community (enforced by a CHECK constraint). This
//! replaces the two parallel expense schemas the data model would
//! otherwise need.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// The aggregate an expense belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseOwner {
    Report(DbId),
    Community(DbId),
}

impl ExpenseOwner {
    /// Decompose into the `(report_id, community_id)` column pair.
    pub(crate) fn column_pair(self) -> (Option<DbId>, Option<DbId>) {
        match self {
            ExpenseOwner::Report(id) => (Some(id), None),
            ExpenseOwner::Community(id) => (None, Some(id)),
        }
    }
}

/// Expense category, stored as the `expense_category` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "expense_category")]
pub enum ExpenseCategory {
    Travel,
    Stay,
    Food,
    Purchase,
    Other,
}

/// Full expense row from the `expenses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Expense {
    pub id: DbId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community_id: Option<DbId>,
    pub category: ExpenseCategory,
    pub description: Option<String>,
    /// Free-form string key/value pairs (e.g. vendor, bill number).
    pub details: Json<BTreeMap<String, String>>,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_by: Option<DbId>,
    pub spent_at: Timestamp,
}

/// DTO for creating an expense. The owner travels separately as an
/// [`ExpenseOwner`]; `added_by` is only meaningful for community-owned
/// expenses.
#[derive(Debug, Deserialize)]
pub struct CreateExpense {
    pub category: ExpenseCategory,
    pub description: Option<String>,
    #[serde(default)]
    pub details: BTreeMap<String, String>,
    pub amount: f64,
    pub added_by: Option<DbId>,
    pub spent_at: Option<Timestamp>,
}

/// DTO for partially updating an expense. Only non-`None` fields are
/// applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpense {
    pub category: Option<ExpenseCategory>,
    pub description: Option<String>,
    pub details: Option<BTreeMap<String, String>>,
    pub amount: Option<f64>,
    pub spent_at: Option<Timestamp>,
}
