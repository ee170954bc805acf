//! Handlers for the `/reports` resource (personal reports and their
//! expenses).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_core::budget::BudgetSummary;
use tally_core::error::CoreError;
use tally_core::types::DbId;
use tally_db::models::contact::{Approver, AttendeeRoster, ContactPerson};
use tally_db::models::expense::{CreateExpense, Expense, ExpenseOwner, UpdateExpense};
use tally_db::models::report::{CreateReport, Report};
use tally_db::repositories::{ExpenseRepo, ReportRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /reports`. The report is created whole;
/// expenses are appended afterwards.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateReportRequest {
    #[validate(email(message = "a valid owner email is required"))]
    pub owner_email: String,
    #[validate(length(min = 1, message = "organization name is required"))]
    pub organization_name: String,
    #[validate(length(min = 1, message = "event name is required"))]
    pub event_name: String,
    pub venue: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "number of days must be at least 1"))]
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

impl From<CreateReportRequest> for CreateReport {
    fn from(req: CreateReportRequest) -> Self {
        CreateReport {
            owner_email: req.owner_email,
            organization_name: req.organization_name,
            event_name: req.event_name,
            venue: req.venue,
            description: req.description,
            number_of_days: req.number_of_days,
            start_date: req.start_date,
            end_date: req.end_date,
            attendees: req.attendees,
            mentor: req.mentor,
            permission_from: req.permission_from,
            allocated_amount: req.allocated_amount,
        }
    }
}

/// A report with its expenses and the budget figures derived from them.
///
/// The budget summary is recomputed from the expense rows on every read;
/// nothing denormalized is stored.
#[derive(Debug, Serialize)]
pub struct ReportView {
    #[serde(flatten)]
    pub report: Report,
    pub expenses: Vec<Expense>,
    pub budget: BudgetSummary,
}

impl ReportView {
    fn assemble(report: Report, expenses: Vec<Expense>) -> Self {
        let budget = BudgetSummary::compute(
            report.allocated_amount,
            expenses.iter().map(|e| e.amount),
        );
        ReportView {
            report,
            expenses,
            budget,
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/reports
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateReportRequest>,
) -> AppResult<(StatusCode, Json<ReportView>)> {
    input.validate()?;

    let report = ReportRepo::create(&state.pool, &input.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReportView::assemble(report, Vec::new())),
    ))
}

/// GET /api/reports/user/{email}
pub async fn list_by_owner(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> AppResult<Json<Vec<ReportView>>> {
    let reports = ReportRepo::list_by_owner(&state.pool, &email).await?;

    let ids: Vec<DbId> = reports.iter().map(|r| r.id).collect();
    let mut grouped = ExpenseRepo::list_for_reports(&state.pool, &ids).await?;

    let views = reports
        .into_iter()
        .map(|report| {
            let expenses = grouped.remove(&report.id).unwrap_or_default();
            ReportView::assemble(report, expenses)
        })
        .collect();
    Ok(Json(views))
}

/// GET /api/reports/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReportView>> {
    Ok(Json(load_view(&state, id).await?))
}

/// POST /api/reports/{id}/expenses
///
/// Append an expense to a report and return the updated report view.
pub async fn append_expense(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<CreateExpense>,
) -> AppResult<Json<ReportView>> {
    require_report(&state, id).await?;
    ensure_non_negative(input.amount)?;

    ExpenseRepo::create(&state.pool, ExpenseOwner::Report(id), &input).await?;
    Ok(Json(load_view(&state, id).await?))
}

/// PUT /api/reports/{report_id}/expenses/{expense_id}
///
/// Partially update one expense; only provided fields are applied.
pub async fn update_expense(
    State(state): State<AppState>,
    Path((report_id, expense_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateExpense>,
) -> AppResult<Json<ReportView>> {
    require_report(&state, report_id).await?;
    if let Some(amount) = input.amount {
        ensure_non_negative(amount)?;
    }

    ExpenseRepo::update_for_report(&state.pool, report_id, expense_id, &input)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_id("Expense", expense_id)))?;
    Ok(Json(load_view(&state, report_id).await?))
}

/// DELETE /api/reports/{report_id}/expenses/{expense_id}
pub async fn delete_expense(
    State(state): State<AppState>,
    Path((report_id, expense_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<ReportView>> {
    require_report(&state, report_id).await?;

    let removed = ExpenseRepo::delete_for_report(&state.pool, report_id, expense_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::not_found_id(
            "Expense",
            expense_id,
        )));
    }
    Ok(Json(load_view(&state, report_id).await?))
}

/// DELETE /api/reports/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    let deleted = ReportRepo::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::not_found_id("Report", id)));
    }
    Ok(Json(MessageResponse::new("Report deleted successfully.")))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a report and its expenses, or fail with NotFound.
async fn load_view(state: &AppState, id: DbId) -> AppResult<ReportView> {
    let report = ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_id("Report", id)))?;
    let expenses = ExpenseRepo::list_for_report(&state.pool, id).await?;
    Ok(ReportView::assemble(report, expenses))
}

/// Fail with NotFound unless the report exists.
async fn require_report(state: &AppState, id: DbId) -> AppResult<()> {
    ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found_id("Report", id)))?;
    Ok(())
}

/// Expense amounts are non-negative; over-budget never blocks creation,
/// but negative amounts are rejected outright.
fn ensure_non_negative(amount: f64) -> AppResult<()> {
    if amount < 0.0 {
        return Err(AppError::Core(CoreError::Validation(
            "Expense amount must be non-negative.".into(),
        )));
    }
    Ok(())
}
