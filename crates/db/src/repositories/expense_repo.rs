//! Repository for the unified `expenses` table.
//!
//! Every expense row belongs to exactly one owner, expressed as an
//! [`ExpenseOwner`]. Report-scoped mutations are single-row statements,
//! so concurrent appends to the same report never clobber each other.

use std::collections::HashMap;

use sqlx::types::Json;
use sqlx::PgPool;
use tally_core::types::DbId;

use crate::models::expense::{CreateExpense, Expense, ExpenseOwner, UpdateExpense};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, report_id, community_id, category, description, details, amount, added_by, spent_at";

/// Provides CRUD operations for expenses under either owning aggregate.
pub struct ExpenseRepo;

impl ExpenseRepo {
    /// Insert an expense under the given owner, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner: ExpenseOwner,
        input: &CreateExpense,
    ) -> Result<Expense, sqlx::Error> {
        let (report_id, community_id) = owner.column_pair();
        let query = format!(
            "INSERT INTO expenses (report_id, community_id, category, description,
                                   details, amount, added_by, spent_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(report_id)
            .bind(community_id)
            .bind(input.category)
            .bind(&input.description)
            .bind(Json(&input.details))
            .bind(input.amount)
            .bind(input.added_by)
            .bind(input.spent_at)
            .fetch_one(pool)
            .await
    }

    /// List all expenses belonging to one report, oldest first.
    pub async fn list_for_report(pool: &PgPool, report_id: DbId) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE report_id = $1 ORDER BY id");
        sqlx::query_as::<_, Expense>(&query)
            .bind(report_id)
            .fetch_all(pool)
            .await
    }

    /// Load the expenses of several reports in one round trip, grouped by
    /// report id. Reports without expenses simply have no entry.
    pub async fn list_for_reports(
        pool: &PgPool,
        report_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<Expense>>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM expenses WHERE report_id = ANY($1) ORDER BY report_id, id"
        );
        let rows = sqlx::query_as::<_, Expense>(&query)
            .bind(report_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<Expense>> = HashMap::new();
        for expense in rows {
            if let Some(report_id) = expense.report_id {
                grouped.entry(report_id).or_default().push(expense);
            }
        }
        Ok(grouped)
    }

    /// List all expenses belonging to one community, oldest first.
    pub async fn list_for_community(
        pool: &PgPool,
        community_id: DbId,
    ) -> Result<Vec<Expense>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM expenses WHERE community_id = $1 ORDER BY id");
        sqlx::query_as::<_, Expense>(&query)
            .bind(community_id)
            .fetch_all(pool)
            .await
    }

    /// Partially update an expense scoped to its owning report. Only
    /// non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no expense with that id exists under the report.
    pub async fn update_for_report(
        pool: &PgPool,
        report_id: DbId,
        expense_id: DbId,
        input: &UpdateExpense,
    ) -> Result<Option<Expense>, sqlx::Error> {
        let query = format!(
            "UPDATE expenses SET
                category = COALESCE($3, category),
                description = COALESCE($4, description),
                details = COALESCE($5, details),
                amount = COALESCE($6, amount),
                spent_at = COALESCE($7, spent_at)
             WHERE id = $1 AND report_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Expense>(&query)
            .bind(expense_id)
            .bind(report_id)
            .bind(input.category)
            .bind(&input.description)
            .bind(input.details.as_ref().map(Json))
            .bind(input.amount)
            .bind(input.spent_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete an expense scoped to its owning report.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_for_report(
        pool: &PgPool,
        report_id: DbId,
        expense_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND report_id = $2")
            .bind(expense_id)
            .bind(report_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count expenses whose community belongs to the given event. Used by
    /// tests to verify the cascade leaves nothing behind.
    pub async fn count_for_event(pool: &PgPool, event_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM expenses
             WHERE community_id IN (SELECT id FROM communities WHERE event_id = $1)",
        )
        .bind(event_id)
        .fetch_one(pool)
        .await?;
        Ok(count)
    }
}
