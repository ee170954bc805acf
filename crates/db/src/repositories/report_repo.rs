//! Repository for the `reports` table.

use sqlx::types::Json;
use sqlx::PgPool;
use tally_core::types::DbId;

use crate::models::report::{CreateReport, Report};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_email, organization_name, event_name, venue, description, \
                       number_of_days, start_date, end_date, attendees, mentor, \
                       permission_from, allocated_amount, created_at";

/// Provides CRUD operations for personal reports.
pub struct ReportRepo;

impl ReportRepo {
    /// Insert a new report, returning the created row. The report starts
    /// with no expenses.
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (owner_email, organization_name, event_name, venue,
                                  description, number_of_days, start_date, end_date,
                                  attendees, mentor, permission_from, allocated_amount)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(&input.owner_email)
            .bind(&input.organization_name)
            .bind(&input.event_name)
            .bind(&input.venue)
            .bind(&input.description)
            .bind(input.number_of_days)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(Json(&input.attendees))
            .bind(Json(&input.mentor))
            .bind(Json(&input.permission_from))
            .bind(input.allocated_amount)
            .fetch_one(pool)
            .await
    }

    /// Find a report by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all reports owned by the given email, newest first.
    pub async fn list_by_owner(pool: &PgPool, email: &str) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE LOWER(owner_email) = LOWER($1)
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(email)
            .fetch_all(pool)
            .await
    }

    /// Delete a report and its expenses in one transaction.
    ///
    /// Returns `true` if the report existed. A missing report rolls the
    /// transaction back, leaving nothing touched.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM expenses WHERE report_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
