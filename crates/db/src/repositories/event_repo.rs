//! Repository for the `events` table, including the cascade delete.

use sqlx::types::Json;
use sqlx::PgPool;
use tally_core::types::DbId;

use crate::models::event::{CreateEvent, Event, EventOrganizerRow, EventWithOrganizer};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, event_name, organization_name, venue, description, number_of_days, \
                       start_date, end_date, event_time, head_name, head_phone, \
                       head_designation, total_allocated_amount, organizer_id, attendees, \
                       mentor, permission_from, created_at";

/// Row counts removed by [`EventRepo::delete_cascade`].
#[derive(Debug, Clone, Copy)]
pub struct CascadeOutcome {
    pub expenses: u64,
    pub communities: u64,
    /// Whether the event itself existed.
    pub deleted: bool,
}

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event owned by the given organizer, returning the
    /// created row.
    pub async fn create(
        pool: &PgPool,
        organizer_id: DbId,
        input: &CreateEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (event_name, organization_name, venue, description,
                                 number_of_days, start_date, end_date, event_time,
                                 head_name, head_phone, head_designation,
                                 total_allocated_amount, organizer_id, attendees,
                                 mentor, permission_from)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(&input.event_name)
            .bind(&input.organization_name)
            .bind(&input.venue)
            .bind(&input.description)
            .bind(input.number_of_days)
            .bind(input.start_date)
            .bind(input.end_date)
            .bind(&input.event_time)
            .bind(&input.head_name)
            .bind(&input.head_phone)
            .bind(&input.head_designation)
            .bind(input.total_allocated_amount)
            .bind(organizer_id)
            .bind(Json(&input.attendees))
            .bind(Json(&input.mentor))
            .bind(Json(&input.permission_from))
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an event by ID with its organizer resolved to name + email.
    pub async fn find_with_organizer(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<EventWithOrganizer>, sqlx::Error> {
        let row = sqlx::query_as::<_, EventOrganizerRow>(
            "SELECT e.*, u.name AS organizer_name, u.email AS organizer_email
             FROM events e
             JOIN users u ON u.id = e.organizer_id
             WHERE e.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;
        Ok(row.map(EventWithOrganizer::from))
    }

    /// List all events belonging to one organizer, newest first.
    pub async fn list_by_organizer(
        pool: &PgPool,
        organizer_id: DbId,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events WHERE organizer_id = $1 ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(organizer_id)
            .fetch_all(pool)
            .await
    }

    /// Cascade-delete an event: its communities' expenses first, then the
    /// communities, then the event itself, all in one transaction.
    ///
    /// The existence check is deliberately the final step so an event with
    /// zero communities still deletes cleanly. If the event row is missing
    /// the transaction rolls back and `deleted` is `false`.
    pub async fn delete_cascade(pool: &PgPool, id: DbId) -> Result<CascadeOutcome, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let expenses = sqlx::query(
            "DELETE FROM expenses
             WHERE community_id IN (SELECT id FROM communities WHERE event_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let communities = sqlx::query("DELETE FROM communities WHERE event_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;

        if !deleted {
            tx.rollback().await?;
            return Ok(CascadeOutcome {
                expenses: 0,
                communities: 0,
                deleted: false,
            });
        }

        tx.commit().await?;
        tracing::info!(event_id = id, expenses, communities, "Cascade-deleted event");
        Ok(CascadeOutcome {
            expenses,
            communities,
            deleted: true,
        })
    }
}
