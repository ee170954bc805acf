//! Repository for the `communities` table.

use sqlx::PgPool;
use tally_core::types::DbId;

use crate::models::community::{
    Community, CommunityEventRow, CommunityWithEvent, CreateCommunity,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, community_name, description, event_id, allocated_budget, head_id, \
                       members, created_at";

/// Provides CRUD operations for communities.
pub struct CommunityRepo;

impl CommunityRepo {
    /// Insert a new community under an event. The head user is seeded as
    /// the first (and only) member.
    pub async fn create(
        pool: &PgPool,
        event_id: DbId,
        input: &CreateCommunity,
    ) -> Result<Community, sqlx::Error> {
        let query = format!(
            "INSERT INTO communities (community_name, description, event_id,
                                      allocated_budget, head_id, members)
             VALUES ($1, $2, $3, $4, $5, ARRAY[$5]::BIGINT[])
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Community>(&query)
            .bind(&input.community_name)
            .bind(&input.description)
            .bind(event_id)
            .bind(input.allocated_budget)
            .bind(input.head_user_id)
            .fetch_one(pool)
            .await
    }

    /// Find a community by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Community>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM communities WHERE id = $1");
        sqlx::query_as::<_, Community>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all communities belonging to one event.
    pub async fn list_by_event(pool: &PgPool, event_id: DbId) -> Result<Vec<Community>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM communities WHERE event_id = $1 ORDER BY id");
        sqlx::query_as::<_, Community>(&query)
            .bind(event_id)
            .fetch_all(pool)
            .await
    }

    /// List every community whose members contain the given user, newest
    /// first, with the parent event's display fields resolved.
    pub async fn list_member_of(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CommunityWithEvent>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CommunityEventRow>(
            "SELECT c.*, e.event_name AS event_name,
                    e.organization_name AS event_organization_name
             FROM communities c
             JOIN events e ON e.id = c.event_id
             WHERE c.members @> ARRAY[$1]::BIGINT[]
             ORDER BY c.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(CommunityWithEvent::from).collect())
    }
}
