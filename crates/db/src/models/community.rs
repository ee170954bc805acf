//! Community entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tally_core::types::{DbId, Timestamp};

/// Full community row from the `communities` table.
///
/// `members` always contains `head_id`; that is established at creation
/// and nothing afterwards removes members or reassigns the head.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Community {
    pub id: DbId,
    pub community_name: String,
    pub description: Option<String>,
    pub event_id: DbId,
    pub allocated_budget: f64,
    pub head_id: DbId,
    pub members: Vec<DbId>,
    pub created_at: Timestamp,
}

/// Parent-event reference resolved for membership listings.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityEventRef {
    pub event_name: String,
    pub organization_name: String,
}

/// A community with its parent event resolved to display fields.
#[derive(Debug, Clone, Serialize)]
pub struct CommunityWithEvent {
    #[serde(flatten)]
    pub community: Community,
    pub event: CommunityEventRef,
}

/// Flat row produced by the community-plus-event join.
#[derive(Debug, FromRow)]
pub(crate) struct CommunityEventRow {
    #[sqlx(flatten)]
    pub community: Community,
    pub event_name: String,
    pub event_organization_name: String,
}

impl From<CommunityEventRow> for CommunityWithEvent {
    fn from(row: CommunityEventRow) -> Self {
        CommunityWithEvent {
            community: row.community,
            event: CommunityEventRef {
                event_name: row.event_name,
                organization_name: row.event_organization_name,
            },
        }
    }
}

/// DTO for creating a community under an event.
#[derive(Debug, Deserialize)]
pub struct CreateCommunity {
    pub community_name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub allocated_budget: f64,
    pub head_user_id: DbId,
}
