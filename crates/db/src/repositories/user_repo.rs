//! Repository for the `users` table.

use sqlx::PgPool;
use tally_core::types::DbId;

use crate::models::user::{CreateUser, PublicUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, phone, password_hash, created_at";

/// Provides account lookup and creation for users. Users are never
/// updated or deleted.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// The unique index on `LOWER(email)` rejects duplicate emails
    /// regardless of case; callers see that as a unique-violation error.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email, phone, password_hash)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email, case-insensitively.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE LOWER(email) = LOWER($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Case-insensitive substring search across name, email, and phone.
    ///
    /// Returns only the public projection; the caller is responsible for
    /// enforcing the minimum query length.
    pub async fn search(pool: &PgPool, term: &str) -> Result<Vec<PublicUser>, sqlx::Error> {
        let pattern = format!("%{}%", escape_like(term));
        sqlx::query_as::<_, PublicUser>(
            "SELECT id, name, email, phone FROM users
             WHERE name ILIKE $1 OR email ILIKE $1 OR phone ILIKE $1
             ORDER BY name",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    }
}

/// Escape LIKE metacharacters so user input matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
