//! Handlers for the `/auth` resource (register, login, user search).

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tally_core::error::CoreError;
use tally_db::models::user::{CreateUser, PublicUser};
use tally_db::repositories::UserRepo;
use validator::Validate;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Minimum length for a user search term.
const MIN_SEARCH_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    pub phone: Option<String>,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Query parameters for `GET /auth/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/auth/register
///
/// Create an account. The password is stored only as an Argon2id hash.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<PublicUser>)> {
    input.validate()?;

    // Friendly pre-check; the unique index on LOWER(email) is the backstop
    // under concurrent registration.
    if UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "User with this email already exists.".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            name: input.name,
            email: input.email.to_lowercase(),
            phone: input.phone,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Registered new user");
    Ok((StatusCode::CREATED, Json(user.into())))
}

/// POST /api/auth/login
///
/// Authenticate with email + password. The failure message is identical
/// for an unknown email and a wrong password so accounts cannot be
/// enumerated.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<PublicUser>> {
    let invalid =
        || AppError::Core(CoreError::Unauthorized("Invalid credentials.".into()));

    let user = UserRepo::find_by_email(&state.pool, &input.email)
        .await?
        .ok_or_else(invalid)?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(invalid());
    }

    Ok(Json(user.into()))
}

/// GET /api/auth/search?q=
///
/// Case-insensitive substring search across name, email, and phone.
/// Returns public projections only.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<PublicUser>>> {
    let term = params.q.trim();
    if term.len() < MIN_SEARCH_LEN {
        return Err(AppError::Core(CoreError::BadRequest(
            "Search query must be at least 2 characters long.".into(),
        )));
    }

    let users = UserRepo::search(&state.pool, term).await?;
    Ok(Json(users))
}
