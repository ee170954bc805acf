//! Repositories: static async CRUD methods over a `&PgPool`, one per
//! entity. Handlers own error classification; repositories surface plain
//! `sqlx::Error`.

mod community_repo;
mod event_repo;
mod expense_repo;
mod report_repo;
mod user_repo;

pub use community_repo::CommunityRepo;
pub use event_repo::{CascadeOutcome, EventRepo};
pub use expense_repo::ExpenseRepo;
pub use report_repo::ReportRepo;
pub use user_repo::UserRepo;
