//! Entity models: row structs deriving `sqlx::FromRow` plus the DTOs
//! used to create and update them.

pub mod community;
pub mod contact;
pub mod event;
pub mod expense;
pub mod report;
pub mod user;
