//! Request handlers, one submodule per resource.
//!
//! Handlers stay thin: validate input, delegate to the repositories in
//! `tally_db`, and map failures via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod communities;
pub mod events;
pub mod reports;
