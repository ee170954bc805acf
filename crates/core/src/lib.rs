//! Shared domain types for the tally event-expense service.
//!
//! Pure code only: no I/O, no database access. The db and api crates
//! build on the types, error taxonomy, and budget arithmetic defined
//! here.

pub mod budget;
pub mod error;
pub mod types;
