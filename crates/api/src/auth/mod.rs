//! Credential handling for the auth endpoints.

pub mod password;
