//! # Rollcall Shared Library
//!
//! Storage and data-access layer for the rollcall user service, used by the
//! API server.
//!
//! ## Module Organization
//!
//! - `models`: the user record and its create/update inputs
//! - `db`: connection pool, table definitions and migration step
//! - `repository`: the `UserRepository` trait and its PostgreSQL and
//!   in-memory implementations
//! - `service`: `UsersService`, the CRUD façade over a repository

pub mod db;
pub mod models;
pub mod repository;
pub mod service;

/// Current version of the rollcall shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
