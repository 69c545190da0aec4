//! Database layer for rollcall
//!
//! # Modules
//!
//! - `pool`: PostgreSQL connection pool management with health checks
//! - `schema`: table definitions as plain values
//! - `migrations`: applies the table definitions to a database

pub mod migrations;
pub mod pool;
pub mod schema;
