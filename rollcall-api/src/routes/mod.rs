//! API route handlers
//!
//! Handlers organized by resource:
//!
//! - `health`: Health check endpoint
//! - `users`: User CRUD endpoints

pub mod health;
pub mod users;
