//! Data models for rollcall
//!
//! # Models
//!
//! - `user`: the user record and its create/update inputs

pub mod user;
