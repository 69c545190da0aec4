//! User model
//!
//! This module provides the User record and the inputs accepted by the
//! create and update operations. Storage lives behind
//! [`UserRepository`](crate::repository::UserRepository).
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS users (
//!     id SERIAL PRIMARY KEY,
//!     firstname TEXT NOT NULL,
//!     lastname TEXT NOT NULL
//! );
//! ```
//!
//! The table definition itself is [`USERS_TABLE`](crate::db::schema::USERS_TABLE).

use serde::{Deserialize, Serialize};

/// Store-assigned user identifier
pub type UserId = i32;

/// Result of an update: the number of affected rows and the rows as they
/// look after the update.
///
/// Serializes as `[affectedCount, [records]]`.
pub type UpdateResult = (u64, Vec<User>);

/// User model representing a stored user row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    ///
    /// Assigned by the store on creation, never reassigned
    pub id: UserId,

    /// First name
    pub firstname: String,

    /// Last name
    pub lastname: String,
}

/// Input for creating a new user
///
/// Both fields are required. Requests missing either are rejected at the
/// HTTP boundary before they reach the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    /// First name
    pub firstname: String,

    /// Last name
    pub lastname: String,
}

/// Input for updating an existing user
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New first name
    pub firstname: Option<String>,

    /// New last name
    pub lastname: Option<String>,
}

impl UpdateUser {
    /// Returns true when the patch touches no field
    pub fn is_empty(&self) -> bool {
        self.firstname.is_none() && self.lastname.is_none()
    }

    /// Applies the patch to a user in place
    pub fn apply_to(&self, user: &mut User) {
        if let Some(firstname) = &self.firstname {
            user.firstname = firstname.clone();
        }
        if let Some(lastname) = &self.lastname {
            user.lastname = lastname.clone();
        }
    }
}
