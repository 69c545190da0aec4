//! Storage abstraction for users
//!
//! [`UserRepository`] is the only way the service touches storage. Two
//! implementations ship with the crate:
//!
//! - [`PgUserRepository`]: PostgreSQL via sqlx
//! - [`InMemoryUserRepository`]: process-local, used for tests and for
//!   running the API without a database
//!
//! # Example
//!
//! ```
//! use rollcall_shared::models::user::CreateUser;
//! use rollcall_shared::repository::{InMemoryUserRepository, UserRepository};
//!
//! # async fn example() -> Result<(), rollcall_shared::repository::RepositoryError> {
//! let repo = InMemoryUserRepository::new();
//! let user = repo
//!     .create(CreateUser {
//!         firstname: "John".to_string(),
//!         lastname: "Doe".to_string(),
//!     })
//!     .await?;
//! assert_eq!(user.id, 1);
//! # Ok(())
//! # }
//! ```

use crate::models::user::{CreateUser, UpdateResult, UpdateUser, User, UserId};
use async_trait::async_trait;

pub mod memory;
pub mod postgres;

pub use memory::InMemoryUserRepository;
pub use postgres::PgUserRepository;

/// Repository error types
///
/// The Display output is the underlying store's message, unchanged.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Failure reported by the SQL driver
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    /// Failure reported by a non-SQL store
    #[error("{0}")]
    Store(String),
}

/// Repository result type alias
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// CRUD operations over stored users
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user; the store assigns the id
    async fn create(&self, data: CreateUser) -> RepositoryResult<User>;

    /// Returns every stored user, ordered by id
    async fn find_all(&self) -> RepositoryResult<Vec<User>>;

    /// Returns the user with `id`, or None when absent
    async fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>>;

    /// Applies `patch` to the user with `id`
    ///
    /// Returns the affected row count and the updated rows. A missing id
    /// yields `(0, [])`, not an error.
    async fn update(&self, id: UserId, patch: UpdateUser) -> RepositoryResult<UpdateResult>;

    /// Hard-deletes the user with `id`, returning the removed row count (0 or 1)
    async fn delete(&self, id: UserId) -> RepositoryResult<u64>;

    /// Checks that the store is reachable
    async fn ping(&self) -> RepositoryResult<()>;
}
