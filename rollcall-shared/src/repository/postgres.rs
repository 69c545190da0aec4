//! PostgreSQL-backed user repository
//!
//! Queries target the `users` table created by
//! [`run_migrations`](crate::db::migrations::run_migrations).

use super::{RepositoryResult, UserRepository};
use crate::db::pool;
use crate::models::user::{CreateUser, UpdateResult, UpdateUser, User, UserId};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

/// User repository over a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Creates a repository over an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, data: CreateUser) -> RepositoryResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (firstname, lastname)
            VALUES ($1, $2)
            RETURNING id, firstname, lastname
            "#,
        )
        .bind(data.firstname)
        .bind(data.lastname)
        .fetch_one(&self.pool)
        .await?;

        debug!(user_id = user.id, "Inserted user");
        Ok(user)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, firstname, lastname
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, firstname, lastname
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update(&self, id: UserId, patch: UpdateUser) -> RepositoryResult<UpdateResult> {
        // COALESCE keeps the stored value for fields the patch leaves out,
        // so an empty patch still matches (and reports) the row.
        let users = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET firstname = COALESCE($2, firstname),
                lastname = COALESCE($3, lastname)
            WHERE id = $1
            RETURNING id, firstname, lastname
            "#,
        )
        .bind(id)
        .bind(patch.firstname)
        .bind(patch.lastname)
        .fetch_all(&self.pool)
        .await?;

        let affected = users.len() as u64;
        debug!(user_id = id, affected, "Updated user");
        Ok((affected, users))
    }

    async fn delete(&self, id: UserId) -> RepositoryResult<u64> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(user_id = id, affected = result.rows_affected(), "Deleted user");
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }
}
