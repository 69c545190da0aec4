//! In-memory user repository
//!
//! Keeps users in an ordered map behind a `tokio` read-write lock. Ids come
//! from a counter that only moves forward, so a deleted id is never handed
//! out again.

use super::{RepositoryError, RepositoryResult, UserRepository};
use crate::models::user::{CreateUser, UpdateResult, UpdateUser, User, UserId};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug)]
struct State {
    next_id: i64,
    users: BTreeMap<UserId, User>,
}

/// Process-local user repository
#[derive(Debug)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl InMemoryUserRepository {
    /// Creates an empty repository whose first id is 1
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// Creates an empty repository whose first assigned id is `first_id`
    pub fn starting_at(first_id: UserId) -> Self {
        Self {
            state: RwLock::new(State {
                next_id: i64::from(first_id),
                users: BTreeMap::new(),
            }),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, data: CreateUser) -> RepositoryResult<User> {
        let mut state = self.state.write().await;

        let id = UserId::try_from(state.next_id)
            .map_err(|_| RepositoryError::Store("User id sequence exhausted".to_string()))?;
        state.next_id += 1;

        let user = User {
            id,
            firstname: data.firstname,
            lastname: data.lastname,
        };
        state.users.insert(id, user.clone());

        debug!(user_id = id, "Inserted user");
        Ok(user)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn update(&self, id: UserId, patch: UpdateUser) -> RepositoryResult<UpdateResult> {
        let mut state = self.state.write().await;

        let Some(user) = state.users.get_mut(&id) else {
            debug!(user_id = id, affected = 0, "Updated user");
            return Ok((0, Vec::new()));
        };

        patch.apply_to(user);
        debug!(user_id = id, affected = 1, "Updated user");
        Ok((1, vec![user.clone()]))
    }

    async fn delete(&self, id: UserId) -> RepositoryResult<u64> {
        let mut state = self.state.write().await;
        let affected = u64::from(state.users.remove(&id).is_some());

        debug!(user_id = id, affected, "Deleted user");
        Ok(affected)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
