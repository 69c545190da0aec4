//! Data-access service for users
//!
//! [`UsersService`] holds no state of its own beyond the repository handle it
//! is built with. Every operation forwards to the repository and returns
//! its result, or its error, untouched.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rollcall_shared::models::user::{CreateUser, UpdateUser};
//! use rollcall_shared::repository::InMemoryUserRepository;
//! use rollcall_shared::service::UsersService;
//!
//! # async fn example() -> Result<(), rollcall_shared::repository::RepositoryError> {
//! let service = UsersService::new(Arc::new(InMemoryUserRepository::new()));
//!
//! let user = service
//!     .create(CreateUser { firstname: "John".to_string(), lastname: "Doe".to_string() })
//!     .await?;
//!
//! let (affected, _) = service
//!     .update(user.id, UpdateUser { firstname: Some("Jane".to_string()), ..Default::default() })
//!     .await?;
//! assert_eq!(affected, 1);
//! # Ok(())
//! # }
//! ```

use crate::models::user::{CreateUser, UpdateResult, UpdateUser, User, UserId};
use crate::repository::{RepositoryResult, UserRepository};
use std::sync::Arc;

/// User CRUD operations over an injected repository
#[derive(Clone)]
pub struct UsersService {
    repo: Arc<dyn UserRepository>,
}

impl UsersService {
    /// Creates a service over `repo`
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Creates a user from its first and last name
    pub async fn create(&self, input: CreateUser) -> RepositoryResult<User> {
        let values = CreateUser {
            firstname: input.firstname,
            lastname: input.lastname,
        };
        self.repo.create(values).await
    }

    /// Lists every user
    pub async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        self.repo.find_all().await
    }

    /// Looks up one user; None when `id` matches nothing
    pub async fn find_one(&self, id: UserId) -> RepositoryResult<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// Patches one user, returning `(affectedCount, updatedRecords)`
    pub async fn update(&self, id: UserId, patch: UpdateUser) -> RepositoryResult<UpdateResult> {
        self.repo.update(id, patch).await
    }

    /// Deletes one user, returning the number of rows removed
    pub async fn remove(&self, id: UserId) -> RepositoryResult<u64> {
        self.repo.delete(id).await
    }

    /// Checks that the backing store is reachable
    pub async fn ping(&self) -> RepositoryResult<()> {
        self.repo.ping().await
    }
}

impl std::fmt::Debug for UsersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsersService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Create(CreateUser),
        FindAll,
        FindById(UserId),
        Update(UserId, UpdateUser),
        Delete(UserId),
    }

    // Records every call; fails them all when `failure` is set
    #[derive(Default)]
    struct MockRepository {
        calls: Mutex<Vec<Call>>,
        users: Vec<User>,
        failure: Option<String>,
    }

    impl MockRepository {
        fn with_users(users: Vec<User>) -> Self {
            Self {
                users,
                ..Default::default()
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                failure: Some(message.to_string()),
                ..Default::default()
            }
        }

        fn record(&self, call: Call) -> RepositoryResult<()> {
            self.calls.lock().unwrap().push(call);
            match &self.failure {
                Some(message) => Err(RepositoryError::Store(message.clone())),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UserRepository for MockRepository {
        async fn create(&self, data: CreateUser) -> RepositoryResult<User> {
            self.record(Call::Create(data.clone()))?;
            Ok(User {
                id: 1,
                firstname: data.firstname,
                lastname: data.lastname,
            })
        }

        async fn find_all(&self) -> RepositoryResult<Vec<User>> {
            self.record(Call::FindAll)?;
            Ok(self.users.clone())
        }

        async fn find_by_id(&self, id: UserId) -> RepositoryResult<Option<User>> {
            self.record(Call::FindById(id))?;
            Ok(self.users.iter().find(|user| user.id == id).cloned())
        }

        async fn update(&self, id: UserId, patch: UpdateUser) -> RepositoryResult<UpdateResult> {
            self.record(Call::Update(id, patch.clone()))?;
            let updated: Vec<User> = self
                .users
                .iter()
                .filter(|user| user.id == id)
                .cloned()
                .map(|mut user| {
                    patch.apply_to(&mut user);
                    user
                })
                .collect();
            Ok((updated.len() as u64, updated))
        }

        async fn delete(&self, id: UserId) -> RepositoryResult<u64> {
            self.record(Call::Delete(id))?;
            Ok(self.users.iter().filter(|user| user.id == id).count() as u64)
        }

        async fn ping(&self) -> RepositoryResult<()> {
            match &self.failure {
                Some(message) => Err(RepositoryError::Store(message.clone())),
                None => Ok(()),
            }
        }
    }

    fn user(id: UserId, firstname: &str, lastname: &str) -> User {
        User {
            id,
            firstname: firstname.to_string(),
            lastname: lastname.to_string(),
        }
    }

    fn service_with(repo: &Arc<MockRepository>) -> UsersService {
        UsersService::new(repo.clone())
    }

    #[tokio::test]
    async fn test_create_forwards_names() {
        let repo = Arc::new(MockRepository::default());
        let service = service_with(&repo);
        let input = CreateUser {
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
        };

        let created = service.create(input.clone()).await.unwrap();

        assert_eq!(created, user(1, "John", "Doe"));
        assert_eq!(repo.calls(), vec![Call::Create(input)]);
    }

    #[tokio::test]
    async fn test_find_all_returns_repository_rows() {
        let users = vec![user(1, "John", "Doe"), user(2, "Jane", "Doe")];
        let repo = Arc::new(MockRepository::with_users(users.clone()));

        let result = service_with(&repo).find_all().await.unwrap();

        assert_eq!(result, users);
        assert_eq!(repo.calls(), vec![Call::FindAll]);
    }

    #[tokio::test]
    async fn test_find_one_by_id() {
        let repo = Arc::new(MockRepository::with_users(vec![user(1, "John", "Doe")]));
        let service = service_with(&repo);

        assert_eq!(service.find_one(1).await.unwrap(), Some(user(1, "John", "Doe")));
        assert_eq!(service.find_one(2).await.unwrap(), None);
        assert_eq!(repo.calls(), vec![Call::FindById(1), Call::FindById(2)]);
    }

    #[tokio::test]
    async fn test_update_returns_count_and_rows() {
        let repo = Arc::new(MockRepository::with_users(vec![user(1, "John", "Doe")]));
        let patch = UpdateUser {
            firstname: Some("Updated".to_string()),
            lastname: Some("Name".to_string()),
        };

        let result = service_with(&repo).update(1, patch.clone()).await.unwrap();

        assert_eq!(result, (1, vec![user(1, "Updated", "Name")]));
        assert_eq!(repo.calls(), vec![Call::Update(1, patch)]);
    }

    #[tokio::test]
    async fn test_update_missing_user_is_not_an_error() {
        let repo = Arc::new(MockRepository::default());

        let result = service_with(&repo)
            .update(9, UpdateUser::default())
            .await
            .unwrap();

        assert_eq!(result, (0, Vec::new()));
    }

    #[tokio::test]
    async fn test_remove_returns_count() {
        let repo = Arc::new(MockRepository::with_users(vec![user(1, "John", "Doe")]));
        let service = service_with(&repo);

        assert_eq!(service.remove(1).await.unwrap(), 1);
        assert_eq!(service.remove(2).await.unwrap(), 0);
        assert_eq!(repo.calls(), vec![Call::Delete(1), Call::Delete(2)]);
    }

    #[tokio::test]
    async fn test_store_errors_propagate_verbatim() {
        let repo = Arc::new(MockRepository::failing("Database connection error"));
        let service = service_with(&repo);

        let create = service
            .create(CreateUser {
                firstname: "John".to_string(),
                lastname: "Doe".to_string(),
            })
            .await
            .unwrap_err();
        let find_all = service.find_all().await.unwrap_err();
        let find_one = service.find_one(1).await.unwrap_err();
        let update = service.update(1, UpdateUser::default()).await.unwrap_err();
        let remove = service.remove(1).await.unwrap_err();
        let ping = service.ping().await.unwrap_err();

        for err in [create, find_all, find_one, update, remove, ping] {
            assert_eq!(err.to_string(), "Database connection error");
        }

        // No retries: each operation reached the repository exactly once
        assert_eq!(repo.calls().len(), 5);
    }
}
