#![allow(dead_code)]

//! Common test utilities for integration tests
//!
//! - App construction over the in-memory repository
//! - A repository that fails every call
//! - Request/response helpers

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use rollcall_api::app::{build_router, AppState};
use rollcall_api::config::{ApiConfig, Config, StorageBackend};
use rollcall_shared::db::pool::DatabaseConfig;
use rollcall_shared::models::user::{CreateUser, UpdateResult, UpdateUser, User, UserId};
use rollcall_shared::repository::{
    InMemoryUserRepository, RepositoryError, RepositoryResult, UserRepository,
};
use rollcall_shared::service::UsersService;
use serde_json::Value;
use std::sync::Arc;
use tower::Service as _;

/// Test context containing the router under test
pub struct TestContext {
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context backed by an empty in-memory repository
    pub fn new() -> Self {
        Self::with_repository(Arc::new(InMemoryUserRepository::new()))
    }

    /// Creates a context whose store fails every call with `message`
    pub fn failing(message: &str) -> Self {
        Self::with_repository(Arc::new(FailingRepository {
            message: message.to_string(),
        }))
    }

    /// Creates an in-memory context that only allows the given CORS origins
    pub fn with_cors_origins(origins: &[&str]) -> Self {
        let mut config = test_config();
        config.api.cors_origins = origins.iter().map(|origin| origin.to_string()).collect();
        Self::build(Arc::new(InMemoryUserRepository::new()), config)
    }

    fn with_repository(repo: Arc<dyn UserRepository>) -> Self {
        Self::build(repo, test_config())
    }

    fn build(repo: Arc<dyn UserRepository>, config: Config) -> Self {
        let state = AppState::new(UsersService::new(repo), config);
        Self {
            app: build_router(state),
        }
    }

    /// Sends a request and returns the status and the parsed JSON body
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        self.send_request(request).await
    }

    /// Sends a prepared request and returns the raw response
    pub async fn call(&self, request: Request<Body>) -> Response {
        self.app.clone().call(request).await.unwrap()
    }

    /// Sends a prepared request
    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.call(request).await;
        let status = response.status();

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, body)
    }
}

/// Configuration for tests; never touches the environment
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
        },
        storage: StorageBackend::Memory,
        database: DatabaseConfig::default(),
        create_database: false,
    }
}

/// Repository whose every operation fails with the same message
pub struct FailingRepository {
    message: String,
}

impl FailingRepository {
    fn fail<T>(&self) -> RepositoryResult<T> {
        Err(RepositoryError::Store(self.message.clone()))
    }
}

#[async_trait]
impl UserRepository for FailingRepository {
    async fn create(&self, _data: CreateUser) -> RepositoryResult<User> {
        self.fail()
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        self.fail()
    }

    async fn find_by_id(&self, _id: UserId) -> RepositoryResult<Option<User>> {
        self.fail()
    }

    async fn update(&self, _id: UserId, _patch: UpdateUser) -> RepositoryResult<UpdateResult> {
        self.fail()
    }

    async fn delete(&self, _id: UserId) -> RepositoryResult<u64> {
        self.fail()
    }

    async fn ping(&self) -> RepositoryResult<()> {
        self.fail()
    }
}
