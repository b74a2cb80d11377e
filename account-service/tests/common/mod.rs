#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use account_service::domain::auth::service::AuthService;
use account_service::domain::user::errors::UserError;
use account_service::domain::user::models::User;
use account_service::domain::user::models::UserId;
use account_service::domain::user::models::Username;
use account_service::domain::user::ports::UserRepository;
use account_service::domain::user::service::UserService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::events::messages::UserEventMessage;
use account_service::outbound::events::BroadcastEventPublisher;
use async_trait::async_trait;
use auth::Authenticator;
use auth::ManualClock;
use auth::TokenLifetimes;
use axum::body::Body;
use axum::http::header;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::TimeZone;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::broadcast;
use tower::util::ServiceExt;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Credential store kept in memory.
///
/// The uniqueness check and the insert happen under one lock.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.values().any(|u| u.username == user.username) {
            return Err(UserError::UsernameAlreadyExists(user.username.to_string()));
        }
        if users.values().any(|u| u.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| &u.username == username)
            .cloned())
    }
}

/// The service wired against in-memory adapters and a hand-driven clock.
pub struct TestApp {
    pub router: Router,
    pub auth_service: Arc<AuthService<InMemoryUserRepository, BroadcastEventPublisher>>,
    pub repository: Arc<InMemoryUserRepository>,
    pub clock: Arc<ManualClock>,
    pub events: broadcast::Receiver<UserEventMessage>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_lifetimes(TokenLifetimes::default())
    }

    pub fn with_lifetimes(lifetimes: TokenLifetimes) -> Self {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
        ));
        let authenticator = Arc::new(Authenticator::with_clock(
            JWT_SECRET,
            lifetimes,
            clock.clone(),
        ));

        let repository = Arc::new(InMemoryUserRepository::default());
        let event_publisher = Arc::new(BroadcastEventPublisher::new(16));
        let events = event_publisher.subscribe();

        let auth_service = Arc::new(AuthService::new(
            repository.clone(),
            event_publisher,
            authenticator,
        ));
        let user_service = Arc::new(UserService::new(repository.clone()));

        let router = create_router(auth_service.clone(), user_service);

        Self {
            router,
            auth_service,
            repository,
            clock,
            events,
        }
    }

    pub async fn get(&self, uri: &str, bearer: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Register through the HTTP surface and return the response data.
    pub async fn register(&self, username: &str, password: &str) -> Value {
        let (status, body) = self
            .post_json(
                "/auth/register",
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                    "password": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        body["data"].clone()
    }
}
