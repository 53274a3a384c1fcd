#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::Claims;
use auth::JwtHandler;
use axum::body::Body;
use axum::http::header;
use axum::http::Method;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use catalog_service::domain::book::service::BookService;
use catalog_service::domain::user::service::AccountService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::repositories::InMemoryBookRepository;
use catalog_service::outbound::repositories::InMemoryUserRepository;
use chrono::Duration;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::json;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Test application driving the real router on in-memory storage
pub struct TestApp {
    pub router: Router,
    pub jwt_handler: JwtHandler,
}

/// Status and decoded JSON body of a response
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestApp {
    pub fn spawn() -> Self {
        let authenticator = Arc::new(Authenticator::new(TEST_SECRET, Duration::hours(1)));

        let account_service = Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::clone(&authenticator),
        ));
        let book_service = Arc::new(BookService::new(Arc::new(InMemoryBookRepository::new())));

        Self {
            router: create_router(account_service, book_service, authenticator),
            jwt_handler: JwtHandler::new(TEST_SECRET),
        }
    }

    /// Send a request through the router
    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read response body")
            .to_bytes();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("Response body is not JSON")
        };

        TestResponse { status, body }
    }

    /// Helper to send a JSON body
    pub async fn json(&self, method: Method, path: &str, body: Value) -> TestResponse {
        let request = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request");

        self.send(request).await
    }

    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.json(Method::POST, path, body).await
    }

    pub async fn patch(&self, path: &str, body: Value) -> TestResponse {
        self.json(Method::PATCH, path, body).await
    }

    pub async fn delete(&self, path: &str, body: Value) -> TestResponse {
        self.json(Method::DELETE, path, body).await
    }

    pub async fn get(&self, path: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .expect("Failed to build request");

        self.send(request).await
    }

    /// Register an account and return its id
    pub async fn register(&self, username: &str, password: &str) -> String {
        let response = self
            .post(
                "/api/register",
                json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);

        response.body["id"]
            .as_str()
            .expect("Missing id in registration response")
            .to_string()
    }

    /// Log in and return the issued token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post(
                "/api/login",
                json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK);

        response.body["token"]
            .as_str()
            .expect("Missing token in login response")
            .to_string()
    }

    /// Register a fresh account and return a token for it
    pub async fn token(&self) -> String {
        self.register("reader", "secret1").await;
        self.login("reader", "secret1").await
    }

    /// Create a book and return its id
    pub async fn create_book(&self, token: &str, title: &str, author: &str, year: i32) -> String {
        let response = self
            .post(
                "/api/books",
                json!({
                    "title": title,
                    "author": author,
                    "publicationYear": year,
                    "token": token
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);

        response.body["book"]["id"]
            .as_str()
            .expect("Missing book id in response")
            .to_string()
    }

    /// Sign a token for `user_id` that expired an hour ago
    pub fn expired_token(&self, user_id: &str) -> String {
        let claims = Claims::issued_at(user_id, Utc::now() - Duration::hours(2), Duration::hours(1));
        self.jwt_handler
            .encode(&claims)
            .expect("Failed to encode claims")
    }
}
