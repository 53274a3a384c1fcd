use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_book::create_book;
use super::handlers::delete_book::delete_book;
use super::handlers::filter_books::filter_books;
use super::handlers::health::health;
use super::handlers::list_books::list_books;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::update_book::update_book;
use super::middleware::require_token;
use crate::domain::book::ports::BookServicePort;
use crate::domain::user::ports::AccountServicePort;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<dyn AccountServicePort>,
    pub book_service: Arc<dyn BookServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    account_service: Arc<dyn AccountServicePort>,
    book_service: Arc<dyn BookServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        account_service,
        book_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/register", post(register))
        .route("/api/login", post(login));

    // Every book route passes the token gate before its handler runs
    let protected_routes = Router::new()
        .route("/api/books", post(create_book))
        .route("/api/books/getAll", post(list_books))
        .route("/api/books/filter", post(filter_books))
        .route("/api/books/:id", patch(update_book).delete(delete_book))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
