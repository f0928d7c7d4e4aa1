//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`, plus a bare `/health`.
//! Middleware: CORS (any origin), request tracing, and panic recovery into
//! the 1003 envelope.
//!
//! When `server.web_dir` points at an existing directory, unmatched
//! non-API paths are served from it. Anything else unmatched gets the
//! 404 envelope.

use std::path::Path;

use axum::handler::HandlerWithoutStateExt;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::http::error::panic_response;
use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Conversations
        .route(
            "/conversations",
            get(handlers::conversation::list_conversations)
                .post(handlers::conversation::create_conversation),
        )
        .route(
            "/conversations/{id}",
            delete(handlers::conversation::delete_conversation),
        )
        // Messages
        .route(
            "/conversations/{id}/messages",
            get(handlers::message::list_messages).post(handlers::message::send_message),
        )
        .route(
            "/conversations/{id}/messages/stream",
            post(handlers::stream::stream_message),
        )
        .route("/health", get(handlers::health::health_check))
        .fallback(handlers::not_found);

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(handlers::health::health_check));

    // Serve the frontend from disk if configured and present. API routes
    // and /health take priority.
    match state.config.server.web_dir.as_deref() {
        Some(dir) if Path::new(dir).is_dir() => {
            let serve_dir = ServeDir::new(dir).not_found_service(handlers::not_found.into_service());
            router = router.fallback_service(serve_dir);
            tracing::info!(path = %dir, "Static file serving enabled");
        }
        _ => {
            router = router.fallback(handlers::not_found);
        }
    }

    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    async fn explode() -> &'static str {
        panic!("handler blew up")
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_internal_envelope() {
        let app = Router::new()
            .route("/explode", get(explode))
            .layer(CatchPanicLayer::custom(panic_response));

        let response = app
            .oneshot(Request::builder().uri("/explode").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["code"], 1003);
        assert_eq!(json["message"], "internal server error");
        assert!(json["data"].is_null());
    }
}
