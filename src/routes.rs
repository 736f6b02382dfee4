// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{admin, quiz, system},
    state::AppState,
    utils::auth::admin_middleware,
};

/// Assembles the main application router.
///
/// * Merges all sub-routers (quiz, admin, system).
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (store handle and config).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
        ]);

    let quiz_routes = Router::new()
        .route("/questions", get(quiz::get_questions))
        .route("/submit", post(quiz::submit_quiz))
        .route("/leaderboard", get(quiz::get_leaderboard))
        .route("/history/{user_name}", get(quiz::get_history))
        .route("/statistics", get(quiz::get_statistics));

    let admin_routes = Router::new()
        .route(
            "/questions",
            get(admin::list_questions).post(admin::create_question),
        )
        .route("/questions/bulk", post(admin::bulk_create_questions))
        .route(
            "/questions/{id}",
            get(admin::get_question)
                .put(admin::update_question)
                .delete(admin::delete_question),
        )
        .route(
            "/results/{id}",
            get(admin::get_result)
                .put(admin::update_result)
                .delete(admin::delete_result),
        )
        .route("/counts", get(admin::data_counts))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_middleware,
        ));

    Router::new()
        .nest("/api/quiz", quiz_routes)
        .nest("/api/admin", admin_routes)
        .route("/api/refresh", post(system::trigger_refresh))
        .route("/api/health", get(system::health))
        .route("/api/openapi.json", get(system::openapi_json))
        .fallback(system::not_found)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
