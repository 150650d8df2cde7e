use std::sync::Arc;
use std::time::Duration;

use auth::AuthGateway;
use auth::LifetimePolicy;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::chirps::create_chirp::create_chirp;
use super::handlers::chirps::get_chirp::get_chirp;
use super::handlers::chirps::list_chirps::list_chirps;
use super::handlers::create_user::create_user;
use super::handlers::login::login;
use super::handlers::reset::reset;
use super::middleware::authenticate as auth_middleware;
use crate::domain::chirp::ports::ChirpServicePort;
use crate::domain::user::ports::UserServicePort;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub chirp_service: Arc<dyn ChirpServicePort>,
    pub gateway: Arc<AuthGateway>,
    pub lifetime_policy: LifetimePolicy,
    /// Enables `POST /admin/reset`
    pub allow_reset: bool,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/users", post(create_user))
        .route("/api/login", post(login))
        .route("/api/chirps", get(list_chirps))
        .route("/api/chirps/:chirp_id", get(get_chirp))
        .route("/admin/reset", post(reset));

    let protected_routes = Router::new()
        .route("/api/chirps", post(create_chirp))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Headers are left out of the span so bearer tokens never reach the logs
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
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
