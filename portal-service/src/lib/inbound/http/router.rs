use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::HeaderValue;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_time::add_time;
use super::handlers::create_page::create_page;
use super::handlers::get_me::get_me;
use super::handlers::get_page::get_page;
use super::handlers::get_posts::get_posts;
use super::handlers::list_kpis::list_kpis;
use super::handlers::login::login;
use super::handlers::record_visit::record_visit;
use super::handlers::register::register;
use super::middleware::authenticate;
use super::middleware::require_admin;
use crate::access::ports::AccessGatePort;
use crate::config::CorsConfig;
use crate::page::ports::PageServicePort;
use crate::post::ports::PostSource;
use crate::user::ports::UserServicePort;

/// Shared handler state. Ports are trait objects so the same router serves
/// Postgres-backed services in production and in-memory ones in tests.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub page_service: Arc<dyn PageServicePort>,
    pub post_source: Arc<dyn PostSource>,
    pub access_gate: Arc<dyn AccessGatePort>,
}

pub fn create_router(state: AppState, cors: &CorsConfig) -> Router {
    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/token", post(login));

    // Layers run outside-in: `authenticate` is added last so it runs first.
    let admin_routes = Router::new()
        .route("/pages", post(create_page))
        .route("/kpi", get(list_kpis))
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let protected_routes = Router::new()
        .route("/auth/me", get(get_me))
        .route("/posts", get(get_posts))
        .route("/pages/:page_id", get(get_page))
        .route("/kpi/visit", post(record_visit))
        .route("/kpi/time", post(add_time))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

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
        .merge(admin_routes)
        .merge(protected_routes)
        .layer(
            ServiceBuilder::new()
                .layer(trace_layer)
                .layer(cors_layer(cors)),
        )
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let Some(origins) = allowed_origins(cors) else {
        return CorsLayer::permissive();
    };

    if origins.is_empty() {
        tracing::warn!("No configured CORS origin is valid, cross-origin requests are refused");
    }

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Parsed origin allow-list, or `None` when no list is configured at all.
fn allowed_origins(cors: &CorsConfig) -> Option<Vec<HeaderValue>> {
    if cors.allowed_origins.is_empty() {
        return None;
    }

    Some(
        cors.allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring unparsable CORS origin");
                    None
                }
            })
            .collect(),
    )
}
