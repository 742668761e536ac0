pub mod error;
mod missions;
mod request_tracing;
mod robots;

use crate::{AppState, store};
use anyhow::{Context, Result};
use axum::{Json, Router, extract::State, http::HeaderValue, middleware, routing::get};
use robotops_protocol::{Health, ROOT_MESSAGE, RootMessage};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

pub use error::ApiError;
pub use request_tracing::REQUEST_ID_HEADER;

pub const API_PREFIX: &str = "/api/v1";

/// Assembles the full application: entity routes under [`API_PREFIX`], the
/// liveness endpoints, request tracing and the CORS allowlist.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Result<Router> {
    let api = Router::new()
        .merge(robots::router())
        .merge(missions::router())
        .method_not_allowed_fallback(method_not_allowed);

    Ok(Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .nest(API_PREFIX, api)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(route_not_found)
        .layer(middleware::from_fn(request_tracing::request_tracing))
        .layer(cors_layer(allowed_origins)?)
        .with_state(state))
}

fn cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|origin| {
            HeaderValue::from_str(origin)
                .with_context(|| format!("invalid CORS origin {origin:?}"))
        })
        .collect::<Result<Vec<_>>>()?;

    // Credentialed CORS forbids `*`, so methods and headers mirror the preflight.
    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .expose_headers([REQUEST_ID_HEADER]))
}

async fn route_not_found() -> ApiError {
    ApiError::route_not_found()
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn root() -> Json<RootMessage> {
    Json(RootMessage { message: ROOT_MESSAGE.to_string() })
}

async fn healthz(State(state): State<AppState>) -> Result<Json<Health>, ApiError> {
    state.db.run(store::ping).await?;
    Ok(Json(Health { ok: true }))
}
