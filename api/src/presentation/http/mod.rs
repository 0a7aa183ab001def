use anyhow::Context;
use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, error};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::application::errors::{ServiceError, parse_id};
use crate::bootstrap::app_context::AppContext;

pub mod health;
pub mod openapi;
pub mod prompts;
pub mod versions;

pub fn build_router(ctx: AppContext) -> anyhow::Result<Router> {
    let cors = cors_layer(ctx.cfg.frontend_url.as_deref())?;
    let api = Router::new()
        .merge(prompts::routes(ctx.clone()))
        .merge(versions::routes(ctx));
    Ok(Router::new()
        .nest("/api", api)
        .merge(health::routes())
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", openapi::ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http()))
}

fn cors_layer(frontend_url: Option<&str>) -> anyhow::Result<CorsLayer> {
    let Some(origin) = frontend_url else {
        return Ok(CorsLayer::permissive());
    };
    let origin = HeaderValue::from_str(origin)
        .with_context(|| format!("invalid FRONTEND_URL: {origin}"))?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

pub(crate) fn status_from(err: ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Validation(reason) => {
            debug!(reason = %reason, "request_rejected");
            StatusCode::UNPROCESSABLE_ENTITY
        }
        err @ ServiceError::ConcurrencyInvariantViolation { .. } => {
            error!(error = %err, "versioning_invariant_violated");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

pub(crate) fn parse_path_id(kind: &str, raw: &str) -> Result<Uuid, StatusCode> {
    parse_id(kind, raw).map_err(status_from)
}
