pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, CorsLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::{AppConfig, CorsConfig};
use crate::repository::{MemoryTopRepository, PgTopRepository, TopRepository};
use crate::service::TopService;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Top 5 API",
        version = "1.0.0",
        description = "Ranked lists of exactly five items, with like counters"
    ),
    tags(
        (name = "Tops", description = "Top CRUD operations"),
        (name = "Likes", description = "Like counters on tops and items"),
    ),
)]
struct ApiDoc;

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);

    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .nest("/api", routes::api_routes())
        .split_for_parts();

    router
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
        .layer(cors)
}

/// Connect the storage backend named by `database.url` and wrap it in the
/// application state.
pub async fn build_state(config: AppConfig) -> Result<AppState, sea_orm::DbErr> {
    let repo: Arc<dyn TopRepository> = if config.database.is_memory() {
        tracing::warn!("Using in-memory storage; data is lost on exit");
        Arc::new(MemoryTopRepository::new())
    } else {
        let db = database::init_db(&config.database.url).await?;
        Arc::new(PgTopRepository::new(db))
    };

    Ok(AppState {
        config,
        tops: TopService::new(repo),
    })
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::LOCATION])
        .max_age(Duration::from_secs(config.max_age))
}
