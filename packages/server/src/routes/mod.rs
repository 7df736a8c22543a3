mod v1;

use utoipa_axum::router::OpenApiRouter;

use crate::state::AppState;

/// Absolute path of the Top collection, used for `Location` headers.
pub const TOPS_PATH: &str = "/api/v1/tops";

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/v1", v1::routes())
}
