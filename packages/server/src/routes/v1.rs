use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().nest("/tops", top_routes())
}

fn top_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::top::list_tops,
            handlers::top::create_top
        ))
        .routes(routes!(
            handlers::top::get_top,
            handlers::top::update_top,
            handlers::top::delete_top
        ))
        .routes(routes!(handlers::top::like_top))
        .routes(routes!(handlers::top::like_item))
}
