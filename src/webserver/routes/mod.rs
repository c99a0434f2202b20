use axum::{response::Html, Router};
use std::sync::Arc;

use crate::webserver::{state::AppState, templates};

pub mod status;
pub mod stories;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", axum::routing::get(index_page))
        .nest("/api", api_routes())
        .with_state(state)
}

/// Index page handler
async fn index_page() -> Html<String> {
    Html(templates::index_page())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(stories::routes())
}
