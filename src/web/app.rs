use axum::{
    Router,
    http::Method,
    response::Response,
    routing::get,
};
use tower_http::trace::TraceLayer;

use super::{AppState, handlers};

const COLLECTION_METHODS: [Method; 2] = [Method::GET, Method::POST];
const ITEM_METHODS: [Method; 3] = [Method::GET, Method::PUT, Method::DELETE];

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::healthcheck))
        .route(
            "/projects",
            get(handlers::list_projects)
                .post(handlers::create_project)
                .fallback(collection_not_allowed),
        )
        .route(
            "/projects/:id",
            get(handlers::get_project)
                .put(handlers::update_project)
                .delete(handlers::delete_project)
                .fallback(item_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn collection_not_allowed(method: Method) -> Response {
    handlers::method_not_allowed(&method, &COLLECTION_METHODS)
}

async fn item_not_allowed(method: Method) -> Response {
    handlers::method_not_allowed(&method, &ITEM_METHODS)
}
