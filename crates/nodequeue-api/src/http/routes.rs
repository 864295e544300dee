//! HTTP route definitions.

use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::http::handlers::{
    add_node, boost_node, delete_node, find_node, handle_node, list_queue, list_tree,
};
use crate::http::monitoring;
use crate::state::AppState;

/// Create the main router.
///
/// ## Route Structure
///
/// ```text
/// POST   /add          - Add node
/// GET    /find/{id}    - Find node
/// DELETE /delete/{id}  - Delete node
/// POST   /boost        - Boost priority
/// POST   /handle       - Pop highest priority
/// GET    /queue        - Priority view
/// GET    /tree         - Id view
///
/// /health  - Health check with storage probe
/// /livez   - Liveness probe
/// ```
pub fn create_router(state: Arc<AppState>) -> Router {
    let node_routes = Router::new()
        .route("/add", post(add_node))
        .route("/find/{id}", get(find_node))
        .route("/delete/{id}", delete(delete_node))
        .route("/boost", post(boost_node))
        .route("/handle", post(handle_node))
        .route("/queue", get(list_queue))
        .route("/tree", get(list_tree))
        .with_state(state.clone());

    let monitoring_routes = Router::new()
        .route("/health", get(monitoring::health_check))
        .with_state(state);

    // Liveness probe has no state dependency
    let liveness_route = Router::new().route("/livez", get(monitoring::liveness_probe));

    Router::new()
        .merge(node_routes)
        .merge(monitoring_routes)
        .merge(liveness_route)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;
