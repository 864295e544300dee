//! Node API handlers.
//!
//! Each handler decodes its input, makes one store call and encodes the
//! result. Request bodies are taken as `Result<Json<_>, JsonRejection>` so
//! malformed JSON is reported in the same `{"error": ...}` shape as every
//! other failure.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use nodequeue_store::{NewNode, Node};

use crate::error::ApiError;
use crate::state::AppState;

/// Request to raise a node's priority.
///
/// A missing `id` reads as 0, which never names a stored node.
#[derive(Debug, Deserialize)]
pub struct BoostRequest {
    #[serde(default)]
    pub id: i64,
    pub new_priority: i64,
}

/// A node together with a description of what happened to it.
#[derive(Debug, Serialize)]
pub struct NodeResponse {
    pub message: String,
    pub node: Node,
}

impl NodeResponse {
    fn new(message: impl Into<String>, node: Node) -> Self {
        Self {
            message: message.into(),
            node,
        }
    }
}

/// Acknowledgment without a payload.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::UnknownId(raw.to_string()))
}

/// Add a node.
///
/// POST /add
pub async fn add_node(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewNode>, JsonRejection>,
) -> Result<Json<NodeResponse>, ApiError> {
    let Json(new_node) = payload?;
    let node = state.store.add(new_node).await?;
    Ok(Json(NodeResponse::new("node added", node)))
}

/// Look up a node by id.
///
/// GET /find/{id}
pub async fn find_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Node>, ApiError> {
    let id = parse_id(&id)?;
    let node = state.store.find_by_id(id).await?;
    Ok(Json(node))
}

/// Delete a node by id.
///
/// DELETE /delete/{id}
pub async fn delete_node(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let id = parse_id(&id)?;
    state.store.delete_by_id(id).await?;
    Ok(Json(MessageResponse {
        message: format!("node {} deleted", id),
    }))
}

/// Raise a node's priority.
///
/// POST /boost
pub async fn boost_node(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<BoostRequest>, JsonRejection>,
) -> Result<Json<NodeResponse>, ApiError> {
    let Json(req) = payload?;
    let node = state.store.boost(req.id, req.new_priority).await?;
    Ok(Json(NodeResponse::new("priority updated", node)))
}

/// Pop the highest-priority node.
///
/// POST /handle
pub async fn handle_node(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NodeResponse>, ApiError> {
    let node = state.store.pop_highest_priority().await?;
    Ok(Json(NodeResponse::new("highest priority node handled and removed", node)))
}

/// List nodes by descending priority.
///
/// GET /queue
pub async fn list_queue(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Node>>, ApiError> {
    let nodes = state.store.list_by_priority_desc().await?;
    debug!("Queue listing: {} nodes", nodes.len());
    Ok(Json(nodes))
}

/// List nodes by ascending id.
///
/// GET /tree
pub async fn list_tree(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Node>>, ApiError> {
    let nodes = state.store.list_by_id_asc().await?;
    debug!("Tree listing: {} nodes", nodes.len());
    Ok(Json(nodes))
}
