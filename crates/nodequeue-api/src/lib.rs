//! # NodeQueue API
//!
//! HTTP interface over a [`PriorityStore`](nodequeue_store::PriorityStore).
//!
//! ```text
//! POST   /add          - Add a node
//! GET    /find/{id}    - Look up a node
//! DELETE /delete/{id}  - Delete a node
//! POST   /boost        - Raise a node's priority
//! POST   /handle       - Pop the highest-priority node
//! GET    /queue        - Nodes by priority, highest first
//! GET    /tree         - Nodes by ascending id
//! GET    /health       - Health check with storage probe
//! GET    /livez        - Liveness probe
//! ```
//!
//! Each request maps to exactly one store call. Errors are returned as
//! `{"error": "..."}` with a status derived from [`ApiError`].

pub mod error;
pub mod http;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use http::routes::create_router;
pub use server::{shutdown_signal, ApiConfig, ApiServer};
pub use state::AppState;
