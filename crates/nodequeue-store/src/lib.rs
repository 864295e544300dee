//! Durable priority queue of nodes for NodeQueue.
//!
//! Nodes live in a single SQLite table. Ordering is computed by the database
//! on every read; nothing is cached in process.

mod backend;
mod error;
mod node;
mod schema;
mod store;

pub use backend::SqlitePriorityStore;
pub use error::StoreError;
pub use node::{NewNode, Node};
pub use store::PriorityStore;
