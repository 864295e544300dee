//! The priority store abstraction.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::node::{NewNode, Node};

/// A durable collection of nodes with priority-queue semantics.
///
/// Implementations must be safe to call from many tasks at once. Operations
/// on the same id are serialized by the backing store, and
/// [`pop_highest_priority`](PriorityStore::pop_highest_priority) never hands
/// the same node to two callers.
#[async_trait]
pub trait PriorityStore: Send + Sync {
    /// Persist a node, assigning the next id when none is given.
    async fn add(&self, node: NewNode) -> Result<Node, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Node, StoreError>;

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;

    /// Raise a node's priority. Fails with `InvalidArgument` unless
    /// `new_priority` is strictly greater than the current value.
    async fn boost(&self, id: i64, new_priority: i64) -> Result<Node, StoreError>;

    /// All nodes, highest priority first. Equal priorities are ordered by
    /// ascending id.
    async fn list_by_priority_desc(&self) -> Result<Vec<Node>, StoreError>;

    /// All nodes by ascending id.
    async fn list_by_id_asc(&self) -> Result<Vec<Node>, StoreError>;

    /// Remove and return the node at the head of
    /// [`list_by_priority_desc`](PriorityStore::list_by_priority_desc).
    async fn pop_highest_priority(&self) -> Result<Node, StoreError>;

    /// Number of persisted nodes.
    async fn count(&self) -> Result<u64, StoreError>;
}
