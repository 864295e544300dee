//! Node records.

use serde::{Deserialize, Serialize};

/// A persisted node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub name: String,
    pub priority: i64,
}

/// A node to be inserted. The store assigns `id` when it is absent or 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub priority: i64,
}

impl NewNode {
    pub fn new(name: impl Into<String>, priority: i64) -> Self {
        Self {
            id: None,
            name: name.into(),
            priority,
        }
    }

    /// Request an explicit primary key.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub(crate) fn into_node(self, id: i64) -> Node {
        Node {
            id,
            name: self.name,
            priority: self.priority,
        }
    }
}
