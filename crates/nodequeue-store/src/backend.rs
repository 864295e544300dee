//! SQLite priority store implementation.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row, TransactionBehavior};
use tokio_rusqlite::Connection;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::node::{NewNode, Node};
use crate::schema::init_schema;
use crate::store::PriorityStore;

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;

const SELECT_BY_PRIORITY: &str =
    "SELECT id, name, priority FROM nodes ORDER BY priority DESC, id ASC";
const SELECT_BY_ID: &str = "SELECT id, name, priority FROM nodes ORDER BY id ASC";

/// SQLite-backed priority store.
///
/// All statements run on the single background thread owned by
/// [`tokio_rusqlite::Connection`]. Boost and pop additionally run inside
/// `IMMEDIATE` transactions, which take the database write lock before the
/// first read so other connections to the same file cannot interleave.
pub struct SqlitePriorityStore {
    conn: Connection,
}

impl SqlitePriorityStore {
    /// Create a new in-memory database.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().await?;
        Self::init(conn, Duration::ZERO).await
    }

    /// Open (or create) a file-backed database.
    pub async fn open(path: impl AsRef<Path>, busy_timeout: Duration) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        debug!("Opening node database at {:?}", path);
        let conn = Connection::open(path).await?;
        Self::init(conn, busy_timeout).await
    }

    async fn init(conn: Connection, busy_timeout: Duration) -> Result<Self, StoreError> {
        conn.call(move |conn| {
            conn.busy_timeout(busy_timeout)?;
            init_schema(conn)?;
            Ok(())
        })
        .await?;

        Ok(Self { conn })
    }

    /// Close the underlying connection, flushing pending work.
    pub async fn close(self) -> Result<(), StoreError> {
        self.conn.close().await?;
        Ok(())
    }

    async fn list(&self, sql: &'static str) -> Result<Vec<Node>, StoreError> {
        let nodes = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(sql)?;
                let nodes = stmt
                    .query_map([], node_from_row)?
                    .collect::<rusqlite::Result<Vec<_>>>()?;
                Ok(nodes)
            })
            .await?;
        Ok(nodes)
    }
}

fn node_from_row(row: &Row<'_>) -> rusqlite::Result<Node> {
    Ok(Node {
        id: row.get(0)?,
        name: row.get(1)?,
        priority: row.get(2)?,
    })
}

fn read_node(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Option<Node>> {
    conn.query_row(
        "SELECT id, name, priority FROM nodes WHERE id = ?1",
        [id],
        node_from_row,
    )
    .optional()
}

#[async_trait]
impl PriorityStore for SqlitePriorityStore {
    async fn add(&self, node: NewNode) -> Result<Node, StoreError> {
        let node = self
            .conn
            .call(move |conn| {
                // An id of 0 means "unset", same as an omitted id.
                let id = match node.id.filter(|&id| id != 0) {
                    Some(id) => {
                        conn.execute(
                            "INSERT INTO nodes (id, name, priority) VALUES (?1, ?2, ?3)",
                            params![id, node.name, node.priority],
                        )?;
                        id
                    }
                    None => {
                        conn.execute(
                            "INSERT INTO nodes (name, priority) VALUES (?1, ?2)",
                            params![node.name, node.priority],
                        )?;
                        conn.last_insert_rowid()
                    }
                };
                Ok(node.into_node(id))
            })
            .await?;

        info!(id = node.id, priority = node.priority, "Node added");
        Ok(node)
    }

    async fn find_by_id(&self, id: i64) -> Result<Node, StoreError> {
        debug!(id, "Looking up node");
        self.conn
            .call(move |conn| Ok(read_node(conn, id)?))
            .await?
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let removed = self
            .conn
            .call(move |conn| Ok(conn.execute("DELETE FROM nodes WHERE id = ?1", [id])?))
            .await?;

        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }
        info!(id, "Node deleted");
        Ok(())
    }

    async fn boost(&self, id: i64, new_priority: i64) -> Result<Node, StoreError> {
        let node = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

                let Some(current) = read_node(&tx, id)? else {
                    return Ok(Err(StoreError::NotFound(id)));
                };
                if new_priority <= current.priority {
                    return Ok(Err(StoreError::InvalidArgument(
                        "new priority must exceed current priority".to_string(),
                    )));
                }

                let updated = tx.execute(
                    "UPDATE nodes SET priority = ?1 WHERE id = ?2 AND priority < ?1",
                    params![new_priority, id],
                )?;
                if updated != 1 {
                    return Ok(Err(StoreError::Storage(format!(
                        "node {id} changed during boost"
                    ))));
                }

                tx.commit()?;
                Ok(Ok(Node {
                    priority: new_priority,
                    ..current
                }))
            })
            .await??;

        info!(id, priority = node.priority, "Node boosted");
        Ok(node)
    }

    async fn list_by_priority_desc(&self) -> Result<Vec<Node>, StoreError> {
        self.list(SELECT_BY_PRIORITY).await
    }

    async fn list_by_id_asc(&self) -> Result<Vec<Node>, StoreError> {
        self.list(SELECT_BY_ID).await
    }

    async fn pop_highest_priority(&self) -> Result<Node, StoreError> {
        let node = self
            .conn
            .call(|conn| {
                let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

                let top = tx
                    .query_row(
                        "SELECT id, name, priority FROM nodes
                         ORDER BY priority DESC, id ASC LIMIT 1",
                        [],
                        node_from_row,
                    )
                    .optional()?;
                let Some(top) = top else {
                    return Ok(Err(StoreError::EmptyQueue));
                };

                // Delete only the exact row that was read.
                let removed = tx.execute(
                    "DELETE FROM nodes WHERE id = ?1 AND priority = ?2",
                    params![top.id, top.priority],
                )?;
                if removed != 1 {
                    return Ok(Err(StoreError::Storage(format!(
                        "node {} changed during pop",
                        top.id
                    ))));
                }

                tx.commit()?;
                Ok(Ok(top))
            })
            .await??;

        info!(id = node.id, priority = node.priority, "Node handled");
        Ok(node)
    }

    async fn count(&self) -> Result<u64, StoreError> {
        let count: i64 = self
            .conn
            .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?))
            .await?;
        Ok(count as u64)
    }
}
