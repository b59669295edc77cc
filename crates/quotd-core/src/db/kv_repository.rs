//! Key-value repository implementation
//!
//! The store persists whole snapshots under well-known keys, so the storage
//! interface is a plain string key-value surface. Absence of a key is a valid
//! outcome, not an error.

use crate::error::Result;
use libsql::Connection;

/// Trait for key-value storage operations (async)
#[allow(async_fn_in_trait)]
pub trait KvStore {
    /// Read the value stored under `key`, if any
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, overwriting any prior value
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// libSQL implementation of `KvStore`
pub struct LibSqlKvStore<'a> {
    conn: &'a Connection,
}

impl<'a> LibSqlKvStore<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }
}

impl KvStore for LibSqlKvStore<'_> {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut rows = self
            .conn
            .query("SELECT value FROM kv WHERE key = ?", [key])
            .await?;

        if let Some(row) = rows.next().await? {
            let value: String = row.get(0)?;
            Ok(Some(value))
        } else {
            Ok(None)
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)",
                [key, value],
            )
            .await?;
        Ok(())
    }
}
