//! SQLite-backed blob store.
//!
//! Every operation opens its own connection, runs inside a transaction and closes the
//! connection again, whether or not the operation succeeded. There is no pool: the
//! tool performs one gesture at a time and a fresh handle per call keeps operations
//! from holding locks across each other.
//!
//! The schema is created on demand. `PRAGMA user_version` carries the schema version;
//! opening a database at a lower version runs the (idempotent) upgrade, opening one at
//! a higher version is refused.

use super::BlobStore;
use crate::error::{Result, VaultError};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, Connection, SqliteConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::instrument;
use uuid::Uuid;

pub const DB_NAME: &str = "vaultTreinamentoDB";
pub const DB_VERSION: i64 = 1;

#[derive(Debug, Clone)]
pub struct SqliteBlobStore {
    path: PathBuf,
}

impl SqliteBlobStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store located in `dir` under the standard database name.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.sqlite", DB_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a connection, creating the database and upgrading its schema if needed.
    #[instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn open(&self) -> Result<SqliteConnection> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut conn = SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_millis(1500))
            .connect()
            .await?;

        if let Err(err) = Self::upgrade(&mut conn).await {
            close(conn).await;
            return Err(err);
        }
        Ok(conn)
    }

    async fn upgrade(conn: &mut SqliteConnection) -> Result<()> {
        let found: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&mut *conn)
            .await?;
        if found > DB_VERSION {
            return Err(VaultError::SchemaVersion {
                found,
                supported: DB_VERSION,
            });
        }
        if found == DB_VERSION {
            return Ok(());
        }

        tracing::debug!(from = found, to = DB_VERSION, "upgrading blob database");
        let mut tx = conn.begin().await?;
        sqlx::query(
            r#"
                CREATE TABLE IF NOT EXISTS files (
                    id      TEXT PRIMARY KEY NOT NULL,
                    content BLOB NOT NULL
                )
            "#,
        )
        .execute(&mut *tx)
        .await?;
        // PRAGMA does not take bind parameters.
        sqlx::query(&format!("PRAGMA user_version = {}", DB_VERSION))
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn put_in(conn: &mut SqliteConnection, id: &Uuid, blob: &[u8]) -> Result<()> {
        let mut tx = conn.begin().await?;
        sqlx::query(
            "INSERT INTO files (id, content) VALUES (?, ?) \
             ON CONFLICT(id) DO UPDATE SET content = excluded.content",
        )
        .bind(id.to_string())
        .bind(blob)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn get_in(conn: &mut SqliteConnection, id: &Uuid) -> Result<Option<Vec<u8>>> {
        let mut tx = conn.begin().await?;
        let content: Option<Vec<u8>> =
            sqlx::query_scalar("SELECT content FROM files WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&mut *tx)
                .await?;
        tx.commit().await?;
        Ok(content)
    }

    async fn delete_in(conn: &mut SqliteConnection, id: &Uuid) -> Result<()> {
        let mut tx = conn.begin().await?;
        sqlx::query("DELETE FROM files WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn keys_in(conn: &mut SqliteConnection) -> Result<Vec<Uuid>> {
        let raw: Vec<String> = sqlx::query_scalar("SELECT id FROM files")
            .fetch_all(&mut *conn)
            .await?;
        Ok(raw
            .into_iter()
            .filter_map(|id| match Uuid::parse_str(&id) {
                Ok(uuid) => Some(uuid),
                Err(_) => {
                    tracing::warn!(id = %id, "ignoring blob stored under a non-uuid key");
                    None
                }
            })
            .collect())
    }
}

async fn close(conn: SqliteConnection) {
    if let Err(err) = conn.close().await {
        tracing::warn!(%err, "failed to close blob database connection");
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    async fn put(&self, id: &Uuid, blob: &[u8]) -> Result<()> {
        let mut conn = self.open().await?;
        let outcome = Self::put_in(&mut conn, id, blob).await;
        close(conn).await;
        tracing::debug!(%id, bytes = blob.len(), ok = outcome.is_ok(), "blob put");
        outcome
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Vec<u8>>> {
        let mut conn = self.open().await?;
        let outcome = Self::get_in(&mut conn, id).await;
        close(conn).await;
        outcome
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut conn = self.open().await?;
        let outcome = Self::delete_in(&mut conn, id).await;
        close(conn).await;
        tracing::debug!(%id, ok = outcome.is_ok(), "blob delete");
        outcome
    }

    async fn keys(&self) -> Result<Vec<Uuid>> {
        let mut conn = self.open().await?;
        let outcome = Self::keys_in(&mut conn).await;
        close(conn).await;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, SqliteBlobStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = SqliteBlobStore::in_dir(dir.path().join("data"));
        (dir, store)
    }

    #[tokio::test]
    async fn put_get_delete() {
        let (_dir, store) = store();
        let id = Uuid::new_v4();

        store.put(&id, b"slides").await.unwrap();
        assert_eq!(store.get(&id).await.unwrap().as_deref(), Some(&b"slides"[..]));

        store.delete(&id).await.unwrap();
        assert_eq!(store.get(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_existing_content() {
        let (_dir, store) = store();
        let id = Uuid::new_v4();
        store.put(&id, b"one").await.unwrap();
        store.put(&id, b"two").await.unwrap();
        assert_eq!(store.get(&id).await.unwrap().unwrap(), b"two");
        assert_eq!(store.keys().await.unwrap(), vec![id]);
    }

    #[tokio::test]
    async fn missing_ids_are_not_errors() {
        let (_dir, store) = store();
        let id = Uuid::new_v4();
        assert_eq!(store.get(&id).await.unwrap(), None);
        store.delete(&id).await.unwrap();
    }

    #[tokio::test]
    async fn content_survives_new_store_handles() {
        let (dir, store) = store();
        let id = Uuid::new_v4();
        store.put(&id, &[0u8, 1, 2, 255]).await.unwrap();

        let again = SqliteBlobStore::in_dir(dir.path().join("data"));
        assert_eq!(again.get(&id).await.unwrap().unwrap(), vec![0u8, 1, 2, 255]);
    }

    #[tokio::test]
    async fn open_sets_schema_version_and_is_idempotent() {
        let (_dir, store) = store();
        for _ in 0..2 {
            let mut conn = store.open().await.unwrap();
            let version: i64 = sqlx::query_scalar("PRAGMA user_version")
                .fetch_one(&mut conn)
                .await
                .unwrap();
            assert_eq!(version, DB_VERSION);
            conn.close().await.unwrap();
        }
    }

    #[tokio::test]
    async fn refuses_newer_schema() {
        let (_dir, store) = store();
        let mut conn = store.open().await.unwrap();
        sqlx::query("PRAGMA user_version = 7")
            .execute(&mut conn)
            .await
            .unwrap();
        conn.close().await.unwrap();

        let err = store.get(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(
            err,
            VaultError::SchemaVersion {
                found: 7,
                supported: 1
            }
        ));
    }
}
