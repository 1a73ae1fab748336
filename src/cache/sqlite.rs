use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Sqlite};
use tracing::debug;

use super::CacheStore;
use crate::errors::{StoreError, StoreResult};
use crate::models::{CacheEntry, ContentHash, Label};

/// Durable cache store backed by the `image_labels` SQLite table
///
/// Labels are stored as a JSON array in service order and `created` as an
/// RFC 3339 UTC timestamp.
#[derive(Clone)]
pub struct SqliteCacheStore {
    pool: Pool<Sqlite>,
}

impl SqliteCacheStore {
    pub fn new(pool: Pool<Sqlite>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn get(&self, key: &ContentHash) -> StoreResult<Option<CacheEntry>> {
        let row = sqlx::query_as::<_, (String, String)>(
            "SELECT labels, created FROM image_labels WHERE hash = ?",
        )
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some((labels_json, created)) = row else {
            return Ok(None);
        };

        let labels: Vec<Label> = serde_json::from_str(&labels_json)
            .map_err(|e| StoreError::corrupt_entry(key.as_str(), format!("labels: {e}")))?;
        let created = DateTime::parse_from_rfc3339(&created)
            .map_err(|e| StoreError::corrupt_entry(key.as_str(), format!("created: {e}")))?
            .with_timezone(&Utc);

        Ok(Some(CacheEntry {
            key: key.clone(),
            labels,
            created,
        }))
    }

    async fn put(&self, key: &ContentHash, labels: &[Label]) -> StoreResult<()> {
        let labels_json = serde_json::to_string(labels)?;

        let result = sqlx::query(
            "INSERT INTO image_labels (hash, labels, created) VALUES (?, ?, ?)
             ON CONFLICT(hash) DO NOTHING",
        )
        .bind(key.as_str())
        .bind(labels_json)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            debug!("Cache entry for {} already present", key);
        }

        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;
    use crate::database::Database;

    async fn create_test_store(dir: &tempfile::TempDir) -> SqliteCacheStore {
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("labels.db").display()),
            max_connections: Some(2),
        };
        let database = Database::new(&config).await.unwrap();
        database.migrate().await.unwrap();
        SqliteCacheStore::new(database.pool())
    }

    #[tokio::test]
    async fn test_missing_key_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir).await;

        let key = ContentHash::from_bytes(b"unseen");
        assert!(store.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_round_trip_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir).await;
        let key = ContentHash::from_bytes(b"cat.png bytes");
        let labels = vec![
            Label::new("Cat", 0.9876),
            Label::new("Small to medium-sized cats", 0.94),
            Label::new("Whiskers", 0.96),
        ];

        store.put(&key, &labels).await.unwrap();
        let entry = store.get(&key).await.unwrap().unwrap();

        assert_eq!(entry.key, key);
        assert_eq!(entry.labels, labels);
        assert!(entry.created <= Utc::now());
    }

    #[tokio::test]
    async fn test_repeated_put_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir).await;
        let key = ContentHash::from_bytes(b"dog.jpg bytes");
        let labels = vec![Label::new("Dog", 0.97)];

        store.put(&key, &labels).await.unwrap();
        let first = store.get(&key).await.unwrap().unwrap();
        store.put(&key, &labels).await.unwrap();
        let second = store.get(&key).await.unwrap().unwrap();

        assert_eq!(first, second);

        let rows = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM image_labels")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_entries_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let key = ContentHash::from_bytes(b"persistent");
        let labels = vec![Label::new("Persistent", 0.5)];

        create_test_store(&dir).await.put(&key, &labels).await.unwrap();

        let reopened = create_test_store(&dir).await;
        let entry = reopened.get(&key).await.unwrap().unwrap();
        assert_eq!(entry.labels, labels);
    }

    #[tokio::test]
    async fn test_undecodable_row_is_an_error_not_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let store = create_test_store(&dir).await;
        let key = ContentHash::from_bytes(b"corrupt");

        sqlx::query("INSERT INTO image_labels (hash, labels, created) VALUES (?, ?, ?)")
            .bind(key.as_str())
            .bind("not json")
            .bind(Utc::now().to_rfc3339())
            .execute(&store.pool)
            .await
            .unwrap();

        let error = store.get(&key).await.unwrap_err();
        assert!(matches!(error, StoreError::CorruptEntry { .. }));
    }

    #[tokio::test]
    async fn test_missing_table_is_a_store_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("empty.db").display()),
            max_connections: Some(1),
        };
        let database = Database::new(&config).await.unwrap();
        let store = SqliteCacheStore::new(database.pool());

        let error = store
            .get(&ContentHash::from_bytes(b"anything"))
            .await
            .unwrap_err();
        assert!(matches!(error, StoreError::Database(_)));
    }
}
