//! SQLite storage backend

use super::traits::{DocumentStore, OnDuplicate, OpenStore, SaveSummary, StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use serde_json::Value;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// SQLite-backed document store
///
/// Uses a single table keyed by `(collection, key)`, holding each document
/// as JSON text. Thread-safe via internal mutex on the connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    fn init_schema(conn: &Connection) -> StorageResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                key TEXT NOT NULL,
                body_json TEXT NOT NULL,
                PRIMARY KEY (collection, key)
            );

            PRAGMA journal_mode = WAL;
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn load_body(tx: &Transaction<'_>, collection: &str, key: &str) -> StorageResult<Option<Value>> {
        let body: Option<String> = tx
            .query_row(
                "SELECT body_json FROM documents WHERE collection = ?1 AND key = ?2",
                params![collection, key],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|b| serde_json::from_str(&b).map_err(StorageError::from))
            .transpose()
    }

    fn write_body(tx: &Transaction<'_>, collection: &str, key: &str, body: &Value) -> StorageResult<()> {
        tx.execute(
            r#"
            INSERT INTO documents (collection, key, body_json)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(collection, key) DO UPDATE SET
                body_json = excluded.body_json
            "#,
            params![collection, key, serde_json::to_string(body)?],
        )?;
        Ok(())
    }
}

/// Overlay `incoming`'s top-level fields onto `existing`
fn merge_top_level(existing: Value, incoming: &Value) -> Value {
    match (existing, incoming) {
        (Value::Object(mut base), Value::Object(update)) => {
            for (field, value) in update {
                base.insert(field.clone(), value.clone());
            }
            Value::Object(base)
        }
        (_, incoming) => incoming.clone(),
    }
}

impl OpenStore for SqliteStore {
    fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn open_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl DocumentStore for SqliteStore {
    fn save_docs(
        &self,
        collection: &str,
        docs: &[Value],
        on_duplicate: OnDuplicate,
    ) -> StorageResult<SaveSummary> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut summary = SaveSummary::default();

        for doc in docs {
            let key = doc
                .get("_key")
                .and_then(Value::as_str)
                .ok_or_else(|| StorageError::MissingKey {
                    collection: collection.to_string(),
                })?;

            match (Self::load_body(&tx, collection, key)?, on_duplicate) {
                (None, _) => {
                    Self::write_body(&tx, collection, key, doc)?;
                    summary.created += 1;
                }
                (Some(_), OnDuplicate::Error) => {
                    // Dropping the transaction rolls back the whole batch
                    return Err(StorageError::Duplicate {
                        collection: collection.to_string(),
                        key: key.to_string(),
                    });
                }
                (Some(_), OnDuplicate::Ignore) => summary.ignored += 1,
                (Some(_), OnDuplicate::Replace) => {
                    Self::write_body(&tx, collection, key, doc)?;
                    summary.updated += 1;
                }
                (Some(existing), OnDuplicate::Update) => {
                    Self::write_body(&tx, collection, key, &merge_top_level(existing, doc))?;
                    summary.updated += 1;
                }
            }
        }

        tx.commit()?;
        debug!(collection, ?summary, "saved documents");
        Ok(summary)
    }

    fn get_doc(&self, collection: &str, key: &str) -> StorageResult<Option<Value>> {
        let conn = self.conn()?;
        let body: Option<String> = conn
            .query_row(
                "SELECT body_json FROM documents WHERE collection = ?1 AND key = ?2",
                params![collection, key],
                |row| row.get(0),
            )
            .optional()?;
        body.map(|b| serde_json::from_str(&b).map_err(StorageError::from))
            .transpose()
    }

    fn list_docs(&self, collection: &str) -> StorageResult<Vec<Value>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT body_json FROM documents WHERE collection = ?1 ORDER BY key")?;
        let bodies = stmt
            .query_map(params![collection], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        bodies
            .iter()
            .map(|b| serde_json::from_str(b).map_err(StorageError::from))
            .collect()
    }

    fn count(&self, collection: &str) -> StorageResult<usize> {
        let conn = self.conn()?;
        let n: i64 = conn.query_row(
            "SELECT COUNT(*) FROM documents WHERE collection = ?1",
            params![collection],
            |row| row.get(0),
        )?;
        Ok(n as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn create_test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn insert_and_read_back() {
        let store = create_test_store();
        let summary = store
            .save_docs(
                "djornl_node",
                &[json!({"_key": "B"}), json!({"_key": "A", "node_type": "gene"})],
                OnDuplicate::Update,
            )
            .unwrap();
        assert_eq!(summary.created, 2);
        assert_eq!(store.count("djornl_node").unwrap(), 2);
        assert_eq!(store.count("djornl_edge").unwrap(), 0);

        let docs = store.list_docs("djornl_node").unwrap();
        assert_eq!(docs[0]["_key"], "A");
        assert_eq!(
            store.get_doc("djornl_node", "A").unwrap(),
            Some(json!({"_key": "A", "node_type": "gene"}))
        );
        assert_eq!(store.get_doc("djornl_node", "Z").unwrap(), None);
    }

    #[test]
    fn update_merges_independent_passes() {
        let store = create_test_store();
        store
            .save_docs("n", &[json!({"_key": "A", "node_type": "gene", "go_terms": []})], OnDuplicate::Update)
            .unwrap();
        store
            .save_docs("n", &[json!({"_key": "A", "clusters": ["markov_i2:6"]})], OnDuplicate::Update)
            .unwrap();
        store.save_docs("n", &[json!({"_key": "A"})], OnDuplicate::Update).unwrap();

        assert_eq!(
            store.get_doc("n", "A").unwrap().unwrap(),
            json!({"_key": "A", "node_type": "gene", "go_terms": [], "clusters": ["markov_i2:6"]})
        );
    }

    #[test]
    fn replace_and_ignore_policies() {
        let store = create_test_store();
        store.save_docs("n", &[json!({"_key": "A", "x": 1})], OnDuplicate::Update).unwrap();

        let ignored = store
            .save_docs("n", &[json!({"_key": "A", "y": 2})], OnDuplicate::Ignore)
            .unwrap();
        assert_eq!(ignored.ignored, 1);
        assert_eq!(store.get_doc("n", "A").unwrap().unwrap(), json!({"_key": "A", "x": 1}));

        store.save_docs("n", &[json!({"_key": "A", "y": 2})], OnDuplicate::Replace).unwrap();
        assert_eq!(store.get_doc("n", "A").unwrap().unwrap(), json!({"_key": "A", "y": 2}));
    }

    #[test]
    fn error_policy_rolls_back_batch() {
        let store = create_test_store();
        store.save_docs("n", &[json!({"_key": "A"})], OnDuplicate::Update).unwrap();

        let err = store
            .save_docs("n", &[json!({"_key": "B"}), json!({"_key": "A"})], OnDuplicate::Error)
            .unwrap_err();
        assert!(matches!(err, StorageError::Duplicate { ref key, .. } if key == "A"));
        assert_eq!(store.count("n").unwrap(), 1);
        assert!(store.get_doc("n", "B").unwrap().is_none());
    }

    #[test]
    fn documents_need_a_key() {
        let store = create_test_store();
        let err = store.save_docs("n", &[json!({"name": "A"})], OnDuplicate::Update).unwrap_err();
        assert!(matches!(err, StorageError::MissingKey { .. }));
    }

    #[test]
    fn policy_parsing() {
        assert_eq!("update".parse::<OnDuplicate>(), Ok(OnDuplicate::Update));
        assert_eq!("error".parse::<OnDuplicate>(), Ok(OnDuplicate::Error));
        assert!("merge".parse::<OnDuplicate>().is_err());
    }

    #[test]
    fn file_store_persists_across_opens() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("djornl.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.save_docs("n", &[json!({"_key": "A"})], OnDuplicate::Update).unwrap();
        }
        let store = SqliteStore::open(&path).unwrap();
        assert_eq!(store.count("n").unwrap(), 1);
    }
}
