
use rusqlite::{params, Connection, OptionalExtension};
use tokio::sync::Mutex;
use strum_macros::{Display, EnumIter};

use std::collections::HashSet;
use std::sync::Arc;
use std::fmt;


pub type Result<T> = std::result::Result<T, String>;

#[derive(EnumIter, Display, Clone, Copy, Debug, PartialEq)]
#[strum(serialize_all = "snake_case")]
pub enum DB {
    Config,
    Balances,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DBEntry {
    pub id: i64,
    pub key: String,
    pub value: String,
    pub timestamp: i64,
}

impl fmt::Display for DBEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
    pub identifier: DB,
}

impl Database {

    pub fn new(identifier: DB) -> Self {
        let directory = std::env::var("KIDNEY_DATA_DIR").unwrap_or_else(|_| "databases".to_string());
        let _ = std::fs::create_dir_all(&directory);
        let path = format!("{}/{}.db", directory, identifier);
        let connection = Connection::open(&path)
            .unwrap_or_else(|why| panic!("Failed to open database {}: {}", path, why));
        Database::with_connection(connection, identifier)
    }

    #[cfg(test)]
    pub fn in_memory(identifier: DB) -> Self {
        let connection = Connection::open_in_memory().unwrap();
        Database::with_connection(connection, identifier)
    }

    fn with_connection(connection: Connection, identifier: DB) -> Self {
        connection.execute(&format!(
            "CREATE TABLE IF NOT EXISTS {} (
                id        INTEGER PRIMARY KEY,
                key       TEXT    NOT NULL,
                value     TEXT    NOT NULL,
                timestamp INTEGER
            )", identifier),
            [],
        ).unwrap_or_else(|why| panic!("Failed to create table {}: {}", identifier, why));
        Database { connection: Arc::new(Mutex::new(connection)), identifier }
    }

    pub async fn get_keys(&self) -> Result<Vec<String>> {
        let connection = self.connection.lock().await;
        let mut statement = connection
            .prepare(&format!("SELECT key FROM {}", self.identifier))
            .map_err(|why| why.to_string())?;
        let rows = statement
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|why| why.to_string())?;
        let keys = rows
            .filter_map(|key| key.ok())
            .collect::<HashSet<_>>();
        Ok(keys.into_iter().collect())
    }

    pub async fn query(&self, key: &str, query_string: &str) -> Result<Vec<DBEntry>> {
        let connection = self.connection.lock().await;
        let mut statement = connection.prepare(&format!(
            "SELECT id, key, value, timestamp FROM {} WHERE key = ? {}",
            self.identifier,
            query_string
        )).map_err(|why| why.to_string())?;
        let entries = statement.query_map([key], |entry| {
            Ok(DBEntry {
                id: entry.get(0)?,
                key: entry.get(1)?,
                value: entry.get(2)?,
                timestamp: entry.get(3)?,
            })
        }).map_err(|why| why.to_string())?;
        entries
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|why| why.to_string())
    }

    pub async fn get(&self, key: &str) -> Result<DBEntry> {
        self.query(key, "ORDER BY timestamp DESC, id DESC LIMIT 1").await?
            .pop()
            .ok_or(format!("Failed to get value for '{}'", key))
    }

    /// Like [`Database::get`], but a missing key is `Ok(None)` rather than an error.
    pub async fn try_get(&self, key: &str) -> Result<Option<DBEntry>> {
        Ok(self.query(key, "ORDER BY timestamp DESC, id DESC LIMIT 1").await?.pop())
    }

    /// Adds `amount` to the integer stored at `key` (missing counts as 0) under one lock.
    pub async fn increment(&self, key: &str, amount: i64) -> Result<i64> {
        let connection = self.connection.lock().await;
        let transaction = connection.unchecked_transaction().map_err(|why| why.to_string())?;
        let current = transaction.query_row(
            &format!("SELECT value FROM {} WHERE key = ? ORDER BY timestamp DESC, id DESC LIMIT 1", self.identifier),
            params![key],
            |row| row.get::<_, String>(0),
        ).optional().map_err(|why| why.to_string())?;
        let current = match current {
            Some(value) => value.parse::<i64>()
                .map_err(|why| format!("Value for '{}' is not a number: {}", key, why))?,
            None => 0,
        };
        let updated = current.checked_add(amount)
            .ok_or(format!("Value for '{}' would overflow", key))?;

        transaction.execute(
            &format!("DELETE FROM {} WHERE key = ?", self.identifier),
            params![key],
        ).map_err(|why| why.to_string())?;
        transaction.execute(
            &format!("INSERT INTO {} (key, value, timestamp) VALUES (?, ?, ?)", self.identifier),
            params![key, updated.to_string(), chrono::Utc::now().timestamp()],
        ).map_err(|why| why.to_string())?;
        transaction.commit().map_err(|why| why.to_string())?;
        Ok(updated)
    }

    #[cfg(test)]
    pub async fn drop_table(&self) {
        let connection = self.connection.lock().await;
        connection.execute(&format!("DROP TABLE {}", self.identifier), []).unwrap();
    }

    pub async fn get_all(&self, key: &str) -> Result<Vec<DBEntry>> {
        self.query(key, "ORDER BY id ASC").await
    }

    pub async fn set(&self, key: &str, value: &str) -> Result<()> {
        let connection = self.connection.lock().await;
        connection.execute(
            &format!("DELETE FROM {} WHERE key = ?", self.identifier),
            params![key],
        ).map_err(|why| why.to_string())?;
        connection.execute(
            &format!("INSERT INTO {} (key, value, timestamp) VALUES (?, ?, ?)", self.identifier),
            params![key, value, chrono::Utc::now().timestamp()],
        ).map_err(|why| why.to_string())?;
        Ok(())
    }

    pub async fn append(&self, key: &str, value: &str) -> Result<()> {
        let connection = self.connection.lock().await;
        connection.execute(
            &format!("INSERT INTO {} (key, value, timestamp) VALUES (?, ?, ?)", self.identifier),
            params![key, value, chrono::Utc::now().timestamp()],
        ).map_err(|why| why.to_string())?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> Result<()> {
        let connection = self.connection.lock().await;
        connection.execute(
            &format!("DELETE FROM {} WHERE key = ?", self.identifier),
            params![key],
        ).map_err(|why| why.to_string())?;
        Ok(())
    }

}
