//! SQLite database - schema definitions and connection management
//!
//! This file contains:
//! - Database struct definition
//! - Connection management (new, init)
//! - Schema creation
//!
//! All table operations live in the tables/ subdirectory.

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::Mutex;

/// Main database wrapper with a single connection guarded by a Mutex
pub struct Database {
    pub(crate) conn: Mutex<Connection>,
}

impl Database {
    /// Create a new database connection and initialize schema
    pub fn new(database_url: &str) -> SqliteResult<Self> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = Path::new(database_url).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).ok();
            }
        }

        let conn = Connection::open(database_url)?;
        // SQLite does not enforce foreign keys unless asked; cascade
        // deletes on the relation table depend on this.
        conn.pragma_update(None, "foreign_keys", true)?;

        let db = Self {
            conn: Mutex::new(conn),
        };
        db.init()?;
        Ok(db)
    }

    /// Initialize all database tables
    fn init(&self) -> SqliteResult<()> {
        let conn = self.conn.lock().unwrap();

        // SMS recipients, keyed by contact number
        conn.execute(
            "CREATE TABLE IF NOT EXISTS clients (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                contact TEXT UNIQUE NOT NULL,
                name TEXT
            )",
            [],
        )?;

        // Sent SMS messages, each owned by exactly one client
        conn.execute(
            "CREATE TABLE IF NOT EXISTS messages (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                subject TEXT NOT NULL,
                body TEXT NOT NULL,
                sent_at TEXT NOT NULL,
                client_id INTEGER NOT NULL,
                FOREIGN KEY (client_id) REFERENCES clients(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // Sent push notifications; recipients recorded via notification_tokens
        conn.execute(
            "CREATE TABLE IF NOT EXISTS notifications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                body TEXT NOT NULL,
                sent_at TEXT NOT NULL
            )",
            [],
        )?;

        // Registered push-delivery destinations
        conn.execute(
            "CREATE TABLE IF NOT EXISTS tokens (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                value TEXT UNIQUE NOT NULL
            )",
            [],
        )?;

        // Which notification was sent to which token
        conn.execute(
            "CREATE TABLE IF NOT EXISTS notification_tokens (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                token_id INTEGER NOT NULL,
                notification_id INTEGER NOT NULL,
                FOREIGN KEY (token_id) REFERENCES tokens(id) ON DELETE CASCADE,
                FOREIGN KEY (notification_id) REFERENCES notifications(id) ON DELETE CASCADE,
                UNIQUE(token_id, notification_id)
            )",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_notification_tokens_notification
             ON notification_tokens(notification_id)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_messages_client ON messages(client_id)",
            [],
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.db");
        let path = path.to_str().unwrap();

        // Opening twice must not fail or clobber data
        {
            let db = Database::new(path).unwrap();
            db.record_sms_message("+201009129288", "s", "b").unwrap();
        }
        let db = Database::new(path).unwrap();
        let client = db.get_client_by_contact("+201009129288").unwrap();
        assert!(client.is_some());
    }
}
