//! Notification table operations and the notification-token relation

use chrono::{DateTime, Utc};
use rusqlite::Result as SqliteResult;

use super::super::Database;
use crate::models::{Notification, Token};

impl Database {
    /// Persist a notification and one relation row per recipient token,
    /// all in one transaction.
    ///
    /// Missing token rows are created on the way (the relation must
    /// reference a live token). A failure at any point rolls back the
    /// whole batch; partial histories are never observable.
    pub fn record_notification(
        &self,
        title: &str,
        body: &str,
        tokens: &[String],
    ) -> SqliteResult<i64> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let now = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO notifications (title, body, sent_at) VALUES (?1, ?2, ?3)",
            rusqlite::params![title, body, &now],
        )?;
        let notification_id = tx.last_insert_rowid();

        for value in tokens {
            tx.execute("INSERT OR IGNORE INTO tokens (value) VALUES (?1)", [value])?;
            let token_id: i64 = tx.query_row(
                "SELECT id FROM tokens WHERE value = ?1",
                [value],
                |row| row.get(0),
            )?;
            tx.execute(
                "INSERT OR IGNORE INTO notification_tokens (token_id, notification_id)
                 VALUES (?1, ?2)",
                rusqlite::params![token_id, notification_id],
            )?;
        }

        tx.commit()?;
        Ok(notification_id)
    }

    /// Get a notification by primary key
    pub fn get_notification(&self, id: i64) -> SqliteResult<Option<Notification>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt =
            conn.prepare("SELECT id, title, body, sent_at FROM notifications WHERE id = ?1")?;
        let notification = stmt
            .query_row([id], |row| {
                let sent_at_str: String = row.get(3)?;
                Ok(Notification {
                    id: row.get(0)?,
                    title: row.get(1)?,
                    body: row.get(2)?,
                    sent_at: DateTime::parse_from_rfc3339(&sent_at_str)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                })
            })
            .ok();

        Ok(notification)
    }

    /// Get the tokens a notification was sent to, via the relation table
    pub fn get_notification_tokens(&self, notification_id: i64) -> SqliteResult<Vec<Token>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT t.id, t.value
             FROM tokens t
             INNER JOIN notification_tokens nt ON nt.token_id = t.id
             WHERE nt.notification_id = ?1
             ORDER BY t.id",
        )?;

        let tokens = stmt
            .query_map([notification_id], |row| {
                Ok(Token {
                    id: row.get(0)?,
                    value: row.get(1)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(tokens)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_db;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_one_relation_row_per_recipient() {
        let (db, _dir) = test_db();

        let id = db
            .record_notification("title", "body", &values(&["A", "B"]))
            .unwrap();

        let recipients = db.get_notification_tokens(id).unwrap();
        assert_eq!(recipients.len(), 2);
        let recipient_values: Vec<&str> = recipients.iter().map(|t| t.value.as_str()).collect();
        assert_eq!(recipient_values, vec!["A", "B"]);
    }

    #[test]
    fn test_relations_reference_shared_token_rows() {
        let (db, _dir) = test_db();

        let first = db.record_notification("n1", "b", &values(&["A"])).unwrap();
        let second = db.record_notification("n2", "b", &values(&["A"])).unwrap();
        assert_ne!(first, second);

        // both notifications point at the same token row
        let t1 = &db.get_notification_tokens(first).unwrap()[0];
        let t2 = &db.get_notification_tokens(second).unwrap()[0];
        assert_eq!(t1.id, t2.id);
    }

    #[test]
    fn test_get_notification_roundtrip() {
        let (db, _dir) = test_db();

        let id = db
            .record_notification("greeting", "hello", &values(&["A"]))
            .unwrap();
        let stored = db.get_notification(id).unwrap().unwrap();
        assert_eq!(stored.title, "greeting");
        assert_eq!(stored.body, "hello");

        assert!(db.get_notification(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_failed_write_leaves_no_partial_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("relay.db");
        let db = crate::db::Database::new(path.to_str().unwrap()).unwrap();

        // break the relation table behind the wrapper's back so the last
        // insert of the batch fails
        let raw = rusqlite::Connection::open(&path).unwrap();
        raw.execute("DROP TABLE notification_tokens", []).unwrap();

        assert!(db.record_notification("t", "b", &values(&["A"])).is_err());

        // the whole transaction rolled back: no notification, no token
        assert!(db.get_notification(1).unwrap().is_none());
        assert!(db.list_tokens().unwrap().is_empty());
    }
}
