//! Message table operations

use chrono::Utc;
use rusqlite::Result as SqliteResult;

use super::super::Database;
use crate::models::Message;

impl Database {
    /// Upsert the client by contact and store the sent message, atomically.
    ///
    /// Runs in one transaction so a failure partway leaves neither a fresh
    /// client row nor a dangling message. Re-sending to a known contact
    /// reuses its client row.
    pub fn record_sms_message(
        &self,
        contact: &str,
        subject: &str,
        body: &str,
    ) -> SqliteResult<Message> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT OR IGNORE INTO clients (contact) VALUES (?1)",
            [contact],
        )?;
        let client_id: i64 = tx.query_row(
            "SELECT id FROM clients WHERE contact = ?1",
            [contact],
            |row| row.get(0),
        )?;

        let now = Utc::now();
        tx.execute(
            "INSERT INTO messages (subject, body, sent_at, client_id) VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![subject, body, now.to_rfc3339(), client_id],
        )?;
        let id = tx.last_insert_rowid();

        tx.commit()?;

        Ok(Message {
            id,
            subject: subject.to_string(),
            body: body.to_string(),
            sent_at: now,
            client_id,
        })
    }

    /// Get all messages sent to a client, oldest first
    pub fn get_client_messages(&self, client_id: i64) -> SqliteResult<Vec<Message>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            "SELECT id, subject, body, sent_at, client_id
             FROM messages WHERE client_id = ?1 ORDER BY id",
        )?;

        let messages = stmt
            .query_map([client_id], |row| {
                let sent_at_str: String = row.get(3)?;
                Ok(Message {
                    id: row.get(0)?,
                    subject: row.get(1)?,
                    body: row.get(2)?,
                    sent_at: chrono::DateTime::parse_from_rfc3339(&sent_at_str)
                        .map(|dt| dt.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                    client_id: row.get(4)?,
                })
            })?
            .filter_map(|r| r.ok())
            .collect();

        Ok(messages)
    }
}
