//! Client table operations

use rusqlite::Result as SqliteResult;

use super::super::Database;
use crate::models::Client;

impl Database {
    /// Get a client by primary key
    pub fn get_client(&self, id: i64) -> SqliteResult<Option<Client>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare("SELECT id, contact, name FROM clients WHERE id = ?1")?;
        let client = stmt
            .query_row([id], |row| {
                Ok(Client {
                    id: row.get(0)?,
                    contact: row.get(1)?,
                    name: row.get(2)?,
                })
            })
            .ok();

        Ok(client)
    }

    /// Get a client by contact value. Lookup is exact-match, no normalization.
    pub fn get_client_by_contact(&self, contact: &str) -> SqliteResult<Option<Client>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare("SELECT id, contact, name FROM clients WHERE contact = ?1")?;
        let client = stmt
            .query_row([contact], |row| {
                Ok(Client {
                    id: row.get(0)?,
                    contact: row.get(1)?,
                    name: row.get(2)?,
                })
            })
            .ok();

        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::test_db;

    #[test]
    fn test_contact_lookup_is_exact_match() {
        let (db, _dir) = test_db();
        db.record_sms_message("+201009129288", "s", "b").unwrap();

        assert!(db.get_client_by_contact("+201009129288").unwrap().is_some());
        // no trimming or case folding
        assert!(db.get_client_by_contact(" +201009129288").unwrap().is_none());
        assert!(db.get_client_by_contact("+201009129289").unwrap().is_none());
    }

    #[test]
    fn test_get_client_by_id() {
        let (db, _dir) = test_db();
        let message = db.record_sms_message("+201009129288", "s", "b").unwrap();

        let client = db.get_client(message.client_id).unwrap().unwrap();
        assert_eq!(client.contact, "+201009129288");
        assert_eq!(client.name, None);

        assert!(db.get_client(9999).unwrap().is_none());
    }
}
