//! Token table operations and the recipient-resolution policy

use rusqlite::Result as SqliteResult;
use std::collections::HashSet;

use super::super::Database;
use crate::config::TokenPolicy;
use crate::models::Token;

impl Database {
    /// Resolve candidate token values into delivery targets under the
    /// configured policy. Duplicate candidates collapse to one target.
    ///
    /// Idempotent either way: re-running with the same input never creates
    /// duplicate token rows.
    pub fn resolve_tokens(
        &self,
        candidates: &[String],
        policy: TokenPolicy,
    ) -> SqliteResult<Vec<String>> {
        match policy {
            TokenPolicy::Upsert => self.register_tokens(candidates),
            TokenPolicy::Filter => self.filter_known_tokens(candidates),
        }
    }

    /// Register every unseen candidate and keep the full list as targets.
    fn register_tokens(&self, candidates: &[String]) -> SqliteResult<Vec<String>> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for value in candidates {
            if !seen.insert(value.as_str()) {
                continue;
            }
            // OR IGNORE: a concurrent insert of the same value means
            // "already exists", not a failure
            tx.execute("INSERT OR IGNORE INTO tokens (value) VALUES (?1)", [value])?;
            targets.push(value.clone());
        }

        tx.commit()?;
        Ok(targets)
    }

    /// Keep only candidates already registered; unknown tokens are dropped.
    fn filter_known_tokens(&self, candidates: &[String]) -> SqliteResult<Vec<String>> {
        let conn = self.conn.lock().unwrap();

        let mut seen = HashSet::new();
        let mut targets = Vec::new();
        for value in candidates {
            if !seen.insert(value.as_str()) {
                continue;
            }
            let known: i64 = conn.query_row(
                "SELECT COUNT(*) FROM tokens WHERE value = ?1",
                [value],
                |row| row.get(0),
            )?;
            if known > 0 {
                targets.push(value.clone());
            }
        }

        Ok(targets)
    }

    /// List all registered tokens ordered by id
    pub fn list_tokens(&self) -> SqliteResult<Vec<Token>> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare("SELECT id, value FROM tokens ORDER BY id")?;
        let tokens = stmt
            .query_map([], |row| {
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
