use crate::error::{Result, StoreError};
use crate::rows;
use crate::sqlite_store::SqliteStore;
use medinfo_core::{ContactMessage, ContactSubmission};
use rusqlite::params;

#[allow(clippy::result_large_err)]
impl SqliteStore {
    /// Store a contact form submission as unread
    pub fn insert_message(&self, submission: &ContactSubmission) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO contact_messages (name, email, message) VALUES (?1, ?2, ?3)",
            params![submission.name, submission.email, submission.message],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All messages, newest first
    pub fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(
            "SELECT id, name, email, message, created_at, is_read
             FROM contact_messages
             ORDER BY created_at DESC, id DESC",
        )?;
        let rows = stmt.query_map([], rows::contact_message)?;

        let mut messages = Vec::new();
        for message in rows {
            messages.push(message?);
        }
        Ok(messages)
    }

    pub fn mark_message_read(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        let rows = conn.execute(
            "UPDATE contact_messages SET is_read = 1 WHERE id = ?1",
            params![id],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("Message", id));
        }
        Ok(())
    }
}
