use crate::error::{Result, StoreError};
use crate::rows::{self, TIP_COLUMNS};
use crate::sqlite_store::SqliteStore;
use medinfo_core::{HealthTip, HealthTipInput};
use rusqlite::params;

#[allow(clippy::result_large_err)]
impl SqliteStore {
    /// Active tips ordered by category, then sort order
    pub fn active_tips(&self) -> Result<Vec<HealthTip>> {
        self.query_tips("WHERE t.is_active = 1")
    }

    /// Every tip, including inactive ones
    pub fn list_tips(&self) -> Result<Vec<HealthTip>> {
        self.query_tips("")
    }

    fn query_tips(&self, filter: &str) -> Result<Vec<HealthTip>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM health_tips t {} ORDER BY t.category, t.sort_order, t.id",
            TIP_COLUMNS, filter
        ))?;
        let rows = stmt.query_map([], rows::health_tip)?;

        let mut tips = Vec::new();
        for tip in rows {
            tips.push(tip?);
        }
        Ok(tips)
    }

    pub fn insert_tip(&self, input: &HealthTipInput) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO health_tips (category, title, description, icon, sort_order, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                input.category,
                input.title,
                input.description,
                input.icon,
                input.sort_order,
                input.is_active,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn delete_tip(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        let rows = conn.execute("DELETE FROM health_tips WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::not_found("Health tip", id));
        }
        Ok(())
    }
}
