use crate::error::{Result, StoreError};
use crate::medicines::insert_medicine_row;
use crate::rows::{self, ILLNESS_COLUMNS};
use crate::sqlite_store::SqliteStore;
use medinfo_core::{Illness, IllnessInput, IllnessListing, IllnessOption};
use rusqlite::{params, Connection, OptionalExtension};

pub(crate) fn body_part_exists(conn: &Connection, body_part_id: i64) -> Result<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM body_parts WHERE id = ?1",
            params![body_part_id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

#[allow(clippy::result_large_err)]
impl SqliteStore {
    /// Create an illness together with its initial medicines.
    /// Either every row is written or none is.
    pub fn insert_illness(&self, input: &IllnessInput) -> Result<i64> {
        self.in_transaction(|tx| {
            if !body_part_exists(tx, input.body_part_id)? {
                return Err(StoreError::not_found("Body part", input.body_part_id));
            }

            tx.execute(
                "INSERT INTO illnesses (body_part_id, name, description, symptoms, care_tips, severity, is_active)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    input.body_part_id,
                    input.name,
                    input.description,
                    input.symptoms,
                    input.care_tips,
                    input.severity.as_str(),
                    input.is_active,
                ],
            )?;
            let illness_id = tx.last_insert_rowid();

            for draft in &input.medicines {
                insert_medicine_row(tx, illness_id, draft)?;
            }

            Ok(illness_id)
        })
    }

    /// Replace every illness field (medicines are managed separately)
    pub fn update_illness(&self, id: i64, input: &IllnessInput) -> Result<()> {
        let conn = self.conn();
        if !body_part_exists(&conn, input.body_part_id)? {
            return Err(StoreError::not_found("Body part", input.body_part_id));
        }

        let rows = conn.execute(
            "UPDATE illnesses SET body_part_id = ?1, name = ?2, description = ?3,
                 symptoms = ?4, care_tips = ?5, severity = ?6, is_active = ?7
             WHERE id = ?8",
            params![
                input.body_part_id,
                input.name,
                input.description,
                input.symptoms,
                input.care_tips,
                input.severity.as_str(),
                input.is_active,
                id,
            ],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("Illness", id));
        }
        Ok(())
    }

    /// Hard delete. Medicines of the illness go with it.
    pub fn delete_illness(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        let rows = conn.execute("DELETE FROM illnesses WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::not_found("Illness", id));
        }
        Ok(())
    }

    pub fn get_illness(&self, id: i64) -> Result<Option<Illness>> {
        let conn = self.conn();
        let illness = conn
            .query_row(
                &format!("SELECT {} FROM illnesses i WHERE i.id = ?1", ILLNESS_COLUMNS),
                params![id],
                rows::illness,
            )
            .optional()?;
        Ok(illness)
    }

    /// Every illness, active or not, with its body part name
    pub fn list_illnesses(&self) -> Result<Vec<IllnessListing>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, bp.name AS body_part_name
             FROM illnesses i
             JOIN body_parts bp ON bp.id = i.body_part_id
             ORDER BY bp.name, i.name, i.id",
            ILLNESS_COLUMNS
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(IllnessListing {
                illness: rows::illness(row)?,
                body_part_name: row.get("body_part_name")?,
            })
        })?;

        let mut listings = Vec::new();
        for listing in rows {
            listings.push(listing?);
        }
        Ok(listings)
    }

    /// `{id, name}` of active illnesses for the medicine form
    pub fn illness_options(&self) -> Result<Vec<IllnessOption>> {
        let conn = self.conn();
        let mut stmt =
            conn.prepare("SELECT id, name FROM illnesses WHERE is_active = 1 ORDER BY name, id")?;
        let rows = stmt.query_map([], |row| {
            Ok(IllnessOption {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut options = Vec::new();
        for option in rows {
            options.push(option?);
        }
        Ok(options)
    }
}
