use crate::error::{Result, StoreError};
use crate::rows::{self, MEDICINE_COLUMNS};
use crate::sqlite_store::SqliteStore;
use medinfo_core::{Medicine, MedicineDraft, MedicineInput, MedicineListing};
use rusqlite::{params, Connection, OptionalExtension};

pub(crate) fn insert_medicine_row(
    conn: &Connection,
    illness_id: i64,
    draft: &MedicineDraft,
) -> Result<i64> {
    conn.execute(
        "INSERT INTO medicines (illness_id, name, description, dosage, side_effects, is_otc)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            illness_id,
            draft.name,
            draft.description,
            draft.dosage,
            draft.side_effects,
            draft.is_otc,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

fn image_path_of(conn: &Connection, id: i64) -> Result<Option<String>> {
    conn.query_row(
        "SELECT image_path FROM medicines WHERE id = ?1",
        params![id],
        |row| row.get::<_, Option<String>>(0),
    )
    .optional()?
    .ok_or_else(|| StoreError::not_found("Medicine", id))
}

#[allow(clippy::result_large_err)]
impl SqliteStore {
    pub fn insert_medicine(&self, input: &MedicineInput) -> Result<i64> {
        let conn = self.conn();
        let illness = conn
            .query_row(
                "SELECT 1 FROM illnesses WHERE id = ?1",
                params![input.illness_id],
                |_| Ok(()),
            )
            .optional()?;
        if illness.is_none() {
            return Err(StoreError::not_found("Illness", input.illness_id));
        }
        insert_medicine_row(&conn, input.illness_id, &input.draft)
    }

    pub fn get_medicine(&self, id: i64) -> Result<Option<Medicine>> {
        let conn = self.conn();
        let medicine = conn
            .query_row(
                &format!("SELECT {} FROM medicines m WHERE m.id = ?1", MEDICINE_COLUMNS),
                params![id],
                rows::medicine,
            )
            .optional()?;
        Ok(medicine)
    }

    /// Every medicine with its illness name
    pub fn list_medicines(&self) -> Result<Vec<MedicineListing>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, i.name AS illness_name
             FROM medicines m
             JOIN illnesses i ON i.id = m.illness_id
             ORDER BY i.name, m.name, m.id",
            MEDICINE_COLUMNS
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(MedicineListing {
                medicine: rows::medicine(row)?,
                illness_name: row.get("illness_name")?,
            })
        })?;

        let mut listings = Vec::new();
        for listing in rows {
            listings.push(listing?);
        }
        Ok(listings)
    }

    /// Delete a medicine, returning its stored image filename (if any) so the
    /// caller can remove the file.
    pub fn delete_medicine(&self, id: i64) -> Result<Option<String>> {
        self.in_transaction(|tx| {
            let image_path = image_path_of(tx, id)?;
            tx.execute("DELETE FROM medicines WHERE id = ?1", params![id])?;
            Ok(image_path)
        })
    }

    /// Point a medicine at a newly stored image, returning the image it
    /// replaced (if any).
    pub fn set_medicine_image(&self, id: i64, filename: &str) -> Result<Option<String>> {
        self.in_transaction(|tx| {
            let previous = image_path_of(tx, id)?;
            tx.execute(
                "UPDATE medicines SET image_path = ?1 WHERE id = ?2",
                params![filename, id],
            )?;
            Ok(previous)
        })
    }
}
