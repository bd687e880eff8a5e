use crate::error::{Result, StoreError};
use crate::rows::{self, DOCTOR_COLUMNS};
use crate::sqlite_store::SqliteStore;
use medinfo_core::{Doctor, DoctorInput, DoctorListing};
use rusqlite::{params, Connection};

/// Active doctors for a body part: scoped to it or unscoped, most
/// experienced first.
pub(crate) fn featured_doctors(conn: &Connection, body_part_id: i64, limit: usize) -> Result<Vec<Doctor>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM doctors d
         WHERE (d.body_part_id = ?1 OR d.body_part_id IS NULL) AND d.is_active = 1
         ORDER BY d.experience_years DESC, d.id
         LIMIT ?2",
        DOCTOR_COLUMNS
    ))?;
    let rows = stmt.query_map(params![body_part_id, limit as i64], rows::doctor)?;

    let mut doctors = Vec::new();
    for doctor in rows {
        doctors.push(doctor?);
    }
    Ok(doctors)
}

#[allow(clippy::result_large_err)]
impl SqliteStore {
    pub fn insert_doctor(&self, input: &DoctorInput) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO doctors (body_part_id, name, specialization, hospital, phone, email, address, experience_years, is_active)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                input.body_part_id,
                input.name,
                input.specialization,
                input.hospital,
                input.phone,
                input.email,
                input.address,
                input.experience_years,
                input.is_active,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn update_doctor(&self, id: i64, input: &DoctorInput) -> Result<()> {
        let conn = self.conn();
        let rows = conn.execute(
            "UPDATE doctors SET body_part_id = ?1, name = ?2, specialization = ?3, hospital = ?4,
                 phone = ?5, email = ?6, address = ?7, experience_years = ?8, is_active = ?9
             WHERE id = ?10",
            params![
                input.body_part_id,
                input.name,
                input.specialization,
                input.hospital,
                input.phone,
                input.email,
                input.address,
                input.experience_years,
                input.is_active,
                id,
            ],
        )?;
        if rows == 0 {
            return Err(StoreError::not_found("Doctor", id));
        }
        Ok(())
    }

    pub fn delete_doctor(&self, id: i64) -> Result<()> {
        let conn = self.conn();
        let rows = conn.execute("DELETE FROM doctors WHERE id = ?1", params![id])?;
        if rows == 0 {
            return Err(StoreError::not_found("Doctor", id));
        }
        Ok(())
    }

    /// Every doctor, active or not, with the scoped body part's name
    pub fn list_doctors(&self) -> Result<Vec<DoctorListing>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {}, bp.name AS body_part_name
             FROM doctors d
             LEFT JOIN body_parts bp ON bp.id = d.body_part_id
             ORDER BY d.name, d.id",
            DOCTOR_COLUMNS
        ))?;
        let rows = stmt.query_map([], |row| {
            Ok(DoctorListing {
                doctor: rows::doctor(row)?,
                body_part_name: row.get("body_part_name")?,
            })
        })?;

        let mut listings = Vec::new();
        for listing in rows {
            listings.push(listing?);
        }
        Ok(listings)
    }
}
