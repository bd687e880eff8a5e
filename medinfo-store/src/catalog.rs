//! Public catalog queries: the body-part detail page
//!
//! Active illnesses of a body part are loaded together with their medicines
//! in one of two ways:
//!   - `Concat`: a single grouped query; medicine columns come back as
//!     delimiter-joined strings and are rebuilt by `reconstruct_medicines`
//!   - `SecondaryQuery`: illnesses first, then all their medicines in one
//!     normalized query, grouped in memory by illness id
//!
//! Both produce the same `IllnessDetail` list.

use crate::body_parts::find_by_slug;
use crate::doctors::featured_doctors;
use crate::error::{Result, StoreError};
use crate::illnesses::body_part_exists;
use crate::rows::{self, ILLNESS_COLUMNS};
use crate::sqlite_store::SqliteStore;
use medinfo_core::{
    group_medicines, reconstruct_medicines, BodyPartDetail, FlattenedMedicines, IllnessDetail,
    MedicineSummary,
};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

/// Doctors listed on a body-part page
pub const FEATURED_DOCTOR_LIMIT: usize = 3;

/// How medicines are attached to illnesses on the detail page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MedicineAggregation {
    #[default]
    Concat,
    SecondaryQuery,
}

fn illness_details_concat(conn: &Connection, body_part_id: i64) -> Result<Vec<IllnessDetail>> {
    // COALESCE keeps every medicine in every column so positions line up.
    // An illness without medicines yields a single empty name, skipped on rebuild.
    let mut stmt = conn.prepare(&format!(
        "SELECT {},
             group_concat(COALESCE(m.name, ''), '|' ORDER BY m.id) AS medicine_names,
             group_concat(COALESCE(m.description, ''), '||' ORDER BY m.id) AS medicine_descs,
             group_concat(COALESCE(m.dosage, ''), '||' ORDER BY m.id) AS medicine_dosages,
             group_concat(COALESCE(m.side_effects, ''), '||' ORDER BY m.id) AS medicine_sides,
             group_concat(COALESCE(m.is_otc, ''), '|' ORDER BY m.id) AS medicine_otc
         FROM illnesses i
         LEFT JOIN medicines m ON m.illness_id = i.id
         WHERE i.body_part_id = ?1 AND i.is_active = 1
         GROUP BY i.id
         ORDER BY i.id",
        ILLNESS_COLUMNS
    ))?;

    let rows = stmt.query_map(params![body_part_id], |row| {
        let illness = rows::illness(row)?;
        let flat = FlattenedMedicines {
            names: row.get("medicine_names")?,
            descriptions: row.get("medicine_descs")?,
            dosages: row.get("medicine_dosages")?,
            side_effects: row.get("medicine_sides")?,
            otc_flags: row.get("medicine_otc")?,
        };
        Ok((illness, flat))
    })?;

    let mut details = Vec::new();
    for row in rows {
        let (illness, flat) = row?;
        details.push(IllnessDetail::new(illness, reconstruct_medicines(&flat)));
    }
    Ok(details)
}

fn illness_details_secondary(conn: &Connection, body_part_id: i64) -> Result<Vec<IllnessDetail>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM illnesses i
         WHERE i.body_part_id = ?1 AND i.is_active = 1
         ORDER BY i.id",
        ILLNESS_COLUMNS
    ))?;
    let mut illnesses = Vec::new();
    for illness in stmt.query_map(params![body_part_id], rows::illness)? {
        illnesses.push(illness?);
    }
    if illnesses.is_empty() {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(
        "SELECT m.illness_id, m.name, m.description, m.dosage, m.side_effects, m.is_otc
         FROM medicines m
         JOIN illnesses i ON i.id = m.illness_id
         WHERE i.body_part_id = ?1 AND i.is_active = 1
         ORDER BY m.id",
    )?;
    let rows = stmt.query_map(params![body_part_id], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            MedicineSummary {
                name: row.get(1)?,
                description: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                dosage: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
                side_effects: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
                is_otc: row.get(5)?,
            },
        ))
    })?;
    let mut medicine_rows = Vec::new();
    for row in rows {
        medicine_rows.push(row?);
    }
    let mut grouped = group_medicines(medicine_rows);

    Ok(illnesses
        .into_iter()
        .map(|illness| {
            let medicines = grouped.remove(&illness.id).unwrap_or_default();
            IllnessDetail::new(illness, medicines)
        })
        .collect())
}

fn illness_details(
    conn: &Connection,
    body_part_id: i64,
    mode: MedicineAggregation,
) -> Result<Vec<IllnessDetail>> {
    match mode {
        MedicineAggregation::Concat => illness_details_concat(conn, body_part_id),
        MedicineAggregation::SecondaryQuery => illness_details_secondary(conn, body_part_id),
    }
}

#[allow(clippy::result_large_err)]
impl SqliteStore {
    /// Active illnesses of a body part with their medicines. Unknown part is NotFound.
    pub fn active_illness_details(
        &self,
        body_part_id: i64,
        mode: MedicineAggregation,
    ) -> Result<Vec<IllnessDetail>> {
        let conn = self.conn();
        if !body_part_exists(&conn, body_part_id)? {
            return Err(StoreError::not_found("Body part", body_part_id));
        }
        illness_details(&conn, body_part_id, mode)
    }

    /// Everything the public body-part page shows. Unknown slug is NotFound.
    pub fn body_part_detail(&self, slug: &str, mode: MedicineAggregation) -> Result<BodyPartDetail> {
        let conn = self.conn();
        let part = find_by_slug(&conn, slug)?
            .ok_or_else(|| StoreError::not_found("Body part", slug))?;

        let illnesses = illness_details(&conn, part.id, mode)?;
        let doctors = featured_doctors(&conn, part.id, FEATURED_DOCTOR_LIMIT)?;

        Ok(BodyPartDetail {
            part,
            illnesses,
            doctors,
        })
    }
}
