//! Row mappers. Every SELECT that feeds these aliases its columns to the
//! names used here.

use medinfo_core::{BodyPart, ContactMessage, Doctor, HealthTip, Illness, Medicine, Severity};
use rusqlite::{types::Type, Row};

pub(crate) const BODY_PART_COLUMNS: &str = "bp.id AS id, bp.name AS name, bp.slug AS slug, bp.icon AS icon";

pub(crate) const ILLNESS_COLUMNS: &str = "i.id AS id, i.body_part_id AS body_part_id, i.name AS name, \
     i.description AS description, i.symptoms AS symptoms, i.care_tips AS care_tips, \
     i.severity AS severity, i.is_active AS is_active";

pub(crate) const MEDICINE_COLUMNS: &str = "m.id AS id, m.illness_id AS illness_id, m.name AS name, \
     m.description AS description, m.dosage AS dosage, m.side_effects AS side_effects, \
     m.is_otc AS is_otc, m.image_path AS image_path";

pub(crate) const DOCTOR_COLUMNS: &str = "d.id AS id, d.body_part_id AS body_part_id, d.name AS name, \
     d.specialization AS specialization, d.hospital AS hospital, d.phone AS phone, \
     d.email AS email, d.address AS address, d.experience_years AS experience_years, \
     d.is_active AS is_active";

pub(crate) const TIP_COLUMNS: &str = "t.id AS id, t.category AS category, t.title AS title, \
     t.description AS description, t.icon AS icon, t.sort_order AS sort_order, \
     t.is_active AS is_active";

pub(crate) fn body_part(row: &Row<'_>) -> rusqlite::Result<BodyPart> {
    Ok(BodyPart {
        id: row.get("id")?,
        name: row.get("name")?,
        slug: row.get("slug")?,
        icon: row.get("icon")?,
    })
}

fn severity(row: &Row<'_>) -> rusqlite::Result<Severity> {
    let raw: String = row.get("severity")?;
    raw.parse().map_err(|e| {
        let idx = row.as_ref().column_index("severity").unwrap_or_default();
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

pub(crate) fn illness(row: &Row<'_>) -> rusqlite::Result<Illness> {
    Ok(Illness {
        id: row.get("id")?,
        body_part_id: row.get("body_part_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        symptoms: row.get("symptoms")?,
        care_tips: row.get("care_tips")?,
        severity: severity(row)?,
        is_active: row.get("is_active")?,
    })
}

pub(crate) fn medicine(row: &Row<'_>) -> rusqlite::Result<Medicine> {
    Ok(Medicine {
        id: row.get("id")?,
        illness_id: row.get("illness_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        dosage: row.get("dosage")?,
        side_effects: row.get("side_effects")?,
        is_otc: row.get("is_otc")?,
        image_path: row.get("image_path")?,
    })
}

pub(crate) fn doctor(row: &Row<'_>) -> rusqlite::Result<Doctor> {
    Ok(Doctor {
        id: row.get("id")?,
        body_part_id: row.get("body_part_id")?,
        name: row.get("name")?,
        specialization: row.get("specialization")?,
        hospital: row.get("hospital")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        address: row.get("address")?,
        experience_years: row.get("experience_years")?,
        is_active: row.get("is_active")?,
    })
}

pub(crate) fn health_tip(row: &Row<'_>) -> rusqlite::Result<HealthTip> {
    Ok(HealthTip {
        id: row.get("id")?,
        category: row.get("category")?,
        title: row.get("title")?,
        description: row.get("description")?,
        icon: row.get("icon")?,
        sort_order: row.get("sort_order")?,
        is_active: row.get("is_active")?,
    })
}

pub(crate) fn contact_message(row: &Row<'_>) -> rusqlite::Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.get("id")?,
        name: row.get("name")?,
        email: row.get("email")?,
        message: row.get("message")?,
        created_at: row.get("created_at")?,
        is_read: row.get("is_read")?,
    })
}
