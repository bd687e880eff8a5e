use crate::error::Result;
use crate::rows::{self, BODY_PART_COLUMNS};
use crate::sqlite_store::SqliteStore;
use medinfo_core::BodyPart;
use rusqlite::{params, Connection, OptionalExtension};

/// Body parts seeded into an empty database: (name, slug, icon)
pub const DEFAULT_BODY_PARTS: &[(&str, &str, &str)] = &[
    ("Head", "head", "🧠"),
    ("Brain", "brain", "🧠"),
    ("Eyes", "eyes", "👁️"),
    ("Ears", "ears", "👂"),
    ("Nose", "nose", "👃"),
    ("Throat", "throat", "🗣️"),
    ("Teeth", "teeth", "🦷"),
    ("Heart", "heart", "❤️"),
    ("Lungs", "lungs", "🫁"),
    ("Stomach", "stomach", "🍽️"),
    ("Liver", "liver", "🩺"),
    ("Kidneys", "kidneys", "🫘"),
    ("Skin", "skin", "🖐️"),
    ("Bones", "bones", "🦴"),
    ("Muscles", "muscles", "💪"),
];

pub(crate) fn find_by_slug(conn: &Connection, slug: &str) -> Result<Option<BodyPart>> {
    let part = conn
        .query_row(
            &format!("SELECT {} FROM body_parts bp WHERE bp.slug = ?1", BODY_PART_COLUMNS),
            params![slug],
            rows::body_part,
        )
        .optional()?;
    Ok(part)
}

#[allow(clippy::result_large_err)]
impl SqliteStore {
    /// All body parts in id order (public listing)
    pub fn list_body_parts(&self) -> Result<Vec<BodyPart>> {
        self.query_body_parts("ORDER BY bp.id")
    }

    /// All body parts in name order (admin select boxes)
    pub fn list_body_parts_by_name(&self) -> Result<Vec<BodyPart>> {
        self.query_body_parts("ORDER BY bp.name, bp.id")
    }

    fn query_body_parts(&self, order_by: &str) -> Result<Vec<BodyPart>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM body_parts bp {}",
            BODY_PART_COLUMNS, order_by
        ))?;
        let rows = stmt.query_map([], rows::body_part)?;

        let mut parts = Vec::new();
        for part in rows {
            parts.push(part?);
        }
        Ok(parts)
    }

    /// Look up a body part by its slug
    pub fn body_part_by_slug(&self, slug: &str) -> Result<Option<BodyPart>> {
        let conn = self.conn();
        find_by_slug(&conn, slug)
    }

    pub fn insert_body_part(&self, name: &str, slug: &str, icon: &str) -> Result<i64> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO body_parts (name, slug, icon) VALUES (?1, ?2, ?3)",
            params![name, slug, icon],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Insert the default body parts when the table is empty.
    /// Returns the number of rows inserted.
    pub fn seed_default_body_parts(&self) -> Result<usize> {
        self.in_transaction(|tx| {
            let existing: i64 = tx.query_row("SELECT COUNT(*) FROM body_parts", [], |row| row.get(0))?;
            if existing > 0 {
                return Ok(0);
            }

            let mut stmt = tx.prepare("INSERT INTO body_parts (name, slug, icon) VALUES (?1, ?2, ?3)")?;
            for (name, slug, icon) in DEFAULT_BODY_PARTS {
                stmt.execute(params![name, slug, icon])?;
            }
            Ok(DEFAULT_BODY_PARTS.len())
        })
    }
}
