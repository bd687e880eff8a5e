//! SQLite-backed store
//!
//! Schema:
//!   - body_parts:       anatomical categories (unique slug)
//!   - illnesses:        owned by a body part, soft-deletable
//!   - medicines:        owned by an illness, removed with it
//!   - doctors:          optionally scoped to a body part
//!   - health_tips:      grouped by category
//!   - contact_messages: public contact form submissions
//!   - admin_users:      admin accounts (Argon2 password hashes)

use crate::error::Result;
use medinfo_core::DashboardStats;
use rusqlite::{Connection, Transaction};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS body_parts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    icon TEXT NOT NULL DEFAULT ''
);

CREATE TABLE IF NOT EXISTS illnesses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    body_part_id INTEGER NOT NULL REFERENCES body_parts(id) ON DELETE RESTRICT,
    name TEXT NOT NULL CHECK (length(name) > 0),
    description TEXT NOT NULL DEFAULT '',
    symptoms TEXT,
    care_tips TEXT,
    severity TEXT NOT NULL DEFAULT 'mild' CHECK (severity IN ('mild', 'moderate', 'severe')),
    is_active INTEGER NOT NULL DEFAULT 1
);
CREATE INDEX IF NOT EXISTS idx_illnesses_body_part ON illnesses(body_part_id, is_active);

CREATE TABLE IF NOT EXISTS medicines (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    illness_id INTEGER NOT NULL REFERENCES illnesses(id) ON DELETE CASCADE,
    name TEXT NOT NULL CHECK (length(name) > 0),
    description TEXT,
    dosage TEXT,
    side_effects TEXT,
    is_otc INTEGER NOT NULL DEFAULT 0,
    image_path TEXT
);
CREATE INDEX IF NOT EXISTS idx_medicines_illness ON medicines(illness_id);

CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    body_part_id INTEGER REFERENCES body_parts(id) ON DELETE SET NULL,
    name TEXT NOT NULL,
    specialization TEXT NOT NULL,
    hospital TEXT NOT NULL DEFAULT '',
    phone TEXT NOT NULL DEFAULT '',
    email TEXT NOT NULL DEFAULT '',
    address TEXT NOT NULL DEFAULT '',
    experience_years INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1
);

CREATE TABLE IF NOT EXISTS health_tips (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL DEFAULT 'home_care',
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    icon TEXT NOT NULL DEFAULT '💡',
    sort_order INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1
);
CREATE INDEX IF NOT EXISTS idx_tips_category ON health_tips(category, sort_order);

CREATE TABLE IF NOT EXISTS contact_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    message TEXT NOT NULL,
    created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
    is_read INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS admin_users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);
"#;

/// SQLite-based store. Every operation holds the connection guard for its
/// whole duration and releases it when the guard drops.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

#[allow(clippy::result_large_err)]
impl SqliteStore {
    /// Open the store (create if not exists)
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;

        // WAL for read-write concurrency, FK enforcement is per connection
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the connection. A panic in another request must not take the
    /// store down with it, so a poisoned lock is recovered.
    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Execute multiple statements atomically within an SQLite transaction
    pub fn in_transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T>,
    {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let result = match f(&tx) {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(error = %e, "Rolling back transaction");
                return Err(e);
            }
        };
        tx.commit()?;
        Ok(result)
    }

    /// Admin dashboard counters
    pub fn stats(&self) -> Result<DashboardStats> {
        let conn = self.conn();
        let count = |sql: &str| conn.query_row(sql, [], |row| row.get::<_, i64>(0));

        Ok(DashboardStats {
            illnesses: count("SELECT COUNT(*) FROM illnesses WHERE is_active = 1")?,
            doctors: count("SELECT COUNT(*) FROM doctors WHERE is_active = 1")?,
            medicines: count("SELECT COUNT(*) FROM medicines")?,
            messages: count("SELECT COUNT(*) FROM contact_messages WHERE is_read = 0")?,
        })
    }
}
