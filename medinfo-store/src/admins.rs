//! Admin accounts. Passwords are stored as Argon2 PHC strings.

use crate::error::{Result, StoreError};
use crate::sqlite_store::SqliteStore;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use medinfo_core::AdminUser;
use rusqlite::{params, OptionalExtension};

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| StoreError::PasswordHash(e.to_string()))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> Result<bool> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| StoreError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[allow(clippy::result_large_err)]
impl SqliteStore {
    pub fn create_admin(&self, name: &str, email: &str, password: &str) -> Result<i64> {
        let password_hash = hash_password(password)?;
        let conn = self.conn();
        conn.execute(
            "INSERT INTO admin_users (name, email, password_hash) VALUES (?1, ?2, ?3)",
            params![name, email, password_hash],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Create the admin unless one with this email already exists.
    /// Returns true when an account was created.
    pub fn ensure_admin(&self, name: &str, email: &str, password: &str) -> Result<bool> {
        let exists = {
            let conn = self.conn();
            conn.query_row(
                "SELECT 1 FROM admin_users WHERE email = ?1",
                params![email],
                |_| Ok(()),
            )
            .optional()?
            .is_some()
        };
        if exists {
            return Ok(false);
        }
        self.create_admin(name, email, password)?;
        Ok(true)
    }

    /// Check credentials. `None` for an unknown email or a wrong password.
    pub fn verify_admin(&self, email: &str, password: &str) -> Result<Option<AdminUser>> {
        // Hash verification is slow; do it after releasing the connection.
        let found = {
            let conn = self.conn();
            conn.query_row(
                "SELECT id, name, email, password_hash FROM admin_users WHERE email = ?1",
                params![email],
                |row| {
                    Ok((
                        AdminUser {
                            id: row.get(0)?,
                            name: row.get(1)?,
                            email: row.get(2)?,
                        },
                        row.get::<_, String>(3)?,
                    ))
                },
            )
            .optional()?
        };

        let Some((admin, stored_hash)) = found else {
            return Ok(None);
        };
        if verify_password(password, &stored_hash)? {
            Ok(Some(admin))
        } else {
            Ok(None)
        }
    }
}
