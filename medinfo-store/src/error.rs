use medinfo_core::MedinfoError;
use rusqlite::ffi;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("{0}")]
    Other(String),
}

impl StoreError {
    pub fn not_found(entity: impl Into<String>, key: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            key: key.to_string(),
        }
    }

    /// Kind of constraint a write violated, if that is what failed
    pub fn constraint_violation(&self) -> Option<&'static str> {
        let StoreError::Sqlite(rusqlite::Error::SqliteFailure(err, _)) = self else {
            return None;
        };
        if err.code != rusqlite::ErrorCode::ConstraintViolation {
            return None;
        }
        Some(match err.extended_code {
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => "foreign key",
            ffi::SQLITE_CONSTRAINT_NOTNULL => "not null",
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => "unique",
            ffi::SQLITE_CONSTRAINT_CHECK => "check",
            _ => "constraint",
        })
    }
}

impl From<StoreError> for MedinfoError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, key } => MedinfoError::NotFound { entity, key },
            other => MedinfoError::Storage(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
