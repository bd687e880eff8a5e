use thiserror::Error;

#[derive(Error, Debug)]
pub enum MedinfoError {
    #[error("{entity} not found: {key}")]
    NotFound { entity: String, key: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Payload too large: limit is {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl MedinfoError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MedinfoError>;
