pub mod admins;
pub mod body_parts;
pub mod catalog;
pub mod doctors;
pub mod error;
pub mod illnesses;
pub mod medicines;
pub mod messages;
mod rows;
pub mod sqlite_store;
pub mod tips;

pub use catalog::MedicineAggregation;
pub use error::{Result, StoreError};
pub use sqlite_store::SqliteStore;

#[cfg(test)]
pub(crate) mod testing;
