//! medinfo-core - domain model for the medinfo health reference backend
//!
//! Entities, the illness/medicine aggregation step, the JSON response
//! envelope and the medicine image naming policy. No I/O lives here.

pub mod aggregate;
pub mod envelope;
pub mod error;
pub mod model;
pub mod upload;

pub use aggregate::{
    BodyPartDetail, FlattenedMedicines, IllnessDetail, MedicineSummary, group_by_category,
    group_medicines, reconstruct_medicines, split_list,
};
pub use envelope::Envelope;
pub use error::{MedinfoError, Result};
pub use model::{
    AdminUser, BodyPart, ContactMessage, ContactSubmission, DashboardStats, Doctor, DoctorInput,
    DoctorListing, HealthTip, HealthTipInput, Illness, IllnessInput, IllnessListing,
    IllnessOption, LoginRequest, Medicine, MedicineDraft, MedicineInput, MedicineListing,
    Severity,
};
pub use upload::ImagePolicy;
