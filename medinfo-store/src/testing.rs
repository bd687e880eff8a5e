//! Fixtures shared by the store tests

use medinfo_core::{DoctorInput, IllnessInput, MedicineDraft, Severity};

pub(crate) fn illness_input(body_part_id: i64, name: &str) -> IllnessInput {
    IllnessInput {
        body_part_id,
        name: name.to_string(),
        description: String::new(),
        symptoms: None,
        care_tips: None,
        severity: Severity::Mild,
        is_active: true,
        medicines: Vec::new(),
    }
}

pub(crate) fn medicine_draft(name: &str, is_otc: bool) -> MedicineDraft {
    MedicineDraft {
        name: name.to_string(),
        description: None,
        dosage: None,
        side_effects: None,
        is_otc,
    }
}

pub(crate) fn doctor_input(body_part_id: Option<i64>, name: &str, experience_years: i64) -> DoctorInput {
    DoctorInput {
        body_part_id,
        name: name.to_string(),
        specialization: "General medicine".to_string(),
        hospital: String::new(),
        phone: String::new(),
        email: String::new(),
        address: String::new(),
        experience_years,
        is_active: true,
    }
}
