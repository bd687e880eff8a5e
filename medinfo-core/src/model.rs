//! Persisted entities and admin input payloads

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MedinfoError, Result};

/// Top-level anatomical category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPart {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub icon: String,
}

/// Illness severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Mild => "mild",
            Severity::Moderate => "moderate",
            Severity::Severe => "severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = MedinfoError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "mild" => Ok(Severity::Mild),
            "moderate" => Ok(Severity::Moderate),
            "severe" => Ok(Severity::Severe),
            other => Err(MedinfoError::validation(format!("Unknown severity: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Illness {
    pub id: i64,
    pub body_part_id: i64,
    pub name: String,
    pub description: String,
    /// `|`-joined symptom list
    pub symptoms: Option<String>,
    /// `|`-joined care tip list
    pub care_tips: Option<String>,
    pub severity: Severity,
    pub is_active: bool,
}

/// Admin listing row: illness plus its body part's name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllnessListing {
    #[serde(flatten)]
    pub illness: Illness,
    pub body_part_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllnessOption {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medicine {
    pub id: i64,
    pub illness_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub dosage: Option<String>,
    pub side_effects: Option<String>,
    pub is_otc: bool,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineListing {
    #[serde(flatten)]
    pub medicine: Medicine,
    pub illness_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: i64,
    /// `None` applies the doctor to every body part
    pub body_part_id: Option<i64>,
    pub name: String,
    pub specialization: String,
    pub hospital: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub experience_years: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorListing {
    #[serde(flatten)]
    pub doctor: Doctor,
    pub body_part_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTip {
    pub id: i64,
    pub category: String,
    pub title: String,
    pub description: String,
    pub icon: String,
    pub sort_order: i64,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: String,
    pub is_read: bool,
}

/// Admin account as exposed to the API (the password hash never leaves the store)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub illnesses: i64,
    pub doctors: i64,
    pub medicines: i64,
    pub messages: i64,
}

// ---------------------------------------------------------------------------
// Input payloads
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

fn default_tip_category() -> String {
    "home_care".to_string()
}

fn default_tip_icon() -> String {
    "💡".to_string()
}

/// Accept `true`/`false`, `0`/`1` and `"0"`/`"1"` for boolean flags.
/// The admin frontend sends checkbox values as integers.
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(i) => Ok(i != 0),
        Flag::Text(s) => Ok(s == "1" || s.eq_ignore_ascii_case("true")),
    }
}

/// Ids arrive as numbers or, from `<select>` values, as numeric strings
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Int(i64),
    Text(String),
}

fn parse_id<E: de::Error>(text: &str) -> std::result::Result<i64, E> {
    text.trim()
        .parse()
        .map_err(|_| E::invalid_value(Unexpected::Str(text), &"a numeric id"))
}

fn lenient_id<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawId::deserialize(deserializer)? {
        RawId::Int(id) => Ok(id),
        RawId::Text(text) => parse_id(&text),
    }
}

/// Like `lenient_id`; `null` and `""` (an unselected option) mean none
fn lenient_opt_id<'de, D>(deserializer: D) -> std::result::Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawId::Int(id)) => Ok(Some(id)),
        Some(RawId::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(RawId::Text(text)) => parse_id(&text).map(Some),
    }
}

/// Illness create/update payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllnessInput {
    #[serde(deserialize_with = "lenient_id")]
    pub body_part_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub symptoms: Option<String>,
    #[serde(default)]
    pub care_tips: Option<String>,
    #[serde(default)]
    pub severity: Severity,
    #[serde(default = "default_true", deserialize_with = "flag")]
    pub is_active: bool,
    /// Initial medicines, inserted together with the illness
    #[serde(default)]
    pub medicines: Vec<MedicineDraft>,
}

/// Medicine fields without the owning illness
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineDraft {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub side_effects: Option<String>,
    #[serde(default, deserialize_with = "flag")]
    pub is_otc: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineInput {
    #[serde(deserialize_with = "lenient_id")]
    pub illness_id: i64,
    #[serde(flatten)]
    pub draft: MedicineDraft,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorInput {
    #[serde(default, deserialize_with = "lenient_opt_id")]
    pub body_part_id: Option<i64>,
    pub name: String,
    pub specialization: String,
    #[serde(default)]
    pub hospital: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub experience_years: i64,
    #[serde(default = "default_true", deserialize_with = "flag")]
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthTipInput {
    #[serde(default = "default_tip_category")]
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default = "default_tip_icon")]
    pub icon: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_true", deserialize_with = "flag")]
    pub is_active: bool,
}

/// Public contact form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Trim every field and reject the submission if any is left empty
    pub fn normalized(self) -> Result<Self> {
        let normalized = Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        };
        if normalized.name.is_empty() || normalized.email.is_empty() || normalized.message.is_empty()
        {
            return Err(MedinfoError::validation("All fields are required"));
        }
        Ok(normalized)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}
