//! Illness/medicine aggregation
//!
//! The store answers a body-part detail query with one row per illness. The
//! medicines of that illness arrive either flattened into five parallel
//! delimiter-joined columns (grouped concatenation) or as separate normalized
//! rows. Both shapes are rebuilt here into `IllnessDetail` records.
//!
//! Delimiters:
//!   - `|`  names, OTC flags, symptoms, care tips
//!   - `||` free text (description, dosage, side effects)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::model::{BodyPart, Doctor, HealthTip, Illness};

pub const NAME_DELIMITER: &str = "|";
pub const TEXT_DELIMITER: &str = "||";
pub const LIST_DELIMITER: &str = "|";

/// Medicines of one illness, flattened by grouped concatenation.
/// `None` means the aggregate produced SQL NULL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedMedicines {
    pub names: Option<String>,
    pub descriptions: Option<String>,
    pub dosages: Option<String>,
    pub side_effects: Option<String>,
    pub otc_flags: Option<String>,
}

/// Medicine as shown on the public body-part page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicineSummary {
    pub name: String,
    pub description: String,
    pub dosage: String,
    pub side_effects: String,
    pub is_otc: bool,
}

/// Illness enriched with its medicines and split text lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllnessDetail {
    #[serde(flatten)]
    pub illness: Illness,
    pub medicines: Vec<MedicineSummary>,
    pub symptoms_list: Vec<String>,
    pub care_list: Vec<String>,
}

/// Response payload of the body-part detail query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPartDetail {
    pub part: BodyPart,
    pub illnesses: Vec<IllnessDetail>,
    pub doctors: Vec<Doctor>,
}

impl IllnessDetail {
    pub fn new(illness: Illness, medicines: Vec<MedicineSummary>) -> Self {
        let symptoms_list = split_list(illness.symptoms.as_deref());
        let care_list = split_list(illness.care_tips.as_deref());
        Self {
            illness,
            medicines,
            symptoms_list,
            care_list,
        }
    }
}

/// Split a `|`-joined per-illness text field. Empty or NULL yields no items.
pub fn split_list(text: Option<&str>) -> Vec<String> {
    split_column(text, LIST_DELIMITER)
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn split_column<'a>(text: Option<&'a str>, delimiter: &str) -> Vec<&'a str> {
    match text {
        Some(t) if !t.is_empty() => t.split(delimiter).collect(),
        _ => Vec::new(),
    }
}

/// Rebuild the medicine list of one illness from its flattened columns.
///
/// The five lists are zipped by position against the name list. A position
/// with an empty name is skipped (an illness without medicines still yields
/// one empty placeholder from the LEFT JOIN). A shorter parallel list yields
/// an empty string, or `false` for the OTC flag.
pub fn reconstruct_medicines(flat: &FlattenedMedicines) -> Vec<MedicineSummary> {
    let names = split_column(flat.names.as_deref(), NAME_DELIMITER);
    let descriptions = split_column(flat.descriptions.as_deref(), TEXT_DELIMITER);
    let dosages = split_column(flat.dosages.as_deref(), TEXT_DELIMITER);
    let side_effects = split_column(flat.side_effects.as_deref(), TEXT_DELIMITER);
    let otc_flags = split_column(flat.otc_flags.as_deref(), NAME_DELIMITER);

    let at = |column: &[&str], i: usize| column.get(i).copied().unwrap_or_default().to_string();

    names
        .iter()
        .enumerate()
        .filter(|(_, name)| !name.is_empty())
        .map(|(i, name)| MedicineSummary {
            name: name.to_string(),
            description: at(&descriptions, i),
            dosage: at(&dosages, i),
            side_effects: at(&side_effects, i),
            is_otc: otc_flags.get(i).is_some_and(|flag| *flag == "1"),
        })
        .collect()
}

/// Group normalized `(illness_id, medicine)` rows by illness, keeping row order
/// within each group and dropping empty-named entries.
pub fn group_medicines<I>(rows: I) -> HashMap<i64, Vec<MedicineSummary>>
where
    I: IntoIterator<Item = (i64, MedicineSummary)>,
{
    let mut grouped: HashMap<i64, Vec<MedicineSummary>> = HashMap::new();
    for (illness_id, medicine) in rows {
        if medicine.name.is_empty() {
            continue;
        }
        grouped.entry(illness_id).or_default().push(medicine);
    }
    grouped
}

/// Bucket tips by category. Category keys come out sorted; tips keep their
/// incoming order inside a bucket.
pub fn group_by_category(tips: Vec<HealthTip>) -> BTreeMap<String, Vec<HealthTip>> {
    let mut grouped: BTreeMap<String, Vec<HealthTip>> = BTreeMap::new();
    for tip in tips {
        grouped.entry(tip.category.clone()).or_default().push(tip);
    }
    grouped
}
