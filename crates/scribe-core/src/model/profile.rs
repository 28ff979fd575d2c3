//! Patient profile records.
//!
//! The profile is mostly display data. Several sub-objects (geo risks, family history,
//! nutrition and so on) are free-form in upstream sources and are carried as JSON maps so
//! that a snapshot survives an edit/save cycle without losing keys the scribe does not
//! interpret.

use serde::{Deserialize, Serialize};

/// Free-form JSON object carried through untouched.
pub type FreeForm = serde_json::Map<String, serde_json::Value>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileData {
    pub demographics: Demographics,
    pub genetic_proxies: GeneticProxies,
    #[serde(default)]
    pub environment: FreeForm,
    pub lifestyle: Lifestyle,
    pub clinical_status: ClinicalStatus,
    pub temporal_context: TemporalContext,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Demographics {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Calendar date of birth, normally `YYYY-MM-DD`.
    pub date_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<String>,
    pub gender: String,
    pub location: Location,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub country_code: String,
    #[serde(default)]
    pub geo_risks: FreeForm,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneticProxies {
    pub blood_type: String,
    #[serde(default)]
    pub family_history: FreeForm,
    #[serde(default)]
    pub phenotypic_markers: Vec<String>,
    /// Known medication sensitivities. Treated as a set: edits de-duplicate while keeping
    /// first-seen order.
    #[serde(default, alias = "sensitivities")]
    pub medication_sensitivities: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Lifestyle {
    #[serde(default)]
    pub circadian_rhythm: String,
    #[serde(default)]
    pub nutrition: FreeForm,
    #[serde(default)]
    pub activity: FreeForm,
    #[serde(default)]
    pub social_history: FreeForm,
    pub biometrics: Biometrics,
}

/// Body measurements as entered. No unit conversion is applied anywhere in the scribe:
/// height is shown in cm and weight in kg exactly as stored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Biometrics {
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    pub health_score: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClinicalStatus {
    #[serde(default)]
    pub chronic_conditions: Vec<String>,
    #[serde(default)]
    pub peculiarities: Vec<String>,
    #[serde(default)]
    pub medications: FreeForm,
    pub care_team: CareTeam,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CareTeam {
    pub primary_doctor: PrimaryDoctor,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrimaryDoctor {
    #[serde(default)]
    pub id: u64,
    pub name: String,
    pub clinic_name: String,
    pub specialty: String,
    pub phone_number: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalContext {
    #[serde(default)]
    pub current_time: String,
    #[serde(default)]
    pub patient_local_time: String,
    #[serde(default)]
    pub timezone: String,
}
