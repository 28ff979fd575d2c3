//! SOAP-style medical review records.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewData {
    pub subjective: Subjective,
    pub objective: Objective,
    pub assessment: Assessment,
    pub plan: Plan,
    #[serde(default)]
    pub next_review: String,
    #[serde(default)]
    pub prescription: Vec<Prescription>,
    #[serde(default)]
    pub investigation: Vec<Investigation>,
    pub summary: Summary,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment_suggestion: Option<AssessmentSuggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan_suggestion: Option<PlanSuggestion>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Subjective {
    pub chief_complaint: String,
    pub history_of_present_illness: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub examination_findings: String,
    pub investigations: String,
}

/// Clinical trajectory of the primary diagnosis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssessmentStatus {
    Improving,
    Worsening,
    Resolved,
    Stable,
    #[default]
    Unknown,
}

impl AssessmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AssessmentStatus::Improving => "improving",
            AssessmentStatus::Worsening => "worsening",
            AssessmentStatus::Resolved => "resolved",
            AssessmentStatus::Stable => "stable",
            AssessmentStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AssessmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub primary_diagnosis: String,
    pub differential_diagnosis: String,
    pub diagnosis_reasoning: String,
    #[serde(default)]
    pub status: AssessmentStatus,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    pub management: String,
    pub lifestyle_advice: String,
    pub follow_up: String,
    pub patient_education: String,
    pub treatment_goal: String,
    #[serde(default)]
    pub plan_reasoning: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub medication_name: String,
    pub dosage: String,
    pub route: String,
    pub frequency: String,
    pub duration: String,
    pub instructions: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Investigation {
    pub test_type: String,
    pub reason: String,
    pub instructions: String,
    pub scheduled_time: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Overall health score on a 0–100 scale.
    pub health_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_progress_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_instructions: Option<String>,
}

/// Pending replacements for assessment fields. Only populated sub-fields are offered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub differential_diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_reasoning: Option<String>,
}

impl AssessmentSuggestion {
    pub fn is_empty(&self) -> bool {
        self.primary_diagnosis.is_none()
            && self.differential_diagnosis.is_none()
            && self.diagnosis_reasoning.is_none()
    }
}

/// Pending replacements for plan fields. Only populated sub-fields are offered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanSuggestion {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub management: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifestyle_advice: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_education: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_goal: Option<String>,
}

impl PlanSuggestion {
    pub fn is_empty(&self) -> bool {
        self.management.is_none()
            && self.lifestyle_advice.is_none()
            && self.follow_up.is_none()
            && self.patient_education.is_none()
            && self.treatment_goal.is_none()
    }
}
