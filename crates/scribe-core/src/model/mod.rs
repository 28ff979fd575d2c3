//! Record types held by the scribe.
//!
//! Every record is plain data with serde derives. The wire names match the snake_case keys
//! produced by upstream note generators, so a snapshot can be read and written without a
//! translation layer.

pub mod goal;
pub mod profile;
pub mod review;
pub mod transcript;

pub use goal::{Action, GoalData, HealthGoal, Metric};
pub use profile::{
    Biometrics, CareTeam, ClinicalStatus, Demographics, FreeForm, GeneticProxies, Lifestyle,
    Location, PrimaryDoctor, ProfileData, TemporalContext,
};
pub use review::{
    Assessment, AssessmentStatus, AssessmentSuggestion, Investigation, Objective, Plan,
    PlanSuggestion, Prescription, ReviewData, Subjective, Summary,
};
pub use transcript::{Speaker, Transcript};

use serde::{Deserialize, Serialize};

/// The structured note produced from a consultation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalNote {
    pub profile_data: ProfileData,
    pub goal_data: GoalData,
    pub review_data: ReviewData,
}

/// Root aggregate: the conversation plus the note derived from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MedicalScribeData {
    #[serde(default)]
    pub transcript: Vec<Transcript>,
    pub note: MedicalNote,
}
