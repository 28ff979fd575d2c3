//! Merging suggested field values into a note.
//!
//! A suggestion is a proposed replacement for one canonical field, stored next to it as a
//! `*_suggestion` shadow until the clinician accepts it. Accepting copies the value into the
//! canonical field and clears the shadow so the same suggestion is not offered again.
//!
//! Fields are a closed set. String keys from outside (`"metrics"`, `"primary_diagnosis"`, ...)
//! are parsed into [`SuggestionField`] at the boundary; an unknown key is an error there and
//! never reaches the merge code. Inside, every dispatch is an exhaustive `match`.
//!
//! List-valued fields (metrics, actions) are replaced as a whole. Assessment and plan text
//! fields can be applied one at a time or as a group.

use crate::model::{
    Action, Assessment, AssessmentSuggestion, MedicalNote, Metric, Plan, PlanSuggestion,
};
use crate::{ScribeError, ScribeResult};
use scribe_types::is_blank;
use serde::de::DeserializeOwned;
use std::str::FromStr;

/// Which record a suggestion field belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuggestionScope {
    Goal,
    Assessment,
    Plan,
}

impl std::fmt::Display for SuggestionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SuggestionScope::Goal => "goal",
            SuggestionScope::Assessment => "assessment",
            SuggestionScope::Plan => "plan",
        })
    }
}

/// Goal-level fields that accept suggestions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GoalField {
    GoalName,
    TargetDate,
    Comments,
    Metrics,
    Actions,
}

/// Assessment text fields that accept suggestions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssessmentField {
    PrimaryDiagnosis,
    DifferentialDiagnosis,
    DiagnosisReasoning,
}

impl AssessmentField {
    pub const ALL: [AssessmentField; 3] = [
        AssessmentField::PrimaryDiagnosis,
        AssessmentField::DifferentialDiagnosis,
        AssessmentField::DiagnosisReasoning,
    ];

    fn canonical_mut(self, assessment: &mut Assessment) -> &mut String {
        match self {
            AssessmentField::PrimaryDiagnosis => &mut assessment.primary_diagnosis,
            AssessmentField::DifferentialDiagnosis => &mut assessment.differential_diagnosis,
            AssessmentField::DiagnosisReasoning => &mut assessment.diagnosis_reasoning,
        }
    }

    fn shadow(self, pending: &AssessmentSuggestion) -> Option<&str> {
        match self {
            AssessmentField::PrimaryDiagnosis => pending.primary_diagnosis.as_deref(),
            AssessmentField::DifferentialDiagnosis => pending.differential_diagnosis.as_deref(),
            AssessmentField::DiagnosisReasoning => pending.diagnosis_reasoning.as_deref(),
        }
    }

    fn shadow_mut(self, pending: &mut AssessmentSuggestion) -> &mut Option<String> {
        match self {
            AssessmentField::PrimaryDiagnosis => &mut pending.primary_diagnosis,
            AssessmentField::DifferentialDiagnosis => &mut pending.differential_diagnosis,
            AssessmentField::DiagnosisReasoning => &mut pending.diagnosis_reasoning,
        }
    }
}

/// Plan text fields that accept suggestions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlanField {
    Management,
    LifestyleAdvice,
    FollowUp,
    PatientEducation,
    TreatmentGoal,
}

impl PlanField {
    pub const ALL: [PlanField; 5] = [
        PlanField::Management,
        PlanField::LifestyleAdvice,
        PlanField::FollowUp,
        PlanField::PatientEducation,
        PlanField::TreatmentGoal,
    ];

    fn canonical_mut(self, plan: &mut Plan) -> &mut String {
        match self {
            PlanField::Management => &mut plan.management,
            PlanField::LifestyleAdvice => &mut plan.lifestyle_advice,
            PlanField::FollowUp => &mut plan.follow_up,
            PlanField::PatientEducation => &mut plan.patient_education,
            PlanField::TreatmentGoal => &mut plan.treatment_goal,
        }
    }

    fn shadow(self, pending: &PlanSuggestion) -> Option<&str> {
        match self {
            PlanField::Management => pending.management.as_deref(),
            PlanField::LifestyleAdvice => pending.lifestyle_advice.as_deref(),
            PlanField::FollowUp => pending.follow_up.as_deref(),
            PlanField::PatientEducation => pending.patient_education.as_deref(),
            PlanField::TreatmentGoal => pending.treatment_goal.as_deref(),
        }
    }

    fn shadow_mut(self, pending: &mut PlanSuggestion) -> &mut Option<String> {
        match self {
            PlanField::Management => &mut pending.management,
            PlanField::LifestyleAdvice => &mut pending.lifestyle_advice,
            PlanField::FollowUp => &mut pending.follow_up,
            PlanField::PatientEducation => &mut pending.patient_education,
            PlanField::TreatmentGoal => &mut pending.treatment_goal,
        }
    }
}

/// A canonical field that can receive a suggestion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SuggestionField {
    Goal(GoalField),
    Assessment(AssessmentField),
    Plan(PlanField),
}

impl SuggestionField {
    pub const ALL: [SuggestionField; 13] = [
        SuggestionField::Goal(GoalField::GoalName),
        SuggestionField::Goal(GoalField::TargetDate),
        SuggestionField::Goal(GoalField::Comments),
        SuggestionField::Goal(GoalField::Metrics),
        SuggestionField::Goal(GoalField::Actions),
        SuggestionField::Assessment(AssessmentField::PrimaryDiagnosis),
        SuggestionField::Assessment(AssessmentField::DifferentialDiagnosis),
        SuggestionField::Assessment(AssessmentField::DiagnosisReasoning),
        SuggestionField::Plan(PlanField::Management),
        SuggestionField::Plan(PlanField::LifestyleAdvice),
        SuggestionField::Plan(PlanField::FollowUp),
        SuggestionField::Plan(PlanField::PatientEducation),
        SuggestionField::Plan(PlanField::TreatmentGoal),
    ];

    /// Wire key, matching the canonical field name in snapshots.
    pub fn key(self) -> &'static str {
        match self {
            SuggestionField::Goal(field) => match field {
                GoalField::GoalName => "goal_name",
                GoalField::TargetDate => "target_date",
                GoalField::Comments => "comments",
                GoalField::Metrics => "metrics",
                GoalField::Actions => "actions",
            },
            SuggestionField::Assessment(field) => match field {
                AssessmentField::PrimaryDiagnosis => "primary_diagnosis",
                AssessmentField::DifferentialDiagnosis => "differential_diagnosis",
                AssessmentField::DiagnosisReasoning => "diagnosis_reasoning",
            },
            SuggestionField::Plan(field) => match field {
                PlanField::Management => "management",
                PlanField::LifestyleAdvice => "lifestyle_advice",
                PlanField::FollowUp => "follow_up",
                PlanField::PatientEducation => "patient_education",
                PlanField::TreatmentGoal => "treatment_goal",
            },
        }
    }

    /// Human label used in acknowledgements.
    pub fn label(self) -> &'static str {
        match self {
            SuggestionField::Goal(field) => match field {
                GoalField::GoalName => "Goal name",
                GoalField::TargetDate => "Target date",
                GoalField::Comments => "Comments",
                GoalField::Metrics => "Metrics",
                GoalField::Actions => "Actions",
            },
            SuggestionField::Assessment(field) => match field {
                AssessmentField::PrimaryDiagnosis => "Primary diagnosis",
                AssessmentField::DifferentialDiagnosis => "Differential diagnosis",
                AssessmentField::DiagnosisReasoning => "Diagnosis reasoning",
            },
            SuggestionField::Plan(field) => match field {
                PlanField::Management => "Management",
                PlanField::LifestyleAdvice => "Lifestyle advice",
                PlanField::FollowUp => "Follow-up",
                PlanField::PatientEducation => "Patient education",
                PlanField::TreatmentGoal => "Treatment goal",
            },
        }
    }

    pub fn scope(self) -> SuggestionScope {
        match self {
            SuggestionField::Goal(_) => SuggestionScope::Goal,
            SuggestionField::Assessment(_) => SuggestionScope::Assessment,
            SuggestionField::Plan(_) => SuggestionScope::Plan,
        }
    }
}

impl FromStr for SuggestionField {
    type Err = ScribeError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let key = key.trim();
        SuggestionField::ALL
            .into_iter()
            .find(|field| field.key() == key)
            .ok_or_else(|| ScribeError::UnknownSuggestionField(key.to_string()))
    }
}

impl std::fmt::Display for SuggestionField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// A typed value for one suggestion field.
#[derive(Clone, Debug, PartialEq)]
pub enum Suggestion {
    GoalName(String),
    TargetDate(String),
    Comments(String),
    Metrics(Vec<Metric>),
    Actions(Vec<Action>),
    Assessment(AssessmentField, String),
    Plan(PlanField, String),
}

impl Suggestion {
    pub fn field(&self) -> SuggestionField {
        match self {
            Suggestion::GoalName(_) => SuggestionField::Goal(GoalField::GoalName),
            Suggestion::TargetDate(_) => SuggestionField::Goal(GoalField::TargetDate),
            Suggestion::Comments(_) => SuggestionField::Goal(GoalField::Comments),
            Suggestion::Metrics(_) => SuggestionField::Goal(GoalField::Metrics),
            Suggestion::Actions(_) => SuggestionField::Goal(GoalField::Actions),
            Suggestion::Assessment(field, _) => SuggestionField::Assessment(*field),
            Suggestion::Plan(field, _) => SuggestionField::Plan(*field),
        }
    }

    /// Build a suggestion from an untyped key and JSON value.
    ///
    /// # Errors
    ///
    /// - `ScribeError::UnknownSuggestionField` if `key` names no suggestion field.
    /// - `ScribeError::SuggestionValue` if `value` does not match the field's type (text for
    ///   scalar fields, an array of metrics or actions for list fields).
    pub fn from_key_value(key: &str, value: serde_json::Value) -> ScribeResult<Self> {
        let field: SuggestionField = key.parse()?;

        Ok(match field {
            SuggestionField::Goal(GoalField::GoalName) => {
                Suggestion::GoalName(typed_value(field, value)?)
            }
            SuggestionField::Goal(GoalField::TargetDate) => {
                Suggestion::TargetDate(typed_value(field, value)?)
            }
            SuggestionField::Goal(GoalField::Comments) => {
                Suggestion::Comments(typed_value(field, value)?)
            }
            SuggestionField::Goal(GoalField::Metrics) => {
                Suggestion::Metrics(typed_value(field, value)?)
            }
            SuggestionField::Goal(GoalField::Actions) => {
                Suggestion::Actions(typed_value(field, value)?)
            }
            SuggestionField::Assessment(inner) => {
                Suggestion::Assessment(inner, typed_value(field, value)?)
            }
            SuggestionField::Plan(inner) => Suggestion::Plan(inner, typed_value(field, value)?),
        })
    }
}

fn typed_value<T: DeserializeOwned>(
    field: SuggestionField,
    value: serde_json::Value,
) -> ScribeResult<T> {
    serde_json::from_value(value).map_err(|source| ScribeError::SuggestionValue { field, source })
}

/// Returns the suggestion currently offered for `field`, if any.
///
/// Text shadows that are blank are not offered.
pub fn pending_suggestion(note: &MedicalNote, field: SuggestionField) -> Option<Suggestion> {
    let goal = &note.goal_data;
    let review = &note.review_data;

    let offered = |text: Option<&str>| text.filter(|t| !is_blank(t)).map(str::to_owned);

    match field {
        SuggestionField::Goal(GoalField::GoalName) => {
            offered(goal.goal_name_suggestion.as_deref()).map(Suggestion::GoalName)
        }
        SuggestionField::Goal(GoalField::TargetDate) => {
            offered(goal.target_date_suggestion.as_deref()).map(Suggestion::TargetDate)
        }
        SuggestionField::Goal(GoalField::Comments) => {
            offered(goal.comments_suggestion.as_deref()).map(Suggestion::Comments)
        }
        SuggestionField::Goal(GoalField::Metrics) => {
            goal.metrics_suggestion.clone().map(Suggestion::Metrics)
        }
        SuggestionField::Goal(GoalField::Actions) => {
            goal.actions_suggestion.clone().map(Suggestion::Actions)
        }
        SuggestionField::Assessment(inner) => offered(
            review
                .assessment_suggestion
                .as_ref()
                .and_then(|pending| inner.shadow(pending)),
        )
        .map(|text| Suggestion::Assessment(inner, text)),
        SuggestionField::Plan(inner) => offered(
            review
                .plan_suggestion
                .as_ref()
                .and_then(|pending| inner.shadow(pending)),
        )
        .map(|text| Suggestion::Plan(inner, text)),
    }
}

/// Lists every field with a suggestion currently offered, in canonical order.
pub fn pending_fields(note: &MedicalNote) -> Vec<SuggestionField> {
    SuggestionField::ALL
        .into_iter()
        .filter(|field| pending_suggestion(note, *field).is_some())
        .collect()
}

/// Writes `suggestion` into its canonical field and clears the matching shadow.
///
/// Returns the updated note; `note` itself is not modified. Metrics and actions replace the
/// canonical list as a whole. For assessment and plan fields only the applied sub-field is
/// cleared from the shadow object, and the object is dropped once it is empty.
pub fn apply_suggestion(note: &MedicalNote, suggestion: Suggestion) -> MedicalNote {
    let mut next = note.clone();
    let field = suggestion.field();
    let goal = &mut next.goal_data;
    let review = &mut next.review_data;

    match suggestion {
        Suggestion::GoalName(value) => {
            goal.goal.goal_name = value;
            goal.goal_name_suggestion = None;
        }
        Suggestion::TargetDate(value) => {
            goal.goal.target_date = value;
            goal.target_date_suggestion = None;
        }
        Suggestion::Comments(value) => {
            goal.goal.comments = value;
            goal.comments_suggestion = None;
        }
        Suggestion::Metrics(value) => {
            goal.goal.metrics = value;
            goal.metrics_suggestion = None;
        }
        Suggestion::Actions(value) => {
            goal.goal.actions = value;
            goal.actions_suggestion = None;
        }
        Suggestion::Assessment(inner, value) => {
            *inner.canonical_mut(&mut review.assessment) = value;
            if let Some(pending) = review.assessment_suggestion.as_mut() {
                *inner.shadow_mut(pending) = None;
                if pending.is_empty() {
                    review.assessment_suggestion = None;
                }
            }
        }
        Suggestion::Plan(inner, value) => {
            *inner.canonical_mut(&mut review.plan) = value;
            if let Some(pending) = review.plan_suggestion.as_mut() {
                *inner.shadow_mut(pending) = None;
                if pending.is_empty() {
                    review.plan_suggestion = None;
                }
            }
        }
    }

    tracing::debug!(%field, "applied suggestion");
    next
}

/// Applies the suggestion currently pending for `field`.
///
/// # Errors
///
/// Returns `ScribeError::NoPendingSuggestion` if nothing is offered for `field`.
pub fn apply_pending(note: &MedicalNote, field: SuggestionField) -> ScribeResult<MedicalNote> {
    let suggestion =
        pending_suggestion(note, field).ok_or(ScribeError::NoPendingSuggestion(field))?;
    Ok(apply_suggestion(note, suggestion))
}

/// Applies every non-blank assessment suggestion at once and drops the shadow object.
///
/// Returns the updated note and the fields that changed.
///
/// # Errors
///
/// Returns `ScribeError::NoPendingGroup` if no assessment sub-field has a non-blank value.
pub fn apply_assessment_group(
    note: &MedicalNote,
) -> ScribeResult<(MedicalNote, Vec<SuggestionField>)> {
    let pending = note
        .review_data
        .assessment_suggestion
        .as_ref()
        .ok_or(ScribeError::NoPendingGroup(SuggestionScope::Assessment))?;

    let offered: Vec<(AssessmentField, String)> = AssessmentField::ALL
        .into_iter()
        .filter_map(|field| {
            field
                .shadow(pending)
                .filter(|text| !is_blank(text))
                .map(|text| (field, text.to_owned()))
        })
        .collect();

    if offered.is_empty() {
        return Err(ScribeError::NoPendingGroup(SuggestionScope::Assessment));
    }

    let mut next = note.clone();
    let mut applied = Vec::with_capacity(offered.len());
    for (field, text) in offered {
        *field.canonical_mut(&mut next.review_data.assessment) = text;
        applied.push(SuggestionField::Assessment(field));
    }
    next.review_data.assessment_suggestion = None;

    tracing::debug!(count = applied.len(), "applied assessment suggestions");
    Ok((next, applied))
}

/// Applies every non-blank plan suggestion at once and drops the shadow object.
///
/// # Errors
///
/// Returns `ScribeError::NoPendingGroup` if no plan sub-field has a non-blank value.
pub fn apply_plan_group(note: &MedicalNote) -> ScribeResult<(MedicalNote, Vec<SuggestionField>)> {
    let pending = note
        .review_data
        .plan_suggestion
        .as_ref()
        .ok_or(ScribeError::NoPendingGroup(SuggestionScope::Plan))?;

    let offered: Vec<(PlanField, String)> = PlanField::ALL
        .into_iter()
        .filter_map(|field| {
            field
                .shadow(pending)
                .filter(|text| !is_blank(text))
                .map(|text| (field, text.to_owned()))
        })
        .collect();

    if offered.is_empty() {
        return Err(ScribeError::NoPendingGroup(SuggestionScope::Plan));
    }

    let mut next = note.clone();
    let mut applied = Vec::with_capacity(offered.len());
    for (field, text) in offered {
        *field.canonical_mut(&mut next.review_data.plan) = text;
        applied.push(SuggestionField::Plan(field));
    }
    next.review_data.plan_suggestion = None;

    tracing::debug!(count = applied.len(), "applied plan suggestions");
    Ok((next, applied))
}
