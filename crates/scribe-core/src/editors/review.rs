use super::{remove_row, row_mut};
use crate::model::{AssessmentStatus, Investigation, Prescription, ReviewData};
use crate::validation::validate_review;
use crate::ScribeResult;

#[derive(Clone, Debug, PartialEq)]
pub enum SubjectiveField {
    ChiefComplaint(String),
    HistoryOfPresentIllness(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectiveField {
    ExaminationFindings(String),
    Investigations(String),
}

/// A text update to the assessment. The status is set with [`ReviewEditor::set_status`].
#[derive(Clone, Debug, PartialEq)]
pub enum AssessmentUpdate {
    PrimaryDiagnosis(String),
    DifferentialDiagnosis(String),
    DiagnosisReasoning(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PlanUpdate {
    Management(String),
    LifestyleAdvice(String),
    FollowUp(String),
    PatientEducation(String),
    TreatmentGoal(String),
    PlanReasoning(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum PrescriptionField {
    MedicationName(String),
    Dosage(String),
    Route(String),
    Frequency(String),
    Duration(String),
    Instructions(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum InvestigationField {
    TestType(String),
    Reason(String),
    Instructions(String),
    ScheduledTime(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SummaryField {
    HealthScore(f64),
    DailyProgressNotes(Option<String>),
    DischargeInstructions(Option<String>),
}

/// Draft of the SOAP review, its prescriptions and investigations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReviewEditor {
    draft: ReviewData,
}

impl ReviewEditor {
    pub fn new(review: ReviewData) -> Self {
        Self { draft: review }
    }

    pub fn review(&self) -> &ReviewData {
        &self.draft
    }

    pub fn update_subjective(&mut self, field: SubjectiveField) {
        let subjective = &mut self.draft.subjective;
        match field {
            SubjectiveField::ChiefComplaint(text) => subjective.chief_complaint = text,
            SubjectiveField::HistoryOfPresentIllness(text) => {
                subjective.history_of_present_illness = text
            }
        }
    }

    pub fn update_objective(&mut self, field: ObjectiveField) {
        let objective = &mut self.draft.objective;
        match field {
            ObjectiveField::ExaminationFindings(text) => objective.examination_findings = text,
            ObjectiveField::Investigations(text) => objective.investigations = text,
        }
    }

    pub fn update_assessment(&mut self, field: AssessmentUpdate) {
        let assessment = &mut self.draft.assessment;
        match field {
            AssessmentUpdate::PrimaryDiagnosis(text) => assessment.primary_diagnosis = text,
            AssessmentUpdate::DifferentialDiagnosis(text) => {
                assessment.differential_diagnosis = text
            }
            AssessmentUpdate::DiagnosisReasoning(text) => assessment.diagnosis_reasoning = text,
        }
    }

    pub fn set_status(&mut self, status: AssessmentStatus) {
        self.draft.assessment.status = status;
    }

    pub fn update_plan(&mut self, field: PlanUpdate) {
        let plan = &mut self.draft.plan;
        match field {
            PlanUpdate::Management(text) => plan.management = text,
            PlanUpdate::LifestyleAdvice(text) => plan.lifestyle_advice = text,
            PlanUpdate::FollowUp(text) => plan.follow_up = text,
            PlanUpdate::PatientEducation(text) => plan.patient_education = text,
            PlanUpdate::TreatmentGoal(text) => plan.treatment_goal = text,
            PlanUpdate::PlanReasoning(text) => plan.plan_reasoning = text,
        }
    }

    pub fn set_next_review(&mut self, date: impl Into<String>) {
        self.draft.next_review = date.into();
    }

    pub fn add_prescription(&mut self) {
        self.draft.prescription.push(Prescription::default());
    }

    pub fn update_prescription(
        &mut self,
        index: usize,
        field: PrescriptionField,
    ) -> ScribeResult<()> {
        let prescription = row_mut(&mut self.draft.prescription, index, "prescription")?;
        match field {
            PrescriptionField::MedicationName(text) => prescription.medication_name = text,
            PrescriptionField::Dosage(text) => prescription.dosage = text,
            PrescriptionField::Route(text) => prescription.route = text,
            PrescriptionField::Frequency(text) => prescription.frequency = text,
            PrescriptionField::Duration(text) => prescription.duration = text,
            PrescriptionField::Instructions(text) => prescription.instructions = text,
        }
        Ok(())
    }

    pub fn remove_prescription(&mut self, index: usize) -> ScribeResult<Prescription> {
        remove_row(&mut self.draft.prescription, index, "prescription")
    }

    pub fn add_investigation(&mut self) {
        self.draft.investigation.push(Investigation::default());
    }

    pub fn update_investigation(
        &mut self,
        index: usize,
        field: InvestigationField,
    ) -> ScribeResult<()> {
        let investigation = row_mut(&mut self.draft.investigation, index, "investigation")?;
        match field {
            InvestigationField::TestType(text) => investigation.test_type = text,
            InvestigationField::Reason(text) => investigation.reason = text,
            InvestigationField::Instructions(text) => investigation.instructions = text,
            InvestigationField::ScheduledTime(text) => investigation.scheduled_time = text,
        }
        Ok(())
    }

    pub fn remove_investigation(&mut self, index: usize) -> ScribeResult<Investigation> {
        remove_row(&mut self.draft.investigation, index, "investigation")
    }

    pub fn update_summary(&mut self, field: SummaryField) {
        let summary = &mut self.draft.summary;
        match field {
            SummaryField::HealthScore(score) => summary.health_score = score,
            SummaryField::DailyProgressNotes(notes) => summary.daily_progress_notes = notes,
            SummaryField::DischargeInstructions(text) => summary.discharge_instructions = text,
        }
    }

    /// Returns the review to commit. Pending suggestions on the draft are carried through.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Validation` if the summary health score is outside `0..=100`.
    pub fn save(&self) -> ScribeResult<ReviewData> {
        validate_review(&self.draft)?;
        Ok(self.draft.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_scribe_data;
    use crate::ScribeError;

    fn editor() -> ReviewEditor {
        ReviewEditor::new(sample_scribe_data().unwrap().note.review_data)
    }

    #[test]
    fn test_soap_updates() {
        let mut editor = editor();
        editor.update_subjective(SubjectiveField::ChiefComplaint("Dizziness".into()));
        editor.update_objective(ObjectiveField::Investigations("None".into()));
        editor.update_assessment(AssessmentUpdate::PrimaryDiagnosis("Vertigo".into()));
        editor.set_status(AssessmentStatus::Improving);
        editor.update_plan(PlanUpdate::PlanReasoning("Reassess after rest".into()));
        editor.set_next_review("2024-07-01");

        let saved = editor.save().unwrap();
        assert_eq!(saved.subjective.chief_complaint, "Dizziness");
        assert_eq!(saved.objective.investigations, "None");
        assert_eq!(saved.assessment.primary_diagnosis, "Vertigo");
        assert_eq!(saved.assessment.status, AssessmentStatus::Improving);
        assert_eq!(saved.plan.plan_reasoning, "Reassess after rest");
        assert_eq!(saved.next_review, "2024-07-01");
        assert!(saved.plan_suggestion.is_some());
    }

    #[test]
    fn test_prescription_rows() {
        let mut editor = editor();
        editor.add_prescription();
        editor
            .update_prescription(1, PrescriptionField::MedicationName("Paracetamol".into()))
            .unwrap();
        editor
            .update_prescription(1, PrescriptionField::Dosage("1 g".into()))
            .unwrap();

        assert_eq!(editor.review().prescription.len(), 2);
        assert_eq!(editor.review().prescription[1].dosage, "1 g");

        let removed = editor.remove_prescription(0).unwrap();
        assert_eq!(removed.medication_name, "Ibuprofen");
        assert!(matches!(
            editor.update_prescription(1, PrescriptionField::Route("oral".into())),
            Err(ScribeError::IndexOutOfRange {
                collection: "prescription",
                ..
            })
        ));
    }

    #[test]
    fn test_investigation_rows() {
        let mut editor = ReviewEditor::new(ReviewData::default());
        editor.add_investigation();
        editor
            .update_investigation(0, InvestigationField::TestType("MRI".into()))
            .unwrap();
        editor
            .update_investigation(0, InvestigationField::ScheduledTime("2024-06-01T10:00".into()))
            .unwrap();

        assert_eq!(editor.review().investigation[0].test_type, "MRI");
        assert!(editor.remove_investigation(1).is_err());
        assert!(editor.remove_investigation(0).is_ok());
    }

    #[test]
    fn test_summary_health_score_is_validated() {
        let mut editor = editor();
        editor.update_summary(SummaryField::HealthScore(-5.0));
        assert!(matches!(editor.save(), Err(ScribeError::Validation(_))));

        editor.update_summary(SummaryField::HealthScore(65.0));
        editor.update_summary(SummaryField::DischargeInstructions(Some("Rest".into())));
        let saved = editor.save().unwrap();
        assert_eq!(saved.summary.health_score, 65.0);
        assert_eq!(saved.summary.discharge_instructions.as_deref(), Some("Rest"));
    }
}
