//! Built-in sample consultation.
//!
//! A headache review with a pending metrics suggestion (adds "Sleep Quality") and pending
//! assessment and plan suggestions. Used by the `scribe` binary when no snapshot file is
//! given and throughout the tests.

use crate::model::MedicalScribeData;
use crate::snapshot;
use crate::ScribeResult;

const SAMPLE_JSON: &str = include_str!("../data/sample.json");

/// Returns the sample snapshot.
pub fn sample_scribe_data() -> ScribeResult<MedicalScribeData> {
    snapshot::parse_json(SAMPLE_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses_with_pending_suggestions() {
        let data = sample_scribe_data().unwrap();

        assert_eq!(data.transcript.len(), 5);
        assert_eq!(data.note.goal_data.goal.metrics.len(), 2);
        let suggested = data.note.goal_data.metrics_suggestion.as_ref().unwrap();
        assert_eq!(suggested.len(), 3);
        assert!(suggested.iter().any(|m| m.metric_name == "Sleep Quality"));
        assert!(data.note.review_data.assessment_suggestion.is_some());
        assert!(data.note.review_data.plan_suggestion.is_some());
    }
}
