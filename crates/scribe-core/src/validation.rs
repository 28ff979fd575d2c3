//! Save-time validation for edited records.
//!
//! Editors accept any intermediate state while the clinician is typing. These checks run
//! once, when a draft is committed, and decide whether it may replace the session's record.
//! Every failure is a `ScribeError::Validation` carrying a message fit to show the user.

use crate::constants::HEALTH_SCORE_MAX;
use crate::model::{Action, Biometrics, HealthGoal, Metric, ProfileData, ReviewData, Transcript};
use crate::{ScribeError, ScribeResult};
use scribe_types::{is_blank, NonEmptyText};

pub(crate) const TRANSCRIPT_CONTENT_REQUIRED: &str = "All transcript entries must have content";
pub(crate) const GOAL_FIELDS_REQUIRED: &str = "Please fill in all required fields.";

/// Checks that every transcript entry has non-blank content.
///
/// # Errors
///
/// Returns `ScribeError::Validation` if any entry's trimmed content is empty.
pub fn validate_transcript(entries: &[Transcript]) -> ScribeResult<()> {
    for (index, entry) in entries.iter().enumerate() {
        NonEmptyText::new(&entry.content).map_err(|err| {
            tracing::debug!(index, error = %err, "transcript entry has no content");
            ScribeError::Validation(TRANSCRIPT_CONTENT_REQUIRED.into())
        })?;
    }
    Ok(())
}

/// A metric counts towards a valid goal once it has a name, a unit and a finite target.
pub fn is_valid_metric(metric: &Metric) -> bool {
    !is_blank(&metric.metric_name) && !is_blank(&metric.unit) && metric.target_value.is_finite()
}

/// An action counts towards a valid goal once it has a name, a description and an end date.
pub fn is_valid_action(action: &Action) -> bool {
    !is_blank(&action.name) && !is_blank(&action.description) && !is_blank(&action.action_end_date)
}

/// Validates a goal draft and returns the value to commit.
///
/// A goal needs a name and at least one valid metric or one valid action. The committed goal
/// name is trimmed. Metrics and actions left without a name are dropped from the returned
/// goal; other partially filled rows are kept as entered.
///
/// # Errors
///
/// Returns `ScribeError::Validation` if the goal name is blank or no metric or action is valid.
pub fn validate_goal(goal: &HealthGoal) -> ScribeResult<HealthGoal> {
    let name = NonEmptyText::new(&goal.goal_name).ok();
    let has_metric = goal.metrics.iter().any(is_valid_metric);
    let has_action = goal.actions.iter().any(is_valid_action);

    let name = match name {
        Some(name) if has_metric || has_action => name,
        name => {
            tracing::debug!(
                has_name = name.is_some(),
                has_metric,
                has_action,
                "goal draft rejected"
            );
            return Err(ScribeError::Validation(GOAL_FIELDS_REQUIRED.into()));
        }
    };
    tracing::debug!(goal = name.as_str(), "goal draft accepted");

    Ok(HealthGoal {
        goal_name: name.into_string(),
        metrics: goal
            .metrics
            .iter()
            .filter(|metric| !is_blank(&metric.metric_name))
            .cloned()
            .collect(),
        actions: goal
            .actions
            .iter()
            .filter(|action| !is_blank(&action.name))
            .cloned()
            .collect(),
        ..goal.clone()
    })
}

/// Checks that a health score lies within `0..=100`.
///
/// # Errors
///
/// Returns `ScribeError::Validation` for scores outside the range, including NaN.
pub fn validate_health_score(score: f64) -> ScribeResult<()> {
    if (0.0..=HEALTH_SCORE_MAX).contains(&score) {
        Ok(())
    } else {
        Err(ScribeError::Validation(format!(
            "Health score must be between 0 and {HEALTH_SCORE_MAX}"
        )))
    }
}

fn validate_biometrics(biometrics: &Biometrics) -> ScribeResult<()> {
    let measures = [
        ("Height", biometrics.height),
        ("Weight", biometrics.weight),
        ("BMI", biometrics.bmi),
    ];

    for (label, value) in measures {
        if !value.is_finite() || value < 0.0 {
            return Err(ScribeError::Validation(format!(
                "{label} must be a non-negative number"
            )));
        }
    }

    validate_health_score(biometrics.health_score)
}

/// Validates a profile draft.
///
/// # Errors
///
/// Returns `ScribeError::Validation` if a biometric is negative or not finite, or the health
/// score is outside `0..=100`.
pub fn validate_profile(profile: &ProfileData) -> ScribeResult<()> {
    validate_biometrics(&profile.lifestyle.biometrics)
}

/// Validates a review draft.
///
/// # Errors
///
/// Returns `ScribeError::Validation` if the summary health score is outside `0..=100`.
pub fn validate_review(review: &ReviewData) -> ScribeResult<()> {
    validate_health_score(review.summary.health_score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Speaker;

    fn entry(content: &str) -> Transcript {
        Transcript {
            time: "2024-05-10T09:15:00Z".into(),
            speaker: Speaker::Doctor,
            content: content.into(),
        }
    }

    fn metric(name: &str, unit: &str) -> Metric {
        Metric {
            metric_name: name.into(),
            unit: unit.into(),
            ..Metric::default()
        }
    }

    #[test]
    fn test_transcript_rejects_whitespace_content() {
        assert!(validate_transcript(&[entry("Hello"), entry("Fine thanks")]).is_ok());
        assert!(validate_transcript(&[]).is_ok());

        let err = validate_transcript(&[entry("Hello"), entry("   ")]).unwrap_err();
        assert!(matches!(err, ScribeError::Validation(msg) if msg == TRANSCRIPT_CONTENT_REQUIRED));
    }

    #[test]
    fn test_goal_requires_name() {
        let goal = HealthGoal {
            goal_name: "  ".into(),
            metrics: vec![metric("Steps", "steps/day")],
            ..HealthGoal::default()
        };

        assert!(matches!(validate_goal(&goal), Err(ScribeError::Validation(_))));
    }

    #[test]
    fn test_goal_requires_a_valid_metric_or_action() {
        let mut goal = HealthGoal {
            goal_name: "Walk more".into(),
            metrics: vec![metric("Steps", "")],
            actions: vec![Action::default()],
            ..HealthGoal::default()
        };
        assert!(validate_goal(&goal).is_err());

        goal.actions = vec![Action {
            name: "Walk".into(),
            description: "Walk after lunch".into(),
            action_end_date: "2024-09-01".into(),
            ..Action::default()
        }];
        assert!(validate_goal(&goal).is_ok());
    }

    #[test]
    fn test_goal_drops_unnamed_rows() {
        let goal = HealthGoal {
            goal_name: "Walk more".into(),
            metrics: vec![metric("Steps", "steps/day"), metric("", "kg")],
            actions: vec![Action::default()],
            ..HealthGoal::default()
        };

        let saved = validate_goal(&goal).unwrap();

        assert_eq!(saved.metrics, vec![metric("Steps", "steps/day")]);
        assert!(saved.actions.is_empty());
        assert_eq!(saved.goal_name, "Walk more");
    }

    #[test]
    fn test_goal_name_is_trimmed_on_commit() {
        let goal = HealthGoal {
            goal_name: "  Walk more \n".into(),
            metrics: vec![metric("Steps", "steps/day")],
            ..HealthGoal::default()
        };

        assert_eq!(validate_goal(&goal).unwrap().goal_name, "Walk more");
    }

    #[test]
    fn test_non_finite_metric_target_is_not_valid() {
        let mut m = metric("Steps", "steps/day");
        m.target_value = f64::NAN;
        assert!(!is_valid_metric(&m));
    }

    #[test]
    fn test_health_score_range() {
        assert!(validate_health_score(0.0).is_ok());
        assert!(validate_health_score(100.0).is_ok());
        assert!(validate_health_score(100.5).is_err());
        assert!(validate_health_score(-1.0).is_err());
        assert!(validate_health_score(f64::NAN).is_err());
    }

    #[test]
    fn test_profile_rejects_negative_weight() {
        let mut profile = ProfileData::default();
        assert!(validate_profile(&profile).is_ok());

        profile.lifestyle.biometrics.weight = -3.0;
        let err = validate_profile(&profile).unwrap_err();
        assert!(matches!(err, ScribeError::Validation(msg) if msg.starts_with("Weight")));

        profile.lifestyle.biometrics.weight = 60.0;
        profile.lifestyle.biometrics.height = f64::INFINITY;
        assert!(validate_profile(&profile).is_err());
    }

    #[test]
    fn test_review_health_score() {
        let mut review = ReviewData::default();
        review.summary.health_score = 140.0;
        assert!(validate_review(&review).is_err());
    }
}
