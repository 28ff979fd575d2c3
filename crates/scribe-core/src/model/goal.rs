use crate::constants::DEFAULT_INTERVAL_HOURS;
use serde::{Deserialize, Serialize};

/// A measurable target tracked towards a health goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub metric_name: String,
    pub unit: String,
    /// Recording interval in hours.
    pub interval: u32,
    pub target_value: f64,
}

impl Default for Metric {
    fn default() -> Self {
        Self {
            metric_name: String::new(),
            unit: String::new(),
            interval: DEFAULT_INTERVAL_HOURS,
            target_value: 0.0,
        }
    }
}

/// Something the patient does towards a health goal.
///
/// An `interval` of zero marks a one-time action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    pub description: String,
    pub interval: u32,
    pub action_end_date: String,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            interval: DEFAULT_INTERVAL_HOURS,
            action_end_date: String::new(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthGoal {
    pub goal_name: String,
    /// Calendar date, normally `YYYY-MM-DD`.
    pub target_date: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub metrics: Vec<Metric>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// A health goal together with any pending suggested replacements.
///
/// Each `*_suggestion` field shadows the canonical field of the same name and is only present
/// while a suggestion is waiting for the clinician to accept it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalData {
    #[serde(flatten)]
    pub goal: HealthGoal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_name_suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date_suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments_suggestion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics_suggestion: Option<Vec<Metric>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions_suggestion: Option<Vec<Action>>,
    /// Free-text explanation attached by whatever produced the suggestions.
    #[serde(
        default,
        rename = "suggestion_rational",
        alias = "suggestion_rationale",
        skip_serializing_if = "Option::is_none"
    )]
    pub suggestion_rationale: Option<String>,
}

impl GoalData {
    pub fn new(goal: HealthGoal) -> Self {
        Self {
            goal,
            ..Self::default()
        }
    }

    /// Returns `true` while any goal-level suggestion is still pending.
    pub fn has_pending_suggestions(&self) -> bool {
        self.goal_name_suggestion.is_some()
            || self.target_date_suggestion.is_some()
            || self.comments_suggestion.is_some()
            || self.metrics_suggestion.is_some()
            || self.actions_suggestion.is_some()
    }
}
