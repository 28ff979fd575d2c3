use super::{remove_row, row_mut};
use crate::constants::BLANK_GOAL_TARGET_MONTHS;
use crate::model::{Action, HealthGoal, Metric};
use crate::validation::validate_goal;
use crate::ScribeResult;
use chrono::{Months, NaiveDate};

/// A single-field update to a metric row.
#[derive(Clone, Debug, PartialEq)]
pub enum MetricField {
    Name(String),
    Unit(String),
    Interval(u32),
    TargetValue(f64),
}

/// A single-field update to an action row.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionField {
    Name(String),
    Description(String),
    Interval(u32),
    EndDate(String),
}

/// Draft of a health goal.
///
/// Only the canonical goal is edited here. Pending suggestions stay on the session's record
/// and are not touched by saving a goal.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GoalEditor {
    draft: HealthGoal,
}

impl GoalEditor {
    pub fn new(goal: HealthGoal) -> Self {
        Self { draft: goal }
    }

    /// Starts a fresh goal due three months after `today`, with one empty metric and one
    /// empty action to fill in.
    pub fn new_blank(today: NaiveDate) -> Self {
        let target = today
            .checked_add_months(Months::new(BLANK_GOAL_TARGET_MONTHS))
            .unwrap_or(today);

        Self::new(HealthGoal {
            goal_name: String::new(),
            target_date: target.format("%Y-%m-%d").to_string(),
            comments: String::new(),
            metrics: vec![Metric::default()],
            actions: vec![Action::default()],
        })
    }

    pub fn goal(&self) -> &HealthGoal {
        &self.draft
    }

    pub fn set_goal_name(&mut self, name: impl Into<String>) {
        self.draft.goal_name = name.into();
    }

    pub fn set_target_date(&mut self, date: impl Into<String>) {
        self.draft.target_date = date.into();
    }

    pub fn set_comments(&mut self, comments: impl Into<String>) {
        self.draft.comments = comments.into();
    }

    pub fn add_metric(&mut self) {
        self.draft.metrics.push(Metric::default());
    }

    pub fn update_metric(&mut self, index: usize, field: MetricField) -> ScribeResult<()> {
        let metric = row_mut(&mut self.draft.metrics, index, "metrics")?;
        match field {
            MetricField::Name(name) => metric.metric_name = name,
            MetricField::Unit(unit) => metric.unit = unit,
            MetricField::Interval(hours) => metric.interval = hours,
            MetricField::TargetValue(value) => metric.target_value = value,
        }
        Ok(())
    }

    pub fn remove_metric(&mut self, index: usize) -> ScribeResult<Metric> {
        remove_row(&mut self.draft.metrics, index, "metrics")
    }

    pub fn add_action(&mut self) {
        self.draft.actions.push(Action::default());
    }

    pub fn update_action(&mut self, index: usize, field: ActionField) -> ScribeResult<()> {
        let action = row_mut(&mut self.draft.actions, index, "actions")?;
        match field {
            ActionField::Name(name) => action.name = name,
            ActionField::Description(description) => action.description = description,
            ActionField::Interval(hours) => action.interval = hours,
            ActionField::EndDate(date) => action.action_end_date = date,
        }
        Ok(())
    }

    pub fn remove_action(&mut self, index: usize) -> ScribeResult<Action> {
        remove_row(&mut self.draft.actions, index, "actions")
    }

    /// Returns the goal to commit, with unnamed metric and action rows dropped.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Validation` if the goal has no name, or has neither a complete
    /// metric nor a complete action.
    pub fn save(&self) -> ScribeResult<HealthGoal> {
        validate_goal(&self.draft)
    }
}
