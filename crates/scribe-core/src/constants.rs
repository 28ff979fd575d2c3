//! Constants used throughout the scribe core crate.
//!
//! Headings, fallback markers and date patterns for the EMR text output live here so the
//! formatter and its tests agree on a single spelling.

/// Title line of a complete medical note.
pub const NOTE_TITLE: &str = "# MEDICAL NOTE";

/// Date pattern for calendar dates, e.g. `Aug 10, 2024`.
pub const DATE_FORMAT: &str = "%b %-d, %Y";

/// Date-time pattern for transcript timestamps, e.g. `May 10, 2024 9:15 AM`.
pub const DATE_TIME_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

pub const HEADING_DEMOGRAPHICS: &str = "## PATIENT DEMOGRAPHICS";
pub const HEADING_CLINICAL_STATUS: &str = "## CLINICAL STATUS";
pub const HEADING_BIOMETRICS: &str = "## BIOMETRICS";
pub const HEADING_GOAL: &str = "## HEALTH GOAL";
pub const HEADING_METRICS: &str = "## METRICS";
pub const HEADING_ACTIONS: &str = "## ACTIONS";
pub const HEADING_SUBJECTIVE: &str = "## SUBJECTIVE";
pub const HEADING_OBJECTIVE: &str = "## OBJECTIVE";
pub const HEADING_ASSESSMENT: &str = "## ASSESSMENT";
pub const HEADING_PLAN: &str = "## PLAN";
pub const HEADING_PRESCRIPTIONS: &str = "## PRESCRIPTIONS";

pub const AGE_NOT_PROVIDED: &str = "Not provided";
pub const NONE_REPORTED: &str = "None reported";
pub const COMMENTS_NOT_PROVIDED: &str = "None provided";
pub const NO_METRICS: &str = "No metrics defined";
pub const NO_ACTIONS: &str = "No actions defined";
pub const ONE_TIME: &str = "One-time";

/// Upper bound of the clinical health score scale.
pub const HEALTH_SCORE_MAX: f64 = 100.0;

/// Default recording interval, in hours, for a freshly added metric or action.
pub const DEFAULT_INTERVAL_HOURS: u32 = 24;

/// How far ahead a blank goal's target date is placed.
pub const BLANK_GOAL_TARGET_MONTHS: u32 = 3;
