//! Plain-text rendering of scribe records for pasting into an EMR.
//!
//! Every record type has a `*_render` method producing a block of labelled lines grouped
//! under `## HEADING` lines. Output is prose for humans, not a serialisation format, and is
//! never parsed back.
//!
//! Rendering never fails. Dates and timestamps are parsed only to reformat them; a value that
//! does not parse is printed exactly as stored and the rest of the document renders normally.

use crate::config::ScribeConfig;
use crate::constants::{
    AGE_NOT_PROVIDED, COMMENTS_NOT_PROVIDED, DATE_FORMAT, DATE_TIME_FORMAT, HEADING_ACTIONS,
    HEADING_ASSESSMENT, HEADING_BIOMETRICS, HEADING_CLINICAL_STATUS, HEADING_DEMOGRAPHICS,
    HEADING_GOAL, HEADING_METRICS, HEADING_OBJECTIVE, HEADING_PLAN, HEADING_PRESCRIPTIONS,
    HEADING_SUBJECTIVE, NONE_REPORTED, NOTE_TITLE, NO_ACTIONS, NO_METRICS, ONE_TIME,
};
use crate::model::{Action, HealthGoal, MedicalNote, Metric, Prescription, ProfileData};
use crate::model::{ReviewData, Transcript};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Date-time layouts accepted without an offset. These are read as wall-clock time.
const NAIVE_DATE_TIME_PATTERNS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const DATE_PATTERN: &str = "%Y-%m-%d";

/// Service rendering records as EMR text.
#[derive(Debug, Clone, Default)]
pub struct EmrFormatter {
    config: ScribeConfig,
}

impl EmrFormatter {
    /// Creates a formatter that converts zoned timestamps to `config`'s display offset.
    pub fn new(config: ScribeConfig) -> Self {
        Self { config }
    }

    /// Renders the conversation, one paragraph per entry in input order.
    ///
    /// Format per entry:
    /// ```text
    /// May 10, 2024 9:15 AM - PATIENT: I've had headaches for two weeks.
    /// ```
    /// Entries are separated by a blank line. An empty transcript renders as an empty string.
    pub fn transcript_render(&self, entries: &[Transcript]) -> String {
        entries
            .iter()
            .map(|entry| {
                format!(
                    "{} - {}: {}",
                    self.date_time_display(&entry.time),
                    entry.speaker.emr_label(),
                    entry.content
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Renders demographics, clinical status and biometrics, in that order.
    pub fn profile_render(&self, profile: &ProfileData) -> String {
        let demographics = &profile.demographics;
        let doctor = &profile.clinical_status.care_team.primary_doctor;
        let biometrics = &profile.lifestyle.biometrics;

        let age = demographics
            .age
            .as_deref()
            .filter(|age| !age.trim().is_empty())
            .unwrap_or(AGE_NOT_PROVIDED);

        let conditions = &profile.clinical_status.chronic_conditions;
        let conditions = if conditions.is_empty() {
            NONE_REPORTED.to_string()
        } else {
            conditions.join(", ")
        };

        let demographics_section = [
            HEADING_DEMOGRAPHICS.to_string(),
            format!(
                "Date of Birth: {}",
                self.date_display(&demographics.date_of_birth)
            ),
            format!("Gender: {}", demographics.gender),
            format!("Age: {age}"),
            format!("Location: {}", demographics.location.country_code),
        ];

        let clinical_section = [
            HEADING_CLINICAL_STATUS.to_string(),
            format!("Chronic Conditions: {conditions}"),
            format!("Primary Care: {} ({})", doctor.name, doctor.specialty),
            format!("Clinic: {}", doctor.clinic_name),
            format!("Contact: {}", doctor.phone_number),
        ];

        let biometrics_section = [
            HEADING_BIOMETRICS.to_string(),
            format!("Height: {} cm", biometrics.height),
            format!("Weight: {} kg", biometrics.weight),
            format!("BMI: {}", biometrics.bmi),
            format!("Health Score: {}/100", biometrics.health_score),
        ];

        sections(&[
            &demographics_section[..],
            &clinical_section[..],
            &biometrics_section[..],
        ])
    }

    /// Renders the goal overview followed by its metrics and actions.
    ///
    /// Empty metric or action lists keep their heading and print a "No ... defined" marker.
    pub fn goal_render(&self, goal: &HealthGoal) -> String {
        let comments = if goal.comments.trim().is_empty() {
            COMMENTS_NOT_PROVIDED
        } else {
            goal.comments.as_str()
        };

        let overview = [
            HEADING_GOAL.to_string(),
            format!("Goal: {}", goal.goal_name),
            format!("Target Date: {}", self.date_display(&goal.target_date)),
            format!("Comments: {comments}"),
        ];

        let mut metrics = vec![HEADING_METRICS.to_string()];
        if goal.metrics.is_empty() {
            metrics.push(NO_METRICS.to_string());
        } else {
            metrics.extend(goal.metrics.iter().map(metric_line));
        }

        let mut actions = vec![HEADING_ACTIONS.to_string()];
        if goal.actions.is_empty() {
            actions.push(NO_ACTIONS.to_string());
        } else {
            actions.extend(goal.actions.iter().map(|action| self.action_block(action)));
        }

        sections(&[&overview[..], &metrics[..], &actions[..]])
    }

    /// Renders a review as a SOAP note.
    ///
    /// The prescriptions section is appended only when at least one prescription exists.
    pub fn review_render(&self, review: &ReviewData) -> String {
        let subjective = [
            HEADING_SUBJECTIVE.to_string(),
            format!("Chief Complaint: {}", review.subjective.chief_complaint),
            format!(
                "History of Present Illness: {}",
                review.subjective.history_of_present_illness
            ),
        ];

        let objective = [
            HEADING_OBJECTIVE.to_string(),
            format!(
                "Examination Findings: {}",
                review.objective.examination_findings
            ),
            format!("Investigations: {}", review.objective.investigations),
        ];

        let assessment = [
            HEADING_ASSESSMENT.to_string(),
            format!("Primary Diagnosis: {}", review.assessment.primary_diagnosis),
            format!(
                "Differential Diagnosis: {}",
                review.assessment.differential_diagnosis
            ),
            format!("Reasoning: {}", review.assessment.diagnosis_reasoning),
            format!("Status: {}", review.assessment.status),
        ];

        let plan = [
            HEADING_PLAN.to_string(),
            format!("Management: {}", review.plan.management),
            format!("Lifestyle Advice: {}", review.plan.lifestyle_advice),
            format!("Patient Education: {}", review.plan.patient_education),
            format!("Follow-up: {}", review.plan.follow_up),
            format!("Treatment Goal: {}", review.plan.treatment_goal),
        ];

        let prescriptions: Vec<String> = std::iter::once(HEADING_PRESCRIPTIONS.to_string())
            .chain(review.prescription.iter().map(prescription_block))
            .collect();

        let mut blocks: Vec<&[String]> = vec![
            &subjective[..],
            &objective[..],
            &assessment[..],
            &plan[..],
        ];
        if !review.prescription.is_empty() {
            blocks.push(&prescriptions[..]);
        }

        sections(&blocks)
    }

    /// Renders the complete note, dated with the current UTC clock.
    pub fn note_render(&self, note: &MedicalNote) -> String {
        self.note_render_at(note, Utc::now())
    }

    /// Renders the complete note as generated at `generated_at`.
    ///
    /// Layout: title, date line, then the profile, review and goal blocks separated by blank
    /// lines.
    pub fn note_render_at(&self, note: &MedicalNote, generated_at: DateTime<Utc>) -> String {
        let date = generated_at
            .with_timezone(&self.config.display_offset())
            .format(DATE_FORMAT);

        format!(
            "{NOTE_TITLE}\nDate: {date}\n\n{}\n\n{}\n\n{}",
            self.profile_render(&note.profile_data),
            self.review_render(&note.review_data),
            self.goal_render(&note.goal_data.goal),
        )
    }
}

// Date handling and per-item blocks
impl EmrFormatter {
    fn action_block(&self, action: &Action) -> String {
        let frequency = if action.interval > 0 {
            format!("Every {} hours", action.interval)
        } else {
            ONE_TIME.to_string()
        };
        format!(
            "- {}: {}\n  Frequency: {} until {}",
            action.name,
            action.description,
            frequency,
            self.date_display(&action.action_end_date)
        )
    }

    /// Formats a calendar date, falling back to the raw text.
    fn date_display(&self, raw: &str) -> String {
        match self.parse_wall_clock(raw) {
            Some(value) => value.format(DATE_FORMAT).to_string(),
            None => {
                tracing::debug!(raw, "date did not parse, rendering as stored");
                raw.to_string()
            }
        }
    }

    /// Formats a date with 12-hour clock time, falling back to the raw text.
    fn date_time_display(&self, raw: &str) -> String {
        match self.parse_wall_clock(raw) {
            Some(value) => value.format(DATE_TIME_FORMAT).to_string(),
            None => {
                tracing::debug!(raw, "timestamp did not parse, rendering as stored");
                raw.to_string()
            }
        }
    }

    /// Parses `raw` into the wall-clock time that should be displayed.
    ///
    /// Zoned RFC 3339 values are shifted to the configured display offset. Values without an
    /// offset are already wall-clock time. A bare date is midnight of that day.
    fn parse_wall_clock(&self, raw: &str) -> Option<NaiveDateTime> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        if let Ok(zoned) = DateTime::parse_from_rfc3339(raw) {
            return Some(
                zoned
                    .with_timezone(&self.config.display_offset())
                    .naive_local(),
            );
        }

        NAIVE_DATE_TIME_PATTERNS
            .iter()
            .find_map(|pattern| NaiveDateTime::parse_from_str(raw, pattern).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, DATE_PATTERN)
                    .ok()
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })
    }
}

fn metric_line(metric: &Metric) -> String {
    format!(
        "- {}: Target {} {} (Check every {} hours)",
        metric.metric_name, metric.target_value, metric.unit, metric.interval
    )
}

fn prescription_block(med: &Prescription) -> String {
    format!(
        "- {} {} {}, {} for {}\n  Instructions: {}",
        med.medication_name, med.dosage, med.route, med.frequency, med.duration, med.instructions
    )
}

/// Joins each section's lines with newlines and the sections with a blank line.
fn sections(blocks: &[&[String]]) -> String {
    blocks
        .iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AssessmentStatus, Speaker};
    use crate::sample::sample_scribe_data;
    use chrono::{FixedOffset, TimeZone};

    fn formatter() -> EmrFormatter {
        EmrFormatter::new(ScribeConfig::utc())
    }

    fn entry(time: &str, speaker: Speaker, content: &str) -> Transcript {
        Transcript {
            time: time.into(),
            speaker,
            content: content.into(),
        }
    }

    fn prescription() -> Prescription {
        Prescription {
            medication_name: "Ibuprofen".into(),
            dosage: "400mg".into(),
            route: "oral".into(),
            frequency: "every 8 hours as needed".into(),
            duration: "5 days".into(),
            instructions: "Take with food".into(),
        }
    }

    #[test]
    fn test_transcript_formats_time_and_speaker() {
        let text = formatter().transcript_render(&[entry(
            "2024-05-10T14:05:00Z",
            Speaker::Doctor,
            "How long has this been going on?",
        )]);

        assert_eq!(
            text,
            "May 10, 2024 2:05 PM - DOCTOR: How long has this been going on?"
        );
    }

    #[test]
    fn test_transcript_contains_date_parts_for_valid_timestamps() {
        let cases = [
            ("2023-01-03T00:30:00Z", "Jan", "3,", "2023", "12:30 AM"),
            ("2024-12-31T23:59:59.123Z", "Dec", "31,", "2024", "11:59 PM"),
            ("2024-07-04T12:00:00+00:00", "Jul", "4,", "2024", "12:00 PM"),
        ];

        for (time, month, day, year, clock) in cases {
            let text = formatter().transcript_render(&[entry(time, Speaker::Nurse, "ok")]);
            assert!(text.contains(month), "{text}");
            assert!(text.contains(day), "{text}");
            assert!(text.contains(year), "{text}");
            assert!(text.contains(clock), "{text}");
            assert!(text.contains("NURSE: ok"), "{text}");
        }
    }

    #[test]
    fn test_transcript_converts_to_display_offset() {
        let offset = FixedOffset::east_opt(-5 * 3600).unwrap();
        let formatter = EmrFormatter::new(ScribeConfig::new(offset));

        let text = formatter.transcript_render(&[entry(
            "2024-05-10T02:15:00Z",
            Speaker::Patient,
            "Morning",
        )]);

        assert!(text.starts_with("May 9, 2024 9:15 PM - PATIENT"), "{text}");
    }

    #[test]
    fn test_transcript_naive_time_is_wall_clock() {
        let offset = FixedOffset::east_opt(3 * 3600).unwrap();
        let formatter = EmrFormatter::new(ScribeConfig::new(offset));

        let text =
            formatter.transcript_render(&[entry("2024-05-10T09:15", Speaker::Other, "Hello")]);

        assert_eq!(text, "May 10, 2024 9:15 AM - OTHER: Hello");
    }

    #[test]
    fn test_transcript_unparsable_time_is_printed_raw() {
        let text = formatter().transcript_render(&[
            entry("yesterday-ish", Speaker::Patient, "It started then"),
            entry("2024-05-10T09:16:00Z", Speaker::Doctor, "I see"),
        ]);

        assert_eq!(
            text,
            "yesterday-ish - PATIENT: It started then\n\nMay 10, 2024 9:16 AM - DOCTOR: I see"
        );
    }

    #[test]
    fn test_transcript_empty_renders_empty() {
        assert_eq!(formatter().transcript_render(&[]), "");
    }

    #[test]
    fn test_profile_layout() {
        let data = sample_scribe_data().unwrap();
        let text = formatter().profile_render(&data.note.profile_data);

        let expected = "## PATIENT DEMOGRAPHICS\n\
Date of Birth: Mar 15, 1985\n\
Gender: female\n\
Age: 39\n\
Location: GB\n\
\n\
## CLINICAL STATUS\n\
Chronic Conditions: Migraine, Mild iron deficiency anaemia\n\
Primary Care: Dr Sarah Okafor (General Practice)\n\
Clinic: Riverside Medical Centre\n\
Contact: +44 20 7946 0321\n\
\n\
## BIOMETRICS\n\
Height: 168 cm\n\
Weight: 64.5 kg\n\
BMI: 22.9\n\
Health Score: 72/100";

        assert_eq!(text, expected);
    }

    #[test]
    fn test_profile_fallbacks() {
        let mut profile = sample_scribe_data().unwrap().note.profile_data;
        profile.demographics.age = None;
        profile.demographics.date_of_birth = "15th of March".into();
        profile.clinical_status.chronic_conditions.clear();

        let text = formatter().profile_render(&profile);

        assert!(text.contains("Age: Not provided"));
        assert!(text.contains("Date of Birth: 15th of March"));
        assert!(text.contains("Chronic Conditions: None reported"));
        assert!(text.contains("## BIOMETRICS"));
    }

    #[test]
    fn test_profile_blank_age_is_not_provided() {
        let mut profile = sample_scribe_data().unwrap().note.profile_data;
        profile.demographics.age = Some("  ".into());

        let text = formatter().profile_render(&profile);
        assert!(text.contains("Age: Not provided"));
    }

    #[test]
    fn test_goal_layout() {
        let goal = HealthGoal {
            goal_name: "Manage Headache Symptoms".into(),
            target_date: "2024-08-10".into(),
            comments: String::new(),
            metrics: vec![Metric {
                metric_name: "Headache Frequency".into(),
                unit: "episodes/week".into(),
                interval: 72,
                target_value: 1.0,
            }],
            actions: vec![
                Action {
                    name: "Hydration".into(),
                    description: "Drink at least 8 glasses of water daily.".into(),
                    interval: 24,
                    action_end_date: "2024-08-10".into(),
                },
                Action {
                    name: "Pain Relief".into(),
                    description: "Take pain relief as needed.".into(),
                    interval: 0,
                    action_end_date: "not sure".into(),
                },
            ],
        };

        let text = formatter().goal_render(&goal);

        let expected = "## HEALTH GOAL\n\
Goal: Manage Headache Symptoms\n\
Target Date: Aug 10, 2024\n\
Comments: None provided\n\
\n\
## METRICS\n\
- Headache Frequency: Target 1 episodes/week (Check every 72 hours)\n\
\n\
## ACTIONS\n\
- Hydration: Drink at least 8 glasses of water daily.\n  \
Frequency: Every 24 hours until Aug 10, 2024\n\
- Pain Relief: Take pain relief as needed.\n  Frequency: One-time until not sure";

        assert_eq!(text, expected);
    }

    #[test]
    fn test_goal_empty_lists_print_markers() {
        let goal = HealthGoal {
            goal_name: "Walk more".into(),
            target_date: "2024-09-01".into(),
            comments: "Start slowly".into(),
            metrics: vec![],
            actions: vec![],
        };

        let text = formatter().goal_render(&goal);

        assert!(text.contains("## METRICS\nNo metrics defined"));
        assert!(text.contains("## ACTIONS\nNo actions defined"));
        assert!(text.contains("Comments: Start slowly"));
        assert_eq!(text.matches("No metrics defined").count(), 1);
        assert_eq!(text.matches("No actions defined").count(), 1);
    }

    #[test]
    fn test_goal_bad_target_date_is_raw() {
        let goal = HealthGoal {
            goal_name: "Walk more".into(),
            target_date: "2024-13-45".into(),
            ..HealthGoal::default()
        };

        let text = formatter().goal_render(&goal);
        assert!(text.contains("Target Date: 2024-13-45"));
    }

    #[test]
    fn test_review_without_prescriptions_omits_heading() {
        let mut review = sample_scribe_data().unwrap().note.review_data;
        review.prescription.clear();

        let text = formatter().review_render(&review);

        assert!(!text.contains("PRESCRIPTIONS"));
        assert!(text.ends_with(&format!("Treatment Goal: {}", review.plan.treatment_goal)));
    }

    #[test]
    fn test_review_single_prescription_block() {
        let mut review = sample_scribe_data().unwrap().note.review_data;
        review.prescription = vec![prescription()];

        let text = formatter().review_render(&review);

        assert_eq!(text.matches(HEADING_PRESCRIPTIONS).count(), 1);
        let tail = text.split(HEADING_PRESCRIPTIONS).nth(1).unwrap();
        assert_eq!(tail.matches("\n- ").count(), 1);
        assert!(tail.ends_with(concat!(
            "\n- Ibuprofen 400mg oral, every 8 hours as needed for 5 days\n",
            "  Instructions: Take with food"
        )));
    }

    #[test]
    fn test_review_soap_order_and_status() {
        let mut review = sample_scribe_data().unwrap().note.review_data;
        review.assessment.status = AssessmentStatus::Worsening;

        let text = formatter().review_render(&review);

        let positions: Vec<usize> = [
            HEADING_SUBJECTIVE,
            HEADING_OBJECTIVE,
            HEADING_ASSESSMENT,
            HEADING_PLAN,
        ]
        .iter()
        .map(|heading| text.find(heading).unwrap())
        .collect();
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(text.contains("Status: worsening"));
        assert!(text.contains("\n\n## OBJECTIVE\n"));
    }

    #[test]
    fn test_note_layout() {
        let data = sample_scribe_data().unwrap();
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 10, 16, 0, 0).unwrap();
        let formatter = formatter();

        let text = formatter.note_render_at(&data.note, generated_at);

        let expected = format!(
            "# MEDICAL NOTE\nDate: May 10, 2024\n\n{}\n\n{}\n\n{}",
            formatter.profile_render(&data.note.profile_data),
            formatter.review_render(&data.note.review_data),
            formatter.goal_render(&data.note.goal_data.goal),
        );
        assert_eq!(text, expected);

        let profile = text.find(HEADING_DEMOGRAPHICS).unwrap();
        let review = text.find(HEADING_SUBJECTIVE).unwrap();
        let goal = text.find(HEADING_GOAL).unwrap();
        assert!(profile < review && review < goal);
    }

    #[test]
    fn test_note_date_uses_display_offset() {
        let data = sample_scribe_data().unwrap();
        let generated_at = Utc.with_ymd_and_hms(2024, 5, 10, 23, 30, 0).unwrap();
        let offset = FixedOffset::east_opt(2 * 3600).unwrap();

        let text =
            EmrFormatter::new(ScribeConfig::new(offset)).note_render_at(&data.note, generated_at);

        assert!(text.starts_with("# MEDICAL NOTE\nDate: May 11, 2024\n"));
    }

    #[test]
    fn test_note_render_uses_current_date() {
        let data = sample_scribe_data().unwrap();

        let before = Utc::now().format(DATE_FORMAT).to_string();
        let text = formatter().note_render(&data.note);
        let after = Utc::now().format(DATE_FORMAT).to_string();

        let date_line = text.lines().nth(1).unwrap();
        assert!(date_line == format!("Date: {before}") || date_line == format!("Date: {after}"));
    }
}
