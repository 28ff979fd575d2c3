//! Copy-on-edit drafts for each record.
//!
//! An editor is seeded with a clone of the session's record and mutated freely through typed
//! field updates. Nothing it does is visible to the session until `save` validates the draft
//! and hands back a whole replacement value.

mod goal;
mod profile;
mod review;
mod transcript;

pub use goal::{ActionField, GoalEditor, MetricField};
pub use profile::{BiometricsField, DemographicsField, DoctorField, ProfileEditor};
pub use review::{
    AssessmentUpdate, InvestigationField, ObjectiveField, PlanUpdate, PrescriptionField,
    ReviewEditor, SubjectiveField, SummaryField,
};
pub use transcript::TranscriptEditor;

use crate::{ScribeError, ScribeResult};

fn row_mut<'a, T>(
    rows: &'a mut [T],
    index: usize,
    collection: &'static str,
) -> ScribeResult<&'a mut T> {
    let len = rows.len();
    rows.get_mut(index).ok_or(ScribeError::IndexOutOfRange {
        collection,
        index,
        len,
    })
}

fn remove_row<T>(rows: &mut Vec<T>, index: usize, collection: &'static str) -> ScribeResult<T> {
    if index >= rows.len() {
        return Err(ScribeError::IndexOutOfRange {
            collection,
            index,
            len: rows.len(),
        });
    }
    Ok(rows.remove(index))
}

/// Splits comma-separated input into trimmed, non-empty items.
fn split_csv(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
}
