//! The session that owns a consultation's records.
//!
//! `ScribeSession` is the single owner of a [`MedicalScribeData`] snapshot. Every change goes
//! through it: editors hand back validated replacements, suggestions are merged into a new
//! note, and the session swaps the affected record in whole. Hosts observe commits through
//! [`SaveHooks`] and user-facing outcomes through the notice queue.
//!
//! Each tab is either being read or edited. Starting an edit hands out an editor seeded with a
//! copy of the record; a failed save leaves the tab in edit mode and the record untouched.

use crate::clipboard::Clipboard;
use crate::config::ScribeConfig;
use crate::editors::{GoalEditor, ProfileEditor, ReviewEditor, TranscriptEditor};
use crate::emr::EmrFormatter;
use crate::model::{GoalData, MedicalNote, MedicalScribeData, ProfileData, ReviewData, Transcript};
use crate::notice::Notice;
use crate::suggestion::{self, Suggestion, SuggestionField};
use crate::{ScribeError, ScribeResult};
use chrono::NaiveDate;

/// The four record views of a consultation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tab {
    Transcript,
    Profile,
    Goals,
    Review,
}

impl Tab {
    fn index(self) -> usize {
        match self {
            Tab::Transcript => 0,
            Tab::Profile => 1,
            Tab::Goals => 2,
            Tab::Review => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Read,
    Edit,
}

/// A record that can be exported to the clipboard on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopySection {
    Transcript,
    Profile,
    Goal,
    Review,
}

impl CopySection {
    pub fn label(self) -> &'static str {
        match self {
            CopySection::Transcript => "Transcript",
            CopySection::Profile => "Patient profile",
            CopySection::Goal => "Health goal",
            CopySection::Review => "Medical review",
        }
    }
}

/// Callbacks fired after a record has been committed.
///
/// Every hook is optional. A hook sees the committed value, after the session has replaced its
/// own copy.
#[derive(Default)]
pub struct SaveHooks {
    on_save_transcript: Option<Box<dyn FnMut(&[Transcript])>>,
    on_save_profile: Option<Box<dyn FnMut(&ProfileData)>>,
    on_save_goal: Option<Box<dyn FnMut(&GoalData)>>,
    on_save_review: Option<Box<dyn FnMut(&ReviewData)>>,
    on_save_all: Option<Box<dyn FnMut(&MedicalScribeData)>>,
}

impl SaveHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_save_transcript(mut self, hook: impl FnMut(&[Transcript]) + 'static) -> Self {
        self.on_save_transcript = Some(Box::new(hook));
        self
    }

    pub fn on_save_profile(mut self, hook: impl FnMut(&ProfileData) + 'static) -> Self {
        self.on_save_profile = Some(Box::new(hook));
        self
    }

    pub fn on_save_goal(mut self, hook: impl FnMut(&GoalData) + 'static) -> Self {
        self.on_save_goal = Some(Box::new(hook));
        self
    }

    pub fn on_save_review(mut self, hook: impl FnMut(&ReviewData) + 'static) -> Self {
        self.on_save_review = Some(Box::new(hook));
        self
    }

    pub fn on_save_all(mut self, hook: impl FnMut(&MedicalScribeData) + 'static) -> Self {
        self.on_save_all = Some(Box::new(hook));
        self
    }
}

impl std::fmt::Debug for SaveHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SaveHooks")
            .field("on_save_transcript", &self.on_save_transcript.is_some())
            .field("on_save_profile", &self.on_save_profile.is_some())
            .field("on_save_goal", &self.on_save_goal.is_some())
            .field("on_save_review", &self.on_save_review.is_some())
            .field("on_save_all", &self.on_save_all.is_some())
            .finish()
    }
}

/// Owner of one consultation's records, view modes and pending notices.
#[derive(Debug)]
pub struct ScribeSession {
    data: MedicalScribeData,
    formatter: EmrFormatter,
    modes: [ViewMode; 4],
    hooks: SaveHooks,
    notices: Vec<Notice>,
}

impl ScribeSession {
    pub fn new(data: MedicalScribeData, config: ScribeConfig) -> Self {
        Self {
            data,
            formatter: EmrFormatter::new(config),
            modes: [ViewMode::Read; 4],
            hooks: SaveHooks::default(),
            notices: Vec::new(),
        }
    }

    pub fn with_hooks(mut self, hooks: SaveHooks) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn data(&self) -> &MedicalScribeData {
        &self.data
    }

    pub fn note(&self) -> &MedicalNote {
        &self.data.note
    }

    pub fn formatter(&self) -> &EmrFormatter {
        &self.formatter
    }

    pub fn mode(&self, tab: Tab) -> ViewMode {
        self.modes[tab.index()]
    }

    fn set_mode(&mut self, tab: Tab, mode: ViewMode) {
        self.modes[tab.index()] = mode;
    }

    /// Returns and clears the queued notices, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn edit_transcript(&mut self) -> TranscriptEditor {
        self.set_mode(Tab::Transcript, ViewMode::Edit);
        TranscriptEditor::new(self.data.transcript.clone())
    }

    pub fn edit_profile(&mut self) -> ProfileEditor {
        self.set_mode(Tab::Profile, ViewMode::Edit);
        ProfileEditor::new(self.data.note.profile_data.clone())
    }

    pub fn edit_goal(&mut self) -> GoalEditor {
        self.set_mode(Tab::Goals, ViewMode::Edit);
        GoalEditor::new(self.data.note.goal_data.goal.clone())
    }

    /// Starts editing a replacement goal from a blank template.
    pub fn edit_new_goal(&mut self, today: NaiveDate) -> GoalEditor {
        self.set_mode(Tab::Goals, ViewMode::Edit);
        GoalEditor::new_blank(today)
    }

    pub fn edit_review(&mut self) -> ReviewEditor {
        self.set_mode(Tab::Review, ViewMode::Edit);
        ReviewEditor::new(self.data.note.review_data.clone())
    }

    /// Leaves edit mode for `tab`, discarding whatever editor the host was holding.
    pub fn cancel_edit(&mut self, tab: Tab) {
        tracing::debug!(?tab, "edit cancelled");
        self.set_mode(tab, ViewMode::Read);
    }

    fn reject(&mut self, tab: Tab, err: ScribeError) -> ScribeError {
        let description = match &err {
            ScribeError::Validation(message) => message.clone(),
            other => other.to_string(),
        };
        tracing::debug!(?tab, error = %err, "save rejected");
        self.notices
            .push(Notice::destructive("Validation Error", description));
        err
    }

    fn committed(&mut self, tab: Tab, title: &'static str, description: &str) {
        tracing::debug!(?tab, "record replaced");
        self.notices.push(Notice::success(title, description));
        self.set_mode(tab, ViewMode::Read);
    }

    /// Commits the transcript draft.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Validation` if the draft is rejected. The session keeps its
    /// current transcript and stays in edit mode.
    pub fn save_transcript(&mut self, editor: &TranscriptEditor) -> ScribeResult<()> {
        let entries = editor
            .save()
            .map_err(|err| self.reject(Tab::Transcript, err))?;

        self.data.transcript = entries;
        if let Some(hook) = self.hooks.on_save_transcript.as_mut() {
            hook(self.data.transcript.as_slice());
        }
        self.committed(
            Tab::Transcript,
            "Transcript saved",
            "The conversation transcript has been updated successfully.",
        );
        Ok(())
    }

    /// Commits the profile draft.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Validation` if the draft is rejected.
    pub fn save_profile(&mut self, editor: &ProfileEditor) -> ScribeResult<()> {
        let profile = editor
            .save()
            .map_err(|err| self.reject(Tab::Profile, err))?;

        self.data.note.profile_data = profile;
        if let Some(hook) = self.hooks.on_save_profile.as_mut() {
            hook(&self.data.note.profile_data);
        }
        self.committed(
            Tab::Profile,
            "Profile updated",
            "Patient profile has been updated successfully.",
        );
        Ok(())
    }

    /// Commits the goal draft. Pending goal suggestions are kept.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Validation` if the draft is rejected.
    pub fn save_goal(&mut self, editor: &GoalEditor) -> ScribeResult<()> {
        let goal = editor.save().map_err(|err| self.reject(Tab::Goals, err))?;

        self.data.note.goal_data = GoalData {
            goal,
            ..self.data.note.goal_data.clone()
        };
        if let Some(hook) = self.hooks.on_save_goal.as_mut() {
            hook(&self.data.note.goal_data);
        }
        self.committed(
            Tab::Goals,
            "Health goal saved",
            "Your health goal has been saved successfully.",
        );
        Ok(())
    }

    /// Commits the review draft.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Validation` if the draft is rejected.
    pub fn save_review(&mut self, editor: &ReviewEditor) -> ScribeResult<()> {
        let review = editor
            .save()
            .map_err(|err| self.reject(Tab::Review, err))?;

        self.data.note.review_data = review;
        if let Some(hook) = self.hooks.on_save_review.as_mut() {
            hook(&self.data.note.review_data);
        }
        self.committed(
            Tab::Review,
            "Medical review updated",
            "The medical review has been updated successfully.",
        );
        Ok(())
    }

    /// Hands the whole aggregate to the `on_save_all` hook.
    pub fn save_all(&mut self) {
        if let Some(hook) = self.hooks.on_save_all.as_mut() {
            hook(&self.data);
        }
        tracing::debug!("all records saved");
        self.notices.push(Notice::success(
            "All changes saved",
            "The complete medical record has been saved.",
        ));
    }

    pub fn render_section(&self, section: CopySection) -> String {
        let note = &self.data.note;
        match section {
            CopySection::Transcript => self.formatter.transcript_render(&self.data.transcript),
            CopySection::Profile => self.formatter.profile_render(&note.profile_data),
            CopySection::Goal => self.formatter.goal_render(&note.goal_data.goal),
            CopySection::Review => self.formatter.review_render(&note.review_data),
        }
    }

    /// Writes one section as EMR text to `clipboard`.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Clipboard` if the write fails. A failure notice is queued either
    /// way and the write is not retried.
    pub fn copy_section(
        &mut self,
        section: CopySection,
        clipboard: &mut dyn Clipboard,
    ) -> ScribeResult<()> {
        let text = self.render_section(section);
        self.copy_text(section.label(), &text, clipboard)
    }

    /// Writes the complete note, stamped with today's date, to `clipboard`.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Clipboard` if the write fails.
    pub fn copy_complete_note(&mut self, clipboard: &mut dyn Clipboard) -> ScribeResult<()> {
        let text = self.formatter.note_render(&self.data.note);
        self.copy_text("Complete medical note", &text, clipboard)
    }

    fn copy_text(
        &mut self,
        label: &str,
        text: &str,
        clipboard: &mut dyn Clipboard,
    ) -> ScribeResult<()> {
        match clipboard.write_text(text) {
            Ok(()) => {
                self.notices.push(Notice::success(
                    "Copied to clipboard",
                    format!("{label} copied as EMR text."),
                ));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(section = label, error = %err, "clipboard write failed");
                self.notices
                    .push(Notice::destructive("Copy failed", err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Merges a typed suggestion into the note.
    pub fn apply_suggestion(&mut self, suggestion: Suggestion) {
        let field = suggestion.field();
        self.data.note = suggestion::apply_suggestion(&self.data.note, suggestion);
        self.applied(&[field]);
    }

    /// Accepts the suggestion currently offered for `field`.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::NoPendingSuggestion` if nothing is offered. The note is unchanged.
    pub fn apply_pending(&mut self, field: SuggestionField) -> ScribeResult<()> {
        self.data.note = suggestion::apply_pending(&self.data.note, field)?;
        self.applied(&[field]);
        Ok(())
    }

    /// Merges a suggestion given as an untyped key and JSON value.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::UnknownSuggestionField` or `ScribeError::SuggestionValue` if the
    /// key or value is not usable. The note is unchanged.
    pub fn apply_suggestion_key(
        &mut self,
        key: &str,
        value: serde_json::Value,
    ) -> ScribeResult<()> {
        match Suggestion::from_key_value(key, value) {
            Ok(suggestion) => {
                self.apply_suggestion(suggestion);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(key, error = %err, "suggestion rejected");
                Err(err)
            }
        }
    }

    /// Accepts every pending assessment suggestion.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::NoPendingGroup` if there is nothing to apply.
    pub fn apply_assessment_suggestions(&mut self) -> ScribeResult<()> {
        let (note, fields) = suggestion::apply_assessment_group(&self.data.note)?;
        self.data.note = note;
        self.applied(&fields);
        Ok(())
    }

    /// Accepts every pending plan suggestion.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::NoPendingGroup` if there is nothing to apply.
    pub fn apply_plan_suggestions(&mut self) -> ScribeResult<()> {
        let (note, fields) = suggestion::apply_plan_group(&self.data.note)?;
        self.data.note = note;
        self.applied(&fields);
        Ok(())
    }

    fn applied(&mut self, fields: &[SuggestionField]) {
        let labels: Vec<&str> = fields.iter().map(|field| field.label()).collect();
        self.notices.push(Notice::success(
            "Suggestion applied",
            format!("{} updated with the suggested value.", labels.join(", ")),
        ));
    }
}
