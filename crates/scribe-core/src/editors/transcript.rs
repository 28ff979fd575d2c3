use super::{remove_row, row_mut};
use crate::model::{Speaker, Transcript};
use crate::validation::validate_transcript;
use crate::ScribeResult;
use chrono::{DateTime, SecondsFormat, Utc};

const COLLECTION: &str = "transcript";

/// Draft of the conversation transcript. Entry order is conversation order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TranscriptEditor {
    entries: Vec<Transcript>,
}

impl TranscriptEditor {
    pub fn new(entries: Vec<Transcript>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Transcript] {
        &self.entries
    }

    /// Appends an empty patient entry stamped with `now`.
    pub fn add_entry(&mut self, now: DateTime<Utc>) {
        self.entries.push(Transcript {
            time: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            speaker: Speaker::Patient,
            content: String::new(),
        });
    }

    pub fn remove_entry(&mut self, index: usize) -> ScribeResult<Transcript> {
        remove_row(&mut self.entries, index, COLLECTION)
    }

    pub fn set_speaker(&mut self, index: usize, speaker: Speaker) -> ScribeResult<()> {
        row_mut(&mut self.entries, index, COLLECTION)?.speaker = speaker;
        Ok(())
    }

    pub fn set_content(&mut self, index: usize, content: impl Into<String>) -> ScribeResult<()> {
        row_mut(&mut self.entries, index, COLLECTION)?.content = content.into();
        Ok(())
    }

    pub fn set_time(&mut self, index: usize, time: impl Into<String>) -> ScribeResult<()> {
        row_mut(&mut self.entries, index, COLLECTION)?.time = time.into();
        Ok(())
    }

    /// Returns the transcript to commit.
    ///
    /// # Errors
    ///
    /// Returns `ScribeError::Validation` if any entry has blank content.
    pub fn save(&self) -> ScribeResult<Vec<Transcript>> {
        validate_transcript(&self.entries)?;
        Ok(self.entries.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScribeError;
    use chrono::TimeZone;

    fn editor() -> TranscriptEditor {
        TranscriptEditor::new(vec![Transcript {
            time: "2024-05-10T09:15:00Z".into(),
            speaker: Speaker::Doctor,
            content: "What brings you in today?".into(),
        }])
    }

    #[test]
    fn test_add_entry_defaults() {
        let mut editor = editor();
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 9, 20, 0).unwrap();

        editor.add_entry(now);

        let added = &editor.entries()[1];
        assert_eq!(added.time, "2024-05-10T09:20:00.000Z");
        assert_eq!(added.speaker, Speaker::Patient);
        assert!(added.content.is_empty());
    }

    #[test]
    fn test_save_rejects_new_blank_entry() {
        let mut editor = editor();
        editor.add_entry(Utc::now());

        assert!(matches!(editor.save(), Err(ScribeError::Validation(_))));

        editor.set_content(1, "I keep getting headaches").unwrap();
        let saved = editor.save().unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[1].content, "I keep getting headaches");
    }

    #[test]
    fn test_row_updates() {
        let mut editor = editor();
        editor.set_speaker(0, Speaker::Nurse).unwrap();
        editor.set_time(0, "yesterday").unwrap();

        assert_eq!(editor.entries()[0].speaker, Speaker::Nurse);
        assert_eq!(editor.entries()[0].time, "yesterday");

        assert!(matches!(
            editor.set_content(3, "x"),
            Err(ScribeError::IndexOutOfRange { index: 3, len: 1, .. })
        ));
    }

    #[test]
    fn test_remove_entry() {
        let mut editor = editor();
        let removed = editor.remove_entry(0).unwrap();

        assert_eq!(removed.speaker, Speaker::Doctor);
        assert!(editor.entries().is_empty());
        assert!(editor.save().unwrap().is_empty());
    }
}
