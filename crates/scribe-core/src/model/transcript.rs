use serde::{Deserialize, Serialize};

/// Who said a line of the consultation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    #[default]
    Patient,
    Doctor,
    Nurse,
    Other,
}

impl Speaker {
    /// Wire spelling, as stored in snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Speaker::Patient => "patient",
            Speaker::Doctor => "doctor",
            Speaker::Nurse => "nurse",
            Speaker::Other => "other",
        }
    }

    /// Upper-case label used in EMR text.
    pub fn emr_label(self) -> &'static str {
        match self {
            Speaker::Patient => "PATIENT",
            Speaker::Doctor => "DOCTOR",
            Speaker::Nurse => "NURSE",
            Speaker::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One utterance in the consultation transcript.
///
/// `time` is kept as the caller supplied it. It is usually an RFC 3339 timestamp, but a value
/// that fails to parse is still a valid entry and is rendered verbatim.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub time: String,
    pub speaker: Speaker,
    pub content: String,
}
