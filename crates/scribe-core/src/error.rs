use crate::clipboard::ClipboardError;
use crate::suggestion::{SuggestionField, SuggestionScope};

#[derive(Debug, thiserror::Error)]
pub enum ScribeError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("{collection} index {index} is out of range (len {len})")]
    IndexOutOfRange {
        collection: &'static str,
        index: usize,
        len: usize,
    },

    #[error("unknown suggestion field: {0}")]
    UnknownSuggestionField(String),
    #[error("no pending suggestion for {0}")]
    NoPendingSuggestion(SuggestionField),
    #[error("no pending {0} suggestions")]
    NoPendingGroup(SuggestionScope),
    #[error("suggested value for {field} has the wrong shape: {source}")]
    SuggestionValue {
        field: SuggestionField,
        #[source]
        source: serde_json::Error,
    },

    #[error("clipboard write failed: {0}")]
    Clipboard(#[from] ClipboardError),

    #[error("failed to read snapshot file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to parse JSON: {0}")]
    Json(serde_json::Error),
    #[error("snapshot schema mismatch: {0}")]
    Schema(String),
}

pub type ScribeResult<T> = std::result::Result<T, ScribeError>;
