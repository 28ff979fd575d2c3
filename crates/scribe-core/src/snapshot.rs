//! Loading and writing `MedicalScribeData` snapshots.
//!
//! The scribe holds no store of its own. A host hands it a snapshot, either as JSON or YAML
//! text or as a file, and receives whole replacement records back through save hooks.
//! Parsing uses `serde_path_to_error` so a schema mismatch names the failing field
//! (e.g. `note.review_data.summary.health_score`).

use crate::model::MedicalScribeData;
use crate::{ScribeError, ScribeResult};
use std::path::Path;

/// Parse a snapshot from JSON text.
///
/// # Errors
///
/// Returns `ScribeError::Schema` with the failing field path if the JSON does not match the
/// record model.
pub fn parse_json(text: &str) -> ScribeResult<MedicalScribeData> {
    let mut deserializer = serde_json::Deserializer::from_str(text);
    let data = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|err| schema_error(err.path().to_string(), err.into_inner()))?;
    deserializer.end().map_err(ScribeError::Json)?;
    Ok(data)
}

/// Parse a snapshot from YAML text.
///
/// # Errors
///
/// Returns `ScribeError::Schema` with the failing field path if the YAML does not match the
/// record model.
pub fn parse_yaml(text: &str) -> ScribeResult<MedicalScribeData> {
    let deserializer = serde_yaml::Deserializer::from_str(text);
    serde_path_to_error::deserialize(deserializer)
        .map_err(|err| schema_error(err.path().to_string(), err.into_inner()))
}

/// Read a snapshot file. `.yaml` and `.yml` files are parsed as YAML, anything else as JSON.
pub fn load(path: &Path) -> ScribeResult<MedicalScribeData> {
    let text = std::fs::read_to_string(path).map_err(ScribeError::FileRead)?;

    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

    tracing::debug!(path = %path.display(), is_yaml, "loading snapshot");

    if is_yaml {
        parse_yaml(&text)
    } else {
        parse_json(&text)
    }
}

/// Render a snapshot as pretty-printed JSON.
pub fn to_json_pretty(data: &MedicalScribeData) -> ScribeResult<String> {
    serde_json::to_string_pretty(data).map_err(ScribeError::Json)
}

fn schema_error(path: String, source: impl std::fmt::Display) -> ScribeError {
    let path = if path.is_empty() || path == "." {
        "<root>".to_string()
    } else {
        path
    };
    ScribeError::Schema(format!("at {path}: {source}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_scribe_data;
    use std::io::Write;

    #[test]
    fn test_json_round_trip_preserves_suggestions() {
        let data = sample_scribe_data().unwrap();
        let json = to_json_pretty(&data).unwrap();

        assert!(json.contains("\"metrics_suggestion\""));
        assert!(json.contains("\"suggestion_rational\""));
        assert_eq!(parse_json(&json).unwrap(), data);
    }

    #[test]
    fn test_schema_error_names_field_path() {
        let mut value = serde_json::to_value(sample_scribe_data().unwrap()).unwrap();
        value["note"]["review_data"]["summary"]["health_score"] = serde_json::json!("high");

        let err = parse_json(&value.to_string()).unwrap_err();

        match err {
            ScribeError::Schema(message) => {
                assert!(message.contains("health_score"), "{message}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_speaker_is_rejected() {
        let text = r#"{
            "transcript": [{"time": "2024-05-10T09:15:00Z", "speaker": "robot", "content": "hi"}],
            "note": {}
        }"#;

        let err = parse_json(text).unwrap_err();
        assert!(matches!(err, ScribeError::Schema(_)));
    }

    #[test]
    fn test_trailing_garbage_is_rejected() {
        let json = format!("{} trailing", to_json_pretty(&sample_scribe_data().unwrap()).unwrap());
        assert!(matches!(parse_json(&json), Err(ScribeError::Json(_))));
    }

    #[test]
    fn test_load_yaml_file() {
        let data = sample_scribe_data().unwrap();
        let yaml = serde_yaml::to_string(&data).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consultation.yaml");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, data);
    }

    #[test]
    fn test_load_json_file() {
        let data = sample_scribe_data().unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("consultation.json");
        std::fs::write(&path, to_json_pretty(&data).unwrap()).unwrap();

        assert_eq!(load(&path).unwrap(), data);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, ScribeError::FileRead(_)));
    }
}
