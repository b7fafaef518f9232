//! Load/save of the persisted gradebook document.
//!
//! The document is a single JSON file rewritten in full on every save. Loads
//! check the bundled schema before decoding so that a corrupt file surfaces as
//! a distinct error instead of a partially populated registry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use jsonschema::validator_for;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::core::registry::Registry;

const DOCUMENT_SCHEMA: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../schemas/gradebook/v1.schema.json"
));

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("{} does not match the gradebook schema: {messages}", .path.display())]
    Schema { path: PathBuf, messages: String },
    #[error("decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid bundled schema: {0}")]
    BundledSchema(String),
    #[error("serialize gradebook: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}

impl StoreError {
    /// True when the file exists but its contents cannot be trusted.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            StoreError::Parse { .. } | StoreError::Schema { .. } | StoreError::Decode { .. }
        )
    }
}

/// Load the registry from `path`.
///
/// A missing file is not an error: it yields an empty registry.
pub fn load_registry(path: &Path) -> Result<Registry, StoreError> {
    debug!(path = %path.display(), "loading gradebook");
    let contents = match fs::read(path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no gradebook on disk, starting empty");
            return Ok(Registry::new());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let value: Value = serde_json::from_slice(&contents).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    validate_schema(path, &value)?;

    let mut registry = Registry::new();
    registry
        .load_value(value)
        .map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(
        students = registry.students().len(),
        courses = registry.courses().len(),
        "gradebook loaded"
    );
    Ok(registry)
}

/// Atomically write the whole registry to `path` (temp file + rename).
pub fn save_registry(path: &Path, registry: &Registry) -> Result<(), StoreError> {
    debug!(
        path = %path.display(),
        students = registry.students().len(),
        courses = registry.courses().len(),
        "writing gradebook"
    );
    let mut buf = serde_json::to_string_pretty(registry).map_err(StoreError::Encode)?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn validate_schema(path: &Path, document: &Value) -> Result<(), StoreError> {
    let schema: Value = serde_json::from_str(DOCUMENT_SCHEMA)
        .map_err(|err| StoreError::BundledSchema(err.to_string()))?;
    let compiled =
        validator_for(&schema).map_err(|err| StoreError::BundledSchema(err.to_string()))?;
    if compiled.is_valid(document) {
        return Ok(());
    }
    let messages = compiled
        .iter_errors(document)
        .map(|err| err.to_string())
        .collect::<Vec<_>>();
    Err(StoreError::Schema {
        path: path.to_path_buf(),
        messages: messages.join("; "),
    })
}

fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, contents).map_err(|source| StoreError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    if let Err(source) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(write_err(source));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_registry;

    #[test]
    fn missing_file_loads_empty_registry() {
        let temp = tempfile::tempdir().expect("tempdir");
        let registry = load_registry(&temp.path().join("student_data.json")).expect("load");
        assert!(registry.is_empty());
    }

    /// Verifies write -> load round-trip preserves students, grades and order.
    #[test]
    fn save_then_load_round_trips() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("nested").join("student_data.json");
        let registry = sample_registry();

        save_registry(&path, &registry).expect("save");
        let loaded = load_registry(&path).expect("load");
        assert_eq!(loaded, registry);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn saved_document_is_pretty_with_trailing_newline() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        save_registry(&path, &Registry::new()).expect("save");
        let contents = fs::read_to_string(&path).expect("read");
        assert_eq!(contents, "{\n  \"students\": [],\n  \"courses\": []\n}\n");
    }

    #[test]
    fn accepts_compact_document_with_null_grades() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        fs::write(
            &path,
            r#"{"students": [{"name": "Ada", "student_id": "S1", "courses": {"C1": 90, "C9": null}}], "courses": [{"name": "Algorithms", "code": "C1"}]}"#,
        )
        .expect("write");

        let registry = load_registry(&path).expect("load");
        let ada = registry.find_student("S1").expect("student");
        assert_eq!(ada.courses.get("C1"), Some(&Some(90)));
        assert_eq!(ada.courses.get("C9"), Some(&None));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        fs::write(&path, "{ not json").expect("write");

        let err = load_registry(&path).expect_err("parse error");
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.is_corrupt());
    }

    #[test]
    fn missing_required_field_is_a_schema_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        fs::write(&path, r#"{"students": [{"name": "Ada"}], "courses": []}"#).expect("write");

        let err = load_registry(&path).expect_err("schema error");
        assert!(matches!(err, StoreError::Schema { .. }), "got {err:?}");
        assert!(err.is_corrupt());
    }

    #[test]
    fn non_numeric_grade_is_a_schema_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        fs::write(
            &path,
            r#"{"students": [{"name": "Ada", "student_id": "S1", "courses": {"C1": "A"}}]}"#,
        )
        .expect("write");

        let err = load_registry(&path).expect_err("schema error");
        assert!(matches!(err, StoreError::Schema { .. }), "got {err:?}");
        assert!(err.is_corrupt());
    }

    /// `90.0` satisfies the schema's `integer` but does not decode as `i64`.
    #[test]
    fn fractional_grade_is_a_decode_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        fs::write(
            &path,
            r#"{"students": [{"name": "Ada", "student_id": "S1", "courses": {"C1": 90.0}}]}"#,
        )
        .expect("write");

        let err = load_registry(&path).expect_err("decode error");
        assert!(matches!(err, StoreError::Decode { .. }), "got {err:?}");
        assert!(err.is_corrupt());
    }

    #[test]
    fn grade_beyond_i64_is_a_decode_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        fs::write(
            &path,
            r#"{"students": [{"name": "Ada", "student_id": "S1", "courses": {"C1": 1e20}}]}"#,
        )
        .expect("write");

        let err = load_registry(&path).expect_err("decode error");
        assert!(matches!(err, StoreError::Decode { .. }), "got {err:?}");
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        let mut bytes = br#"{"students": [{"name": ""#.to_vec();
        bytes.extend_from_slice(&[0xff, 0xfe]);
        bytes.extend_from_slice(br#"", "student_id": "S1"}]}"#);
        fs::write(&path, bytes).expect("write");

        let err = load_registry(&path).expect_err("parse error");
        assert!(matches!(err, StoreError::Parse { .. }), "got {err:?}");
        assert!(err.is_corrupt());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let path = temp.path().join("student_data.json");
        fs::create_dir_all(&path).expect("mkdir");

        let err = save_registry(&path, &sample_registry()).expect_err("rename fails");
        assert!(matches!(err, StoreError::Write { .. }), "got {err:?}");
        assert!(!path.with_extension("json.tmp").exists());
    }
}
