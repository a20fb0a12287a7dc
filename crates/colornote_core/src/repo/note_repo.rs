//! Note repository contract and JSON-file implementation.
//!
//! # Responsibility
//! - Persist each note as one self-contained JSON record named `<id>.json`.
//! - Rebuild the full note list from the store directory, sorted by order.
//! - Decode legacy record shapes (`order` as text or number, missing keys).
//!
//! # Invariants
//! - Record body holds exactly `title`, `content`, `order`, `color`; the id
//!   lives only in the filename.
//! - Writes go through a sibling temp file and a rename, so a failed write
//!   never touches other records.
//! - A missing store directory loads as an empty list.
//! - Strict loading aborts on the first malformed record.

use crate::config::{StoreConfig, NOTE_FILE_EXTENSION};
use crate::model::color::{color_from_record, Rgb};
use crate::model::note::{json_type_name, Note, NoteId, NoteValidationError};
use log::{info, warn};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

const RECORD_INDENT: &[u8] = b"    ";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence and decoding failures for note records.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("i/o error at `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid JSON in `{}`: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("note record `{}` is not a JSON object", path.display())]
    NotAnObject { path: PathBuf },
    #[error("note record `{}` has non-integer order `{value}`", path.display())]
    MalformedOrder { path: PathBuf, value: String },
    #[error("invalid note record `{}`: {source}", path.display())]
    InvalidRecord {
        path: PathBuf,
        #[source]
        source: NoteValidationError,
    },
}

/// Result of a lenient load: the readable notes plus every skipped record.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Notes sorted ascending by effective order.
    pub notes: Vec<Note>,
    /// Records that failed to decode, with the reason.
    pub skipped: Vec<(PathBuf, RepoError)>,
}

/// Repository interface for note records.
pub trait NoteRepository {
    /// Location of the record for `id`.
    fn record_path(&self, id: &NoteId) -> PathBuf;
    /// Creates or fully overwrites the record for `note`.
    fn save_note(&self, note: &Note) -> RepoResult<()>;
    /// Removes the record for `id`; `true` only if it is gone afterwards.
    fn delete_note(&self, id: &NoteId) -> bool;
    /// Loads every note, failing on the first malformed record.
    fn list_notes(&self) -> RepoResult<Vec<Note>>;
    /// Loads every readable note and reports the ones that were skipped.
    fn list_notes_lenient(&self) -> RepoResult<LoadReport>;
}

/// Store of one pretty-printed JSON file per note.
#[derive(Debug, Clone)]
pub struct JsonNoteRepository {
    config: StoreConfig,
}

impl JsonNoteRepository {
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn record_paths(&self) -> RepoResult<Vec<PathBuf>> {
        let dir = self.config.notes_dir();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(io_error(dir, source)),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|source| io_error(dir, source))?.path();
            if is_record_path(&path) {
                paths.push(path);
            }
        }
        // Equal orders load in filename order.
        paths.sort();
        Ok(paths)
    }
}

impl NoteRepository for JsonNoteRepository {
    fn record_path(&self, id: &NoteId) -> PathBuf {
        self.config.record_path(id)
    }

    fn save_note(&self, note: &Note) -> RepoResult<()> {
        let dir = self.config.notes_dir();
        fs::create_dir_all(dir).map_err(|source| io_error(dir, source))?;

        let path = self.record_path(note.id());
        let bytes = encode_record(note).map_err(|source| RepoError::Json {
            path: path.clone(),
            source,
        })?;

        let temp_path = dir.join(format!("{}.{NOTE_FILE_EXTENSION}.tmp", note.id().as_str()));
        fs::write(&temp_path, &bytes).map_err(|source| io_error(&temp_path, source))?;
        if let Err(source) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            warn!(
                "event=note_save module=repo status=error note_id={} error_code=rename_failed error={}",
                note.id(),
                source
            );
            return Err(io_error(&path, source));
        }

        info!(
            "event=note_save module=repo status=ok note_id={} bytes={}",
            note.id(),
            bytes.len()
        );
        Ok(())
    }

    fn delete_note(&self, id: &NoteId) -> bool {
        let path = self.record_path(id);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("event=note_delete module=repo status=skip note_id={id} reason=missing");
                return false;
            }
            Err(err) => {
                warn!("event=note_delete module=repo status=error note_id={id} error={err}");
            }
        }

        // Unknown existence counts as still present.
        let removed = !path.try_exists().unwrap_or(true);
        info!(
            "event=note_delete module=repo status={} note_id={id}",
            if removed { "ok" } else { "error" }
        );
        removed
    }

    fn list_notes(&self) -> RepoResult<Vec<Note>> {
        let started_at = Instant::now();
        let mut notes = Vec::new();
        for path in self.record_paths()? {
            match load_note_file(&path) {
                Ok(note) => notes.push(note),
                Err(err) => {
                    warn!(
                        "event=notes_load module=repo status=error duration_ms={} path={} error={}",
                        started_at.elapsed().as_millis(),
                        path.display(),
                        err
                    );
                    return Err(err);
                }
            }
        }
        sort_by_order(&mut notes);

        info!(
            "event=notes_load module=repo status=ok mode=strict count={} duration_ms={}",
            notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(notes)
    }

    fn list_notes_lenient(&self) -> RepoResult<LoadReport> {
        let started_at = Instant::now();
        let mut report = LoadReport::default();
        for path in self.record_paths()? {
            match load_note_file(&path) {
                Ok(note) => report.notes.push(note),
                Err(err) => {
                    warn!(
                        "event=note_skip module=repo status=skip path={} error={}",
                        path.display(),
                        err
                    );
                    report.skipped.push((path, err));
                }
            }
        }
        sort_by_order(&mut report.notes);

        info!(
            "event=notes_load module=repo status=ok mode=lenient count={} skipped={} duration_ms={}",
            report.notes.len(),
            report.skipped.len(),
            started_at.elapsed().as_millis()
        );
        Ok(report)
    }
}

/// Loads every note under `config`, sorted by order.
///
/// Returns an empty list when the directory does not exist.
pub fn list_all_notes(config: &StoreConfig) -> RepoResult<Vec<Note>> {
    JsonNoteRepository::new(config.clone()).list_notes()
}

/// Lenient variant of [`list_all_notes`] that skips malformed records.
pub fn list_all_notes_lenient(config: &StoreConfig) -> RepoResult<LoadReport> {
    JsonNoteRepository::new(config.clone()).list_notes_lenient()
}

#[derive(Serialize)]
struct RecordBody<'a> {
    title: &'a str,
    content: &'a str,
    order: Option<u64>,
    color: Option<Rgb>,
}

fn encode_record(note: &Note) -> Result<Vec<u8>, serde_json::Error> {
    let body = RecordBody {
        title: note.title(),
        content: note.content(),
        order: note.explicit_order(),
        color: note.color(),
    };
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(RECORD_INDENT);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    body.serialize(&mut serializer)?;
    Ok(buffer)
}

fn load_note_file(path: &Path) -> RepoResult<Note> {
    let raw = fs::read_to_string(path).map_err(|source| io_error(path, source))?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| RepoError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let Value::Object(fields) = value else {
        return Err(RepoError::NotAnObject {
            path: path.to_path_buf(),
        });
    };
    decode_record(path, &fields)
}

fn decode_record(path: &Path, fields: &Map<String, Value>) -> RepoResult<Note> {
    let invalid = |source: NoteValidationError| RepoError::InvalidRecord {
        path: path.to_path_buf(),
        source,
    };

    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let id = NoteId::parse(stem).map_err(invalid)?;

    let title = title_field(path, fields.get("title"));
    let content = text_field(fields.get("content"))
        .map_err(|found| invalid(NoteValidationError::ContentNotText { found }))?;
    let order = order_from_record(fields.get("order"))
        .map_err(|value| RepoError::MalformedOrder {
            path: path.to_path_buf(),
            value,
        })?;
    let color = color_from_record(fields.get("color")).unwrap_or_else(|err| {
        warn!(
            "event=note_color module=repo status=skip path={} error={}",
            path.display(),
            err
        );
        None
    });

    Ok(Note::from_parts(id, title, content, order, color))
}

/// Title is kept as-is: non-string values fall back to their JSON text.
fn title_field(path: &Path, value: Option<&Value>) -> String {
    text_field(value).unwrap_or_else(|found| {
        warn!(
            "event=note_title module=repo status=coerced path={} found={}",
            path.display(),
            found
        );
        value.map(Value::to_string).unwrap_or_default()
    })
}

/// Missing or `null` text fields decode as empty; other non-strings are
/// reported by JSON type name.
fn text_field(value: Option<&Value>) -> Result<String, &'static str> {
    match value {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(other) => Err(json_type_name(other)),
    }
}

/// Decodes the stored `order`.
///
/// Falsy values (`null`, `false`, `0`, `""`, `[]`, `{}`) and a missing key
/// mean unset. Truthy values must coerce to an integer the way `int()` would
/// and must not be negative; otherwise the raw JSON is returned as the error.
pub(crate) fn order_from_record(value: Option<&Value>) -> Result<Option<u64>, String> {
    let Some(value) = value else {
        return Ok(None);
    };
    if is_falsy(value) {
        return Ok(None);
    }

    let coerced = match value {
        Value::Bool(_) => Some(1),
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .map(f64::trunc)
                .filter(|whole| whole.is_finite() && *whole >= 0.0 && *whole <= u64::MAX as f64)
                .map(|whole| whole as u64)
        }),
        Value::String(text) => {
            let trimmed = text.trim();
            let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
            if digits.starts_with(|c: char| c.is_ascii_digit()) {
                digits.parse::<u64>().ok()
            } else {
                None
            }
        }
        _ => None,
    };
    coerced.map(Some).ok_or_else(|| value.to_string())
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn sort_by_order(notes: &mut [Note]) {
    notes.sort_by_key(Note::order);
}

fn is_record_path(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'));
    !hidden
        && path.extension().and_then(|ext| ext.to_str()) == Some(NOTE_FILE_EXTENSION)
        && path.is_file()
}

fn io_error(path: &Path, source: io::Error) -> RepoError {
    RepoError::Io {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::{encode_record, is_falsy, order_from_record};
    use crate::model::color::Rgb;
    use crate::model::note::{Note, NoteId};
    use serde_json::{json, Value};

    #[test]
    fn order_accepts_text_and_numbers() {
        assert_eq!(order_from_record(Some(&json!("3"))), Ok(Some(3)));
        assert_eq!(order_from_record(Some(&json!(" +7 "))), Ok(Some(7)));
        assert_eq!(order_from_record(Some(&json!(12))), Ok(Some(12)));
        assert_eq!(order_from_record(Some(&json!(2.9))), Ok(Some(2)));
        assert_eq!(order_from_record(Some(&json!(true))), Ok(Some(1)));
    }

    #[test]
    fn order_treats_falsy_values_as_unset() {
        let falsy = [
            json!(null),
            json!(""),
            json!(0),
            json!(0.0),
            json!(false),
            json!([]),
            json!({}),
        ];
        for value in falsy {
            assert_eq!(order_from_record(Some(&value)), Ok(None), "value: {value}");
        }
        assert_eq!(order_from_record(None), Ok(None));
    }

    #[test]
    fn order_rejects_non_integer_values() {
        assert_eq!(order_from_record(Some(&json!("abc"))), Err("\"abc\"".to_string()));
        assert!(order_from_record(Some(&json!("1.5"))).is_err());
        assert!(order_from_record(Some(&json!(-2))).is_err());
        assert!(order_from_record(Some(&json!([1]))).is_err());
    }

    #[test]
    fn order_rejects_doubled_signs_and_negatives() {
        assert!(order_from_record(Some(&json!("++3"))).is_err());
        assert!(order_from_record(Some(&json!("+-3"))).is_err());
        assert!(order_from_record(Some(&json!("-1"))).is_err());
        assert!(order_from_record(Some(&json!("+"))).is_err());
    }

    #[test]
    fn falsy_matches_truthiness_rules() {
        assert!(is_falsy(&Value::Null));
        assert!(!is_falsy(&json!("0")));
        assert!(!is_falsy(&json!(0.5)));
    }

    #[test]
    fn record_body_excludes_id_and_uses_four_space_indent() {
        let note = Note::from_parts(
            NoteId::parse("fixed-id").unwrap(),
            "Title",
            "Body",
            Some(4),
            Some(Rgb::new(1, 2, 3)),
        );
        let text = String::from_utf8(encode_record(&note).unwrap()).unwrap();

        assert!(!text.contains("fixed-id"));
        assert!(text.starts_with("{\n    \"title\": \"Title\""));
        let decoded: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            decoded,
            json!({"title": "Title", "content": "Body", "order": 4, "color": [1, 2, 3]})
        );
    }
}
