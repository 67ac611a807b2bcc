//! Bulk packing import: payload validation and file/text import flow.
//!
//! # Responsibility
//! - Validate untyped JSON into `NewPackingItem`s, all or nothing.
//! - Drive read -> parse -> validate -> `add_items` and report the outcome.
//!
//! # Invariants
//! - A failed import never mutates the store.
//! - A successful import calls `add_items` exactly once.

use crate::model::packing::NewPackingItem;
use crate::model::validation::ValidationError;
use crate::repo::kv_repo::KeyValueSurface;
use crate::repo::snapshot::PersistOutcome;
use crate::service::packing_store::PackingStore;
use log::{info, warn};
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Object field accepted as an alternative to a bare array.
pub const IMPORT_ITEMS_FIELD: &str = "items";

const MESSAGE_INVALID_PAYLOAD: &str = "Invalid or empty JSON payload.";
const MESSAGE_UNREADABLE: &str = "Unable to read JSON file.";

/// Why a payload was rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportValidationError {
    /// Root is neither an array nor an object with an `items` array.
    NotASequence,
    /// Element at `index` is not a JSON object.
    NotARecord { index: usize },
    /// Element at `index` has no `field` at all.
    MissingField { index: usize, field: &'static str },
    /// Element at `index` holds a non-string value in `field`.
    NonStringField { index: usize, field: &'static str },
    /// Element at `index` failed item validation.
    InvalidItem {
        index: usize,
        source: ValidationError,
    },
}

impl Display for ImportValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotASequence => write!(
                f,
                "payload must be an array or an object with an `{IMPORT_ITEMS_FIELD}` array"
            ),
            Self::NotARecord { index } => write!(f, "item {index} is not an object"),
            Self::MissingField { index, field } => {
                write!(f, "item {index} is missing field `{field}`")
            }
            Self::NonStringField { index, field } => {
                write!(f, "item {index} field `{field}` must be a string")
            }
            Self::InvalidItem { index, source } => write!(f, "item {index}: {source}"),
        }
    }
}

impl Error for ImportValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidItem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Validates a parsed payload into constructable items.
///
/// Accepts a bare array or `{"items": [...]}`. The first bad element rejects
/// the whole payload. An empty array validates to an empty list; callers
/// decide whether that counts as a failure.
pub fn validate_import_payload(payload: &Value) -> Result<Vec<NewPackingItem>, ImportValidationError> {
    let elements = match payload {
        Value::Array(elements) => elements,
        Value::Object(fields) => match fields.get(IMPORT_ITEMS_FIELD) {
            Some(Value::Array(elements)) => elements,
            _ => return Err(ImportValidationError::NotASequence),
        },
        _ => return Err(ImportValidationError::NotASequence),
    };

    elements
        .iter()
        .enumerate()
        .map(|(index, element)| validate_element(index, element))
        .collect()
}

fn validate_element(index: usize, element: &Value) -> Result<NewPackingItem, ImportValidationError> {
    let Value::Object(record) = element else {
        return Err(ImportValidationError::NotARecord { index });
    };
    let name = string_field(record, index, "name")?;
    let category = string_field(record, index, "category")?;
    let bucket = string_field(record, index, "bucket")?;
    NewPackingItem::from_wire(name, category, bucket)
        .map_err(|source| ImportValidationError::InvalidItem { index, source })
}

fn string_field<'a>(
    record: &'a Map<String, Value>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ImportValidationError> {
    match record.get(field) {
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(_) => Err(ImportValidationError::NonStringField { index, field }),
        None => Err(ImportValidationError::MissingField { index, field }),
    }
}

/// Reason an import added nothing.
#[derive(Debug)]
pub enum ImportFailure {
    /// File could not be read as UTF-8 text.
    Unreadable(std::io::Error),
    /// Text is not JSON.
    InvalidJson(serde_json::Error),
    InvalidPayload(ImportValidationError),
    /// Payload was structurally valid but held zero items.
    EmptyPayload,
}

impl ImportFailure {
    /// User-facing message for the import status line.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Unreadable(_) | Self::InvalidJson(_) => MESSAGE_UNREADABLE,
            Self::InvalidPayload(_) | Self::EmptyPayload => MESSAGE_INVALID_PAYLOAD,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::Unreadable(_) => "unreadable",
            Self::InvalidJson(_) => "invalid_json",
            Self::InvalidPayload(_) => "invalid_payload",
            Self::EmptyPayload => "empty_payload",
        }
    }
}

impl Display for ImportFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unreadable(err) => write!(f, "import file unreadable: {err}"),
            Self::InvalidJson(err) => write!(f, "import file is not JSON: {err}"),
            Self::InvalidPayload(err) => write!(f, "import payload invalid: {err}"),
            Self::EmptyPayload => write!(f, "import payload has no items"),
        }
    }
}

impl Error for ImportFailure {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unreadable(err) => Some(err),
            Self::InvalidJson(err) => Some(err),
            Self::InvalidPayload(err) => Some(err),
            Self::EmptyPayload => None,
        }
    }
}

/// Outcome of one import attempt.
#[derive(Debug)]
pub struct ImportReport {
    pub added: usize,
    pub failure: Option<ImportFailure>,
    /// Write outcome of the batch; `None` when nothing was added.
    pub persist: Option<PersistOutcome>,
}

impl ImportReport {
    fn failed(failure: ImportFailure) -> Self {
        warn!(
            "event=packing_import module=import status=error error_code={} error={}",
            failure.code(),
            failure
        );
        Self {
            added: 0,
            failure: Some(failure),
            persist: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    /// Status line shown after an import.
    pub fn message(&self) -> String {
        match &self.failure {
            Some(failure) => failure.user_message().to_string(),
            None if self.added == 1 => "Imported 1 item.".to_string(),
            None => format!("Imported {} items.", self.added),
        }
    }
}

/// Parses `text` as JSON and imports it into `store`.
pub fn import_from_str<S: KeyValueSurface>(store: &mut PackingStore<S>, text: &str) -> ImportReport {
    let payload: Value = match serde_json::from_str(text) {
        Ok(payload) => payload,
        Err(err) => return ImportReport::failed(ImportFailure::InvalidJson(err)),
    };
    import_payload(store, &payload)
}

/// Reads `path` as UTF-8 text and imports it into `store`.
pub fn import_from_file<S: KeyValueSurface>(
    store: &mut PackingStore<S>,
    path: impl AsRef<Path>,
) -> ImportReport {
    match std::fs::read_to_string(path.as_ref()) {
        Ok(text) => import_from_str(store, &text),
        Err(err) => ImportReport::failed(ImportFailure::Unreadable(err)),
    }
}

/// Validates an already parsed payload and imports it into `store`.
pub fn import_payload<S: KeyValueSurface>(store: &mut PackingStore<S>, payload: &Value) -> ImportReport {
    let items = match validate_import_payload(payload) {
        Ok(items) if items.is_empty() => return ImportReport::failed(ImportFailure::EmptyPayload),
        Ok(items) => items,
        Err(err) => return ImportReport::failed(ImportFailure::InvalidPayload(err)),
    };

    let write = store.add_items(items);
    let added = write.value.len();
    info!(
        "event=packing_import module=import status=ok added={added} persisted={}",
        write.persist.is_persisted()
    );
    ImportReport {
        added,
        failure: None,
        persist: Some(write.persist),
    }
}
