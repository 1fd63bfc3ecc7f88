//! # Document Conversion
//!
//! Request bodies arrive as JSON objects and are stored as BSON; stored
//! documents go back out as plain JSON with `_id` as a hex string and
//! dates as RFC 3339 strings.

use axum::extract::{rejection::PathRejection, Path};
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde_json::{Map, Value};

use super::errors::{RestError, RestResult};

/// Parse a 24-hex-character document identifier
pub fn parse_object_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}

/// Take the `{id}` path segment as an ObjectId. A segment that does not
/// decode as UTF-8 is reported like any other malformed id.
pub fn object_id_from_path(
    path: Result<Path<String>, PathRejection>,
    invalid: &'static str,
) -> RestResult<ObjectId> {
    let Ok(Path(id)) = path else {
        return Err(RestError::InvalidId(invalid));
    };
    parse_object_id(&id).ok_or(RestError::InvalidId(invalid))
}

/// Convert a JSON request body into a BSON document
pub fn json_to_document(body: Map<String, Value>) -> RestResult<Document> {
    bson::to_document(&body).map_err(|e| RestError::InvalidBody(e.to_string()))
}

/// Render a stored document as JSON
pub fn document_to_json(document: Document) -> Value {
    Value::Object(
        document
            .into_iter()
            .map(|(key, value)| (key, bson_to_json(value)))
            .collect(),
    )
}

/// Render stored documents as a JSON array
pub fn documents_to_json(documents: Vec<Document>) -> Value {
    Value::Array(documents.into_iter().map(document_to_json).collect())
}

/// Render a single BSON value as JSON
pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => dt
            .try_to_rfc3339_string()
            .map(Value::String)
            .unwrap_or_else(|_| Value::from(dt.timestamp_millis())),
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(v) => Value::from(v),
        Bson::Int64(v) => Value::from(v),
        Bson::Double(v) => serde_json::Number::from_f64(v)
            .map(Value::Number)
            .unwrap_or(Value::Null),
        Bson::Null | Bson::Undefined => Value::Null,
        other => other.into_relaxed_extjson(),
    }
}

/// A required field counts as present unless it is missing, null, false, zero or empty
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}
