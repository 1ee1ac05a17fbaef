//! Turns decoded JSON into records shaped by the schema registry.

use std::time::Duration;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use tracing::{debug, warn};

use crate::case;
use crate::schema::{Field, FieldType, RecordKind, Registry, SchemaError};

/// Key every response body is wrapped in.
pub const ENVELOPE_KEY: &str = "subsonic-response";

pub type Timestamp = DateTime<FixedOffset>;

#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("Response is not valid JSON")]
    Json(#[from] serde_json::Error),

    #[error("Response has no 'subsonic-response' envelope")]
    MissingEnvelope,

    #[error("The 'subsonic-response' envelope is not an object")]
    MalformedEnvelope,

    #[error("{record}.{field} lists {kind} records but an element is not an object")]
    ExpectedObject {
        record: &'static str,
        field: &'static str,
        kind: &'static str,
    },

    /// Also raised for an object on an attribute that declares no record
    /// kind, as `UnknownSchema("<Record>.<attribute>")`.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Where the attribute source comes from.
#[derive(Debug, Clone, Copy)]
pub enum RawInput<'a> {
    /// A full response body; the envelope is unwrapped first.
    Text(&'a str),
    /// An already decoded object, used as is.
    Object(&'a Map<String, JsonValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Duration(Duration),
    Date(Timestamp),
    Record(Record),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Name of the variant, for diagnostics.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Duration(_) => "duration",
            Value::Date(_) => "date",
            Value::Record(_) => "record",
            Value::List(_) => "list",
        }
    }
}

/// A materialized instance of a record kind. Holds every declared attribute,
/// in declaration order, absent ones as [`Value::Null`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    kind: RecordKind,
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(n, v)| (*n, v))
    }

    fn take_value(&mut self, name: &str) -> Value {
        self.fields
            .iter_mut()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| std::mem::replace(v, Value::Null))
            .unwrap_or(Value::Null)
    }

    /// Moves an attribute out, converted to `T`. A value of the wrong shape
    /// is logged and reads as absent.
    pub fn take<T: FromValue>(&mut self, name: &str) -> Option<T> {
        let value = self.take_value(name);
        if value.is_null() {
            return None;
        }
        let shape = value.shape();
        let converted = T::from_value(value);
        if converted.is_none() {
            warn!(
                record = self.kind.name(),
                field = name,
                found = shape,
                expected = std::any::type_name::<T>(),
                "Attribute does not fit its typed field"
            );
        }
        converted
    }

    pub fn take_record<T: FromRecord>(&mut self, name: &str) -> Option<T> {
        match self.take_value(name) {
            Value::Record(mut record) => Some(T::from_record(&mut record)),
            _ => None,
        }
    }

    pub fn take_records<T: FromRecord>(&mut self, name: &str) -> Option<Vec<T>> {
        match self.take_value(name) {
            Value::List(items) => Some(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::Record(mut record) => Some(T::from_record(&mut record)),
                        _ => None,
                    })
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Conversion from a materialized attribute into a typed field.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

/// A typed view over one record kind.
pub trait FromRecord: Sized {
    const KIND: RecordKind;

    fn from_record(record: &mut Record) -> Self;
}

impl FromValue for String {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => Some(n),
            _ => None,
        }
    }
}

impl FromValue for u8 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Int(n) => u8::try_from(n).ok(),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Float(n) => Some(n),
            Value::Int(n) => Some(n as f64),
            _ => None,
        }
    }
}

impl FromValue for bool {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(b),
            _ => None,
        }
    }
}

impl FromValue for Duration {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Duration(d) => Some(d),
            _ => None,
        }
    }
}

impl FromValue for Timestamp {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::List(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }
}

/// Materializes `kind` from `raw`.
///
/// Absent attributes become null; the only failures are a malformed
/// envelope and nested objects the registry has no record kind for.
pub fn materialize(kind: RecordKind, raw: RawInput<'_>) -> Result<Record, MaterializeError> {
    let registry = Registry::global();
    match raw {
        RawInput::Text(text) => {
            let json: JsonValue = serde_json::from_str(text)?;
            let body = envelope(&json)?;
            materialize_object(registry, kind, body)
        }
        RawInput::Object(map) => materialize_object(registry, kind, map),
    }
}

/// Materializes a response body straight into its typed view.
pub fn from_json<T: FromRecord>(text: &str) -> Result<T, MaterializeError> {
    let mut record = materialize(T::KIND, RawInput::Text(text))?;
    Ok(T::from_record(&mut record))
}

fn envelope(json: &JsonValue) -> Result<&Map<String, JsonValue>, MaterializeError> {
    json.get(ENVELOPE_KEY)
        .ok_or(MaterializeError::MissingEnvelope)?
        .as_object()
        .ok_or(MaterializeError::MalformedEnvelope)
}

fn materialize_object(
    registry: &Registry,
    kind: RecordKind,
    map: &Map<String, JsonValue>,
) -> Result<Record, MaterializeError> {
    let schema = registry.get(kind)?;
    let mut fields = Vec::with_capacity(schema.fields.len());

    for field in &schema.fields {
        let key = case::to_external(field.name);
        let value = match map.get(&key) {
            None => {
                if field.required {
                    debug!(record = kind.name(), field = field.name, "Required attribute missing");
                }
                Value::Null
            }
            Some(JsonValue::Null) => Value::Null,
            Some(raw) => coerce(registry, kind, field, raw)?,
        };
        fields.push((field.name, value));
    }

    Ok(Record { kind, fields })
}

fn coerce(
    registry: &Registry,
    kind: RecordKind,
    field: &Field,
    raw: &JsonValue,
) -> Result<Value, MaterializeError> {
    let unresolved = || {
        MaterializeError::Schema(SchemaError::UnknownSchema(format!(
            "{}.{}",
            kind.name(),
            field.name
        )))
    };

    match field.ty {
        FieldType::RecordList(item_kind) => match raw {
            JsonValue::Array(items) => items
                .iter()
                .map(|item| match item {
                    JsonValue::Object(map) => {
                        materialize_object(registry, item_kind, map).map(Value::Record)
                    }
                    _ => Err(MaterializeError::ExpectedObject {
                        record: kind.name(),
                        field: field.name,
                        kind: item_kind.name(),
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            // Some servers collapse a single-element list into the element.
            JsonValue::Object(map) => {
                warn!(
                    record = kind.name(),
                    field = field.name,
                    "Expected a list, wrapping a single {}",
                    item_kind.name()
                );
                let item = materialize_object(registry, item_kind, map)?;
                Ok(Value::List(vec![Value::Record(item)]))
            }
            _ => soft(kind, field, raw, "expected a list").ok_or_else(unresolved),
        },

        FieldType::Record(nested) => match raw {
            JsonValue::Object(map) => materialize_object(registry, nested, map).map(Value::Record),
            _ => soft(kind, field, raw, "expected an object").ok_or_else(unresolved),
        },

        FieldType::Duration => {
            let duration = match raw.as_u64() {
                Some(secs) => Some(Duration::from_secs(secs)),
                None => raw
                    .as_f64()
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok()),
            };
            match duration {
                Some(duration) => Ok(Value::Duration(duration)),
                None => soft(kind, field, raw, "expected a count of seconds").ok_or_else(unresolved),
            }
        }

        FieldType::Date => match raw.as_str().and_then(parse_date) {
            Some(date) => Ok(Value::Date(date)),
            None => soft(kind, field, raw, "expected an ISO-8601 date").ok_or_else(unresolved),
        },

        FieldType::Literal(set) => {
            if !set.contains(raw) {
                warn!(
                    record = kind.name(),
                    field = field.name,
                    value = %raw,
                    "Value outside the documented set"
                );
            }
            passthrough(raw).ok_or_else(unresolved)
        }

        FieldType::Scalar(scalar) => {
            if !scalar.accepts(raw) && !raw.is_object() {
                warn!(
                    record = kind.name(),
                    field = field.name,
                    value = %raw,
                    "Unexpected scalar shape"
                );
            }
            passthrough(raw).ok_or_else(unresolved)
        }

        FieldType::ScalarList(scalar) => {
            if !raw.as_array().is_some_and(|items| items.iter().all(|i| scalar.accepts(i))) {
                warn!(
                    record = kind.name(),
                    field = field.name,
                    value = %raw,
                    "Unexpected list shape"
                );
            }
            passthrough(raw).ok_or_else(unresolved)
        }
    }
}

/// Keeps a value that failed its declared coercion, as the server sent it.
fn soft(kind: RecordKind, field: &Field, raw: &JsonValue, expected: &str) -> Option<Value> {
    warn!(
        record = kind.name(),
        field = field.name,
        value = %raw,
        expected,
        "Keeping raw value"
    );
    passthrough(raw)
}

/// Maps JSON onto [`Value`] unchanged. Objects have no kind to resolve to.
fn passthrough(raw: &JsonValue) -> Option<Value> {
    Some(match raw {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_i64() {
            Some(i) => Value::Int(i),
            None => Value::Float(n.as_f64()?),
        },
        JsonValue::String(s) => Value::Str(s.clone()),
        JsonValue::Array(items) => {
            Value::List(items.iter().map(passthrough).collect::<Option<_>>()?)
        }
        JsonValue::Object(_) => return None,
    })
}

/// Accepts full RFC 3339 timestamps, naive date-times and bare dates; the
/// latter two are read as UTC.
pub fn parse_date(raw: &str) -> Option<Timestamp> {
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().fixed_offset());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().fixed_offset())
}
