//! Coercion of multipart text fields into a typed room submission.
//!
//! Form encoders send every value as text. Before the payload can become a
//! [`CreatePropertyRoom`] the numeric fields are parsed, the flags resolved and
//! `amenities` forced into a list (a single value arrives as a bare string).

use serde_json::{Map, Number, Value};
use stayhub_http::AppError;
use validator::{Validate, ValidationErrors};

use super::models::CreatePropertyRoom;

pub const AMENITIES_FIELD: &str = "amenities";

pub const NUMERIC_FIELDS: &[&str] = &[
    "floorNumber",
    "totalRooms",
    "baseAdult",
    "maxAdult",
    "maxChildren",
    "maxOccupancy",
    "baseRate",
    "extraAdultCharge",
    "childCharge",
    "totalRoomsInProperty",
];

pub const BOOLEAN_FIELDS: &[&str] = &["smokingAllowed", "extraBedAllowed"];

/// Text fields of a multipart submission, keyed by field name.
///
/// Repeating a name (or suffixing it with `[]`) collects the values into a
/// list in submission order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FormFields(Map<String, Value>);

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        let value = Value::String(value.into());
        let (name, always_list) = match name.strip_suffix("[]") {
            Some(stripped) => (stripped, true),
            None => (name, false),
        };

        match self.0.get_mut(name) {
            Some(Value::Array(items)) => items.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None if always_list => {
                self.0.insert(name.to_string(), Value::Array(vec![value]));
            }
            None => {
                self.0.insert(name.to_string(), value);
            }
        }
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

/// A field that could not be coerced
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub error: String,
}

impl FieldError {
    fn new(field: &str, error: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            error: error.into(),
        }
    }

    fn to_json(&self) -> Value {
        serde_json::json!({ "field": self.field, "error": self.error })
    }
}

/// Whether a JSON value counts as "set" for the numeric coercion.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Parse form text as a number. Integral values become JSON integers so they
/// deserialize into the count fields.
fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    if let Ok(int) = text.parse::<i64>() {
        return Some(Number::from(int));
    }

    let float = text.parse::<f64>().ok().filter(|n| n.is_finite())?;
    if float.fract() == 0.0 && float.abs() < 9_007_199_254_740_992.0 {
        Some(Number::from(float as i64))
    } else {
        Number::from_f64(float)
    }
}

/// What the numeric pass does with one field
#[derive(Debug, PartialEq)]
enum Coerced {
    Keep,
    Remove,
    Replace(Value),
}

fn coerce_number(field: &str, value: &Value) -> Result<Coerced, FieldError> {
    match value {
        Value::String(text) if text.trim().is_empty() => Ok(Coerced::Remove),
        _ if !is_truthy(value) => Ok(Coerced::Keep),
        Value::Number(_) => Ok(Coerced::Keep),
        Value::String(text) => parse_number(text)
            .map(|number| Coerced::Replace(Value::Number(number)))
            .ok_or_else(|| FieldError::new(field, format!("'{}' is not a number", text))),
        _ => Err(FieldError::new(field, "expected a single number")),
    }
}

/// Normalize the raw form map in place.
///
/// * `amenities` given as one string becomes a one-element list; a blank
///   string is dropped.
/// * every field in [`NUMERIC_FIELDS`] that is present and truthy is parsed
///   into a number; blank text is treated as absent.
/// * every field in [`BOOLEAN_FIELDS`] is set, and is `true` only for the
///   string `"true"` or the boolean `true`.
pub fn normalize_fields(body: &mut Map<String, Value>) -> Result<(), Vec<FieldError>> {
    match body.get(AMENITIES_FIELD) {
        Some(Value::String(single)) if single.is_empty() => {
            body.remove(AMENITIES_FIELD);
        }
        Some(Value::String(single)) => {
            let list = Value::Array(vec![Value::String(single.clone())]);
            body.insert(AMENITIES_FIELD.to_string(), list);
        }
        _ => {}
    }

    let mut errors = Vec::new();
    for &field in NUMERIC_FIELDS {
        let Some(value) = body.get(field) else {
            continue;
        };
        match coerce_number(field, value) {
            Ok(Coerced::Keep) => {}
            Ok(Coerced::Remove) => {
                body.remove(field);
            }
            Ok(Coerced::Replace(number)) => {
                body.insert(field.to_string(), number);
            }
            Err(error) => errors.push(error),
        }
    }

    for &field in BOOLEAN_FIELDS {
        let flag = match body.get(field) {
            Some(Value::String(text)) => text == "true",
            Some(Value::Bool(flag)) => *flag,
            _ => false,
        };
        body.insert(field.to_string(), Value::Bool(flag));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validation_details(errors: &ValidationErrors) -> Vec<Value> {
    let mut details: Vec<Value> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, failures)| {
            failures.iter().map(move |failure| {
                serde_json::json!({
                    "field": field.to_string(),
                    "error": failure.code.to_string(),
                })
            })
        })
        .collect();
    details.sort_by(|a, b| a["field"].as_str().cmp(&b["field"].as_str()));
    details
}

/// Normalize a submitted form and convert it into a validated transfer object.
pub fn into_create_dto(fields: FormFields) -> Result<CreatePropertyRoom, AppError> {
    let mut body = fields.into_map();

    normalize_fields(&mut body).map_err(|errors| {
        AppError::validation(
            errors.iter().map(FieldError::to_json).collect(),
            "room submission contains malformed fields",
        )
    })?;

    let dto: CreatePropertyRoom = serde_json::from_value(Value::Object(body)).map_err(|err| {
        AppError::validation(
            vec![serde_json::json!({ "error": err.to_string() })],
            "room submission does not match the expected shape",
        )
    })?;

    dto.validate().map_err(|errors| {
        AppError::validation(validation_details(&errors), "room submission failed validation")
    })?;

    Ok(dto)
}
