//! JSON interchange format for border configs
//!
//! Serialised with 2-space indentation. Import text may additionally carry
//! `avatarUrl` and `avatarSize` next to the border fields.

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::types::BorderConfig;

#[derive(Debug, Error, PartialEq)]
pub enum ImportError {
    #[error("JSON content is empty")]
    Empty,
    #[error("invalid JSON: {0}")]
    Malformed(String),
    #[error("config must be a JSON object")]
    NotAnObject,
    #[error("config is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Parsed import text
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    pub border: BorderConfig,
    pub avatar_url: Option<String>,
    pub avatar_size: Option<String>,
}

/// Pretty-printed JSON for a config
pub fn serialize(config: &BorderConfig) -> String {
    match serde_json::to_string_pretty(config) {
        Ok(text) => text,
        Err(e) => {
            warn!(error = %e, "Failed to serialize border config");
            String::new()
        }
    }
}

/// Validate and parse import text. Nothing is returned unless every required
/// field is present with the right type.
pub fn parse(text: &str) -> Result<ConfigDocument, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::Empty);
    }

    let value: Value = serde_json::from_str(text).map_err(|e| ImportError::Malformed(e.to_string()))?;
    let Value::Object(object) = value else {
        return Err(ImportError::NotAnObject);
    };

    let gif_url = required_string(&object, "gifUrl")?;
    let avatar_scale = required_number(&object, "avatarScale")?;
    let top_offset_ratio = required_number(&object, "topOffsetRatio")?;
    let left_offset_ratio = required_number(&object, "leftOffsetRatio")?;
    let border_radius = optional_string(&object, "borderRadius")?;
    let rotate = optional_number(&object, "rotate")?;
    let avatar_url = optional_string(&object, "avatarUrl")?;
    let avatar_size = optional_string(&object, "avatarSize")?;

    Ok(ConfigDocument {
        border: BorderConfig {
            gif_url,
            avatar_scale,
            top_offset_ratio,
            left_offset_ratio,
            border_radius,
            rotate,
        },
        avatar_url,
        avatar_size,
    })
}

fn required_string(object: &Map<String, Value>, field: &'static str) -> Result<String, ImportError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ImportError::MissingField(field)),
        Some(Value::String(s)) if s.is_empty() => Err(ImportError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ImportError::WrongType { field, expected: "a string" }),
    }
}

fn required_number(object: &Map<String, Value>, field: &'static str) -> Result<f64, ImportError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ImportError::MissingField(field)),
        Some(value) => value
            .as_f64()
            .ok_or(ImportError::WrongType { field, expected: "a number" }),
    }
}

fn optional_string(object: &Map<String, Value>, field: &'static str) -> Result<Option<String>, ImportError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ImportError::WrongType { field, expected: "a string" }),
    }
}

fn optional_number(object: &Map<String, Value>, field: &'static str) -> Result<Option<f64>, ImportError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or(ImportError::WrongType { field, expected: "a number" }),
    }
}
