// src/persona/types.rs

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use crate::api::error::ApiError;

/// The stored persona record, also the wire shape for every CRUD response.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Persona {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    pub annual_income: Option<f64>,
    pub extras: Option<String>,
}

/// Create payload. Every field is optional at the serde level so that a
/// missing `name` surfaces as our own 400, not a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
pub struct CreatePersonaRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub annual_income: Option<Value>,
    pub extras: Option<String>,
}

/// Partial update payload. Outer Option = key present in the body at all,
/// inner Option = value vs explicit null. A key that is absent leaves the
/// field untouched; an explicit null clears it. `name` stays a single
/// Option because it is never clearable: null means "untouched".
#[derive(Debug, Default, Deserialize)]
pub struct UpdatePersonaRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub annual_income: Option<Option<Value>>,
    #[serde(default, deserialize_with = "double_option")]
    pub extras: Option<Option<String>>,
}

/// Maps a present-but-null JSON value to Some(None) instead of None, which
/// plain `Option<Option<T>>` cannot distinguish from an absent key.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Accepts a JSON number or a numeric string, the way the income field has
/// always been fed by clients. Rejects anything non-finite.
pub fn coerce_annual_income(value: &Value) -> Result<f64, ApiError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| ApiError::validation("annual_income must be a number"))
}
