//! Recipe data model and the schema check applied to model output.
//!
//! The model is asked for a rich JSON object but only a minimum shape is
//! enforced: a non-empty `title` plus `ingredients` and `instructions`
//! arrays. Everything else is extracted leniently; a missing or oddly
//! typed optional field degrades to "absent" instead of failing the
//! whole response.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Why a raw model reply was rejected.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("parsed JSON is missing essential recipe fields ({0})")]
    MissingFields(String),
}

/// Per-serving nutrition estimates. The prompt marks these mandatory but
/// the schema check does not enforce them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
}

/// A generated recipe.
///
/// Only `title`, `ingredients` and `instructions` are guaranteed by
/// [`parse_recipe`]; both lists may legitimately be empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dietary_restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cuisine_preference: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_type: Option<String>,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutritional_info: Option<NutritionalInfo>,
}

/// Parse a raw model reply into a [`Recipe`].
///
/// Returns `SchemaError::InvalidJson` when the text is not JSON at all,
/// and `SchemaError::MissingFields` when the minimum shape is violated:
/// `title` must be a non-empty string and `ingredients`/`instructions`
/// must be arrays. Element counts are deliberately not checked, so a
/// reply with empty arrays passes.
pub fn parse_recipe(raw: &str) -> Result<Recipe, SchemaError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| SchemaError::InvalidJson(e.to_string()))?;

    let title = value
        .get("title")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty());

    let mut missing = Vec::new();
    if title.is_none() {
        missing.push("title");
    }
    if !value.get("ingredients").is_some_and(Value::is_array) {
        missing.push("ingredients[]");
    }
    if !value.get("instructions").is_some_and(Value::is_array) {
        missing.push("instructions[]");
    }
    if !missing.is_empty() {
        return Err(SchemaError::MissingFields(missing.join(", ")));
    }

    Ok(Recipe {
        title: title.unwrap_or_default().to_string(),
        description: string_field(&value, "description"),
        serving_size: string_field(&value, "servingSize"),
        cooking_time: string_field(&value, "cookingTime"),
        difficulty: string_field(&value, "difficulty"),
        dietary_restrictions: string_list(&value, "dietaryRestrictions"),
        cuisine_preference: string_list(&value, "cuisinePreference"),
        meal_type: string_field(&value, "mealType"),
        ingredients: string_list(&value, "ingredients"),
        instructions: string_list(&value, "instructions"),
        nutritional_info: nutrition(&value),
    })
}

/// A string field, or `None` for anything else (including absence).
fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// An array field rendered to strings. Non-string elements are kept as
/// their JSON text rather than dropped, so nothing the model said is
/// silently lost. Non-array fields render as empty.
fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().map(element_text).collect())
        .unwrap_or_default()
}

fn element_text(element: &Value) -> String {
    match element {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A scalar rendered to a string; null and absence become `None`.
fn lenient_string(element: &Value) -> Option<String> {
    match element {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn nutrition(value: &Value) -> Option<NutritionalInfo> {
    let info = value.get("nutritionalInfo")?.as_object()?;
    Some(NutritionalInfo {
        calories: info.get("calories").and_then(lenient_string),
        protein: info.get("protein").and_then(lenient_string),
        fat: info.get("fat").and_then(lenient_string),
    })
}
