//! Recipe generation prompts.
//!
//! The rendered prompt demands a single JSON object matching the shape
//! that [`crate::recipe::parse_recipe`] expects back. Absent preferences
//! are substituted with fixed placeholder tokens so the instruction text
//! never contains an empty slot.

use serde::Deserialize;

/// System message for recipe generation requests.
pub const SYSTEM_PROMPT: &str =
    "You are a helpful culinary assistant that generates recipes in a precise JSON format.";

/// The JSON contract the model is asked to honor. Calorie, protein and fat
/// estimates are spelled out as mandatory; everything else may be
/// approximated.
const JSON_CONTRACT: &str = r#"Generate a detailed and creative recipe in JSON format based on the following criteria. Ensure the output is *only* the JSON object, ready for direct parsing. Do not include any markdown backticks or extra text outside the JSON. The JSON should have the following structure and fields, including a section for nutritional information (calories, protein, fat) based on common understanding of ingredients (use approximate common values if specific values aren't calculable by a general model). Use "N/A" if info is not available or estimable. **You must always include approximate values for calories, protein, and fat per serving; these fields are mandatory and cannot be omitted under any condition.**:

{
  "title": "[Recipe Title]",
  "description": "[Brief, enticing description]",
  "servingSize": "[e.g., 2, 4-6 people]",
  "cookingTime": "[e.g., 30 minutes, 1 hour]",
  "difficulty": "[Easy/Medium/Hard]",
  "dietaryRestrictions": ["e.g., Vegetarian", "Gluten-Free"],
  "cuisinePreference": ["e.g., Italian", "Mexican"],
  "mealType": "[e.g., Dinner, Breakfast]",
  "ingredients": [
    "Quantity Unit Ingredient (Preparation)",
    "..."
  ],
  "instructions": [
    "Step 1: ...",
    "Step 2: ...",
    "..."
  ],
  "nutritionalInfo": {
    "calories": "[e.g., 450 kcal per serving]",
    "protein": "[e.g., 25g per serving]",
    "fat": "[e.g., 15g per serving]"
  }
}"#;

/// A preference that clients may send either as a single string or as a
/// list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PreferenceValue {
    One(String),
    Many(Vec<String>),
}

impl PreferenceValue {
    /// Render for prompt interpolation; lists join with ", ".
    pub fn joined(&self) -> String {
        match self {
            PreferenceValue::One(value) => value.clone(),
            PreferenceValue::Many(values) => values.join(", "),
        }
    }
}

/// Preference fields for structured generation; every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipePreferences {
    #[serde(default)]
    pub ingredients: Option<PreferenceValue>,
    #[serde(default)]
    pub dietary_restrictions: Option<PreferenceValue>,
    #[serde(default)]
    pub cuisine_preference: Option<PreferenceValue>,
    #[serde(default)]
    pub meal_type: Option<PreferenceValue>,
    #[serde(default)]
    pub serving_size: Option<String>,
    #[serde(default)]
    pub cooking_time: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
}

/// Placeholder for a preference the client did not provide.
fn or_token(value: Option<String>, token: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => token.to_string(),
    }
}

fn joined(value: &Option<PreferenceValue>) -> Option<String> {
    value.as_ref().map(PreferenceValue::joined)
}

/// Render the structured-mode recipe prompt.
///
/// Deterministic: identical preferences produce byte-identical output.
pub fn render_recipe_prompt(preferences: &RecipePreferences) -> String {
    let ingredients = or_token(joined(&preferences.ingredients), "Any available ingredients");
    let dietary_restrictions = or_token(joined(&preferences.dietary_restrictions), "None");
    let cuisine_preference = or_token(joined(&preferences.cuisine_preference), "Any");
    let meal_type = or_token(joined(&preferences.meal_type), "Any");
    let serving_size = or_token(preferences.serving_size.clone(), "Not specified");
    let cooking_time = or_token(preferences.cooking_time.clone(), "Not specified");
    let difficulty = or_token(preferences.difficulty.clone(), "Any");

    format!(
        "{JSON_CONTRACT}\n\n\
         Here are the user's preferences:\n\
         Ingredients: {ingredients}\n\
         Dietary Restrictions: {dietary_restrictions}\n\
         Cuisine Preference: {cuisine_preference}\n\
         Meal Type: {meal_type}\n\
         Serving Size: {serving_size}\n\
         Cooking Time: {cooking_time}\n\
         Difficulty: {difficulty}\n\n\
         Strictly output only the JSON object."
    )
}

/// Render the free-text-mode recipe prompt: the same JSON contract with
/// the user's request substituted for the preference list.
pub fn render_free_text_prompt(user_prompt: &str) -> String {
    format!(
        "{JSON_CONTRACT}\n\n\
         Here is the user's request:\n\
         {user_prompt}\n\n\
         Strictly output only the JSON object."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_deterministic() {
        let preferences = RecipePreferences {
            ingredients: Some(PreferenceValue::One("chicken, rice".to_string())),
            difficulty: Some("Easy".to_string()),
            ..Default::default()
        };

        assert_eq!(
            render_recipe_prompt(&preferences),
            render_recipe_prompt(&preferences)
        );
    }

    #[test]
    fn test_unset_fields_use_placeholder_tokens() {
        let prompt = render_recipe_prompt(&RecipePreferences::default());

        assert!(prompt.contains("Ingredients: Any available ingredients"));
        assert!(prompt.contains("Dietary Restrictions: None"));
        assert!(prompt.contains("Cuisine Preference: Any"));
        assert!(prompt.contains("Meal Type: Any"));
        assert!(prompt.contains("Serving Size: Not specified"));
        assert!(prompt.contains("Cooking Time: Not specified"));
        assert!(prompt.contains("Difficulty: Any"));
    }

    #[test]
    fn test_no_line_is_left_empty() {
        let prompt = render_recipe_prompt(&RecipePreferences {
            ingredients: Some(PreferenceValue::One("   ".to_string())),
            ..Default::default()
        });

        for line in prompt.lines() {
            if let Some((_, value)) = line.split_once(": ") {
                assert!(!value.trim().is_empty(), "empty slot in line: {line}");
            }
        }
    }

    #[test]
    fn test_provided_fields_are_interpolated() {
        let preferences = RecipePreferences {
            ingredients: Some(PreferenceValue::One("chicken, rice".to_string())),
            dietary_restrictions: Some(PreferenceValue::Many(vec![
                "Vegetarian".to_string(),
                "Gluten-Free".to_string(),
            ])),
            serving_size: Some("4".to_string()),
            ..Default::default()
        };

        let prompt = render_recipe_prompt(&preferences);
        assert!(prompt.contains("Ingredients: chicken, rice"));
        assert!(prompt.contains("Dietary Restrictions: Vegetarian, Gluten-Free"));
        assert!(prompt.contains("Serving Size: 4"));
    }

    #[test]
    fn test_contract_demands_json_and_nutrition() {
        let prompt = render_recipe_prompt(&RecipePreferences::default());
        assert!(prompt.contains("*only* the JSON object"));
        assert!(prompt.contains("nutritionalInfo"));
        assert!(prompt.contains("mandatory and cannot be omitted"));
        assert!(prompt.ends_with("Strictly output only the JSON object."));
    }

    #[test]
    fn test_free_text_prompt_carries_user_request() {
        let prompt = render_free_text_prompt("a cozy soup for a rainy day");
        assert!(prompt.contains("Here is the user's request:\na cozy soup for a rainy day"));
        assert!(prompt.contains("nutritionalInfo"));
        assert_eq!(prompt, render_free_text_prompt("a cozy soup for a rainy day"));
    }

    #[test]
    fn test_preference_value_accepts_string_or_list() {
        let one: PreferenceValue = serde_json::from_value(serde_json::json!("chicken")).unwrap();
        assert_eq!(one.joined(), "chicken");

        let many: PreferenceValue =
            serde_json::from_value(serde_json::json!(["chicken", "rice"])).unwrap();
        assert_eq!(many.joined(), "chicken, rice");
    }
}
