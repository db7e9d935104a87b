//! Prompt templates for recipe and image generation.
//!
//! Everything in here is a pure function of its inputs so the rendered
//! prompts can be asserted on byte-for-byte in tests.

pub mod image;
pub mod recipe;

pub use image::render_image_prompt;
pub use recipe::{
    render_free_text_prompt, render_recipe_prompt, PreferenceValue, RecipePreferences,
    SYSTEM_PROMPT,
};
