//! Core library for the ChefAI recipe generator.
//!
//! This crate holds everything that is independent of the HTTP server:
//! the AI provider abstraction (chat completions and image generation),
//! the prompt templates, and the `Recipe` model with its lenient parser
//! for model output.

pub mod ai;
pub mod prompts;
pub mod recipe;
