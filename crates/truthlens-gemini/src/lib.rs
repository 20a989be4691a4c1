//! # TruthLens Gemini
//!
//! Model gateway backed by the Gemini `generateContent` REST API.
//!
//! Sends text-only or multimodal (text plus inline image) prompts and
//! returns the concatenated candidate text.

pub mod client;
mod wire;

pub use client::{GeminiClient, PROVIDER};
