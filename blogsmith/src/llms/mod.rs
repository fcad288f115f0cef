//! LLM backend implementations.
//!
//! # Available Backends
//!
//! - [`clarifai`] - Clarifai's OpenAI-compatible endpoint (hosted Gemini,
//!   Llama, Mistral, and Gemma models)
//! - [`mock`] - Canned-response provider for tests and offline development

pub mod clarifai;
pub mod mock;

pub use clarifai::{Clarifai, ClarifaiConfig};
pub use mock::{MockProvider, MockReply};
