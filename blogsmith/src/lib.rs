//! Blogsmith - a two-agent blog writing pipeline
//!
//! This crate turns a topic into a finished markdown blog post: a research
//! agent gathers verified information through web search, then a writer agent
//! shapes it into an article. Generation runs against Clarifai's
//! OpenAI-compatible chat API and results are cached by topic and model.

pub mod agent;
pub mod cache;
pub mod chat;
pub mod credentials;
pub mod crew;
pub mod error;
pub mod llms;
pub mod message;
pub mod pipeline;
pub mod prelude;
pub mod tool;
pub mod tools;
pub mod usage;

pub use error::{Error, LlmError, Result, ToolError};
