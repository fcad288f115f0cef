//! Clarifai client for the OpenAI-compatible endpoint.

mod chat;
mod client;
mod config;

pub use client::Clarifai;
pub use config::ClarifaiConfig;
