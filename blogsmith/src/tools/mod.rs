//! Built-in tools available to agents.

pub mod web_search;

pub use web_search::{SearchResult, SerperSearch, WebSearchArgs};
