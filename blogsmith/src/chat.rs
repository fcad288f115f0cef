//! Chat types, traits, and utilities for LLM operations.
//!
//! This module provides:
//! - [`ChatRequest`]: Request parameters for chat completions
//! - [`ChatResponse`]: Response from chat completions
//! - [`ChatProvider`]: Core trait for LLM providers
//!
//! # Example
//!
//! ```rust,ignore
//! use blogsmith::prelude::*;
//!
//! let request = ChatRequest::new("gcp/generate/models/gemini-2_5-pro")
//!     .system("You are a research analyst.")
//!     .user("Summarize recent quantum computing news.")
//!     .temperature(0.7);
//!
//! let response = provider.chat(&request).await?;
//! println!("{}", response.text().unwrap_or_default());
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::message::Message;
use crate::tool::ToolDefinition;
use crate::usage::Usage;

/// A chat completion request to an LLM.
///
/// Aligns with the OpenAI-compatible Chat Completions parameters that the
/// Clarifai endpoint accepts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier, passed verbatim to the provider
    /// (e.g., "gcp/generate/models/gemini-2_5-pro").
    #[serde(default)]
    pub model: String,

    /// Conversation messages.
    #[serde(default)]
    pub messages: Vec<Message>,

    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Sampling temperature (0.0 to 2.0).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// Tools available for the model to call.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<ToolDefinition>>,

    /// Controls how the model uses tools.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
}

impl ChatRequest {
    /// Creates a new request with the specified model.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Creates a request with messages.
    #[must_use]
    pub fn with_messages(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            ..Default::default()
        }
    }

    /// Adds a system message.
    #[must_use]
    pub fn system(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::system(content));
        self
    }

    /// Adds a user message.
    #[must_use]
    pub fn user(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::user(content));
        self
    }

    /// Adds an assistant message.
    #[must_use]
    pub fn assistant(mut self, content: impl Into<String>) -> Self {
        self.messages.push(Message::assistant(content));
        self
    }

    /// Adds a message.
    #[must_use]
    pub fn message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Sets all messages.
    #[must_use]
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Sets max tokens.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sets temperature.
    #[must_use]
    pub const fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets top_p.
    #[must_use]
    pub const fn top_p(mut self, top_p: f32) -> Self {
        self.top_p = Some(top_p);
        self
    }

    /// Sets stop sequences.
    #[must_use]
    pub fn stop(mut self, stop: Vec<String>) -> Self {
        self.stop = Some(stop);
        self
    }

    /// Sets tools.
    #[must_use]
    pub fn tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = Some(tools);
        self
    }

    /// Sets tool choice.
    #[must_use]
    pub fn tool_choice(mut self, choice: impl Into<ToolChoice>) -> Self {
        self.tool_choice = Some(choice.into().to_value());
        self
    }

    /// Check whether the request advertises any tools.
    #[must_use]
    pub fn has_tools(&self) -> bool {
        self.tools.as_ref().is_some_and(|tools| !tools.is_empty())
    }
}

/// Controls how the model selects tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ToolChoice {
    /// Model decides whether to use tools.
    #[default]
    Auto,
    /// Model must use at least one tool.
    Required,
    /// Model cannot use any tools.
    None,
    /// Model must use the specified function.
    Function(String),
}

impl ToolChoice {
    /// Converts to JSON value for serialization.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Auto => Value::String("auto".to_owned()),
            Self::Required => Value::String("required".to_owned()),
            Self::None => Value::String("none".to_owned()),
            Self::Function(name) => serde_json::json!({
                "type": "function",
                "function": {"name": name}
            }),
        }
    }
}

impl From<&str> for ToolChoice {
    fn from(s: &str) -> Self {
        match s {
            "auto" => Self::Auto,
            "required" => Self::Required,
            "none" => Self::None,
            name => Self::Function(name.to_owned()),
        }
    }
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum StopReason {
    /// Natural stop (end of response).
    #[default]
    Stop,
    /// Maximum token limit reached.
    Length,
    /// Model decided to call tools.
    ToolCalls,
    /// Content was filtered by safety systems.
    ContentFilter,
}

impl StopReason {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ToolCalls => "tool_calls",
            Self::ContentFilter => "content_filter",
        }
    }

    /// Parse an OpenAI-style `finish_reason` string.
    ///
    /// Unknown reasons map to [`StopReason::Stop`].
    #[must_use]
    pub fn from_finish_reason(reason: &str) -> Self {
        match reason {
            "length" => Self::Length,
            "tool_calls" => Self::ToolCalls,
            "content_filter" => Self::ContentFilter,
            _ => Self::Stop,
        }
    }
}

impl std::fmt::Display for StopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response from a chat completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The generated message.
    pub message: Message,

    /// Why the model stopped generating.
    pub stop_reason: StopReason,

    /// Token usage statistics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,

    /// Model identifier used for this response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Unique completion ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ChatResponse {
    /// Creates a new response with a message.
    #[must_use]
    pub const fn new(message: Message) -> Self {
        Self {
            message,
            stop_reason: StopReason::Stop,
            usage: None,
            model: None,
            id: None,
        }
    }

    /// Creates a response from text content.
    #[must_use]
    pub fn from_text(content: impl Into<String>) -> Self {
        Self::new(Message::assistant(content))
    }

    /// Sets the stop reason.
    #[must_use]
    pub const fn with_stop_reason(mut self, reason: StopReason) -> Self {
        self.stop_reason = reason;
        self
    }

    /// Sets usage statistics.
    #[must_use]
    pub const fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Sets the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Sets the completion id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Text content of the response, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.message.text().map(ToOwned::to_owned)
    }

    /// Check whether the model requested tool calls.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.message.has_tool_calls()
    }
}

/// Core trait for LLM chat providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Send a chat completion request and receive a complete response.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Get the name of this provider.
    ///
    /// Used for error messages and logging.
    fn provider_name(&self) -> &'static str;

    /// Get the default model for this provider.
    fn default_model(&self) -> &str;

    /// Check if this provider supports tool/function calling.
    fn supports_tools(&self) -> bool {
        true
    }
}

/// Convenience extensions for chat providers.
#[async_trait]
pub trait ChatProviderExt: ChatProvider {
    /// Send a simple text message and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(self.default_model()).user(prompt);
        let response = self.chat(&request).await?;
        Ok(response.text().unwrap_or_default())
    }

    /// Send a message with a system prompt.
    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(self.default_model())
            .system(system)
            .user(prompt);
        let response = self.chat(&request).await?;
        Ok(response.text().unwrap_or_default())
    }

    /// Send a message with a custom model.
    async fn complete_with_model(&self, model: &str, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(model).user(prompt);
        let response = self.chat(&request).await?;
        Ok(response.text().unwrap_or_default())
    }
}

// Blanket implementation for all ChatProviders
impl<T: ChatProvider> ChatProviderExt for T {}

/// Type alias for an Arc-wrapped ChatProvider.
pub type SharedChatProvider = std::sync::Arc<dyn ChatProvider>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod chat_request {
        use super::*;

        #[test]
        fn new_creates_with_model() {
            let req = ChatRequest::new("gcp/generate/models/gemini-2_5-pro");
            assert_eq!(req.model, "gcp/generate/models/gemini-2_5-pro");
            assert!(req.messages.is_empty());
        }

        #[test]
        fn with_messages_sets_both() {
            let msgs = vec![Message::user("Hello")];
            let req = ChatRequest::with_messages("meta/llama-3_1-8b-instruct", msgs);

            assert_eq!(req.model, "meta/llama-3_1-8b-instruct");
            assert_eq!(req.messages.len(), 1);
        }

        #[test]
        fn builder_adds_messages_in_order() {
            let req = ChatRequest::new("m")
                .system("You are a writer")
                .user("Write about AI");
            assert_eq!(req.messages.len(), 2);
            assert_eq!(req.messages[0].role.as_str(), "system");
            assert_eq!(req.messages[1].role.as_str(), "user");
        }

        #[test]
        fn messages_replaces_all() {
            let req = ChatRequest::new("m")
                .user("First")
                .messages(vec![Message::user("Second")]);
            assert_eq!(req.messages.len(), 1);
            assert_eq!(req.messages[0].text(), Some("Second"));
        }

        #[test]
        fn parameters_are_optional() {
            let req = ChatRequest::new("m");
            let json = serde_json::to_value(&req).unwrap();
            assert!(json.get("temperature").is_none());
            assert!(json.get("max_tokens").is_none());
            assert!(json.get("tools").is_none());
        }

        #[test]
        fn temperature_and_max_tokens_serialize() {
            let req = ChatRequest::new("m").temperature(0.7).max_tokens(256);
            let json = serde_json::to_value(&req).unwrap();
            assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
            assert_eq!(json["max_tokens"], 256);
        }

        #[test]
        fn has_tools_reflects_tool_list() {
            let req = ChatRequest::new("m");
            assert!(!req.has_tools());

            let def = ToolDefinition::new("serper_search", "Search the web", serde_json::json!({}));
            let req = req.tools(vec![def]);
            assert!(req.has_tools());
        }
    }

    mod tool_choice {
        use super::*;

        #[test]
        fn simple_variants_serialize_as_strings() {
            assert_eq!(ToolChoice::Auto.to_value(), "auto");
            assert_eq!(ToolChoice::Required.to_value(), "required");
            assert_eq!(ToolChoice::None.to_value(), "none");
        }

        #[test]
        fn function_variant_serializes_as_object() {
            let value = ToolChoice::Function("serper_search".into()).to_value();
            assert_eq!(value["type"], "function");
            assert_eq!(value["function"]["name"], "serper_search");
        }

        #[test]
        fn from_str_recognizes_keywords() {
            assert_eq!(ToolChoice::from("auto"), ToolChoice::Auto);
            assert_eq!(ToolChoice::from("required"), ToolChoice::Required);
            assert_eq!(
                ToolChoice::from("serper_search"),
                ToolChoice::Function("serper_search".into())
            );
        }
    }

    mod stop_reason {
        use super::*;

        #[test]
        fn from_finish_reason_maps_known_values() {
            assert_eq!(StopReason::from_finish_reason("stop"), StopReason::Stop);
            assert_eq!(StopReason::from_finish_reason("length"), StopReason::Length);
            assert_eq!(
                StopReason::from_finish_reason("tool_calls"),
                StopReason::ToolCalls
            );
            assert_eq!(
                StopReason::from_finish_reason("content_filter"),
                StopReason::ContentFilter
            );
        }

        #[test]
        fn unknown_finish_reason_defaults_to_stop() {
            assert_eq!(StopReason::from_finish_reason("banana"), StopReason::Stop);
        }

        #[test]
        fn serializes_snake_case() {
            assert_eq!(
                serde_json::to_string(&StopReason::ToolCalls).unwrap(),
                r#""tool_calls""#
            );
        }
    }

    mod chat_response {
        use super::*;

        #[test]
        fn from_text_builds_assistant_message() {
            let resp = ChatResponse::from_text("# My Blog Post");
            assert_eq!(resp.message.role.as_str(), "assistant");
            assert_eq!(resp.text().as_deref(), Some("# My Blog Post"));
            assert_eq!(resp.stop_reason, StopReason::Stop);
        }

        #[test]
        fn builders_set_fields() {
            let resp = ChatResponse::from_text("done")
                .with_stop_reason(StopReason::Length)
                .with_usage(Usage::new(10, 5))
                .with_model("meta/llama-3_1-8b-instruct")
                .with_id("cmpl-1");
            assert_eq!(resp.stop_reason, StopReason::Length);
            assert_eq!(resp.usage.unwrap().total_tokens, 15);
            assert_eq!(resp.model.as_deref(), Some("meta/llama-3_1-8b-instruct"));
            assert_eq!(resp.id.as_deref(), Some("cmpl-1"));
        }

        #[test]
        fn has_tool_calls_follows_message() {
            let call = crate::message::ToolCall::function("c1", "serper_search", "{}");
            let resp = ChatResponse::new(Message::assistant_tool_calls(vec![call]));
            assert!(resp.has_tool_calls());
            assert!(resp.text().is_none());
        }
    }

    mod provider_ext {
        use super::*;
        use std::sync::Arc;

        struct EchoProvider;

        #[async_trait]
        impl ChatProvider for EchoProvider {
            async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
                let last = request
                    .messages
                    .last()
                    .and_then(Message::text)
                    .unwrap_or_default();
                Ok(ChatResponse::from_text(format!("echo: {last}")))
            }

            fn provider_name(&self) -> &'static str {
                "echo"
            }

            fn default_model(&self) -> &str {
                "echo-1"
            }
        }

        #[tokio::test]
        async fn complete_returns_text() {
            let provider = EchoProvider;
            let out = provider.complete("hello").await.unwrap();
            assert_eq!(out, "echo: hello");
        }

        #[tokio::test]
        async fn complete_with_system_sends_both_messages() {
            let provider = EchoProvider;
            let out = provider
                .complete_with_system("be brief", "hi")
                .await
                .unwrap();
            assert_eq!(out, "echo: hi");
        }

        #[test]
        fn shared_provider_is_object_safe() {
            let provider: SharedChatProvider = Arc::new(EchoProvider);
            assert_eq!(provider.provider_name(), "echo");
        }
    }
}
