//! Mock chat provider for testing.
//!
//! Returns scripted replies without making real API calls, and records
//! every request it receives so tests can assert on prompt contents.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse, StopReason};
use crate::error::{LlmError, Result};
use crate::message::{Message, ToolCall};
use crate::usage::Usage;

/// A single scripted reply.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Plain assistant text.
    Text(String),
    /// An assistant message requesting one tool invocation.
    ToolCall {
        /// Tool name to invoke.
        name: String,
        /// JSON-encoded arguments.
        arguments: String,
    },
    /// A scripted provider failure.
    Fail(LlmError),
}

impl MockReply {
    /// A plain text reply.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text(content.into())
    }

    /// A tool-call reply.
    #[must_use]
    pub fn tool_call(name: impl Into<String>, arguments: impl Into<String>) -> Self {
        Self::ToolCall {
            name: name.into(),
            arguments: arguments.into(),
        }
    }

    /// A failing reply.
    #[must_use]
    pub const fn fail(error: LlmError) -> Self {
        Self::Fail(error)
    }
}

/// A mock chat provider with scripted replies.
///
/// Replies are returned in sequence, cycling once exhausted. Requests are
/// recorded and can be inspected with [`MockProvider::requests`].
#[derive(Debug)]
pub struct MockProvider {
    model_id: String,
    replies: Vec<MockReply>,
    index: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
    usage: Option<Usage>,
}

impl MockProvider {
    /// Creates a provider that cycles through plain text responses.
    #[must_use]
    pub fn new(responses: Vec<String>) -> Self {
        Self::from_script(responses.into_iter().map(MockReply::Text).collect())
    }

    /// Creates a provider that always returns the same text.
    #[must_use]
    pub fn single(response: impl Into<String>) -> Self {
        Self::new(vec![response.into()])
    }

    /// Creates a provider from an ordered reply script.
    #[must_use]
    pub fn from_script(replies: Vec<MockReply>) -> Self {
        Self {
            model_id: "mock-model".to_owned(),
            replies,
            index: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
            usage: None,
        }
    }

    /// Creates a provider that fails every call with the given error.
    #[must_use]
    pub fn failing(error: LlmError) -> Self {
        Self::from_script(vec![MockReply::Fail(error)])
    }

    /// Sets a custom model ID.
    #[must_use]
    pub fn with_model_id(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    /// Attaches usage to every successful reply.
    #[must_use]
    pub const fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Number of chat calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.index.load(Ordering::SeqCst)
    }

    /// All requests received so far, in order.
    #[must_use]
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .last()
            .cloned()
    }
}

#[async_trait]
impl ChatProvider for MockProvider {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        self.requests
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(request.clone());

        let index = self.index.fetch_add(1, Ordering::SeqCst);
        let reply = if self.replies.is_empty() {
            MockReply::Text("No response".to_owned())
        } else {
            self.replies[index % self.replies.len()].clone()
        };

        let mut response = match reply {
            MockReply::Text(content) => ChatResponse::from_text(content),
            MockReply::ToolCall { name, arguments } => {
                let call_id = format!("call_{}", uuid::Uuid::new_v4().simple());
                let message =
                    Message::assistant_tool_calls(vec![ToolCall::function(call_id, name, arguments)]);
                ChatResponse::new(message).with_stop_reason(StopReason::ToolCalls)
            }
            MockReply::Fail(error) => return Err(error.into()),
        };

        if let Some(usage) = self.usage {
            response = response.with_usage(usage);
        }
        Ok(response.with_model(self.model_id.clone()))
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }

    fn default_model(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn cycles_responses() {
        let provider = MockProvider::new(vec!["first".to_owned(), "second".to_owned()]);
        let request = ChatRequest::new("m").user("hi");

        let r1 = provider.chat(&request).await.unwrap();
        assert_eq!(r1.text().as_deref(), Some("first"));

        let r2 = provider.chat(&request).await.unwrap();
        assert_eq!(r2.text().as_deref(), Some("second"));

        let r3 = provider.chat(&request).await.unwrap();
        assert_eq!(r3.text().as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn records_requests() {
        let provider = MockProvider::single("ok");
        let request = ChatRequest::new("m").system("sys").user("question");

        provider.chat(&request).await.unwrap();

        assert_eq!(provider.call_count(), 1);
        let recorded = provider.last_request().unwrap();
        assert_eq!(recorded.messages.len(), 2);
        assert_eq!(recorded.messages[1].text(), Some("question"));
    }

    #[tokio::test]
    async fn scripted_tool_call_then_text() {
        let provider = MockProvider::from_script(vec![
            MockReply::tool_call("serper_search", r#"{"query": "rust"}"#),
            MockReply::text("done"),
        ]);
        let request = ChatRequest::new("m").user("hi");

        let first = provider.chat(&request).await.unwrap();
        assert!(first.has_tool_calls());
        assert_eq!(first.stop_reason, StopReason::ToolCalls);

        let second = provider.chat(&request).await.unwrap();
        assert_eq!(second.text().as_deref(), Some("done"));
    }

    #[tokio::test]
    async fn scripted_failure_propagates() {
        let provider = MockProvider::failing(LlmError::rate_limited("mock"));
        let request = ChatRequest::new("m").user("hi");

        let err = provider.chat(&request).await.unwrap_err();
        assert!(err.to_string().contains("Rate limit"));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn attaches_usage() {
        let provider = MockProvider::single("ok").with_usage(Usage::new(7, 2));
        let response = provider
            .chat(&ChatRequest::new("m").user("hi"))
            .await
            .unwrap();
        assert_eq!(response.usage, Some(Usage::new(7, 2)));
    }

    #[tokio::test]
    async fn empty_script_yields_placeholder() {
        let provider = MockProvider::new(Vec::new());
        let response = provider
            .chat(&ChatRequest::new("m").user("hi"))
            .await
            .unwrap();
        assert_eq!(response.text().as_deref(), Some("No response"));
    }
}
