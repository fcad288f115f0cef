//! Clarifai ChatProvider implementation.

use async_trait::async_trait;

use crate::chat::{ChatProvider, ChatRequest, ChatResponse, StopReason};
use crate::error::{LlmError, Result};
use crate::message::Message;

use super::client::{ChatCompletionResponse, Clarifai};

impl Clarifai {
    /// Builds the wire request body, filling in the configured default model
    /// when the request does not name one.
    pub(crate) fn build_body(&self, request: &ChatRequest) -> ChatRequest {
        let mut body = request.clone();
        if body.model.is_empty() {
            body.model = self.config.model.clone();
        }
        body
    }

    /// Parse the wire response into a ChatResponse.
    pub(crate) fn parse_response(response: ChatCompletionResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::response_format("at least one choice", "empty choices"))?;

        let stop_reason = choice
            .finish_reason
            .as_deref()
            .map_or(StopReason::Stop, StopReason::from_finish_reason);

        let message = Message {
            role: crate::message::Role::Assistant,
            content: choice.message.content,
            tool_calls: choice.message.tool_calls,
            tool_call_id: None,
            name: None,
        };

        Ok(ChatResponse {
            message,
            stop_reason,
            usage: response.usage,
            model: response.model,
            id: response.id,
        })
    }
}

#[async_trait]
impl ChatProvider for Clarifai {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse> {
        let url = self.chat_url();
        let body = self.build_body(request);

        let response = self.build_request(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(Self::parse_error(status.as_u16(), &error_text).into());
        }

        let response_text = response.text().await?;
        let parsed: ChatCompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            LlmError::response_format(
                "valid chat completion response",
                format!("parse error: {e}, response: {response_text}"),
            )
        })?;

        Self::parse_response(parsed)
    }

    fn provider_name(&self) -> &'static str {
        "clarifai"
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }

    fn supports_tools(&self) -> bool {
        true
    }
}
