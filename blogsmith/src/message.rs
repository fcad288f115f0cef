//! Chat message types in the OpenAI-compatible wire shape.
//!
//! Messages are text-only: the pipeline exchanges prompts, completions,
//! and tool results with the Clarifai endpoint, none of which carry
//! multimodal content.

use serde::{Deserialize, Serialize};

/// The role of a message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Role {
    /// System instructions.
    System,
    /// End-user input.
    User,
    /// Model output.
    Assistant,
    /// Tool execution result.
    Tool,
}

impl Role {
    /// Returns the string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Tool => "tool",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in a chat conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The author role.
    pub role: Role,

    /// Text content. `None` for assistant messages that only carry tool calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Tool calls requested by the assistant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,

    /// For `Role::Tool` messages, the id of the call being answered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// Optional participant name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    /// Create a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    /// Create a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    /// Create an assistant message.
    #[must_use]
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: None,
            name: None,
        }
    }

    /// Create an assistant message carrying tool calls and no text.
    #[must_use]
    pub const fn assistant_tool_calls(tool_calls: Vec<ToolCall>) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            tool_calls: Some(tool_calls),
            tool_call_id: None,
            name: None,
        }
    }

    /// Create a tool result message answering the given call id.
    #[must_use]
    pub fn tool(tool_call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Tool,
            content: Some(content.into()),
            tool_calls: None,
            tool_call_id: Some(tool_call_id.into()),
            name: None,
        }
    }

    /// Set the participant name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach tool calls to this message.
    #[must_use]
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }

    /// Text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Check whether the message requests tool calls.
    #[must_use]
    pub fn has_tool_calls(&self) -> bool {
        self.tool_calls.as_ref().is_some_and(|calls| !calls.is_empty())
    }
}

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-assigned call id, echoed back in the tool result.
    pub id: String,

    /// Call type, always `"function"`.
    #[serde(rename = "type")]
    pub call_type: String,

    /// The function being invoked.
    pub function: FunctionCall,
}

impl ToolCall {
    /// Create a function tool call.
    #[must_use]
    pub fn function(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            call_type: "function".to_owned(),
            function: FunctionCall {
                name: name.into(),
                arguments: arguments.into(),
            },
        }
    }
}

/// The function component of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function to invoke.
    pub name: String,

    /// JSON-encoded arguments, as produced by the model.
    pub arguments: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;

    mod construction {
        use super::*;

        #[test]
        fn system_message() {
            let msg = Message::system("You are a research analyst.");
            assert_eq!(msg.role, Role::System);
            assert_eq!(msg.text(), Some("You are a research analyst."));
            assert!(!msg.has_tool_calls());
        }

        #[test]
        fn user_message() {
            let msg = Message::user("Write about quantum computing");
            assert_eq!(msg.role, Role::User);
            assert!(msg.tool_call_id.is_none());
        }

        #[test]
        fn tool_message_carries_call_id() {
            let msg = Message::tool("call_123", "## Search Results");
            assert_eq!(msg.role, Role::Tool);
            assert_eq!(msg.tool_call_id.as_deref(), Some("call_123"));
            assert_eq!(msg.text(), Some("## Search Results"));
        }

        #[test]
        fn assistant_tool_calls_has_no_text() {
            let call = ToolCall::function("call_1", "serper_search", r#"{"query":"rust"}"#);
            let msg = Message::assistant_tool_calls(vec![call]);
            assert!(msg.text().is_none());
            assert!(msg.has_tool_calls());
        }

        #[test]
        fn empty_tool_calls_is_not_a_tool_request() {
            let msg = Message::assistant("done").with_tool_calls(vec![]);
            assert!(!msg.has_tool_calls());
        }
    }

    mod serde_wire {
        use super::*;

        #[test]
        fn role_serializes_lowercase() {
            assert_eq!(serde_json::to_string(&Role::System).unwrap(), r#""system""#);
            assert_eq!(serde_json::to_string(&Role::Tool).unwrap(), r#""tool""#);
        }

        #[test]
        fn message_omits_absent_fields() {
            let json = serde_json::to_value(Message::user("hi")).unwrap();
            assert_eq!(json["role"], "user");
            assert_eq!(json["content"], "hi");
            assert!(json.get("tool_calls").is_none());
            assert!(json.get("tool_call_id").is_none());
        }

        #[test]
        fn tool_call_uses_type_field() {
            let call = ToolCall::function("id_1", "serper_search", "{}");
            let json = serde_json::to_value(&call).unwrap();
            assert_eq!(json["type"], "function");
            assert_eq!(json["function"]["name"], "serper_search");
        }

        #[test]
        fn assistant_tool_call_roundtrip() {
            let wire = r#"{
                "role": "assistant",
                "tool_calls": [{
                    "id": "call_9",
                    "type": "function",
                    "function": {"name": "serper_search", "arguments": "{\"query\":\"ai\"}"}
                }]
            }"#;
            let msg: Message = serde_json::from_str(wire).unwrap();
            assert!(msg.has_tool_calls());
            let calls = msg.tool_calls.unwrap();
            assert_eq!(calls[0].function.name, "serper_search");
        }
    }
}
