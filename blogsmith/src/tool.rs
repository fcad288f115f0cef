//! Tool trait and utilities for defining agent tools.
//!
//! Tools are the primary way agents interact with the world. Each tool
//! represents a specific capability that an agent can invoke; the research
//! agent here carries a single web-search tool.
//!
//! `ToolDefinition` serializes to the OpenAI function-calling format
//! (`{"type": "function", "function": {...}}`) so definitions can be sent
//! directly in chat requests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ToolError;

/// A type alias for `Result<T, ToolError>`.
pub type ToolResult<T> = Result<T, ToolError>;

/// Definition of a tool for LLM function calling.
#[derive(Debug, Clone, Deserialize)]
#[non_exhaustive]
pub struct ToolDefinition {
    /// Name of the tool (e.g., "serper_search"). Should use snake_case.
    pub name: String,

    /// Description of what the tool does.
    /// This helps the model decide when to use the tool.
    pub description: String,

    /// JSON schema for the tool's parameters.
    pub parameters: Value,
}

impl ToolDefinition {
    /// Create a new tool definition.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }

    /// Returns the tool name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the tool description.
    #[inline]
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Custom serialization to OpenAI function calling format.
impl Serialize for ToolDefinition {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut function = serde_json::Map::new();
        function.insert("name".to_owned(), Value::String(self.name.clone()));
        function.insert(
            "description".to_owned(),
            Value::String(self.description.clone()),
        );
        function.insert("parameters".to_owned(), self.parameters.clone());

        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("type", "function")?;
        map.serialize_entry("function", &function)?;
        map.end()
    }
}

/// The core trait for all tools that agents can use.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Static name of the tool.
    const NAME: &'static str;

    /// Arguments type for the tool.
    type Args: for<'de> Deserialize<'de> + Send;

    /// Output type of the tool.
    type Output: Serialize + Send;

    /// Error type for tool execution.
    type Error: Into<ToolError> + Send;

    /// Get the name of the tool.
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Get the description of the tool.
    fn description(&self) -> String;

    /// Get the JSON schema for the tool's parameters.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with the given arguments.
    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error>;

    /// Get the tool definition for LLM function calling.
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_owned(),
            description: self.description(),
            parameters: self.parameters_schema(),
        }
    }

    /// Call the tool with JSON arguments and return JSON output.
    async fn call_json(&self, args: Value) -> Result<Value, ToolError>
    where
        Self::Output: 'static,
    {
        // Models sometimes return arguments as a JSON-encoded string
        let typed_args: Self::Args = match &args {
            Value::String(s) => {
                serde_json::from_str(s).map_err(|e| ToolError::InvalidArguments(e.to_string()))?
            }
            _ => serde_json::from_value(args)
                .map_err(|e| ToolError::InvalidArguments(e.to_string()))?,
        };

        let result = self.call(typed_args).await.map_err(Into::into)?;
        serde_json::to_value(result).map_err(|e| ToolError::Execution(e.to_string()))
    }
}

/// A boxed dynamic tool that can be used in collections.
pub type BoxedTool = Box<dyn DynTool>;

/// Object-safe version of the Tool trait for dynamic dispatch.
#[async_trait]
pub trait DynTool: Send + Sync {
    /// Get the name of the tool.
    fn name(&self) -> &str;

    /// Get the description of the tool.
    fn description(&self) -> String;

    /// Get the tool definition.
    fn definition(&self) -> ToolDefinition;

    /// Call the tool with JSON arguments.
    async fn call_json(&self, args: Value) -> Result<Value, ToolError>;
}

#[async_trait]
impl<T: Tool + 'static> DynTool for T
where
    T::Output: 'static,
{
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> String {
        Tool::description(self)
    }

    fn definition(&self) -> ToolDefinition {
        Tool::definition(self)
    }

    async fn call_json(&self, args: Value) -> Result<Value, ToolError> {
        Tool::call_json(self, args).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct ShoutArgs {
        text: String,
    }

    struct ShoutTool;

    #[async_trait]
    impl Tool for ShoutTool {
        const NAME: &'static str = "shout";

        type Args = ShoutArgs;
        type Output = String;
        type Error = ToolError;

        fn description(&self) -> String {
            "Uppercase the input text".to_owned()
        }

        fn parameters_schema(&self) -> Value {
            json!({
                "type": "object",
                "properties": {
                    "text": {"type": "string", "description": "Text to uppercase"}
                },
                "required": ["text"]
            })
        }

        async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
            Ok(args.text.to_uppercase())
        }
    }

    mod definition {
        use super::*;

        #[test]
        fn serializes_to_function_envelope() {
            let def = ToolDefinition::new(
                "serper_search",
                "Search the web",
                json!({"type": "object", "properties": {}}),
            );
            let value = serde_json::to_value(&def).unwrap();

            assert_eq!(value["type"], "function");
            assert_eq!(value["function"]["name"], "serper_search");
            assert_eq!(value["function"]["description"], "Search the web");
            assert_eq!(value["function"]["parameters"]["type"], "object");
        }

        #[test]
        fn accessors_return_fields() {
            let def = ToolDefinition::new("shout", "Uppercase", json!({}));
            assert_eq!(def.name(), "shout");
            assert_eq!(def.description(), "Uppercase");
        }

        #[test]
        fn tool_definition_comes_from_trait() {
            let def = Tool::definition(&ShoutTool);
            assert_eq!(def.name, "shout");
            assert_eq!(def.parameters["required"][0], "text");
        }
    }

    mod call_json {
        use super::*;

        #[tokio::test]
        async fn accepts_object_arguments() {
            let out = Tool::call_json(&ShoutTool, json!({"text": "quiet"}))
                .await
                .unwrap();
            assert_eq!(out, json!("QUIET"));
        }

        #[tokio::test]
        async fn accepts_string_encoded_arguments() {
            let out = Tool::call_json(&ShoutTool, json!(r#"{"text": "quiet"}"#))
                .await
                .unwrap();
            assert_eq!(out, json!("QUIET"));
        }

        #[tokio::test]
        async fn rejects_malformed_arguments() {
            let err = Tool::call_json(&ShoutTool, json!({"wrong": 1}))
                .await
                .unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments(_)));
        }
    }

    mod dynamic {
        use super::*;

        #[tokio::test]
        async fn boxed_tool_dispatches() {
            let boxed: BoxedTool = Box::new(ShoutTool);
            assert_eq!(boxed.name(), "shout");
            assert_eq!(boxed.definition().name, "shout");

            let out = boxed.call_json(json!({"text": "hi"})).await.unwrap();
            assert_eq!(out, json!("HI"));
        }
    }
}
