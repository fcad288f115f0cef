//! Prelude module for convenient imports.
//!
//! This module re-exports commonly used types and traits for easy access.
//!
//! # Usage
//!
//! ```rust,ignore
//! use blogsmith::prelude::*;
//! ```

pub use crate::agent::{Agent, NextStep, RunResult, Runner, StepInfo, ToolCallRecord, ToolCallRequest};
pub use crate::cache::ResultCache;
pub use crate::chat::{
    ChatProvider, ChatProviderExt, ChatRequest, ChatResponse, SharedChatProvider, StopReason,
    ToolChoice,
};
pub use crate::credentials::Credentials;
pub use crate::crew::{AgentId, Crew, CrewOutput, Process, Task, TaskId, TaskOutput};
pub use crate::error::{Error, LlmError, LlmErrorKind, Result, ToolError};
pub use crate::llms::{Clarifai, ClarifaiConfig, MockProvider, MockReply};
pub use crate::message::{FunctionCall, Message, Role, ToolCall};
pub use crate::pipeline::{
    BlogPipeline, MODEL_CHOICES, PROGRESS_LINES, derive_filename, research_task, researcher,
    writer, writing_task,
};
pub use crate::tool::{BoxedTool, DynTool, Tool, ToolDefinition, ToolResult};
pub use crate::tools::{SearchResult, SerperSearch, WebSearchArgs};
pub use crate::usage::Usage;
