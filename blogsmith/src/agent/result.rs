//! Agent run result types.

use serde::{Deserialize, Serialize};

use crate::chat::ChatResponse;
use crate::message::ToolCall;
use crate::usage::Usage;

/// The result of a completed agent run.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// The final text output.
    pub output: String,
    /// Total token usage across all steps.
    pub usage: Usage,
    /// Number of reasoning steps taken.
    pub steps: usize,
    /// Per-step execution details, in order.
    pub step_history: Vec<StepInfo>,
}

impl RunResult {
    /// Tool call records across all steps, in execution order.
    #[must_use]
    pub fn tool_calls(&self) -> Vec<&ToolCallRecord> {
        self.step_history
            .iter()
            .flat_map(|s| s.tool_calls.iter())
            .collect()
    }
}

/// Details of a single reasoning step.
#[derive(Debug, Clone)]
pub struct StepInfo {
    /// Step number, starting at 1.
    pub step: usize,
    /// The LLM response for this step.
    pub response: ChatResponse,
    /// Tool calls executed during this step.
    pub tool_calls: Vec<ToolCallRecord>,
}

/// A completed tool invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallRecord {
    /// Provider-assigned call ID.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// JSON-encoded arguments as received.
    pub arguments: String,
    /// Stringified tool output (or error text).
    pub result: String,
    /// Whether the call succeeded.
    pub success: bool,
}

/// A tool invocation requested by the LLM, prior to execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallRequest {
    /// Provider-assigned call ID.
    pub id: String,
    /// Tool name.
    pub name: String,
    /// JSON-encoded arguments.
    pub arguments: String,
}

impl From<&ToolCall> for ToolCallRequest {
    fn from(call: &ToolCall) -> Self {
        Self {
            id: call.id.clone(),
            name: call.function.name.clone(),
            arguments: call.function.arguments.clone(),
        }
    }
}

/// Classification of an LLM response within the reasoning loop.
#[derive(Debug, Clone)]
pub enum NextStep {
    /// The LLM produced a final answer.
    FinalOutput {
        /// The answer text.
        output: String,
    },
    /// The LLM requested tool invocations.
    ToolCalls {
        /// The requested calls, in order.
        calls: Vec<ToolCallRequest>,
    },
}
