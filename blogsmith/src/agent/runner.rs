//! The agent execution engine.
//!
//! The [`Runner`] drives an [`Agent`] through its reasoning loop:
//!
//! 1. Build messages from the system prompt + task input
//! 2. Call the LLM with the agent's tools advertised
//! 3. Execute any requested tool calls and append their results
//! 4. Loop until the LLM produces plain text, then return it
//!
//! The loop terminates when the LLM produces a final text output, an error
//! occurs, or the maximum step count is exceeded. Provider and tool-dispatch
//! errors propagate unmodified; there is no retry.

use serde_json::Value;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::chat::{ChatRequest, ChatResponse, ToolChoice};
use crate::error::{Error, Result};
use crate::message::Message;
use crate::tool::{BoxedTool, ToolDefinition};
use crate::usage::Usage;

use super::config::Agent;
use super::result::{NextStep, RunResult, StepInfo, ToolCallRecord, ToolCallRequest};

/// Stateless execution engine that drives an [`Agent`] through its
/// reasoning loop.
///
/// `Runner` owns no state, so it is safe to run the same agent concurrently
/// with different inputs.
#[derive(Debug, Clone, Copy)]
pub struct Runner;

impl Runner {
    /// Execute an agent run to completion.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Agent`] if no provider is configured,
    /// [`Error::MaxSteps`] if the step limit is exceeded, or propagates
    /// LLM errors encountered during execution.
    pub async fn run(agent: &Agent, input: impl Into<String> + Send) -> Result<RunResult> {
        let input = input.into();
        let span = info_span!(
            "agent",
            agent.role = %agent.role,
            agent.model = %agent.model,
            agent.max_steps = agent.max_steps,
            agent.result_steps = tracing::field::Empty,
            error = tracing::field::Empty,
        );
        Self::run_inner(agent, input).instrument(span).await
    }

    /// Internal async implementation of the run loop.
    async fn run_inner(agent: &Agent, input: String) -> Result<RunResult> {
        let provider = agent.provider.as_deref().ok_or_else(|| {
            Error::agent(format!(
                "Agent '{}' has no provider configured. Call .provider() before running.",
                agent.role
            ))
        })?;

        let mut messages = vec![Message::system(agent.system_prompt()), Message::user(input)];
        let definitions: Vec<ToolDefinition> =
            agent.tools.iter().map(|t| t.definition()).collect();

        let tool_names: Vec<&str> = definitions.iter().map(ToolDefinition::name).collect();
        debug!(agent = %agent.role, tools = ?tool_names, "Agent run started");

        let mut step_history: Vec<StepInfo> = Vec::new();
        let mut cumulative_usage = Usage::zero();

        for step in 1..=agent.max_steps {
            debug!(agent = %agent.role, step, "Starting step");

            let request = Self::build_request(agent, &messages, &definitions);
            let response = provider.chat(&request).await.map_err(|e| {
                error!(error = %e, agent = %agent.role, step, "LLM call failed");
                tracing::Span::current().record("error", tracing::field::display(&e));
                e
            })?;

            if let Some(usage) = response.usage {
                cumulative_usage += usage;
            }

            match Self::classify_response(&response) {
                NextStep::FinalOutput { output } => {
                    messages.push(response.message.clone());
                    step_history.push(StepInfo {
                        step,
                        response,
                        tool_calls: Vec::new(),
                    });

                    tracing::Span::current().record("agent.result_steps", step);
                    info!(
                        agent = %agent.role,
                        steps = step,
                        input_tokens = cumulative_usage.input_tokens,
                        output_tokens = cumulative_usage.output_tokens,
                        "Agent run completed",
                    );

                    return Ok(RunResult {
                        output,
                        usage: cumulative_usage,
                        steps: step,
                        step_history,
                    });
                }
                NextStep::ToolCalls { calls } => {
                    messages.push(response.message.clone());

                    let tool_records =
                        Self::execute_tool_calls(&calls, agent, &mut messages).await;

                    step_history.push(StepInfo {
                        step,
                        response,
                        tool_calls: tool_records,
                    });
                }
            }
        }

        let err = Error::max_steps(agent.max_steps);
        error!(error = %err, agent = %agent.role, max_steps = agent.max_steps, "Max steps exceeded");
        tracing::Span::current().record("error", tracing::field::display(&err));
        Err(err)
    }

    /// Build a [`ChatRequest`] for the current step.
    fn build_request(
        agent: &Agent,
        messages: &[Message],
        definitions: &[ToolDefinition],
    ) -> ChatRequest {
        let mut request = ChatRequest::with_messages(&agent.model, messages.to_vec());
        if !definitions.is_empty() {
            request = request
                .tools(definitions.to_vec())
                .tool_choice(ToolChoice::Auto);
        }
        request
    }

    /// Classify an LLM response into a [`NextStep`].
    fn classify_response(response: &ChatResponse) -> NextStep {
        if let Some(tool_calls) = response.message.tool_calls.as_ref() {
            let calls: Vec<ToolCallRequest> =
                tool_calls.iter().map(ToolCallRequest::from).collect();
            if !calls.is_empty() {
                return NextStep::ToolCalls { calls };
            }
        }
        NextStep::FinalOutput {
            output: response.text().unwrap_or_default(),
        }
    }

    /// Execute tool calls concurrently and append results to messages.
    ///
    /// All calls run simultaneously via [`futures::future::join_all`]; the
    /// result messages are appended in the original call order.
    async fn execute_tool_calls(
        calls: &[ToolCallRequest],
        agent: &Agent,
        messages: &mut Vec<Message>,
    ) -> Vec<ToolCallRecord> {
        let futs: Vec<_> = calls
            .iter()
            .map(|call| Self::execute_single_tool(call, agent))
            .collect();
        let records = futures::future::join_all(futs).await;

        for record in &records {
            messages.push(Message::tool(&record.id, &record.result));
        }

        records
    }

    /// Execute a single tool call within its own tracing span.
    async fn execute_single_tool(call: &ToolCallRequest, agent: &Agent) -> ToolCallRecord {
        let tool_span = info_span!(
            "tool",
            tool.name = %call.name,
            tool.id = %call.id,
            tool.input = %call.arguments,
            tool.success = tracing::field::Empty,
            error = tracing::field::Empty,
        );

        async {
            let (result_str, success) =
                if let Some(tool) = agent.tools.iter().find(|t| t.name() == call.name) {
                    Self::dispatch_tool(tool, call).await
                } else {
                    warn!(tool = %call.name, "Tool not found");
                    (format!("Tool '{}' not found", call.name), false)
                };

            let current = tracing::Span::current();
            current.record("tool.success", success);
            if !success {
                current.record("error", result_str.as_str());
            }

            ToolCallRecord {
                id: call.id.clone(),
                name: call.name.clone(),
                arguments: call.arguments.clone(),
                result: result_str,
                success,
            }
        }
        .instrument(tool_span)
        .await
    }

    /// Dispatch a tool call via the [`DynTool`](crate::tool::DynTool) interface.
    async fn dispatch_tool(tool: &BoxedTool, call: &ToolCallRequest) -> (String, bool) {
        let args: Value = serde_json::from_str(&call.arguments)
            .unwrap_or_else(|_| Value::String(call.arguments.clone()));

        match tool.call_json(args).await {
            Ok(value) => {
                let output = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (output, true)
            }
            Err(e) => {
                warn!(tool = %call.name, error = %e, "Tool execution failed");
                (format!("Tool error: {e}"), false)
            }
        }
    }
}
