//! Agent configuration.
//!
//! The [`Agent`] struct defines an agent's identity and capabilities. It
//! contains no execution logic; the [`Runner`](super::Runner) handles how it
//! runs. Each agent carries its own [`SharedChatProvider`], so different
//! agents can target different models behind the same crew.

use std::fmt;

use crate::chat::SharedChatProvider;
use crate::error::Result;
use crate::tool::BoxedTool;

use super::result::RunResult;
use super::runner::Runner;

/// A role-based agent: identity, provider, and tools.
///
/// Immutable once built. Construction cannot fail; a missing provider is
/// only an error when the agent is actually run.
pub struct Agent {
    /// Role played by the agent, e.g. "Senior Research Analyst".
    pub(crate) role: String,

    /// Objective the agent works toward.
    pub(crate) goal: String,

    /// Background persona, folded into the system prompt.
    pub(crate) backstory: String,

    /// Model identifier passed verbatim to the provider.
    pub(crate) model: String,

    /// The LLM provider used for chat completions.
    pub(crate) provider: Option<SharedChatProvider>,

    /// Tools available via function calling.
    pub(crate) tools: Vec<BoxedTool>,

    /// Maximum number of reasoning steps before the runner aborts.
    pub(crate) max_steps: usize,
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("role", &self.role)
            .field("goal", &self.goal)
            .field("model", &self.model)
            .field("provider", &self.provider.is_some())
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name()).collect::<Vec<_>>(),
            )
            .field("max_steps", &self.max_steps)
            .finish()
    }
}

impl Agent {
    /// Default maximum number of reasoning steps.
    pub const DEFAULT_MAX_STEPS: usize = 10;

    /// Create a new agent with the given role and sensible defaults.
    #[must_use]
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: String::new(),
            backstory: String::new(),
            model: String::new(),
            provider: None,
            tools: Vec::new(),
            max_steps: Self::DEFAULT_MAX_STEPS,
        }
    }

    /// Set the agent's goal.
    #[must_use]
    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Set the agent's backstory.
    #[must_use]
    pub fn backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = backstory.into();
        self
    }

    /// Set the model identifier.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the LLM provider for this agent.
    #[must_use]
    pub fn provider(mut self, provider: SharedChatProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Add a tool to this agent.
    #[must_use]
    pub fn tool(mut self, tool: BoxedTool) -> Self {
        self.tools.push(tool);
        self
    }

    /// Set all tools for this agent.
    #[must_use]
    pub fn tools(mut self, tools: Vec<BoxedTool>) -> Self {
        self.tools = tools;
        self
    }

    /// Set the maximum number of reasoning steps.
    #[must_use]
    pub const fn max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// The agent's role.
    #[must_use]
    pub fn role(&self) -> &str {
        &self.role
    }

    /// The model identifier this agent targets.
    #[must_use]
    pub fn model_id(&self) -> &str {
        &self.model
    }

    /// Whether a provider has been configured.
    #[must_use]
    pub const fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Render the system prompt from role, backstory, and goal.
    #[must_use]
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are {}.", self.role);
        if !self.backstory.is_empty() {
            prompt.push(' ');
            prompt.push_str(&self.backstory);
        }
        if !self.goal.is_empty() {
            prompt.push_str("\n\nYour personal goal is: ");
            prompt.push_str(&self.goal);
        }
        prompt
    }

    /// Execute this agent on the given input.
    ///
    /// Convenience wrapper around [`Runner::run`].
    ///
    /// # Errors
    ///
    /// Returns an error when no provider is configured, when the step limit
    /// is exceeded, or when an LLM call fails.
    pub async fn run(&self, input: impl Into<String> + Send) -> Result<RunResult> {
        Runner::run(self, input).await
    }
}
