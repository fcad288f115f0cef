//! Crew orchestration for sequential multi-agent task execution.
//!
//! A [`Crew`] holds agents and tasks. [`Crew::kickoff`] runs the tasks
//! strictly in declaration order; each task's prompt embeds the raw outputs
//! of the earlier tasks it lists as context. Any provider or tool error
//! aborts the run and propagates unmodified: no retry, no partial results.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut crew = Crew::new();
//! let researcher = crew.add_agent(researcher);
//! let writer = crew.add_agent(writer);
//!
//! let research = crew.add_task(Task::new(research_text, "Detailed report", researcher));
//! crew.add_task(Task::new(writing_text, "Blog post", writer).context(research));
//!
//! let output = crew.kickoff().await?;
//! println!("{}", output.raw);
//! ```

use serde::{Deserialize, Serialize};
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use crate::agent::{Agent, Runner};
use crate::error::{Error, Result};
use crate::usage::Usage;

/// Execution strategy for a crew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Process {
    /// Tasks run one after another in declaration order.
    #[default]
    Sequential,
}

/// Handle to an agent registered with a [`Crew`].
///
/// Returned by [`Crew::add_agent`] and only meaningful for that crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgentId(usize);

/// Handle to a task registered with a [`Crew`].
///
/// Returned by [`Crew::add_task`] and only meaningful for that crew.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(usize);

/// A unit of work assigned to one agent.
#[derive(Debug)]
pub struct Task {
    pub(crate) description: String,
    pub(crate) expected_output: String,
    pub(crate) agent: AgentId,
    pub(crate) context: Vec<TaskId>,
}

impl Task {
    /// Create a task with its instructions, expected output, and agent.
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: AgentId,
    ) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            context: Vec::new(),
        }
    }

    /// Add an earlier task whose output feeds this one.
    #[must_use]
    pub fn context(mut self, task: TaskId) -> Self {
        self.context.push(task);
        self
    }

    /// The task instructions.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Render the full prompt, embedding context output when present.
    pub(crate) fn prompt(&self, context: Option<&str>) -> String {
        let mut prompt = self.description.clone();
        if !self.expected_output.is_empty() {
            prompt.push_str("\n\nThis is the expected outcome for your final answer: ");
            prompt.push_str(&self.expected_output);
        }
        if let Some(context) = context {
            prompt.push_str("\n\nThis is the context you are working with:\n");
            prompt.push_str(context);
        }
        prompt
    }
}

/// Output of one completed task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskOutput {
    /// The task instructions that were executed.
    pub description: String,
    /// Role of the agent that produced the output.
    pub agent: String,
    /// The raw text output.
    pub raw: String,
    /// Token usage for this task.
    pub usage: Usage,
}

/// Output of a full crew run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrewOutput {
    /// Unique run identifier.
    pub id: Uuid,
    /// The final task's raw output.
    pub raw: String,
    /// Per-task outputs, in execution order.
    pub task_outputs: Vec<TaskOutput>,
    /// Token usage summed across all tasks.
    pub usage: Usage,
}

/// A set of agents and the ordered tasks they execute.
#[derive(Debug, Default)]
pub struct Crew {
    agents: Vec<Agent>,
    tasks: Vec<Task>,
    process: Process,
}

impl Crew {
    /// Create an empty sequential crew.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the execution process.
    #[must_use]
    pub const fn with_process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    /// Register an agent, returning its handle.
    pub fn add_agent(&mut self, agent: Agent) -> AgentId {
        self.agents.push(agent);
        AgentId(self.agents.len() - 1)
    }

    /// Register a task, returning its handle. Tasks execute in the order
    /// they are added.
    pub fn add_task(&mut self, task: Task) -> TaskId {
        self.tasks.push(task);
        TaskId(self.tasks.len() - 1)
    }

    /// Number of registered agents.
    #[must_use]
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Number of registered tasks.
    #[must_use]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Execute all tasks in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Crew`] when the crew is miswired (no tasks, an
    /// unknown agent handle, or a context reference to a later task), and
    /// propagates any agent, provider, or tool error unmodified.
    pub async fn kickoff(&self) -> Result<CrewOutput> {
        self.validate()?;

        let id = Uuid::new_v4();
        let span = info_span!(
            "crew",
            crew.id = %id,
            crew.process = ?self.process,
            crew.tasks = self.tasks.len(),
        );
        self.kickoff_inner(id).instrument(span).await
    }

    async fn kickoff_inner(&self, id: Uuid) -> Result<CrewOutput> {
        let mut task_outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());
        let mut usage = Usage::zero();

        for (index, task) in self.tasks.iter().enumerate() {
            let agent = &self.agents[task.agent.0];

            let context = Self::assemble_context(&task.context, &task_outputs);
            let prompt = task.prompt(context.as_deref());

            info!(
                task = index + 1,
                total = self.tasks.len(),
                agent = %agent.role(),
                "Starting task",
            );

            let result = Runner::run(agent, prompt).await?;
            usage += result.usage;

            info!(
                task = index + 1,
                agent = %agent.role(),
                steps = result.steps,
                "Task completed",
            );

            task_outputs.push(TaskOutput {
                description: task.description.clone(),
                agent: agent.role().to_owned(),
                raw: result.output,
                usage: result.usage,
            });
        }

        let raw = task_outputs
            .last()
            .map(|o| o.raw.clone())
            .ok_or_else(|| Error::crew("Crew produced no task outputs"))?;

        info!(crew.id = %id, tasks = task_outputs.len(), "Crew run completed");

        Ok(CrewOutput {
            id,
            raw,
            task_outputs,
            usage,
        })
    }

    /// Join the referenced tasks' raw outputs, in reference order.
    ///
    /// A single reference yields that task's output verbatim.
    fn assemble_context(context: &[TaskId], outputs: &[TaskOutput]) -> Option<String> {
        if context.is_empty() {
            return None;
        }
        let parts: Vec<&str> = context
            .iter()
            .map(|dep| outputs[dep.0].raw.as_str())
            .collect();
        Some(parts.join("\n\n"))
    }

    /// Check crew wiring before any LLM call is made.
    fn validate(&self) -> Result<()> {
        if self.tasks.is_empty() {
            return Err(Error::crew("Crew has no tasks"));
        }

        for (index, task) in self.tasks.iter().enumerate() {
            if task.agent.0 >= self.agents.len() {
                return Err(Error::crew(format!(
                    "Task {} references unknown agent handle {:?}",
                    index + 1,
                    task.agent
                )));
            }
            for dep in &task.context {
                if dep.0 >= index {
                    return Err(Error::crew(format!(
                        "Task {} may only take context from strictly earlier tasks, got {:?}",
                        index + 1,
                        dep
                    )));
                }
            }
        }

        Ok(())
    }
}
