//! Role-based agents and their execution loop.
//!
//! - **[`Agent`]** is a pure description: a role, a goal, a backstory, the
//!   model to use, an LLM provider, and the tools it may call.
//! - **[`Runner`]** is a stateless execution engine that drives an agent
//!   through a bounded reasoning loop: call the LLM, execute any requested
//!   tools, feed the results back, repeat until a plain text answer.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use blogsmith::agent::Agent;
//!
//! let researcher = Agent::new("Senior Research Analyst")
//!     .goal("Uncover cutting-edge developments and facts on a given topic")
//!     .backstory("Expert research analyst at a tech think tank.")
//!     .model("gcp/generate/models/gemini-2_5-pro")
//!     .provider(provider.clone())
//!     .tool(Box::new(search_tool));
//!
//! let result = researcher.run("Summarize recent quantum computing news").await?;
//! println!("{}", result.output);
//! ```

mod config;
mod result;
mod runner;

pub use config::Agent;
pub use result::{NextStep, RunResult, StepInfo, ToolCallRecord, ToolCallRequest};
pub use runner::Runner;
