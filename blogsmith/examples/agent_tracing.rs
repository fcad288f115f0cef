//! Agent with tracing / observability example.
//!
//! Demonstrates how to wire up `tracing-subscriber` so that the
//! built-in pipeline, crew, agent, LLM, and tool spans are printed
//! to stderr.
//!
//! ```bash
//! export CLARIFAI_PAT=your_pat_here
//! cargo run --example agent_tracing
//! ```

#![allow(clippy::print_stdout)]

use blogsmith::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize a tracing subscriber that prints spans + events to stderr.
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter("info")
        .init();

    let provider: SharedChatProvider = Arc::new(Clarifai::from_env()?);

    let agent = Agent::new("assistant")
        .goal("Keep answers concise.")
        .model("gcp/generate/models/gemini-2_5-pro")
        .provider(provider);

    let result = agent.run("What is the tallest mountain on Earth?").await?;

    println!("{}", result.output);

    Ok(())
}
