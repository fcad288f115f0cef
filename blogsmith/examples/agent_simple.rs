//! Minimal single-agent example.
//!
//! ```bash
//! export CLARIFAI_PAT=your_pat_here
//! cargo run --example agent_simple
//! ```

#![allow(clippy::print_stdout)]

use blogsmith::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let provider: SharedChatProvider = Arc::new(Clarifai::from_env()?);

    let agent = Agent::new("Helpful Assistant")
        .goal("Answer questions clearly and concisely")
        .provider(provider);

    let result = agent.run("What is the capital of France?").await?;

    println!("{}", result.output);
    println!("(finished in {} step(s))", result.steps);

    Ok(())
}
