//! Two-agent crew example with task chaining.
//!
//! A researcher gathers facts and a writer turns them into prose. The
//! writing task consumes the research task's output as context.
//!
//! ```bash
//! export CLARIFAI_PAT=your_pat_here
//! export SERPER_API_KEY=your_key_here
//! cargo run --example crew_two_agents
//! ```

#![allow(clippy::print_stdout)]

use blogsmith::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let credentials = Credentials::from_env()?;
    let provider: SharedChatProvider = Arc::new(Clarifai::from_credentials(
        &credentials,
        "gcp/generate/models/gemini-2_5-pro",
    )?);

    let mut crew = Crew::new().with_process(Process::Sequential);

    let researcher = crew.add_agent(
        Agent::new("Senior Research Analyst")
            .goal("Dig up accurate, current facts")
            .backstory("You verify claims before repeating them.")
            .provider(Arc::clone(&provider))
            .tool(Box::new(SerperSearch::new(credentials.serper_api_key()))),
    );
    let writer = crew.add_agent(
        Agent::new("Tech Content Strategist")
            .goal("Write clear, engaging prose")
            .backstory("You explain hard topics without jargon.")
            .provider(provider),
    );

    let research = crew.add_task(Task::new(
        "Collect five notable facts about the Rust programming language.",
        "A bullet list of five facts.",
        researcher,
    ));
    crew.add_task(
        Task::new(
            "Write a short paragraph introducing Rust to a newcomer.",
            "One paragraph of flowing prose.",
            writer,
        )
        .context(research),
    );

    let output = crew.kickoff().await?;

    println!("{}", output.raw);
    println!("---");
    println!(
        "Tokens: {} input / {} output",
        output.usage.input_tokens, output.usage.output_tokens
    );

    Ok(())
}
