//! Web search agent example demonstrating tool calling.
//!
//! This example shows how to create an agent with the Serper web search tool.
//!
//! # Running
//!
//! Set your API keys:
//! ```bash
//! export CLARIFAI_PAT=your_pat_here
//! export SERPER_API_KEY=your_key_here
//! cargo run --example web_search_agent
//! ```

#![allow(clippy::print_stdout)]

use blogsmith::prelude::*;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging
    tracing_subscriber::fmt::init();

    // Check for API keys
    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            eprintln!("{e}");
            eprintln!("Example: export CLARIFAI_PAT=... SERPER_API_KEY=...");
            std::process::exit(1);
        }
    };

    // Create the provider
    let provider: SharedChatProvider = Arc::new(Clarifai::from_credentials(
        &credentials,
        "gcp/generate/models/gemini-2_5-pro",
    )?);

    // Create an agent with the web search tool
    let agent = Agent::new("Senior Research Analyst")
        .goal("Uncover cutting-edge developments and facts on a given topic")
        .provider(provider)
        .tool(Box::new(SerperSearch::new(credentials.serper_api_key())))
        .max_steps(10);

    // Run the agent with a web search task
    let task = "Search for the latest news about the Rust programming language \
                and summarize the top result.";
    println!("Running agent with task: '{task}'");
    println!("---");

    match agent.run(task).await {
        Ok(result) => {
            println!("---");
            println!("Agent completed successfully!");
            println!("Result: {}", result.output);

            // Print token usage
            println!(
                "Total tokens used: {} (input: {}, output: {})",
                result.usage.total_tokens, result.usage.input_tokens, result.usage.output_tokens
            );
        }
        Err(e) => {
            eprintln!("Agent error: {e}");
        }
    }

    Ok(())
}
