//! Credential and connectivity self-check.
//!
//! One diagnostic entry point: report which credentials are present,
//! construct the Clarifai provider and the Serper search tool, and with
//! `--live` probe both services with one small request each. The command
//! always reports rather than aborting on the first problem.

use blogsmith::chat::ChatProviderExt;
use blogsmith::credentials::{CLARIFAI_PAT_VAR, Credentials, SERPER_API_KEY_VAR};
use blogsmith::error::Result;
use blogsmith::llms::Clarifai;
use blogsmith::pipeline::MODEL_CHOICES;
use blogsmith::tool::Tool;
use blogsmith::tools::{SerperSearch, WebSearchArgs};

/// Run the self-check, optionally probing the live services.
pub async fn run(live: bool) -> Result<()> {
    println!("blogsmith {}", env!("CARGO_PKG_VERSION"));
    println!("{}", "=".repeat(50));
    println!("Environment variables check:");

    let pat_present = report_var(CLARIFAI_PAT_VAR);
    let serper_present = report_var(SERPER_API_KEY_VAR);

    println!("{}", "=".repeat(50));
    println!("Basic functionality test:");

    if pat_present && serper_present {
        let credentials = Credentials::from_env()?;
        probe(&credentials, live).await;
    } else {
        println!("⚠️ Skipping functionality test - missing API keys");
    }

    println!("{}", "=".repeat(50));
    println!("Test completed!");

    Ok(())
}

/// Report one environment variable as set or missing.
fn report_var(name: &str) -> bool {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => {
            println!("✅ {name} is set (length: {})", value.len());
            true
        }
        _ => {
            println!("❌ {name} is not set");
            false
        }
    }
}

/// Construct the provider and the search tool, then optionally call both.
async fn probe(credentials: &Credentials, live: bool) {
    println!("Testing Clarifai provider initialization...");
    let provider = match Clarifai::from_credentials(credentials, MODEL_CHOICES[0]) {
        Ok(provider) => {
            println!("✅ Clarifai provider initialization successful");
            Some(provider)
        }
        Err(e) => {
            println!("❌ Clarifai provider initialization failed: {e}");
            None
        }
    };

    println!("Testing search tool initialization...");
    let search = SerperSearch::new(credentials.serper_api_key());
    println!("✅ Search tool initialization successful");

    if !live {
        return;
    }

    if let Some(provider) = provider {
        println!("Testing live chat completion...");
        match provider.complete("Reply with the single word: ok").await {
            Ok(reply) => println!("✅ Chat completion successful: {}", reply.trim()),
            Err(e) => println!("❌ Chat completion failed: {e}"),
        }
    }

    println!("Testing live web search...");
    let args = WebSearchArgs {
        query: "rust programming language".to_owned(),
    };
    match search.call(args).await {
        Ok(_) => println!("✅ Web search successful"),
        Err(e) => println!("❌ Web search failed: {e}"),
    }
}
