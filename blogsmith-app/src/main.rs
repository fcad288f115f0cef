//! Blogsmith CLI - AI blog writing pipeline
//!
//! A command-line interface and web server for generating researched blog
//! posts with a two-agent crew.

#![allow(clippy::print_stdout)] // CLI program intentionally uses stdout

mod check;
mod web;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use blogsmith::cache::ResultCache;
use blogsmith::credentials::Credentials;
use blogsmith::error::Result;
use blogsmith::pipeline::{BlogPipeline, MODEL_CHOICES, PROGRESS_LINES, derive_filename};
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Blogsmith - research and write AI-generated blog posts
#[derive(Parser)]
#[command(name = "blogsmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web UI
    Serve(ServeArgs),

    /// Generate a blog post from the command line
    Generate(GenerateArgs),

    /// Check credentials and service connectivity
    Check(CheckArgs),
}

/// Arguments for the serve command
#[derive(Args)]
struct ServeArgs {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8080)]
    port: u16,
}

/// Arguments for the generate command
#[derive(Args)]
struct GenerateArgs {
    /// Blog topic
    #[arg(short, long)]
    topic: String,

    /// Clarifai model to use
    #[arg(short, long, default_value = MODEL_CHOICES[0])]
    model: String,

    /// Write the markdown to a file instead of stdout; without a value,
    /// the filename is derived from the topic
    #[arg(short, long, value_name = "FILE")]
    out: Option<Option<PathBuf>>,

    /// Skip the result cache
    #[arg(long)]
    no_cache: bool,
}

/// Arguments for the check command
#[derive(Args)]
struct CheckArgs {
    /// Probe Clarifai and Serper with one small request each
    #[arg(long)]
    live: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let rt = tokio::runtime::Runtime::new().expect("failed to create tokio runtime");

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "blogsmith={level},{}",
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Serve(args) => cmd_serve(args).await,
        Commands::Generate(args) => cmd_generate(args).await,
        Commands::Check(args) => check::run(args.live).await,
    }
}

/// Start the web UI.
async fn cmd_serve(args: ServeArgs) -> Result<()> {
    let credentials = Credentials::from_env()?;
    web::serve(&args.host, args.port, credentials).await
}

/// Run the pipeline once from the command line.
async fn cmd_generate(args: GenerateArgs) -> Result<()> {
    let credentials = Credentials::from_env()?;

    let mut pipeline = BlogPipeline::new(credentials, args.model.as_str());
    if args.no_cache {
        pipeline = pipeline.with_cache(Arc::new(ResultCache::with_ttl(Duration::ZERO)));
    }

    for line in PROGRESS_LINES {
        println!("{line}");
    }

    let output = pipeline.generate(&args.topic).await?;

    match args.out {
        Some(path) => {
            let path = path.unwrap_or_else(|| PathBuf::from(derive_filename(&args.topic)));
            tokio::fs::write(&path, &output.raw).await?;
            println!("Saved to {}", path.display());
        }
        None => println!("{}", output.raw),
    }

    Ok(())
}
