//! End-to-end blog generation example.
//!
//! Runs the full research-then-write pipeline and saves the post to disk.
//!
//! ```bash
//! export CLARIFAI_PAT=your_pat_here
//! export SERPER_API_KEY=your_key_here
//! cargo run --example blog_pipeline
//! ```

#![allow(clippy::print_stdout)]

use blogsmith::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::from_env()?;
    let pipeline = BlogPipeline::new(credentials, MODEL_CHOICES[0]);

    let topic = "Quantum Computing in Healthcare";
    println!("Generating a blog post about: {topic}");

    let output = pipeline.generate(topic).await?;

    let filename = derive_filename(topic);
    std::fs::write(&filename, &output.raw)?;

    println!("Saved {} bytes to {filename}", output.raw.len());
    Ok(())
}
