//! Integration tests for the blogsmith pipeline.

#![allow(clippy::unwrap_used, clippy::panic, clippy::clone_on_ref_ptr)]

use std::sync::Arc;
use std::time::Duration;

use blogsmith::prelude::*;

const TOPIC: &str = "Quantum Computing in Healthcare";

fn credentials() -> Credentials {
    Credentials::new("test-pat", "test-serper-key")
}

fn pipeline_with(provider: Arc<MockProvider>) -> BlogPipeline {
    BlogPipeline::new(credentials(), MODEL_CHOICES[0]).with_provider(provider)
}

#[tokio::test]
async fn test_research_runs_before_writing() {
    let provider = Arc::new(MockProvider::new(vec![
        "research findings about qubits".to_owned(),
        "# Quantum Leaps\n\nThe article.".to_owned(),
    ]));

    let output = pipeline_with(provider.clone()).generate(TOPIC).await.unwrap();

    assert_eq!(output.task_outputs.len(), 2);
    assert_eq!(output.task_outputs[0].agent, "Senior Research Analyst");
    assert_eq!(output.task_outputs[1].agent, "Tech Content Strategist");
    assert_eq!(output.raw, "# Quantum Leaps\n\nThe article.");

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    let research_prompt = requests[0].messages[1].text().unwrap();
    assert!(research_prompt.contains(TOPIC));
}

#[tokio::test]
async fn test_writer_receives_research_verbatim() {
    let provider = Arc::new(MockProvider::new(vec![
        "RESEARCH SENTINEL: qubit error correction breakthroughs".to_owned(),
        "the post".to_owned(),
    ]));

    pipeline_with(provider.clone()).generate(TOPIC).await.unwrap();

    let requests = provider.requests();
    let writing_prompt = requests[1].messages[1].text().unwrap();
    assert!(writing_prompt.contains("RESEARCH SENTINEL: qubit error correction breakthroughs"));
}

#[tokio::test]
async fn test_cache_serves_repeat_requests_without_new_calls() {
    let provider = Arc::new(MockProvider::new(vec![
        "research".to_owned(),
        "post".to_owned(),
    ]));
    let pipeline = pipeline_with(provider.clone());

    let first = pipeline.generate(TOPIC).await.unwrap();
    let second = pipeline.generate(TOPIC).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(first.raw, second.raw);
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_expired_cache_triggers_a_fresh_run() {
    let provider = Arc::new(MockProvider::new(vec![
        "research one".to_owned(),
        "post one".to_owned(),
        "research two".to_owned(),
        "post two".to_owned(),
    ]));
    let cache = Arc::new(ResultCache::with_ttl(Duration::ZERO));
    let pipeline = pipeline_with(provider.clone()).with_cache(cache);

    let first = pipeline.generate(TOPIC).await.unwrap();
    let second = pipeline.generate(TOPIC).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(second.raw, "post two");
    assert_eq!(provider.call_count(), 4);
}

#[tokio::test]
async fn test_model_is_part_of_the_cache_key() {
    let provider = Arc::new(MockProvider::new(vec![
        "r1".to_owned(),
        "p1".to_owned(),
        "r2".to_owned(),
        "p2".to_owned(),
    ]));
    let cache = Arc::new(ResultCache::new());

    let gemini = BlogPipeline::new(credentials(), MODEL_CHOICES[0])
        .with_provider(provider.clone())
        .with_cache(cache.clone());
    let llama = BlogPipeline::new(credentials(), MODEL_CHOICES[2])
        .with_provider(provider.clone())
        .with_cache(cache);

    gemini.generate(TOPIC).await.unwrap();
    llama.generate(TOPIC).await.unwrap();

    assert_eq!(provider.call_count(), 4);
}

#[tokio::test]
async fn test_provider_failure_reaches_the_caller_uncached() {
    let provider = Arc::new(MockProvider::failing(LlmError::rate_limited("clarifai")));
    let pipeline = pipeline_with(provider);

    let err = pipeline.generate(TOPIC).await.unwrap_err();
    assert!(err.to_string().contains("Rate limit exceeded"));
    assert!(pipeline.cache().is_empty().await);
}

#[tokio::test]
async fn test_blank_topics_never_reach_the_provider() {
    let provider = Arc::new(MockProvider::single("unused"));
    let pipeline = pipeline_with(provider.clone());

    assert!(matches!(pipeline.generate("").await, Err(Error::InvalidTopic)));
    assert!(matches!(pipeline.generate("  \n ").await, Err(Error::InvalidTopic)));
    assert_eq!(provider.call_count(), 0);
}

#[test]
fn test_missing_credentials_are_named() {
    let err = Credentials::from_lookup(|_| None).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("CLARIFAI_PAT"));
    assert!(msg.contains("SERPER_API_KEY"));
}

#[test]
fn test_download_filename_rules() {
    assert_eq!(derive_filename("My Topic!!"), "My_Topic!!_blog.md");
    assert_eq!(derive_filename(TOPIC), "Quantum_Computing_in_Healthcar_blog.md");
}
