//! Blog generation pipeline.
//!
//! [`BlogPipeline`] wires the whole flow together: validate the topic,
//! consult the result cache, build the Clarifai provider and the Serper
//! search tool, assemble the researcher/writer crew, kick it off, and cache
//! the result. The agent and task factories live here too, parameterized
//! only by topic and model.

use std::sync::Arc;

use tracing::{Instrument, info, info_span};

use crate::cache::ResultCache;
use crate::chat::SharedChatProvider;
use crate::credentials::Credentials;
use crate::crew::{AgentId, Crew, CrewOutput, Task};
use crate::error::{Error, Result};
use crate::llms::Clarifai;
use crate::tool::BoxedTool;
use crate::tools::SerperSearch;

use crate::agent::Agent;

/// Models selectable for generation, Clarifai model paths. The first entry
/// is the default.
pub const MODEL_CHOICES: [&str; 6] = [
    "gcp/generate/models/gemini-2_5-pro",
    "gcp/generate/models/gemini-2_0-pro",
    "meta/llama-3_1-8b-instruct",
    "meta/llama-3_1-70b-instruct",
    "mistralai/mistral-7b-instruct-v0_2",
    "google/gemma-2b-it",
];

/// The three fixed status lines shown while a generation runs.
pub const PROGRESS_LINES: [&str; 3] = [
    "1. Researching topic...",
    "2. Analyzing findings...",
    "3. Writing blog post...",
];

/// Derive the download filename for a topic: spaces become underscores,
/// the stem is cut at 30 characters, then `_blog.md` is appended.
///
/// `derive_filename("My Topic!!")` is `"My_Topic!!_blog.md"`.
#[must_use]
pub fn derive_filename(topic: &str) -> String {
    let mut stem: String = topic.replace(' ', "_").chars().take(30).collect();
    stem.push_str("_blog.md");
    stem
}

/// Build the researcher agent: gathers verified information through the
/// given search tool.
#[must_use]
pub fn researcher(model: &str, provider: SharedChatProvider, search_tool: BoxedTool) -> Agent {
    Agent::new("Senior Research Analyst")
        .goal("Uncover cutting-edge developments and facts on a given topic")
        .backstory(
            "Expert research analyst at a tech think tank with 10+ years experience. \
             Specializes in identifying emerging trends, gathering verified information, \
             and presenting actionable insights with academic rigor.",
        )
        .model(model)
        .provider(provider)
        .tool(search_tool)
}

/// Build the writer agent: turns research into structured blog content.
#[must_use]
pub fn writer(model: &str, provider: SharedChatProvider) -> Agent {
    Agent::new("Tech Content Strategist")
        .goal("Craft compelling blog posts on technical topics")
        .backstory(
            "Award-winning content strategist with 15+ industry awards. \
             Transforms complex technical concepts into engaging narratives for \
             tech-savvy audiences while maintaining factual accuracy and readability.",
        )
        .model(model)
        .provider(provider)
}

/// Build the research task for a topic, assigned to the given agent.
#[must_use]
pub fn research_task(topic: &str, agent: AgentId) -> Task {
    Task::new(
        format!(
            "Conduct comprehensive analysis of '{topic}'.\n\
             Identify:\n\
             - Key trends and breakthrough technologies\n\
             - Major players and institutions\n\
             - Potential industry impacts\n\
             - Verified sources and data points"
        ),
        "Detailed analysis report with bullet points and sources",
        agent,
    )
}

/// Build the writing task for a topic, assigned to the given agent.
///
/// The caller wires the research task in as context.
#[must_use]
pub fn writing_task(topic: &str, agent: AgentId) -> Task {
    Task::new(
        format!(
            "Using research on '{topic}', develop an engaging blog post with:\n\
             - Compelling headline\n\
             - Clear introduction\n\
             - 3-5 body paragraphs with supporting evidence\n\
             - Conclusion with future outlook\n\
             - Accessible language with technical terms explained\n\
             Format requirements:\n\
             # Title\n\
             ## Section headers\n\
             **Bold** for emphasis\n\
             - Bullet points where appropriate\n\
             > Blockquotes for important insights\n\
             NO code blocks or triple backticks"
        ),
        "4-5 paragraph blog post in clean markdown",
        agent,
    )
}

/// The end-to-end blog generation flow for one model choice.
///
/// Cheap to construct per request; share the cache across pipelines via
/// [`BlogPipeline::with_cache`] to get cross-request caching.
#[derive(Clone)]
pub struct BlogPipeline {
    credentials: Credentials,
    model: String,
    cache: Arc<ResultCache>,
    provider_override: Option<SharedChatProvider>,
}

impl std::fmt::Debug for BlogPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogPipeline")
            .field("model", &self.model)
            .field("provider_override", &self.provider_override.is_some())
            .finish_non_exhaustive()
    }
}

impl BlogPipeline {
    /// Create a pipeline for the given credentials and model, with a
    /// private default cache.
    #[must_use]
    pub fn new(credentials: Credentials, model: impl Into<String>) -> Self {
        Self {
            credentials,
            model: model.into(),
            cache: Arc::new(ResultCache::new()),
            provider_override: None,
        }
    }

    /// Use a shared result cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<ResultCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the Clarifai provider. Tests use this to inject a
    /// [`MockProvider`](crate::llms::MockProvider).
    #[must_use]
    pub fn with_provider(mut self, provider: SharedChatProvider) -> Self {
        self.provider_override = Some(provider);
        self
    }

    /// The model this pipeline targets.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The result cache in use.
    #[must_use]
    pub fn cache(&self) -> Arc<ResultCache> {
        Arc::clone(&self.cache)
    }

    /// Generate a blog post for the topic.
    ///
    /// Consults the cache first; on a miss, runs the research + writing
    /// crew and stores the result. Failures are never cached.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTopic`] for empty or whitespace-only topics,
    /// and propagates any provider, tool, or crew error unmodified.
    pub async fn generate(&self, topic: &str) -> Result<CrewOutput> {
        if topic.trim().is_empty() {
            return Err(Error::InvalidTopic);
        }

        let span = info_span!("pipeline", topic, model = %self.model);
        self.generate_inner(topic).instrument(span).await
    }

    async fn generate_inner(&self, topic: &str) -> Result<CrewOutput> {
        if let Some(hit) = self.cache.lookup(topic, &self.model).await {
            info!(topic, model = %self.model, "Returning cached result");
            return Ok(hit);
        }

        info!(topic, model = %self.model, "Generating blog post");

        let provider = self.build_provider()?;
        let search_tool: BoxedTool =
            Box::new(SerperSearch::new(self.credentials.serper_api_key()));

        let mut crew = Crew::new();
        let researcher_id =
            crew.add_agent(researcher(&self.model, Arc::clone(&provider), search_tool));
        let writer_id = crew.add_agent(writer(&self.model, provider));

        let research = crew.add_task(research_task(topic, researcher_id));
        crew.add_task(writing_task(topic, writer_id).context(research));

        let output = crew.kickoff().await?;

        self.cache.store(topic, &self.model, output.clone()).await;
        Ok(output)
    }

    /// The provider override when set, otherwise a Clarifai client bound to
    /// the credentials and model.
    fn build_provider(&self) -> Result<SharedChatProvider> {
        if let Some(provider) = &self.provider_override {
            return Ok(Arc::clone(provider));
        }
        let client = Clarifai::from_credentials(&self.credentials, self.model.as_str())?;
        Ok(Arc::new(client))
    }
}
