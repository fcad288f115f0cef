//! Web UI for the blog pipeline.
//!
//! Three routes: the topic form, the generate action, and the markdown
//! download. Pages are rendered server-side as plain HTML; the generated
//! article is converted from markdown with pulldown-cmark. One result cache
//! is shared across all requests.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use blogsmith::cache::ResultCache;
use blogsmith::credentials::Credentials;
use blogsmith::error::{Error, Result};
use blogsmith::pipeline::{BlogPipeline, MODEL_CHOICES, PROGRESS_LINES, derive_filename};

/// Shared state for all request handlers.
struct AppState {
    credentials: Credentials,
    cache: Arc<ResultCache>,
}

/// Form payload for the generate action.
#[derive(Debug, Deserialize)]
struct GenerateForm {
    topic: String,
    #[serde(default)]
    model: String,
}

/// Query payload for the download route.
#[derive(Debug, Deserialize)]
struct DownloadQuery {
    topic: String,
    model: String,
}

/// Bind and serve the web UI until interrupted.
pub async fn serve(host: &str, port: u16, credentials: Credentials) -> Result<()> {
    let state = Arc::new(AppState {
        credentials,
        cache: Arc::new(ResultCache::new()),
    });
    let router = create_router(state);

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Web UI listening");
    println!("Blogsmith running on http://{addr} (Ctrl+C to stop)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
    println!("\nShutting down...");
}

/// Create the HTTP router.
fn create_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/download", get(download))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn index() -> Html<String> {
    Html(index_page())
}

async fn generate(
    State(state): State<Arc<AppState>>,
    Form(form): Form<GenerateForm>,
) -> Response {
    if form.topic.trim().is_empty() {
        let page = error_page(&Error::InvalidTopic);
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
    }
    if !MODEL_CHOICES.contains(&form.model.as_str()) {
        let page = message_page("Unknown model selection.");
        return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
    }

    let pipeline = BlogPipeline::new(state.credentials.clone(), form.model.as_str())
        .with_cache(Arc::clone(&state.cache));

    match pipeline.generate(&form.topic).await {
        Ok(output) => Html(result_page(&form.topic, &form.model, &output.raw)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(error_page(&e))).into_response(),
    }
}

async fn download(
    State(state): State<Arc<AppState>>,
    Query(query): Query<DownloadQuery>,
) -> Response {
    match state.cache.lookup(&query.topic, &query.model).await {
        Some(output) => {
            let filename = derive_filename(&query.topic).replace('"', "_");
            let disposition = format!("attachment; filename=\"{filename}\"");
            (
                [
                    (header::CONTENT_TYPE, "text/markdown".to_owned()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                output.raw,
            )
                .into_response()
        }
        None => {
            let page = message_page(
                "That result is no longer available. Results are kept for one hour; \
                 please generate the post again.",
            );
            (StatusCode::NOT_FOUND, Html(page)).into_response()
        }
    }
}

const STYLE: &str = "\
body { max-width: 48rem; margin: 2rem auto; padding: 0 1rem; font-family: system-ui, sans-serif; line-height: 1.6; color: #1a1a2e; }
h1 { margin-bottom: 0.25rem; }
.tagline { color: #666; font-style: italic; margin-top: 0; }
form { display: grid; gap: 0.5rem; margin: 1.5rem 0; }
input[type=text], select { padding: 0.5rem; font-size: 1rem; }
button { padding: 0.6rem; font-size: 1rem; cursor: pointer; }
button:disabled { cursor: not-allowed; opacity: 0.6; }
.progress { list-style: none; padding-left: 0; color: #444; }
.done { font-weight: 600; }
.error { color: #b00020; font-weight: 600; }
article { border: 1px solid #ddd; border-radius: 6px; padding: 1rem 1.5rem; }
blockquote { border-left: 4px solid #ccc; margin-left: 0; padding-left: 1rem; color: #555; }
footer { margin-top: 2rem; color: #999; font-size: 0.85rem; }
";

/// Wrap a body in the shared page shell.
fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <h1>\u{270d}\u{fe0f} AI Blog Writing Agent</h1>\n\
         <p class=\"tagline\">Powered by Clarifai</p>\n\
         {body}\n</body>\n</html>\n"
    )
}

/// The topic form. The generate button stays disabled while the topic is
/// blank; the server re-validates on submit.
fn index_page() -> String {
    let options: String = MODEL_CHOICES
        .iter()
        .enumerate()
        .map(|(i, model)| {
            let selected = if i == 0 { " selected" } else { "" };
            format!("<option value=\"{model}\"{selected}>{model}</option>\n")
        })
        .collect();

    let now = chrono::Local::now().format("%Y-%m-%d %H:%M");

    let body = format!(
        "<form method=\"post\" action=\"/generate\">\n\
         <label for=\"topic\">Enter blog topic:</label>\n\
         <input id=\"topic\" name=\"topic\" type=\"text\" autocomplete=\"off\" \
         placeholder=\"e.g., Quantum Computing in Healthcare\" autofocus>\n\
         <label for=\"model\">Clarifai model:</label>\n\
         <select id=\"model\" name=\"model\">\n{options}</select>\n\
         <button id=\"generate\" type=\"submit\" disabled>\u{1f680} Generate Blog</button>\n\
         </form>\n\
         <details>\n<summary>How it works</summary>\n<ul>\n\
         <li><strong>Researcher</strong>: gathers verified information from web sources</li>\n\
         <li><strong>Writer</strong>: creates structured blog content</li>\n\
         </ul>\n</details>\n\
         <footer>{now}</footer>\n\
         <script>\n\
         const topic = document.getElementById('topic');\n\
         const button = document.getElementById('generate');\n\
         const sync = () => {{ button.disabled = topic.value.trim() === ''; }};\n\
         topic.addEventListener('input', sync);\n\
         sync();\n\
         </script>"
    );
    page("AI Blog Writing Agent", &body)
}

/// The success page: completed progress lines, the rendered article, and
/// the download control.
fn result_page(topic: &str, model: &str, markdown: &str) -> String {
    let progress: String = PROGRESS_LINES
        .iter()
        .map(|line| format!("<li>{line}</li>\n"))
        .collect();
    let article = render_markdown(markdown);
    let escaped_topic = escape_html(topic);
    let escaped_model = escape_html(model);

    let body = format!(
        "<ul class=\"progress\">\n{progress}</ul>\n\
         <p class=\"done\">\u{2705} Blog generated!</p>\n<hr>\n\
         <h2>Generated Content</h2>\n<article>\n{article}</article>\n\
         <form method=\"get\" action=\"/download\">\n\
         <input type=\"hidden\" name=\"topic\" value=\"{escaped_topic}\">\n\
         <input type=\"hidden\" name=\"model\" value=\"{escaped_model}\">\n\
         <button type=\"submit\">\u{1f4e5} Download Markdown</button>\n</form>\n\
         <p><a href=\"/\">Write another post</a></p>"
    );
    page("AI Blog Writing Agent", &body)
}

/// The failure page: the error message plus a collapsed diagnostics panel.
fn error_page(error: &Error) -> String {
    let message = escape_html(&error.to_string());
    let body = format!(
        "<p class=\"error\">Error: {message}</p>\n\
         <details>\n<summary>Debug information</summary>\n\
         <pre>Error Type: {kind}\nError Message: {message}\nVersion: blogsmith {version}</pre>\n\
         </details>\n\
         <p><a href=\"/\">Back</a></p>",
        kind = error.kind_label(),
        version = env!("CARGO_PKG_VERSION"),
    );
    page("AI Blog Writing Agent", &body)
}

/// A plain informational page with a link back to the form.
fn message_page(message: &str) -> String {
    let message = escape_html(message);
    let body = format!("<p class=\"error\">{message}</p>\n<p><a href=\"/\">Back</a></p>");
    page("AI Blog Writing Agent", &body)
}

/// Render markdown to HTML.
fn render_markdown(markdown: &str) -> String {
    let parser = pulldown_cmark::Parser::new_ext(markdown, pulldown_cmark::Options::ENABLE_TABLES);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

/// Escape text for interpolation into HTML content or attribute values.
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
