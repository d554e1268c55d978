//! `IdeaSummarizer` over an OpenAI-compatible chat completions endpoint.

use crate::container::config::{SummarizerConfig, DOCUMENT_PLACEHOLDER};
use async_trait::async_trait;
use pn_04_api_gateway::{IdeaSummarizer, SummarizeError};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [Message<'a>; 1],
    temperature: f32,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

pub struct HttpIdeaSummarizer {
    client: reqwest::Client,
    config: SummarizerConfig,
}

impl HttpIdeaSummarizer {
    pub fn new(config: SummarizerConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// Prompt sent for `document`. Templates without the placeholder get
    /// the document appended.
    pub fn render_prompt(&self, document: &str) -> String {
        let template = &self.config.prompt_template;
        if template.contains(DOCUMENT_PLACEHOLDER) {
            template.replace(DOCUMENT_PLACEHOLDER, document)
        } else {
            format!("{}\n\n{}", template, document)
        }
    }
}

#[async_trait]
impl IdeaSummarizer for HttpIdeaSummarizer {
    async fn summarize(&self, document: &str) -> Result<String, SummarizeError> {
        let prompt = self.render_prompt(document);
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: [Message {
                role: "user",
                content: &prompt,
            }],
            temperature: 0.0,
        };

        let mut request = self.client.post(&self.config.api_url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }
        debug!(
            model = %self.config.model,
            prompt_chars = prompt.len(),
            "[runtime] summarizing document"
        );

        let response = request
            .send()
            .await
            .map_err(|e| SummarizeError::Upstream(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Upstream(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text.trim()
            )));
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| SummarizeError::Upstream(format!("unreadable response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|idea| !idea.is_empty())
            .ok_or(SummarizeError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use parking_lot::Mutex;
    use serde_json::{json, Value};
    use std::sync::Arc;

    #[derive(Default)]
    struct Seen {
        bodies: Vec<Value>,
        auth: Vec<Option<String>>,
    }

    /// Serve `reply` for every request and record what was sent.
    async fn spawn_llm(status: StatusCode, reply: Value) -> (String, Arc<Mutex<Seen>>) {
        let seen = Arc::new(Mutex::new(Seen::default()));
        let recorder = Arc::clone(&seen);
        let app = Router::new().route(
            "/v1/chat/completions",
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let recorder = Arc::clone(&recorder);
                let reply = reply.clone();
                async move {
                    let mut seen = recorder.lock();
                    seen.bodies.push(body);
                    seen.auth.push(
                        headers
                            .get("authorization")
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string),
                    );
                    (status, Json(reply))
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{}/v1/chat/completions", addr), seen)
    }

    fn summarizer(url: String, key: Option<&str>) -> HttpIdeaSummarizer {
        let mut config = SummarizerConfig::new(url);
        config.api_key = key.map(str::to_string);
        config.model = "test-model".into();
        config.prompt_template = "Summarize:\n{document}".into();
        HttpIdeaSummarizer::new(config).unwrap()
    }

    fn completion(content: &str) -> Value {
        json!({ "choices": [{ "message": { "role": "assistant", "content": content } }] })
    }

    #[tokio::test]
    async fn test_summarize_sends_prompt_and_trims_reply() {
        let (url, seen) = spawn_llm(StatusCode::OK, completion("  A solar kettle.\n")).await;
        let idea = summarizer(url, Some("sk-test"))
            .summarize("claim text")
            .await
            .unwrap();
        assert_eq!(idea, "A solar kettle.");

        let seen = seen.lock();
        assert_eq!(seen.auth, vec![Some("Bearer sk-test".to_string())]);
        assert_eq!(seen.bodies[0]["model"], "test-model");
        assert_eq!(seen.bodies[0]["messages"][0]["role"], "user");
        assert_eq!(
            seen.bodies[0]["messages"][0]["content"],
            "Summarize:\nclaim text"
        );
    }

    #[tokio::test]
    async fn test_no_key_sends_no_authorization() {
        let (url, seen) = spawn_llm(StatusCode::OK, completion("x")).await;
        summarizer(url, None).summarize("doc").await.unwrap();
        assert_eq!(seen.lock().auth, vec![None]);
    }

    #[tokio::test]
    async fn test_upstream_errors() {
        let (url, _) = spawn_llm(
            StatusCode::TOO_MANY_REQUESTS,
            json!({ "error": { "message": "quota exceeded" } }),
        )
        .await;
        let err = summarizer(url, None).summarize("doc").await.unwrap_err();
        assert!(matches!(&err, SummarizeError::Upstream(m) if m.starts_with("HTTP 429")));

        let (url, _) = spawn_llm(StatusCode::OK, json!({ "choices": [] })).await;
        let err = summarizer(url, None).summarize("doc").await.unwrap_err();
        assert_eq!(err, SummarizeError::EmptyResponse);

        let (url, _) = spawn_llm(StatusCode::OK, completion("   ")).await;
        let err = summarizer(url, None).summarize("doc").await.unwrap_err();
        assert_eq!(err, SummarizeError::EmptyResponse);
    }

    #[tokio::test]
    async fn test_template_without_placeholder_appends_document() {
        let mut config = SummarizerConfig::new("http://unused");
        config.prompt_template = "One sentence please.".into();
        let summarizer = HttpIdeaSummarizer::new(config).unwrap();
        assert_eq!(
            summarizer.render_prompt("a hinge"),
            "One sentence please.\n\na hinge"
        );
    }
}
