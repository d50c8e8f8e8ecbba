// ABOUTME: Optional abstractive summarization backends: an external inference model and a placeholder.
// ABOUTME: Abstractive picks the model when configured and reachable, otherwise the deterministic placeholder.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use condense_summary::split_sentences;

use crate::config::InferenceConfig;

/// Characters of source text sent to the inference model.
const MODEL_INPUT_CHARS: usize = 1024;

/// A source of abstractive summaries.
#[async_trait]
pub trait SummarizerBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn summarize(&self, text: &str) -> anyhow::Result<String>;
}

/// Deterministic stand-in quoting the first sentence of the source.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderBackend;

impl PlaceholderBackend {
    pub fn render(text: &str) -> String {
        let first = split_sentences(text)
            .into_iter()
            .next()
            .map(|s| s.text)
            .unwrap_or_else(|| "...".to_string());
        format!(
            "[ABSTRACTIVE PLACEHOLDER]: A new summary would typically be generated here, \
             often based on the main idea: '{}'.",
            first
        )
    }
}

#[async_trait]
impl SummarizerBackend for PlaceholderBackend {
    fn name(&self) -> &'static str {
        "placeholder"
    }

    async fn summarize(&self, text: &str) -> anyhow::Result<String> {
        Ok(Self::render(text))
    }
}

#[derive(Debug, Serialize)]
struct InferenceParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct InferenceOutput {
    summary_text: String,
}

/// Summarization model reached over HTTP (Hugging Face inference wire format).
#[derive(Debug, Clone)]
pub struct InferenceBackend {
    config: InferenceConfig,
    http: reqwest::Client,
}

impl InferenceBackend {
    pub fn new(config: InferenceConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("failed to build inference HTTP client")?;
        Ok(Self { config, http })
    }
}

fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[async_trait]
impl SummarizerBackend for InferenceBackend {
    fn name(&self) -> &'static str {
        "inference"
    }

    async fn summarize(&self, text: &str) -> anyhow::Result<String> {
        let parameters = InferenceParameters {
            max_length: 150,
            min_length: 30,
            do_sample: false,
        };
        let body = json!({
            "inputs": truncate_chars(text, MODEL_INPUT_CHARS),
            "parameters": parameters,
        });

        let mut request = self.http.post(self.config.endpoint.clone()).json(&body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let outputs: Vec<InferenceOutput> = request
            .send()
            .await
            .context("inference request failed")?
            .error_for_status()
            .context("inference endpoint returned an error")?
            .json()
            .await
            .context("inference response was not a summary list")?;

        outputs
            .into_iter()
            .map(|o| o.summary_text.trim().to_string())
            .find(|s| !s.is_empty())
            .ok_or_else(|| anyhow!("inference response contained no summary"))
    }
}

/// Best-effort abstractive summarization that always yields text.
pub struct Abstractive {
    model: Option<Box<dyn SummarizerBackend>>,
    fallback: PlaceholderBackend,
}

impl std::fmt::Debug for Abstractive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Abstractive")
            .field("model", &self.model.as_ref().map(|m| m.name()))
            .finish()
    }
}

impl Default for Abstractive {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Abstractive {
    /// Placeholder only.
    pub fn placeholder() -> Self {
        Self {
            model: None,
            fallback: PlaceholderBackend,
        }
    }

    /// Try `model` first, falling back to the placeholder on any failure.
    pub fn with_model(model: Box<dyn SummarizerBackend>) -> Self {
        Self {
            model: Some(model),
            fallback: PlaceholderBackend,
        }
    }

    /// Use the inference backend when one is configured and its client builds.
    pub fn from_config(config: Option<&InferenceConfig>) -> Self {
        let Some(config) = config else {
            return Self::placeholder();
        };
        match InferenceBackend::new(config.clone()) {
            Ok(backend) => Self::with_model(Box::new(backend)),
            Err(e) => {
                tracing::warn!(error = %e, "abstractive model unavailable, using placeholder");
                Self::placeholder()
            }
        }
    }

    pub async fn summarize(&self, text: &str) -> String {
        if let Some(model) = &self.model {
            match model.summarize(text).await {
                Ok(summary) => return summary,
                Err(e) => {
                    tracing::warn!(
                        backend = model.name(),
                        error = %e,
                        "abstractive backend failed, using placeholder"
                    );
                }
            }
        }
        PlaceholderBackend::render(text)
    }

    /// Name of the backend tried first.
    pub fn backend_name(&self) -> &'static str {
        self.model
            .as_ref()
            .map(|m| m.name())
            .unwrap_or_else(|| self.fallback.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;
    use url::Url;

    struct Failing;

    #[async_trait]
    impl SummarizerBackend for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }

        async fn summarize(&self, _text: &str) -> anyhow::Result<String> {
            Err(anyhow!("model offline"))
        }
    }

    fn inference_for(server: &MockServer) -> InferenceBackend {
        let mut config = InferenceConfig::new(Url::parse(&server.url("/summarize")).unwrap());
        config.timeout = Duration::from_secs(2);
        config.token = Some("secret".to_string());
        InferenceBackend::new(config).unwrap()
    }

    #[test]
    fn test_placeholder_quotes_first_sentence() {
        assert_eq!(
            PlaceholderBackend::render("Tides rise. Boats float."),
            "[ABSTRACTIVE PLACEHOLDER]: A new summary would typically be generated here, \
             often based on the main idea: 'Tides rise.'."
        );
        assert!(PlaceholderBackend::render("").ends_with("main idea: '...'."));
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("h\u{e9}llo", 2), "h\u{e9}");
        assert_eq!(truncate_chars("hi", 10), "hi");
    }

    #[tokio::test]
    async fn test_failing_model_falls_back() {
        let abstractive = Abstractive::with_model(Box::new(Failing));
        assert_eq!(abstractive.backend_name(), "failing");
        let out = abstractive.summarize("One idea. Two ideas.").await;
        assert!(out.contains("'One idea.'"));
    }

    #[tokio::test]
    async fn test_inference_backend_parses_summary() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/summarize")
                .header("authorization", "Bearer secret");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"[{"summary_text": " Ships return to port. "}]"#);
        });

        let out = inference_for(&server).summarize("Long text.").await.unwrap();
        mock.assert();
        assert_eq!(out, "Ships return to port.");
    }

    #[tokio::test]
    async fn test_inference_error_status_falls_back_to_placeholder() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/summarize");
            then.status(503).body("loading");
        });

        let abstractive = Abstractive::with_model(Box::new(inference_for(&server)));
        let out = abstractive.summarize("Model is warming up. Try later.").await;
        assert!(out.starts_with("[ABSTRACTIVE PLACEHOLDER]"));
    }

    #[test]
    fn test_from_config_without_endpoint_is_placeholder() {
        assert_eq!(Abstractive::from_config(None).backend_name(), "placeholder");
    }
}
