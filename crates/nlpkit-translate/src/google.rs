//! Google translate client
//!
//! Talks to the public `translate_a/single` endpoint (`client=gtx`), which
//! answers with a nested JSON array rather than an object:
//!
//! ```text
//! [[["नमस्ते","Hello",null,null,10],[null,null,"namaste"]],null,"en",null,null,null,1,[],[["en"],null,[1],["en"]]]
//! ```
//!
//! Element 0 holds translated segments (and a romanization segment when
//! `dt=rm` is requested), element 2 the detected source language, element 6
//! or 8 the detection confidence.
//!
//! Author: hephaex@gmail.com

use async_trait::async_trait;
use nlpkit_core::{Detection, NlpError, Result, TranslationConfig, Translation, Translator};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Google translate API client
pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
}

impl GoogleTranslateClient {
    /// Create a client against the public endpoint
    pub fn new() -> Self {
        Self::with_endpoint(TranslationConfig::default().endpoint)
    }

    /// Create from config
    pub fn from_config(config: &TranslationConfig) -> Self {
        Self::with_endpoint(config.endpoint.clone())
    }

    /// Use a custom base URL (for proxies or a local stub)
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, text: &str, source: &str, target: &str) -> Result<Value> {
        if text.trim().is_empty() {
            return Err(NlpError::InvalidInput(
                "cannot translate empty text".to_string(),
            ));
        }

        debug!(from = source, to = target, chars = text.chars().count(), "Translation request");
        let response = self
            .client
            .get(format!("{}/translate_a/single", self.endpoint))
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("dt", "rm"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| NlpError::Translation(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(NlpError::Translation(format!(
                "Translate error ({status}): {error_text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| NlpError::Translation(format!("Failed to parse response: {e}")))
    }
}

impl Default for GoogleTranslateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<Translation> {
        let body = self.request(text, source, target).await?;
        parse_translation(&body, source, target)
    }

    async fn detect(&self, text: &str) -> Result<Detection> {
        let body = self.request(text, "auto", "en").await?;
        parse_detection(&body)
    }

    fn name(&self) -> &str {
        "google"
    }
}

// ============================================================================
// Response parsing
// ============================================================================

fn segments(body: &Value) -> Result<&Vec<Value>> {
    body.get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| NlpError::Translation("response has no translation segments".to_string()))
}

/// Build a `Translation` from a `translate_a/single` response
pub fn parse_translation(body: &Value, source: &str, target: &str) -> Result<Translation> {
    let segments = segments(body)?;

    let text: String = segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    let pronunciation = segments
        .iter()
        .filter(|segment| segment.get(0).map_or(true, Value::is_null))
        .filter_map(|segment| segment.get(2).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string);

    let source = body
        .get(2)
        .and_then(Value::as_str)
        .unwrap_or(source)
        .to_string();

    Ok(Translation {
        text,
        source,
        target: target.to_string(),
        pronunciation,
    })
}

/// Detected language and confidence from a `translate_a/single` response
pub fn parse_detection(body: &Value) -> Result<Detection> {
    let language = body
        .get(2)
        .and_then(Value::as_str)
        .ok_or_else(|| NlpError::Translation("response has no detected language".to_string()))?
        .to_string();

    let confidence = body
        .get(6)
        .and_then(Value::as_f64)
        .or_else(|| {
            body.get(8)
                .and_then(|v| v.get(2))
                .and_then(|v| v.get(0))
                .and_then(Value::as_f64)
        })
        .unwrap_or(0.0)
        .clamp(0.0, 1.0) as f32;

    Ok(Detection {
        language,
        confidence,
    })
}
