// Copyright (c) 2025-2026 the empath contributors.
// SPDX-License-Identifier: MIT
// See LICENSE in the repository root for full license terms.

//! The classifier client — turns a message into a `{label, intensity,
//! reason, confidence}` tuple.
//!
//! Routing: a dedicated `classifier_url` endpoint bypasses the LLM
//! entirely; otherwise the request goes to the Anthropic Messages API or
//! the OpenAI chat-completions API, auto-detected from the model name.
//! Every non-configuration failure collapses to a neutral classification
//! so the state engine never sees a classifier error.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use empath_core::error::EngineError;
use empath_core::mapping;

use crate::log::{append, ClassificationRecord};
use crate::parse::parse_classification;

const ANTHROPIC_API_BASE: &str = "https://api.anthropic.com";
const OPENAI_API_BASE: &str = "https://api.openai.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

/// OpenAI model families that reject the `temperature` parameter.
const REASONING_MODEL_PREFIXES: &[&str] = &["o1", "o3", "o4", "gpt-5"];

/// A classified emotional reading of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub intensity: f32,
    pub confidence: f32,
    pub reason: String,
}

impl Classification {
    /// The recovery value: no emotional movement, zero confidence.
    pub fn neutral(reason: impl Into<String>) -> Self {
        Self {
            label: "neutral".to_string(),
            intensity: 0.0,
            confidence: 0.0,
            reason: reason.into(),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.label == "neutral"
    }
}

/// Which hosted API a model name routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Anthropic,
    OpenAi,
}

/// Classifier configuration.
#[derive(Debug, Clone)]
pub struct ClassifierOptions {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: String,
    pub provider: Option<Provider>,
    /// A plain HTTP endpoint that classifies directly, bypassing the LLM.
    pub classifier_url: Option<String>,
    /// Label set offered to the model; defaults to the engine's canonical
    /// taxonomy labels.
    pub emotion_labels: Option<Vec<String>>,
    /// Classifications below this confidence are replaced with neutral.
    pub confidence_min: f32,
    pub timeout_ms: u64,
    /// Append-only JSONL log of classification attempts.
    pub log_path: Option<PathBuf>,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: DEFAULT_MODEL.to_string(),
            provider: None,
            classifier_url: None,
            emotion_labels: None,
            confidence_min: 0.6,
            timeout_ms: 10_000,
            log_path: None,
        }
    }
}

impl ClassifierOptions {
    /// The provider this configuration routes to.
    pub fn resolved_provider(&self) -> Provider {
        if let Some(provider) = self.provider {
            return provider;
        }
        if self.model.to_lowercase().starts_with("claude") {
            Provider::Anthropic
        } else {
            Provider::OpenAi
        }
    }

    /// Whether the model is an OpenAI reasoning family that rejects
    /// `temperature`.
    pub fn is_reasoning_model(&self) -> bool {
        let lower = self.model.to_lowercase();
        REASONING_MODEL_PREFIXES
            .iter()
            .any(|prefix| lower.starts_with(prefix))
    }
}

/// The injection seam between the engine's callers and whatever actually
/// classifies text. Production uses [`HttpClassifier`]; tests supply
/// their own implementations.
pub trait Classify {
    fn classify(&self, text: &str, role: &str) -> Classification;
}

/// HTTP-backed classifier.
#[derive(Debug)]
pub struct HttpClassifier {
    options: ClassifierOptions,
    labels: Vec<String>,
    client: reqwest::blocking::Client,
}

impl HttpClassifier {
    /// Build a classifier. Fails when neither a classifier endpoint nor
    /// an API key is configured.
    pub fn new(options: ClassifierOptions) -> Result<Self, EngineError> {
        if options.classifier_url.is_none() && options.api_key.is_none() {
            return Err(EngineError::config(
                "classifier requires either classifierUrl or apiKey",
            ));
        }
        if !(0.0..=1.0).contains(&options.confidence_min) {
            return Err(EngineError::config(format!(
                "confidenceMin {} out of range [0, 1]",
                options.confidence_min
            )));
        }

        let labels = options
            .emotion_labels
            .clone()
            .unwrap_or_else(|| {
                mapping::canonical_labels()
                    .into_iter()
                    .map(str::to_string)
                    .collect()
            })
            .iter()
            .map(|l| l.to_lowercase())
            .collect();

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(options.timeout_ms))
            .build()
            .map_err(|e| EngineError::config(format!("building HTTP client: {e}")))?;

        Ok(Self {
            options,
            labels,
            client,
        })
    }

    pub fn options(&self) -> &ClassifierOptions {
        &self.options
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// The instruction sent as the system prompt.
    fn system_prompt(&self) -> String {
        format!(
            "You classify the emotional content of chat messages. Respond with \
             only a JSON object {{\"label\": string, \"intensity\": number, \
             \"reason\": string, \"confidence\": number}}. \
             intensity and confidence are in [0, 1]. reason is one short \
             sentence. label must be one of: {}.",
            self.labels.join(", ")
        )
    }

    fn user_prompt(&self, text: &str, role: &str) -> String {
        format!("Message from {role}:\n{text}")
    }

    /// Build the Anthropic Messages API request body.
    fn anthropic_body(&self, text: &str, role: &str) -> Value {
        json!({
            "model": self.options.model,
            "max_tokens": 256,
            "system": self.system_prompt(),
            "messages": [
                { "role": "user", "content": self.user_prompt(text, role) }
            ]
        })
    }

    /// Build the OpenAI chat-completions request body. Reasoning models
    /// reject `temperature`, so it is omitted for them.
    fn openai_body(&self, text: &str, role: &str) -> Value {
        let mut body = json!({
            "model": self.options.model,
            "messages": [
                { "role": "system", "content": self.system_prompt() },
                { "role": "user", "content": self.user_prompt(text, role) }
            ]
        });
        if !self.options.is_reasoning_model() {
            body["temperature"] = json!(0.2);
        }
        body
    }

    fn call_endpoint(&self, url: &str, text: &str, role: &str) -> Result<Classification> {
        let response: Value = self
            .client
            .post(url)
            .json(&json!({ "text": text, "role": role }))
            .send()
            .context("classifier endpoint request failed")?
            .error_for_status()
            .context("classifier endpoint returned an error status")?
            .json()
            .context("classifier endpoint returned non-JSON")?;
        parse_classification(&response.to_string())
    }

    fn call_anthropic(&self, text: &str, role: &str) -> Result<Classification> {
        let api_key = self
            .options
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("missing API key"))?;
        let base = self
            .options
            .base_url
            .as_deref()
            .unwrap_or(ANTHROPIC_API_BASE);

        let response: Value = self
            .client
            .post(format!("{base}/v1/messages"))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&self.anthropic_body(text, role))
            .send()
            .context("Anthropic request failed")?
            .error_for_status()
            .context("Anthropic returned an error status")?
            .json()
            .context("Anthropic returned non-JSON")?;

        let raw = response["content"][0]["text"]
            .as_str()
            .ok_or_else(|| anyhow!("Anthropic response missing text content"))?;
        parse_classification(raw)
    }

    fn call_openai(&self, text: &str, role: &str) -> Result<Classification> {
        let api_key = self
            .options
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("missing API key"))?;
        let base = self.options.base_url.as_deref().unwrap_or(OPENAI_API_BASE);

        let response: Value = self
            .client
            .post(format!("{base}/v1/chat/completions"))
            .header("Authorization", format!("Bearer {api_key}"))
            .json(&self.openai_body(text, role))
            .send()
            .context("OpenAI request failed")?
            .error_for_status()
            .context("OpenAI returned an error status")?
            .json()
            .context("OpenAI returned non-JSON")?;

        let raw = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| anyhow!("OpenAI response missing message content"))?;
        parse_classification(raw)
    }

    fn call(&self, text: &str, role: &str) -> Result<Classification> {
        if let Some(url) = &self.options.classifier_url {
            return self.call_endpoint(url, text, role);
        }
        match self.options.resolved_provider() {
            Provider::Anthropic => self.call_anthropic(text, role),
            Provider::OpenAi => self.call_openai(text, role),
        }
    }

    /// Replace out-of-contract results with neutral: unknown labels and
    /// low-confidence classifications are not trusted.
    fn validate(&self, classification: Classification) -> Classification {
        if !self.labels.contains(&classification.label) {
            tracing::debug!(label = %classification.label, "unknown label from classifier");
            return Classification::neutral("classifier returned an unknown label");
        }
        if classification.confidence < self.options.confidence_min {
            tracing::debug!(
                confidence = classification.confidence,
                "classification below confidence threshold"
            );
            return Classification::neutral("classification below confidence threshold");
        }
        classification
    }

    fn record(&self, role: &str, text: &str, classification: &Classification, success: bool) {
        if let Some(path) = &self.options.log_path {
            append(
                path,
                &ClassificationRecord::new(
                    role,
                    text,
                    &classification.label,
                    classification.intensity,
                    classification.confidence,
                    success,
                    Utc::now(),
                ),
            );
        }
    }
}

impl Classify for HttpClassifier {
    fn classify(&self, text: &str, role: &str) -> Classification {
        match self.call(text, role) {
            Ok(classification) => {
                let validated = self.validate(classification);
                self.record(role, text, &validated, true);
                validated
            }
            Err(err) => {
                tracing::warn!(%err, "classification failed, returning neutral");
                let neutral = Classification::neutral("classification failed");
                self.record(role, text, &neutral, false);
                neutral
            }
        }
    }
}
