//! Best-effort translation to the pipeline's target language.
//!
//! Talks to the public translate endpoint. Callers treat every failure as
//! "keep the original text" — translation improves scoring quality but is
//! never load-bearing.

use std::time::Duration;

use crate::error::AnalysisError;

const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Client for the unauthenticated `translate_a/single` endpoint.
#[derive(Debug, Clone)]
pub struct Translator {
    client: reqwest::Client,
    base_url: String,
}

impl Translator {
    /// Creates a translator pointed at the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Unavailable`] if the HTTP client cannot be
    /// constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, AnalysisError> {
        Self::with_base_url(timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a translator with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Unavailable`] if the HTTP client cannot be
    /// constructed.
    pub fn with_base_url(timeout_secs: u64, base_url: &str) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| AnalysisError::Unavailable(format!("HTTP client build failed: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Translate `text` from `source_lang` into English.
    ///
    /// The endpoint answers with a nested JSON array whose first element
    /// lists translated segments; segments are concatenated in order.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Unavailable`] on transport, status, or
    /// payload failures, and when the response carries no translated text.
    pub async fn translate(&self, text: &str, source_lang: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/translate_a/single", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source_lang),
                ("tl", "en"),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| AnalysisError::Unavailable(format!("translate request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Unavailable(format!(
                "translate endpoint returned status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response.json().await.map_err(|e| {
            AnalysisError::Unavailable(format!("translate response parse error: {e}"))
        })?;

        let mut translated = String::new();
        if let Some(segments) = body.get(0).and_then(|v| v.as_array()) {
            for segment in segments {
                if let Some(part) = segment.get(0).and_then(|v| v.as_str()) {
                    translated.push_str(part);
                }
            }
        }

        if translated.trim().is_empty() {
            return Err(AnalysisError::Unavailable(
                "translate response contained no text".to_string(),
            ));
        }

        Ok(translated)
    }
}
