//! HTTP client for the hosted sentiment-classification model.
//!
//! Wraps `reqwest` with bearer-token auth and a fixed per-call timeout.
//! Every failure mode — connect error, timeout, non-2xx status, payload we
//! cannot parse — maps to [`AnalysisError::Unavailable`] so the scorer
//! fallback chain can move on to the next strategy.

use std::time::Duration;

use serde::Deserialize;

use crate::error::AnalysisError;
use crate::types::SentimentScores;

/// Longest text sent to the model; longer inputs are truncated.
const MAX_INPUT_CHARS: usize = 1000;

#[derive(Debug, Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

/// Client for a two-label (POSITIVE/NEGATIVE) sentiment inference endpoint.
#[derive(Debug, Clone)]
pub struct MlBackend {
    client: reqwest::Client,
    url: String,
    api_key: String,
}

impl MlBackend {
    /// Creates a new backend client.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Unavailable`] if the underlying HTTP client
    /// cannot be constructed.
    pub fn new(api_url: &str, api_key: &str, timeout_secs: u64) -> Result<Self, AnalysisError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AnalysisError::Unavailable(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            client,
            url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Classify one text into a sentiment distribution.
    ///
    /// The endpoint returns per-label confidences for POSITIVE and NEGATIVE;
    /// the neutral share is whatever confidence the two labels leave
    /// unclaimed, floored at zero.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Unavailable`] on any transport, status, or
    /// payload failure.
    pub async fn classify(&self, text: &str) -> Result<SentimentScores, AnalysisError> {
        let input: String = text.chars().take(MAX_INPUT_CHARS).collect();

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&serde_json::json!({ "inputs": input }))
            .send()
            .await
            .map_err(|e| AnalysisError::Unavailable(format!("inference request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(AnalysisError::Unavailable(format!(
                "inference endpoint returned status {}",
                response.status()
            )));
        }

        let rows: Vec<Vec<LabelScore>> = response.json().await.map_err(|e| {
            AnalysisError::Unavailable(format!("inference response parse error: {e}"))
        })?;

        let Some(labels) = rows.first() else {
            return Err(AnalysisError::Unavailable(
                "inference response was empty".to_string(),
            ));
        };

        let mut positive = 0.0;
        let mut negative = 0.0;
        for entry in labels {
            match entry.label.as_str() {
                "POSITIVE" => positive = entry.score,
                "NEGATIVE" => negative = entry.score,
                _ => {}
            }
        }

        let neutral = (1.0 - (positive + negative)).max(0.0);
        Ok(SentimentScores {
            positive,
            neutral,
            negative,
        }
        .normalized())
    }
}
