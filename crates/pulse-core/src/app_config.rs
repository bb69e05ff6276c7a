use serde::{Deserialize, Serialize};

/// Default inference endpoint: a sentiment classifier hosted on the
/// HuggingFace inference API.
pub const DEFAULT_ML_API_URL: &str =
    "https://api-inference.huggingface.co/models/distilbert-base-uncased-finetuned-sst-2-english";

/// Blend weights applied when combining independent sentiment signals.
///
/// Both weights are fractions in `[0, 1]` naming the share of the *primary*
/// signal; the secondary signal gets the remainder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPolicy {
    /// Share of the text-classifier distribution when emoji sentiment is
    /// present (the rest goes to the emoji signal).
    pub text_weight: f64,
    /// Share of the per-comment distribution in the final summary (the rest
    /// goes to the engagement-derived signal).
    pub comment_weight: f64,
}

impl Default for AnalysisPolicy {
    fn default() -> Self {
        Self {
            text_weight: 0.7,
            comment_weight: 0.7,
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub ml_api_url: String,
    pub ml_api_key: Option<String>,
    pub ml_timeout_secs: u64,
    pub translate_enabled: bool,
    pub max_workers: usize,
    pub max_items: usize,
    pub cache_capacity: u64,
    pub cache_ttl_secs: u64,
    pub policy: AnalysisPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("ml_api_url", &self.ml_api_url)
            .field(
                "ml_api_key",
                &self.ml_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("ml_timeout_secs", &self.ml_timeout_secs)
            .field("translate_enabled", &self.translate_enabled)
            .field("max_workers", &self.max_workers)
            .field("max_items", &self.max_items)
            .field("cache_capacity", &self.cache_capacity)
            .field("cache_ttl_secs", &self.cache_ttl_secs)
            .field("policy", &self.policy)
            .finish()
    }
}
