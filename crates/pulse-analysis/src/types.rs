use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categorical sentiment of one text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SentimentLabel::Positive => write!(f, "positive"),
            SentimentLabel::Neutral => write!(f, "neutral"),
            SentimentLabel::Negative => write!(f, "negative"),
        }
    }
}

/// A sentiment distribution: three non-negative shares summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentScores {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
}

impl SentimentScores {
    /// The fixed fully-neutral distribution.
    #[must_use]
    pub fn neutral() -> Self {
        Self {
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
        }
    }

    /// An even three-way split, used when force-labeling failed batches.
    #[must_use]
    pub fn even() -> Self {
        Self {
            positive: 1.0 / 3.0,
            neutral: 1.0 / 3.0,
            negative: 1.0 / 3.0,
        }
    }

    #[must_use]
    pub fn sum(&self) -> f64 {
        self.positive + self.neutral + self.negative
    }

    /// Scale each share by the distribution total so the result sums to 1.
    /// A zero-sum distribution normalizes to [`SentimentScores::neutral`].
    #[must_use]
    pub fn normalized(&self) -> Self {
        let total = self.sum();
        if total <= 0.0 {
            return Self::neutral();
        }
        Self {
            positive: self.positive / total,
            neutral: self.neutral / total,
            negative: self.negative / total,
        }
    }

    /// Weighted blend of two distributions: `self * weight + other * (1 - weight)`.
    #[must_use]
    pub fn blend(&self, other: &Self, weight: f64) -> Self {
        let w = weight.clamp(0.0, 1.0);
        Self {
            positive: self.positive * w + other.positive * (1.0 - w),
            neutral: self.neutral * w + other.neutral * (1.0 - w),
            negative: self.negative * w + other.negative * (1.0 - w),
        }
    }

    /// Categorical label for this distribution. Ties resolve to neutral.
    #[must_use]
    pub fn label(&self) -> SentimentLabel {
        if self.positive > self.negative && self.positive > self.neutral {
            SentimentLabel::Positive
        } else if self.negative > self.positive && self.negative > self.neutral {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

/// Scoring fields attached to an [`Item`] once the text scorer has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemScoring {
    pub sentiment: SentimentLabel,
    #[serde(rename = "sentiment_score")]
    pub scores: SentimentScores,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_text: Option<String>,
    pub emotions: BTreeMap<String, f64>,
    pub emojis: Vec<String>,
}

/// One text unit (a comment, post, or tweet) plus its metadata.
///
/// Owned exclusively by the pipeline invocation that created it; scoring
/// fields are attached in place as batches complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub text: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub like_count: u64,
    #[serde(flatten)]
    pub scoring: Option<ItemScoring>,
}

/// Metadata about the content whose comments are being analyzed.
/// Read-only once fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub id: String,
    pub title: String,
    pub channel: String,
    pub published_at: DateTime<Utc>,
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
}

/// Ordered filter flags applied when fetching items. Rendered into the
/// cache key by joining with `-`, so ordering is significant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemFilters(pub Vec<String>);

impl ItemFilters {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for ItemFilters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("-"))
    }
}

/// Overall sentiment distribution across all analyzed items.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SentimentSummary {
    pub positive: f64,
    pub neutral: f64,
    pub negative: f64,
    pub total_comments: usize,
}

impl Default for SentimentSummary {
    fn default() -> Self {
        Self {
            positive: 0.0,
            neutral: 1.0,
            negative: 0.0,
            total_comments: 0,
        }
    }
}

/// Source-level engagement counters and the sentiment inferred from them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementMetrics {
    pub view_count: u64,
    pub like_count: u64,
    pub comment_count: u64,
    pub engagement_sentiment: SentimentScores,
}

/// A weighted cluster of co-occurring keywords summarizing the corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub words: Vec<String>,
    pub weights: Vec<f64>,
}

/// Pipeline stages, in strict execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    FetchingInfo,
    FetchingComments,
    AnalyzingSentiment,
    AnalyzingEngagement,
    ExtractingTopics,
    Completed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineStage::FetchingInfo => "fetching_info",
            PipelineStage::FetchingComments => "fetching_comments",
            PipelineStage::AnalyzingSentiment => "analyzing_sentiment",
            PipelineStage::AnalyzingEngagement => "analyzing_engagement",
            PipelineStage::ExtractingTopics => "extracting_topics",
            PipelineStage::Completed => "completed",
        };
        write!(f, "{name}")
    }
}

/// The pipeline output: filled progressively across stages, complete once
/// `status` reaches [`PipelineStage::Completed`], immutable once cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateReport {
    #[serde(rename = "source_info")]
    pub source: SourceInfo,
    pub items: Vec<Item>,
    pub sentiment_summary: SentimentSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engagement_metrics: Option<EngagementMetrics>,
    /// Mean emotion magnitudes per item. Independent magnitudes, not a
    /// distribution: they do not sum to 1.
    pub emotions: BTreeMap<String, f64>,
    /// Percentage of items per detected language; sums to 100 ± rounding.
    pub languages: BTreeMap<String, f64>,
    pub multilingual: bool,
    pub emoji_count: usize,
    pub topics: Vec<Topic>,
    pub topic_names: Vec<String>,
    /// Per-stage wall-clock durations in seconds.
    pub processing_time: BTreeMap<String, f64>,
    /// 0–100, monotonically non-decreasing within one invocation.
    pub progress: u8,
    #[serde(rename = "processing_status")]
    pub status: PipelineStage,
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
}

impl AggregateReport {
    /// A report shell holding only source metadata, as emitted by the first
    /// pipeline stage.
    #[must_use]
    pub fn new(source: SourceInfo) -> Self {
        Self {
            source,
            items: Vec::new(),
            sentiment_summary: SentimentSummary::default(),
            engagement_metrics: None,
            emotions: BTreeMap::new(),
            languages: BTreeMap::new(),
            multilingual: false,
            emoji_count: 0,
            topics: Vec::new(),
            topic_names: Vec::new(),
            processing_time: BTreeMap::new(),
            progress: 0,
            status: PipelineStage::FetchingInfo,
            cached: false,
            cached_at: None,
        }
    }
}

/// Parameters of one pipeline invocation.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub source_id: String,
    pub max_items: usize,
    pub filters: ItemFilters,
}
