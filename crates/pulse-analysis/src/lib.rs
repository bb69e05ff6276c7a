//! Comment sentiment aggregation pipeline.
//!
//! Takes an already-fetched burst of short texts plus source engagement
//! counters, scores each item for sentiment/emotion/language in bounded
//! parallel batches, and aggregates everything into one report — with
//! memoization of repeated requests and optional progressive snapshots.

pub mod aggregate;
pub mod batch;
pub mod cache;
pub mod engagement;
pub mod error;
pub mod pipeline;
pub mod scorer;
pub mod source;
pub mod topics;
pub mod types;

pub use cache::{CacheKey, ReportCache};
pub use error::AnalysisError;
pub use pipeline::Pipeline;
pub use scorer::{ItemScorer, LexiconScorer, MlBackend, ScoreResult, TextScorer, Translator};
pub use source::{FixtureSource, SourceFetcher};
pub use types::{
    AggregateReport, AnalysisRequest, EngagementMetrics, Item, ItemFilters, ItemScoring,
    PipelineStage, SentimentLabel, SentimentScores, SentimentSummary, SourceInfo, Topic,
};
