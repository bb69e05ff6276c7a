//! The orchestrator: cache check, strict stage sequence, snapshot stream.
//!
//! Stages run in a fixed order with no branching and no orchestrator-level
//! retries — recovery lives in the leaf components. Every stage transition
//! yields a snapshot of the report so far; the terminal `completed`
//! snapshot is the only one guaranteed fully populated and the only one
//! written to the cache.

use std::time::Instant;

use futures::stream::StreamExt;
use futures::Stream;

use pulse_core::AnalysisPolicy;

use crate::aggregate;
use crate::batch;
use crate::cache::{CacheKey, ReportCache};
use crate::engagement::engagement_sentiment;
use crate::error::AnalysisError;
use crate::scorer::ItemScorer;
use crate::source::SourceFetcher;
use crate::topics::{extract_topics, topic_names, DEFAULT_TOPIC_COUNT};
use crate::types::{
    AggregateReport, AnalysisRequest, EngagementMetrics, PipelineStage,
};

/// One configured analysis pipeline.
///
/// Holds the source boundary, the scorer (pluggable behind [`ItemScorer`],
/// normally [`crate::scorer::TextScorer`]), and the report cache; a single
/// `Pipeline` serves any number of sequential or concurrent runs.
pub struct Pipeline<S, C> {
    source: S,
    scorer: C,
    cache: ReportCache,
    policy: AnalysisPolicy,
    max_workers: usize,
}

impl<S: SourceFetcher, C: ItemScorer> Pipeline<S, C> {
    #[must_use]
    pub fn new(
        source: S,
        scorer: C,
        cache: ReportCache,
        policy: AnalysisPolicy,
        max_workers: usize,
    ) -> Self {
        Self {
            source,
            scorer,
            cache,
            policy,
            max_workers: max_workers.clamp(1, batch::MAX_WORKERS),
        }
    }

    /// Run the pipeline, yielding a snapshot after each stage transition
    /// and after every completed sentiment batch.
    ///
    /// Snapshot `progress` is monotonically non-decreasing and
    /// `processing_status` names the stage about to run. A fatal fetch
    /// error is yielded as the final element and nothing is cached.
    /// Dropping the stream abandons the run at its next await point; there
    /// is no separate cancellation API.
    pub fn run_streaming(
        &self,
        request: AnalysisRequest,
    ) -> impl Stream<Item = Result<AggregateReport, AnalysisError>> + '_ {
        async_stream::stream! {
            let key = CacheKey::from(&request);
            if let Some(hit) = self.cache.get(&key) {
                tracing::debug!(key = %key, "serving report from cache");
                yield Ok(hit);
                return;
            }

            let started = Instant::now();

            // fetching_info
            let info = match self.source.fetch_info(&request.source_id).await {
                Ok(info) => info,
                Err(e) => {
                    tracing::warn!(source = %request.source_id, error = %e, "source info fetch failed");
                    yield Err(e);
                    return;
                }
            };
            let mut report = AggregateReport::new(info);
            record_secs(&mut report, "source_info", started.elapsed().as_secs_f64());
            report.status = PipelineStage::FetchingComments;
            report.progress = 5;
            yield Ok(report.clone());

            // fetching_comments
            let fetch_started = Instant::now();
            let items = match self
                .source
                .fetch_items(&request.source_id, request.max_items, &request.filters)
                .await
            {
                Ok(items) => items,
                Err(e) => {
                    tracing::warn!(source = %request.source_id, error = %e, "item fetch failed");
                    yield Err(e);
                    return;
                }
            };
            record_secs(&mut report, "comments_fetch", fetch_started.elapsed().as_secs_f64());
            report.sentiment_summary.total_comments = items.len();
            report.items = items;
            report.status = PipelineStage::AnalyzingSentiment;
            report.progress = 15;
            yield Ok(report.clone());

            // analyzing_sentiment: bounded worker pool, batches collected as
            // they complete, reassembled by item id afterwards.
            let sentiment_started = Instant::now();
            let items = std::mem::take(&mut report.items);
            let order: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
            let batches = batch::plan_batches(items);
            let total_batches = batches.len();

            let mut outcomes = Vec::with_capacity(total_batches);
            {
                let mut scoring = futures::stream::iter(
                    batches
                        .into_iter()
                        .map(|b| batch::score_batch(&self.scorer, b)),
                )
                .buffer_unordered(self.max_workers);

                while let Some(outcome) = scoring.next().await {
                    outcomes.push(outcome);
                    report.progress = batch::batch_progress(outcomes.len(), total_batches);
                    yield Ok(report.clone());
                }
            }

            let (scored, failed_batches) = batch::reassemble(&order, outcomes);
            if failed_batches > 0 {
                tracing::warn!(
                    failed_batches,
                    total_batches,
                    "some batches degraded to neutral during scoring"
                );
            }
            report.items = scored;
            record_secs(&mut report, "sentiment_analysis", sentiment_started.elapsed().as_secs_f64());
            report.status = PipelineStage::AnalyzingEngagement;
            report.progress = 75;
            yield Ok(report.clone());

            // analyzing_engagement + aggregation
            let engagement_started = Instant::now();
            let engagement = engagement_sentiment(&report.source);
            report.engagement_metrics = Some(EngagementMetrics {
                view_count: report.source.view_count,
                like_count: report.source.like_count,
                comment_count: report.source.comment_count,
                engagement_sentiment: engagement,
            });
            report.sentiment_summary =
                aggregate::summarize_sentiment(&report.items, &engagement, self.policy.comment_weight);
            report.emotions = aggregate::aggregate_emotions(&report.items);
            report.languages = aggregate::aggregate_languages(&report.items);
            report.multilingual = report.languages.len() > 1;
            report.emoji_count = aggregate::emoji_count(&report.items);
            record_secs(&mut report, "engagement_analysis", engagement_started.elapsed().as_secs_f64());
            report.status = PipelineStage::ExtractingTopics;
            report.progress = 85;
            yield Ok(report.clone());

            // extracting_topics
            let topics_started = Instant::now();
            let texts: Vec<String> = report.items.iter().map(|i| i.text.clone()).collect();
            report.topics = extract_topics(&texts, DEFAULT_TOPIC_COUNT);
            report.topic_names = topic_names(&report.topics);
            record_secs(&mut report, "topic_extraction", topics_started.elapsed().as_secs_f64());
            record_secs(&mut report, "total", started.elapsed().as_secs_f64());
            report.status = PipelineStage::Completed;
            report.progress = 100;

            self.cache.insert(&key, &report);
            yield Ok(report);
        }
    }

    /// Run the pipeline to completion and return the terminal report.
    ///
    /// Consumes [`Pipeline::run_streaming`] to its end, so behavior is
    /// identical to the streaming form minus the intermediate snapshots.
    ///
    /// # Errors
    ///
    /// Returns the fatal error ([`AnalysisError::NotFound`],
    /// [`AnalysisError::CommentsDisabled`], or a fetch failure) that
    /// aborted the run.
    pub async fn run(&self, request: AnalysisRequest) -> Result<AggregateReport, AnalysisError> {
        let stream = self.run_streaming(request);
        futures::pin_mut!(stream);

        let mut last = None;
        while let Some(snapshot) = stream.next().await {
            last = Some(snapshot?);
        }
        last.ok_or_else(|| AnalysisError::Fetch("pipeline produced no snapshots".to_string()))
    }
}

fn record_secs(report: &mut AggregateReport, stage: &str, secs: f64) {
    report.processing_time.insert(stage.to_string(), secs);
}
