//! End-to-end pipeline tests over deterministic sources and scorers.

use std::time::Duration;

use chrono::DateTime;
use futures::StreamExt;

use pulse_analysis::scorer::ItemScorer;
use pulse_analysis::{
    AggregateReport, AnalysisError, AnalysisRequest, FixtureSource, Item, ItemFilters, Pipeline,
    PipelineStage, ReportCache, ScoreResult, SentimentLabel, SourceFetcher, SourceInfo,
    TextScorer,
};
use pulse_core::AnalysisPolicy;

fn cache() -> ReportCache {
    ReportCache::new(64, Duration::from_secs(3600))
}

fn request(source_id: &str) -> AnalysisRequest {
    AnalysisRequest {
        source_id: source_id.to_string(),
        max_items: 100,
        filters: ItemFilters::default(),
    }
}

fn fixture_pipeline() -> Pipeline<FixtureSource, TextScorer> {
    Pipeline::new(
        FixtureSource,
        TextScorer::lexicon_only(AnalysisPolicy::default()),
        cache(),
        AnalysisPolicy::default(),
        8,
    )
}

fn label_counts(report: &AggregateReport) -> (usize, usize, usize) {
    let mut counts = (0, 0, 0);
    for item in &report.items {
        match item.scoring.as_ref().map(|s| s.sentiment) {
            Some(SentimentLabel::Positive) => counts.0 += 1,
            Some(SentimentLabel::Negative) => counts.2 += 1,
            _ => counts.1 += 1,
        }
    }
    counts
}

#[tokio::test]
async fn fixture_run_produces_expected_summary() {
    let report = fixture_pipeline()
        .run(request("vid"))
        .await
        .expect("fixture run should succeed");

    assert_eq!(report.status, PipelineStage::Completed);
    assert_eq!(report.progress, 100);
    assert_eq!(report.sentiment_summary.total_comments, 10);
    assert_eq!(label_counts(&report), (3, 4, 3));

    // Fixture engagement saturates both rates: {0.9, 0.0, 0.1}. Blended
    // 70/30 with the 3/4/3 comment split:
    let summary = &report.sentiment_summary;
    assert!((summary.positive - 0.48).abs() < 1e-9, "got {}", summary.positive);
    assert!((summary.neutral - 0.28).abs() < 1e-9, "got {}", summary.neutral);
    assert!((summary.negative - 0.24).abs() < 1e-9, "got {}", summary.negative);
    let sum = summary.positive + summary.neutral + summary.negative;
    assert!((sum - 1.0).abs() < 1e-6);

    let engagement = report
        .engagement_metrics
        .as_ref()
        .expect("terminal report carries engagement metrics");
    assert!((engagement.engagement_sentiment.positive - 0.9).abs() < 1e-9);
    assert_eq!(engagement.view_count, 10_000);

    assert!(!report.cached);
    assert!(report.processing_time.contains_key("total"));
    assert!(report.processing_time.contains_key("sentiment_analysis"));
    assert!((report.languages.values().sum::<f64>() - 100.0).abs() < 1e-6);
}

#[tokio::test]
async fn streaming_snapshots_are_monotonic_and_ordered() {
    let pipeline = fixture_pipeline();
    let snapshots: Vec<AggregateReport> = pipeline
        .run_streaming(request("vid"))
        .map(|s| s.expect("fixture stream should not error"))
        .collect()
        .await;

    assert!(snapshots.len() >= 5, "one snapshot per stage at minimum");

    let mut last_progress = 0u8;
    let mut last_status = PipelineStage::FetchingInfo;
    for snapshot in &snapshots {
        assert!(
            snapshot.progress >= last_progress,
            "progress regressed: {} -> {}",
            last_progress,
            snapshot.progress
        );
        assert!(
            snapshot.status >= last_status,
            "status regressed: {last_status} -> {}",
            snapshot.status
        );
        last_progress = snapshot.progress;
        last_status = snapshot.status;
    }

    assert_eq!(snapshots[0].status, PipelineStage::FetchingComments);
    let terminal = snapshots.last().unwrap();
    assert_eq!(terminal.status, PipelineStage::Completed);
    assert_eq!(terminal.progress, 100);
    assert_eq!(terminal.sentiment_summary.total_comments, 10);

    // Only the terminal snapshot is fully populated.
    assert!(snapshots[0].items.is_empty());
    assert!(!terminal.items.is_empty());
}

#[tokio::test]
async fn warm_cache_returns_identical_report() {
    let pipeline = fixture_pipeline();

    let first = pipeline.run(request("vid")).await.unwrap();
    assert!(!first.cached);

    let second = pipeline.run(request("vid")).await.unwrap();
    assert!(second.cached);
    assert!(second.cached_at.is_some());
    assert_eq!(second.status, PipelineStage::Completed);
    assert_eq!(
        second.sentiment_summary.total_comments,
        first.sentiment_summary.total_comments
    );
    assert!((second.sentiment_summary.positive - first.sentiment_summary.positive).abs() < 1e-12);
    assert_eq!(second.items.len(), first.items.len());
    assert_eq!(second.topic_names, first.topic_names);
}

#[tokio::test]
async fn different_request_parameters_miss_the_cache() {
    let pipeline = fixture_pipeline();
    pipeline.run(request("vid")).await.unwrap();

    let mut narrower = request("vid");
    narrower.max_items = 5;
    let report = pipeline.run(narrower).await.unwrap();
    assert!(!report.cached, "different max_items must recompute");
    assert_eq!(report.sentiment_summary.total_comments, 5);
}

#[tokio::test]
async fn identical_runs_are_deterministic_without_cache() {
    // Separate pipelines, separate caches: no memoization involved.
    let a = fixture_pipeline().run(request("vid")).await.unwrap();
    let b = fixture_pipeline().run(request("vid")).await.unwrap();

    assert_eq!(label_counts(&a), label_counts(&b));
    assert!((a.sentiment_summary.positive - b.sentiment_summary.positive).abs() < 1e-12);
    assert_eq!(a.languages, b.languages);
    assert_eq!(a.topic_names, b.topic_names);
}

#[tokio::test]
async fn not_found_aborts_with_no_cache_write() {
    let shared_cache = cache();
    let pipeline = Pipeline::new(
        FixtureSource,
        TextScorer::lexicon_only(AnalysisPolicy::default()),
        shared_cache.clone(),
        AnalysisPolicy::default(),
        8,
    );

    let err = pipeline.run(request("missing")).await.unwrap_err();
    assert!(matches!(err, AnalysisError::NotFound(_)));

    let key = pulse_analysis::CacheKey::from(&request("missing"));
    assert!(
        shared_cache.get(&key).is_none(),
        "failed runs must not be cached"
    );
}

#[tokio::test]
async fn comments_disabled_aborts_after_info_snapshot() {
    let shared_cache = cache();
    let pipeline = Pipeline::new(
        FixtureSource,
        TextScorer::lexicon_only(AnalysisPolicy::default()),
        shared_cache.clone(),
        AnalysisPolicy::default(),
        8,
    );

    let results: Vec<Result<AggregateReport, AnalysisError>> = pipeline
        .run_streaming(request("disabled"))
        .collect()
        .await;

    // One snapshot for the fetched info, then the fatal error.
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(matches!(
        results[1],
        Err(AnalysisError::CommentsDisabled(_))
    ));

    let key = pulse_analysis::CacheKey::from(&request("disabled"));
    assert!(shared_cache.get(&key).is_none());
}

#[tokio::test]
async fn streaming_not_found_yields_single_error() {
    let pipeline = fixture_pipeline();
    let results: Vec<Result<AggregateReport, AnalysisError>> = pipeline
        .run_streaming(request("missing"))
        .collect()
        .await;
    assert_eq!(results.len(), 1);
    assert!(matches!(results[0], Err(AnalysisError::NotFound(_))));
}

/// Source serving a configurable number of generated items; item 60 carries
/// a marker that [`FailOn`] trips over.
struct GeneratedSource {
    count: usize,
}

impl SourceFetcher for GeneratedSource {
    async fn fetch_info(&self, id: &str) -> Result<SourceInfo, AnalysisError> {
        Ok(SourceInfo {
            id: id.to_string(),
            title: "generated".to_string(),
            channel: "generated".to_string(),
            published_at: DateTime::UNIX_EPOCH,
            view_count: 0,
            like_count: 0,
            comment_count: 0,
        })
    }

    async fn fetch_items(
        &self,
        _id: &str,
        max_items: usize,
        _filters: &ItemFilters,
    ) -> Result<Vec<Item>, AnalysisError> {
        let items = (0..self.count.min(max_items))
            .map(|i| Item {
                id: format!("g{i}"),
                text: if i == 60 {
                    "boom marker".to_string()
                } else {
                    "this is great".to_string()
                },
                author: "gen".to_string(),
                created_at: DateTime::UNIX_EPOCH,
                like_count: 0,
                scoring: None,
            })
            .collect();
        Ok(items)
    }
}

/// Scorer that fails on a marker word, failing exactly the batch holding it.
struct FailOn(&'static str);

impl ItemScorer for FailOn {
    async fn score_text(&self, text: &str) -> Result<ScoreResult, AnalysisError> {
        if text.contains(self.0) {
            return Err(AnalysisError::Unavailable("injected failure".to_string()));
        }
        TextScorer::lexicon_only(AnalysisPolicy::default())
            .score_text(text)
            .await
    }
}

#[tokio::test]
async fn one_failed_batch_degrades_without_dropping_items() {
    // 120 items -> batches of 50: the marker at index 60 fails only the
    // middle batch.
    let pipeline = Pipeline::new(
        GeneratedSource { count: 120 },
        FailOn("boom"),
        cache(),
        AnalysisPolicy::default(),
        8,
    );

    let mut req = request("gen");
    req.max_items = 200;
    let report = pipeline.run(req).await.unwrap();

    assert_eq!(report.sentiment_summary.total_comments, 120);
    assert_eq!(report.items.len(), 120, "no items may be dropped");

    let (positive, neutral, _negative) = {
        let mut counts = (0usize, 0usize, 0usize);
        for item in &report.items {
            match item.scoring.as_ref().map(|s| s.sentiment) {
                Some(SentimentLabel::Positive) => counts.0 += 1,
                Some(SentimentLabel::Negative) => counts.2 += 1,
                _ => counts.1 += 1,
            }
        }
        counts
    };

    // Batches 1 (items 0..50) and 3 (items 100..120) score positive; the
    // failed middle batch is force-neutral.
    assert_eq!(positive, 70);
    assert_eq!(neutral, 50);

    // Items outside the failed batch keep their real scores.
    assert_eq!(
        report.items[0].scoring.as_ref().unwrap().sentiment,
        SentimentLabel::Positive
    );
    assert_eq!(
        report.items[55].scoring.as_ref().unwrap().sentiment,
        SentimentLabel::Neutral
    );
    assert_eq!(
        report.items[110].scoring.as_ref().unwrap().sentiment,
        SentimentLabel::Positive
    );
}

#[tokio::test]
async fn empty_item_list_yields_wellformed_neutral_report() {
    let pipeline = Pipeline::new(
        GeneratedSource { count: 0 },
        TextScorer::lexicon_only(AnalysisPolicy::default()),
        cache(),
        AnalysisPolicy::default(),
        8,
    );

    let report = pipeline.run(request("empty")).await.unwrap();
    assert_eq!(report.status, PipelineStage::Completed);
    assert_eq!(report.sentiment_summary.total_comments, 0);

    let summary = &report.sentiment_summary;
    let sum = summary.positive + summary.neutral + summary.negative;
    assert!((sum - 1.0).abs() < 1e-6, "empty run must stay a distribution");
    assert!(summary.positive.is_finite());
    assert!(report.topics.is_empty());
    assert!(report.languages.is_empty());
}
