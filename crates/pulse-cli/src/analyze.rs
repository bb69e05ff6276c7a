//! The `analyze` and `stream` commands: build a pipeline over either an
//! items file or the built-in fixture source and run it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Args;
use futures::StreamExt;
use serde::Deserialize;

use pulse_analysis::{
    AggregateReport, AnalysisError, AnalysisRequest, FixtureSource, Item, ItemFilters, MlBackend,
    Pipeline, ReportCache, SourceFetcher, SourceInfo, TextScorer, Translator,
};
use pulse_core::AppConfig;

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Source id to analyze
    pub source_id: String,

    /// Read pre-fetched items from a JSON file instead of the fixture source
    #[arg(long)]
    pub items_file: Option<PathBuf>,

    /// Maximum number of items to analyze
    #[arg(long)]
    pub max_items: Option<usize>,

    /// Comma-separated filter flags (part of the cache key)
    #[arg(long, value_delimiter = ',')]
    pub filters: Vec<String>,

    /// Print the full report as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// On-disk shape of a pre-fetched items file.
#[derive(Debug, Deserialize)]
struct ItemsFile {
    source: SourceInfo,
    items: Vec<Item>,
}

/// Source backed by a pre-fetched JSON file: the pipeline stays
/// fetch-agnostic and the CLI supplies whatever some other tool collected.
struct FileSource {
    file: ItemsFile,
}

impl FileSource {
    fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("cannot read items file {}: {e}", path.display()))?;
        let file: ItemsFile = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("invalid items file {}: {e}", path.display()))?;
        Ok(Self { file })
    }
}

impl SourceFetcher for FileSource {
    async fn fetch_info(&self, id: &str) -> Result<SourceInfo, AnalysisError> {
        if self.file.source.id != id {
            return Err(AnalysisError::NotFound(id.to_string()));
        }
        Ok(self.file.source.clone())
    }

    async fn fetch_items(
        &self,
        _id: &str,
        max_items: usize,
        _filters: &ItemFilters,
    ) -> Result<Vec<Item>, AnalysisError> {
        Ok(self.file.items.iter().take(max_items).cloned().collect())
    }
}

pub async fn run_analyze(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let (request, json) = (build_request(config, &args), args.json);
    let report = match args.items_file {
        Some(path) => {
            let pipeline = build_pipeline(config, FileSource::load(&path)?)?;
            pipeline.run(request).await?
        }
        None => {
            let pipeline = build_pipeline(config, FixtureSource)?;
            pipeline.run(request).await?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

pub async fn run_stream(config: &AppConfig, args: AnalyzeArgs) -> anyhow::Result<()> {
    let request = build_request(config, &args);
    match args.items_file {
        Some(path) => {
            let pipeline = build_pipeline(config, FileSource::load(&path)?)?;
            stream_snapshots(&pipeline, request).await
        }
        None => {
            let pipeline = build_pipeline(config, FixtureSource)?;
            stream_snapshots(&pipeline, request).await
        }
    }
}

async fn stream_snapshots<S: SourceFetcher>(
    pipeline: &Pipeline<S, TextScorer>,
    request: AnalysisRequest,
) -> anyhow::Result<()> {
    let stream = pipeline.run_streaming(request);
    futures::pin_mut!(stream);
    while let Some(snapshot) = stream.next().await {
        let snapshot = snapshot?;
        println!("{}", serde_json::to_string(&snapshot)?);
    }
    Ok(())
}

fn build_request(config: &AppConfig, args: &AnalyzeArgs) -> AnalysisRequest {
    AnalysisRequest {
        source_id: args.source_id.clone(),
        max_items: args.max_items.unwrap_or(config.max_items),
        filters: ItemFilters(args.filters.clone()),
    }
}

pub(crate) fn build_scorer(config: &AppConfig) -> anyhow::Result<TextScorer> {
    let mut scorer = match &config.ml_api_key {
        Some(key) => {
            let backend = MlBackend::new(&config.ml_api_url, key, config.ml_timeout_secs)?;
            TextScorer::with_ml(backend, config.policy)
        }
        None => {
            tracing::info!("no ML API key configured, scoring with the lexicon only");
            TextScorer::lexicon_only(config.policy)
        }
    };
    if config.translate_enabled {
        scorer = scorer.with_translator(Translator::new(config.ml_timeout_secs)?);
    }
    Ok(scorer)
}

fn build_pipeline<S: SourceFetcher>(
    config: &AppConfig,
    source: S,
) -> anyhow::Result<Pipeline<S, TextScorer>> {
    let cache = ReportCache::new(
        config.cache_capacity,
        Duration::from_secs(config.cache_ttl_secs),
    );
    Ok(Pipeline::new(
        source,
        build_scorer(config)?,
        cache,
        config.policy,
        config.max_workers,
    ))
}

fn print_summary(report: &AggregateReport) {
    let summary = &report.sentiment_summary;
    println!("{} — {}", report.source.title, report.source.channel);
    println!(
        "items: {}  positive: {:.1}%  neutral: {:.1}%  negative: {:.1}%",
        summary.total_comments,
        summary.positive * 100.0,
        summary.neutral * 100.0,
        summary.negative * 100.0
    );
    if !report.languages.is_empty() {
        let languages: Vec<String> = report
            .languages
            .iter()
            .map(|(lang, pct)| format!("{lang} {pct:.0}%"))
            .collect();
        println!("languages: {}", languages.join(", "));
    }
    if !report.topic_names.is_empty() {
        println!("topics: {}", report.topic_names.join(", "));
    }
    if let Some(total) = report.processing_time.get("total") {
        println!("completed in {total:.2}s{}", if report.cached { " (cached)" } else { "" });
    }
}
