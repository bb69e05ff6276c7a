use thiserror::Error;

/// Errors surfaced by the analysis pipeline.
///
/// Only [`AnalysisError::NotFound`] and [`AnalysisError::CommentsDisabled`]
/// abort a run; everything else is recovered inside the component that
/// raised it (fallback chain, force-neutral batches) and never reaches the
/// caller.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The requested source id does not exist. Fatal, no partial report.
    #[error("source not found: {0}")]
    NotFound(String),

    /// The source exists but its comments cannot be fetched. Fatal.
    #[error("comments are disabled for source: {0}")]
    CommentsDisabled(String),

    /// The inference backend is down, timed out, rate-limited, or returned
    /// a payload we cannot read. Recovered by the scorer fallback chain.
    #[error("inference backend unavailable: {0}")]
    Unavailable(String),

    /// A source fetch failed for a reason other than a missing id.
    #[error("source fetch failed: {0}")]
    Fetch(String),
}
