//! The boundary to whatever supplies items: platform clients, files, or
//! fixtures. The pipeline never fetches anything itself.

use chrono::DateTime;

use crate::error::AnalysisError;
use crate::types::{Item, ItemFilters, SourceInfo};

/// Supplies source metadata and the pre-fetched item list for one source id.
#[allow(async_fn_in_trait)]
pub trait SourceFetcher {
    /// Fetch metadata for a source.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::NotFound`] for unknown ids; any other error
    /// aborts the pipeline run.
    async fn fetch_info(&self, id: &str) -> Result<SourceInfo, AnalysisError>;

    /// Fetch up to `max_items` items for a source.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::CommentsDisabled`] when the source exists
    /// but its items cannot be listed.
    async fn fetch_items(
        &self,
        id: &str,
        max_items: usize,
        filters: &ItemFilters,
    ) -> Result<Vec<Item>, AnalysisError>;
}

/// Ten canned comments: three positive, four neutral, three negative under
/// the lexicon scorer. `(text, author)` pairs.
const FIXTURE_COMMENTS: &[(&str, &str)] = &[
    ("This is great, one of the best tutorials I have seen", "User_0"),
    ("Excellent work, I love the pacing", "User_1"),
    ("Amazing explanation, awesome editing too", "User_2"),
    ("I watched this on my commute yesterday", "User_3"),
    ("The second chapter starts around the ten minute mark", "User_4"),
    ("Does anyone have the link from the intro?", "User_5"),
    ("I came here after the previous episode", "User_6"),
    ("Terrible audio, the mix is a problem", "User_7"),
    ("This was a waste of time, very disappointed", "User_8"),
    ("Worst upload so far, bad pacing everywhere", "User_9"),
];

/// Deterministic in-memory source for demos and tests.
///
/// Serves a fixed ten-comment thread with a 3/4/3
/// positive/neutral/negative split for every id except `"missing"` (reports
/// [`AnalysisError::NotFound`]) and `"disabled"` (source exists, comments
/// cannot be listed).
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl FixtureSource {
    /// The id that [`FixtureSource::fetch_info`] rejects.
    pub const MISSING_ID: &'static str = "missing";
    /// The id whose comments cannot be fetched.
    pub const DISABLED_ID: &'static str = "disabled";
}

impl SourceFetcher for FixtureSource {
    async fn fetch_info(&self, id: &str) -> Result<SourceInfo, AnalysisError> {
        if id == Self::MISSING_ID {
            return Err(AnalysisError::NotFound(id.to_string()));
        }
        Ok(SourceInfo {
            id: id.to_string(),
            title: format!("Sample video {id}"),
            channel: "Sample channel".to_string(),
            published_at: DateTime::UNIX_EPOCH,
            view_count: 10_000,
            like_count: 500,
            comment_count: 100,
        })
    }

    async fn fetch_items(
        &self,
        id: &str,
        max_items: usize,
        _filters: &ItemFilters,
    ) -> Result<Vec<Item>, AnalysisError> {
        if id == Self::MISSING_ID {
            return Err(AnalysisError::NotFound(id.to_string()));
        }
        if id == Self::DISABLED_ID {
            return Err(AnalysisError::CommentsDisabled(id.to_string()));
        }
        let items = FIXTURE_COMMENTS
            .iter()
            .enumerate()
            .take(max_items)
            .map(|(i, (text, author))| Item {
                id: format!("comment_{i}"),
                text: (*text).to_string(),
                author: (*author).to_string(),
                created_at: DateTime::UNIX_EPOCH,
                like_count: (i as u64) * 5,
                scoring: None,
            })
            .collect();
        Ok(items)
    }
}
