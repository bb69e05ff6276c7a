//! Sentiment inferred from audience engagement counters.

use crate::types::{SentimentScores, SourceInfo};

/// Share of the approval signal carried by the like rate; the comment rate
/// carries the rest.
const LIKE_RATE_WEIGHT: f64 = 0.7;

/// Engagement alone never proves approval, so a fixed negative share is
/// always reserved.
const NEGATIVE_FLOOR: f64 = 0.1;

/// A 1% like or comment rate counts as full engagement.
const RATE_SCALE: f64 = 100.0;

/// Derive a sentiment-shaped distribution from view/like/comment counters.
///
/// Rates are computed against the view count (zero views means zero rates,
/// never a division error), scaled so 1% reads as saturation, and mixed
/// 70/30 like/comment. The positive share is capped so that, together with
/// the fixed negative floor, the triple remains a distribution.
#[must_use]
pub fn engagement_sentiment(info: &SourceInfo) -> SentimentScores {
    #[allow(clippy::cast_precision_loss)]
    let (like_rate, comment_rate) = if info.view_count == 0 {
        (0.0, 0.0)
    } else {
        let views = info.view_count as f64;
        (
            info.like_count as f64 / views,
            info.comment_count as f64 / views,
        )
    };

    let normalized_like = (like_rate * RATE_SCALE).min(1.0);
    let normalized_comment = (comment_rate * RATE_SCALE).min(1.0);

    let positive = (normalized_like * LIKE_RATE_WEIGHT
        + normalized_comment * (1.0 - LIKE_RATE_WEIGHT))
        .min(1.0 - NEGATIVE_FLOOR);
    let negative = NEGATIVE_FLOOR;
    let neutral = 1.0 - positive - negative;

    SentimentScores {
        positive,
        neutral,
        negative,
    }
}
