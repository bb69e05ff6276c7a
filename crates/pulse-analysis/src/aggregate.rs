//! Combining per-item scores, engagement sentiment, and topics into the
//! report-level summaries.

use std::collections::BTreeMap;

use crate::types::{Item, SentimentLabel, SentimentScores, SentimentSummary};

/// The defined summary for an empty item set: balanced, not NaN.
const EMPTY_DISTRIBUTION: SentimentScores = SentimentScores {
    positive: 0.33,
    neutral: 0.34,
    negative: 0.33,
};

/// Categorical distribution of item labels.
///
/// Items that somehow carry no scoring count as neutral. Zero items yield
/// the defined balanced default rather than a division error.
#[must_use]
pub fn comment_distribution(items: &[Item]) -> SentimentScores {
    if items.is_empty() {
        return EMPTY_DISTRIBUTION;
    }

    let mut positive = 0usize;
    let mut negative = 0usize;
    for item in items {
        match item.scoring.as_ref().map(|s| s.sentiment) {
            Some(SentimentLabel::Positive) => positive += 1,
            Some(SentimentLabel::Negative) => negative += 1,
            _ => {}
        }
    }
    let neutral = items.len() - positive - negative;

    #[allow(clippy::cast_precision_loss)]
    let total = items.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    SentimentScores {
        positive: positive as f64 / total,
        neutral: neutral as f64 / total,
        negative: negative as f64 / total,
    }
}

/// Blend the comment distribution with the engagement distribution into the
/// final summary. `comment_weight` is the comment share; engagement gets the
/// remainder.
#[must_use]
pub fn summarize_sentiment(
    items: &[Item],
    engagement: &SentimentScores,
    comment_weight: f64,
) -> SentimentSummary {
    let combined = comment_distribution(items).blend(engagement, comment_weight);
    SentimentSummary {
        positive: combined.positive,
        neutral: combined.neutral,
        negative: combined.negative,
        total_comments: items.len(),
    }
}

/// Mean emotion magnitude per item.
///
/// Values are sums divided by the item count — deliberately not renormalized
/// to a distribution, since distinct emotions are independent magnitudes.
#[must_use]
pub fn aggregate_emotions(items: &[Item]) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for item in items {
        if let Some(scoring) = &item.scoring {
            for (emotion, score) in &scoring.emotions {
                *totals.entry(emotion.clone()).or_insert(0.0) += score;
            }
        }
    }

    if !items.is_empty() {
        #[allow(clippy::cast_precision_loss)]
        let count = items.len() as f64;
        for value in totals.values_mut() {
            *value /= count;
        }
    }
    totals
}

/// Percentage of items per detected language; sums to 100 ± rounding.
/// Items without scoring count under `"unknown"`.
#[must_use]
pub fn aggregate_languages(items: &[Item]) -> BTreeMap<String, f64> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for item in items {
        let lang = item
            .scoring
            .as_ref()
            .map_or("unknown", |s| s.language.as_str());
        *counts.entry(lang.to_string()).or_insert(0) += 1;
    }

    if items.is_empty() {
        return BTreeMap::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let total = items.len() as f64;
    counts
        .into_iter()
        .map(|(lang, count)| {
            #[allow(clippy::cast_precision_loss)]
            let pct = count as f64 / total * 100.0;
            (lang, pct)
        })
        .collect()
}

/// Total number of emojis across all scored items.
#[must_use]
pub fn emoji_count(items: &[Item]) -> usize {
    items
        .iter()
        .filter_map(|item| item.scoring.as_ref())
        .map(|s| s.emojis.len())
        .sum()
}

#[cfg(test)]
#[path = "aggregate_test.rs"]
mod tests;
