//! Batch planning, scoring, and reassembly for the worker pool.
//!
//! Batches are dispatched with bounded concurrency and collected as they
//! complete, not in submission order, so results are matched back to items
//! by id rather than by position. A batch whose scoring fails is degraded
//! in place — every item force-labeled neutral — and never aborts the run.

use std::collections::HashMap;

use crate::scorer::ItemScorer;
use crate::types::{Item, ItemScoring, SentimentScores};

/// Upper bound on concurrent batch workers, matching the source design.
pub const MAX_WORKERS: usize = 8;

/// Progress band reserved for the sentiment-batching stage.
pub(crate) const PROGRESS_START: u8 = 25;
pub(crate) const PROGRESS_END: u8 = 65;

/// The result of scoring one batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub items: Vec<Item>,
    pub success: bool,
}

/// Batch size tier for a given total item count: small sets go through in
/// one batch, medium sets in batches of 50, large sets in batches of 100.
#[must_use]
pub fn batch_size_for(total: usize) -> usize {
    if total <= 50 {
        total.max(1)
    } else if total <= 200 {
        50
    } else {
        100
    }
}

/// Partition items into ordered, disjoint batches by the size tiers.
#[must_use]
pub fn plan_batches(items: Vec<Item>) -> Vec<Vec<Item>> {
    if items.is_empty() {
        return Vec::new();
    }
    let size = batch_size_for(items.len());
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut batch = Vec::with_capacity(size);
    for item in items {
        batch.push(item);
        if batch.len() == size {
            batches.push(std::mem::take(&mut batch));
        }
    }
    if !batch.is_empty() {
        batches.push(batch);
    }
    batches
}

/// Score every item in one batch.
///
/// If any item's scoring fails, the whole batch is force-labeled neutral
/// with an even score split and marked `success = false`; the error never
/// propagates. Failures degrade quality, never halt progress.
pub async fn score_batch<S: ItemScorer>(scorer: &S, mut items: Vec<Item>) -> BatchOutcome {
    let mut scored = Vec::with_capacity(items.len());
    let mut failed = false;

    for item in &items {
        match scorer.score_text(&item.text).await {
            Ok(result) => scored.push(result),
            Err(e) => {
                tracing::warn!(
                    batch_size = items.len(),
                    error = %e,
                    "batch scoring failed, force-labeling items neutral"
                );
                failed = true;
                break;
            }
        }
    }

    if failed {
        for item in &mut items {
            item.scoring = Some(neutral_scoring());
        }
        return BatchOutcome {
            items,
            success: false,
        };
    }

    for (item, result) in items.iter_mut().zip(scored) {
        item.scoring = Some(ItemScoring {
            sentiment: result.sentiment,
            scores: result.scores,
            language: result.language,
            translated_text: result.translated_text,
            emotions: result.emotions,
            emojis: result.emojis,
        });
    }

    BatchOutcome {
        items,
        success: true,
    }
}

/// Reassemble completed batches into the original item order.
///
/// Association is by item id; completion order of the batches is
/// irrelevant. Returns the ordered items and the number of failed batches.
#[must_use]
pub fn reassemble(order: &[String], outcomes: Vec<BatchOutcome>) -> (Vec<Item>, usize) {
    let failed = outcomes.iter().filter(|o| !o.success).count();

    let mut by_id: HashMap<String, Item> = outcomes
        .into_iter()
        .flat_map(|o| o.items)
        .map(|item| (item.id.clone(), item))
        .collect();

    let items = order.iter().filter_map(|id| by_id.remove(id)).collect();
    (items, failed)
}

/// Map completed-batch count into the stage's reserved progress band.
#[must_use]
pub fn batch_progress(completed: usize, total: usize) -> u8 {
    if total == 0 || completed >= total {
        return PROGRESS_END;
    }
    let span = f64::from(PROGRESS_END - PROGRESS_START);
    #[allow(clippy::cast_precision_loss)]
    let fraction = completed as f64 / total as f64;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let offset = (span * fraction) as u8;
    PROGRESS_START + offset
}

fn neutral_scoring() -> ItemScoring {
    ItemScoring {
        sentiment: crate::types::SentimentLabel::Neutral,
        scores: SentimentScores::even(),
        language: "unknown".to_string(),
        translated_text: None,
        emotions: std::collections::BTreeMap::new(),
        emojis: Vec::new(),
    }
}

#[cfg(test)]
#[path = "batch_test.rs"]
mod tests;
