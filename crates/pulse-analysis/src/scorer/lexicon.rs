//! Keyword-lexicon sentiment classifier.
//!
//! The terminal stage of the scorer fallback chain: deterministic, offline,
//! and total — every input gets a label.

use crate::types::SentimentScores;

const POSITIVE_WORDS: &[&str] = &[
    "good",
    "great",
    "excellent",
    "amazing",
    "love",
    "happy",
    "wonderful",
    "fantastic",
    "best",
    "awesome",
    "brilliant",
    "outstanding",
    "perfect",
    "enjoy",
    "pleased",
    "delighted",
    "glad",
    "satisfied",
    "impressive",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad",
    "terrible",
    "horrible",
    "hate",
    "awful",
    "worst",
    "poor",
    "disappointed",
    "unhappy",
    "sad",
    "annoying",
    "frustrating",
    "useless",
    "waste",
    "dislike",
    "failure",
    "problem",
    "difficult",
    "complaint",
];

/// Deterministic keyword-based classifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconScorer;

impl LexiconScorer {
    /// Classify a text by counting lexicon word hits.
    ///
    /// Words are lowercased and stripped of surrounding punctuation before
    /// matching. Texts with no lexicon hits score fully neutral; otherwise
    /// the positive and negative shares are the hit-count fractions.
    #[must_use]
    pub fn classify(&self, text: &str) -> SentimentScores {
        let mut positive = 0usize;
        let mut negative = 0usize;

        for word in text.split_whitespace() {
            let w = word
                .trim_matches(|c: char| !c.is_alphabetic())
                .to_lowercase();
            if POSITIVE_WORDS.contains(&w.as_str()) {
                positive += 1;
            } else if NEGATIVE_WORDS.contains(&w.as_str()) {
                negative += 1;
            }
        }

        let total = positive + negative;
        if total == 0 {
            return SentimentScores::neutral();
        }

        #[allow(clippy::cast_precision_loss)]
        let denom = total as f64;
        #[allow(clippy::cast_precision_loss)]
        SentimentScores {
            positive: positive as f64 / denom,
            neutral: 0.0,
            negative: negative as f64 / denom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SentimentLabel;

    #[test]
    fn no_keywords_scores_neutral() {
        let scores = LexiconScorer.classify("the quick brown fox");
        assert_eq!(scores, SentimentScores::neutral());
        assert_eq!(scores.label(), SentimentLabel::Neutral);
    }

    #[test]
    fn positive_keywords_dominate() {
        let scores = LexiconScorer.classify("this tutorial is great, really the best");
        assert_eq!(scores.label(), SentimentLabel::Positive);
        assert!((scores.sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn negative_keywords_dominate() {
        let scores = LexiconScorer.classify("terrible audio and a waste of time");
        assert_eq!(scores.label(), SentimentLabel::Negative);
    }

    #[test]
    fn balanced_keywords_tie_to_neutral() {
        let scores = LexiconScorer.classify("great idea but terrible execution");
        assert_eq!(scores.label(), SentimentLabel::Neutral);
    }

    #[test]
    fn punctuation_is_stripped_before_matching() {
        let scores = LexiconScorer.classify("Great!");
        assert_eq!(scores.label(), SentimentLabel::Positive);
    }

    #[test]
    fn classification_is_deterministic() {
        let a = LexiconScorer.classify("I love this but the ending was bad");
        let b = LexiconScorer.classify("I love this but the ending was bad");
        assert_eq!(a, b);
    }
}
