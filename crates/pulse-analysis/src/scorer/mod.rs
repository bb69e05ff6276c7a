//! Single-text scoring: preprocessing, language handling, and the
//! classifier fallback chain.
//!
//! The chain tries each strategy in order behind a uniform error boundary;
//! the lexicon scorer sits last and cannot fail, so [`TextScorer::score`]
//! always produces a result. The ML strategy may be non-deterministic, but
//! its failures never escape — they only demote scoring to the next
//! strategy.

mod emoji;
mod emotions;
mod language;
mod lexicon;
mod ml;
mod translate;

pub use lexicon::LexiconScorer;
pub use ml::MlBackend;
pub use translate::Translator;

use std::collections::BTreeMap;

use pulse_core::AnalysisPolicy;

use crate::error::AnalysisError;
use crate::types::{SentimentLabel, SentimentScores};

/// Everything the scorer learns about one text.
#[derive(Debug, Clone)]
pub struct ScoreResult {
    pub sentiment: SentimentLabel,
    pub scores: SentimentScores,
    pub language: String,
    pub translated_text: Option<String>,
    pub emotions: BTreeMap<String, f64>,
    pub emojis: Vec<String>,
    pub explanation: String,
}

/// One classifier in the fallback chain.
#[derive(Debug, Clone)]
enum Strategy {
    Ml(MlBackend),
    Lexicon(LexiconScorer),
}

impl Strategy {
    async fn classify(&self, text: &str) -> Result<SentimentScores, AnalysisError> {
        match self {
            Strategy::Ml(backend) => backend.classify(text).await,
            Strategy::Lexicon(lexicon) => Ok(lexicon.classify(text)),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Strategy::Ml(_) => "ml",
            Strategy::Lexicon(_) => "lexicon",
        }
    }
}

/// Scores one text at a time; shared read-only across batch workers.
#[derive(Debug, Clone)]
pub struct TextScorer {
    chain: Vec<Strategy>,
    translator: Option<Translator>,
    policy: AnalysisPolicy,
}

impl TextScorer {
    /// A scorer that only uses the deterministic lexicon classifier.
    #[must_use]
    pub fn lexicon_only(policy: AnalysisPolicy) -> Self {
        Self {
            chain: vec![Strategy::Lexicon(LexiconScorer)],
            translator: None,
            policy,
        }
    }

    /// A scorer that tries the ML backend first and falls back to the
    /// lexicon classifier.
    #[must_use]
    pub fn with_ml(backend: MlBackend, policy: AnalysisPolicy) -> Self {
        Self {
            chain: vec![Strategy::Ml(backend), Strategy::Lexicon(LexiconScorer)],
            translator: None,
            policy,
        }
    }

    /// Attach a translator used to normalize non-English texts before
    /// classification.
    #[must_use]
    pub fn with_translator(mut self, translator: Translator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Score one text. Infallible: empty input short-circuits to the fixed
    /// neutral result and classifier failures degrade down the chain.
    pub async fn score(&self, text: &str) -> ScoreResult {
        let cleaned = language::preprocess(text);
        if cleaned.is_empty() {
            return empty_result();
        }

        let emojis = emoji::extract_emojis(&cleaned);
        let lang = language::detect_language(&cleaned);

        let translated_text = if lang == "en" {
            None
        } else {
            self.translate(&cleaned, &lang).await
        };
        let classify_input = translated_text.as_deref().unwrap_or(&cleaned);

        let text_scores = self.classify(classify_input).await;

        let scores = if emojis.is_empty() {
            text_scores
        } else {
            let emoji_scores = emoji::interpret_emojis(&emojis);
            text_scores
                .blend(&emoji_scores, self.policy.text_weight)
                .normalized()
        };

        let sentiment = scores.label();
        let emotions = emotions::detect_emotions(classify_input, &emojis);
        let explanation = build_explanation(&lang, emojis.len(), sentiment, &scores);

        ScoreResult {
            sentiment,
            scores,
            language: lang,
            translated_text,
            emotions,
            emojis,
            explanation,
        }
    }

    async fn classify(&self, text: &str) -> SentimentScores {
        for strategy in &self.chain {
            match strategy.classify(text).await {
                Ok(scores) => return scores,
                Err(e) => {
                    tracing::warn!(
                        strategy = strategy.name(),
                        error = %e,
                        "classifier strategy failed, falling back"
                    );
                }
            }
        }
        // The chain is built internally and always ends with the lexicon
        // strategy, which cannot fail; this line is unreachable in practice.
        LexiconScorer.classify(text)
    }

    async fn translate(&self, text: &str, source_lang: &str) -> Option<String> {
        let translator = self.translator.as_ref()?;
        match translator.translate(text, source_lang).await {
            Ok(translated) => Some(translated),
            Err(e) => {
                tracing::warn!(
                    language = source_lang,
                    error = %e,
                    "translation failed, scoring original text"
                );
                None
            }
        }
    }
}

/// Trait boundary between the batch coordinator and the text scorer, so
/// tests can inject a failing scorer to exercise batch containment.
#[allow(async_fn_in_trait)]
pub trait ItemScorer: Sync {
    async fn score_text(&self, text: &str) -> Result<ScoreResult, AnalysisError>;
}

impl ItemScorer for TextScorer {
    async fn score_text(&self, text: &str) -> Result<ScoreResult, AnalysisError> {
        Ok(self.score(text).await)
    }
}

/// The fixed result for empty or whitespace-only input.
fn empty_result() -> ScoreResult {
    ScoreResult {
        sentiment: SentimentLabel::Neutral,
        scores: SentimentScores::neutral(),
        language: "en".to_string(),
        translated_text: None,
        emotions: BTreeMap::new(),
        emojis: Vec::new(),
        explanation: "Empty text provided.".to_string(),
    }
}

fn build_explanation(
    lang: &str,
    emoji_count: usize,
    sentiment: SentimentLabel,
    scores: &SentimentScores,
) -> String {
    let mut explanation = String::new();

    if lang != "en" {
        explanation.push_str(&format!(
            "This text is in {lang} and was translated for analysis. "
        ));
    }
    if emoji_count > 0 {
        explanation.push_str(&format!(
            "The text contains {emoji_count} emojis which were also analyzed. "
        ));
    }

    match sentiment {
        SentimentLabel::Positive => explanation.push_str(&format!(
            "The overall sentiment is positive with {:.0}% confidence.",
            scores.positive * 100.0
        )),
        SentimentLabel::Negative => explanation.push_str(&format!(
            "The overall sentiment is negative with {:.0}% confidence.",
            scores.negative * 100.0
        )),
        SentimentLabel::Neutral => explanation.push_str(
            "The overall sentiment is neutral or balanced between positive and negative elements.",
        ),
    }

    explanation
}
