//! Topic extraction over the analyzed corpus.
//!
//! Large corpora go through TF-IDF keyword ranking with the ranked terms
//! grouped into co-occurrence clusters; small corpora fall back to plain
//! frequency counting. Both paths produce the same `Vec<Topic>` shape with
//! per-topic weights summing to 1.

use std::collections::{BTreeMap, HashSet};

use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};

use crate::types::Topic;

/// Number of topics requested by the pipeline.
pub const DEFAULT_TOPIC_COUNT: usize = 5;

/// Words kept per topic.
const WORDS_PER_TOPIC: usize = 5;

/// Below this many combined tokens the statistical path is pointless and
/// the extractor uses frequency counting instead.
const MIN_CORPUS_TOKENS: usize = 20;

/// Keywords ranked by TF-IDF before clustering.
const TOP_KEYWORDS: usize = 40;

/// Two keywords join the same topic when their document sets overlap by at
/// least this Jaccard similarity.
const CLUSTER_SIMILARITY: f64 = 0.3;

/// Platform chatter that carries no topical signal.
const DOMAIN_STOPWORDS: &[&str] = &[
    "video", "youtube", "channel", "subscribe", "like", "comment", "watch", "please", "thanks",
    "thank", "good", "great", "nice", "awesome", "amazing", "wow", "cool", "best", "better",
    "love", "hate", "lol", "haha", "yeah", "yes", "okay", "really", "actually", "basically",
    "literally", "honestly", "just", "get", "got", "getting", "going", "gone", "went", "make",
    "made", "making", "say", "said", "saying", "says", "see", "saw", "seen", "know", "knew",
    "think", "thought", "thinking", "want", "wanted", "need", "needed", "use", "used", "using",
    "try", "tried", "trying", "look", "looked", "looking", "feel", "felt", "feeling", "seem",
    "seemed", "seems",
];

/// Extract up to `k` weighted keyword clusters from a batch of texts.
///
/// Empty input produces no topics. Small corpora (under the minimum token
/// threshold) use frequency-based extraction; both paths produce topics
/// whose weights are normalized to sum to 1.
#[must_use]
pub fn extract_topics(texts: &[String], k: usize) -> Vec<Topic> {
    if texts.is_empty() || k == 0 {
        return Vec::new();
    }

    let tokens: Vec<String> = texts.iter().flat_map(|t| tokenize(t)).collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    if tokens.len() < MIN_CORPUS_TOKENS {
        return frequency_topics(&tokens);
    }

    tfidf_topics(texts, k)
}

/// Human-readable topic names: the top 1–2 weighted words joined with `/`.
#[must_use]
pub fn topic_names(topics: &[Topic]) -> Vec<String> {
    topics
        .iter()
        .filter(|topic| !topic.words.is_empty())
        .map(|topic| topic.words.iter().take(2).cloned().collect::<Vec<_>>().join("/"))
        .collect()
}

/// Lowercase, strip non-alphabetic characters, drop stop words and short
/// tokens.
fn tokenize(text: &str) -> Vec<String> {
    let stop_words = stop_words::get(stop_words::LANGUAGE::English);
    text.to_lowercase()
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| w.len() > 2)
        .filter(|w| !stop_words.iter().any(|s| s == w))
        .filter(|w| !DOMAIN_STOPWORDS.contains(w))
        .map(ToString::to_string)
        .collect()
}

/// Single frequency-ranked keyword cluster for small corpora.
fn frequency_topics(tokens: &[String]) -> Vec<Topic> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked.truncate(WORDS_PER_TOPIC);

    let total: usize = ranked.iter().map(|(_, freq)| freq).sum();
    if total == 0 {
        return Vec::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let denom = total as f64;
    #[allow(clippy::cast_precision_loss)]
    let topic = Topic {
        words: ranked.iter().map(|(word, _)| (*word).to_string()).collect(),
        weights: ranked.iter().map(|(_, freq)| *freq as f64 / denom).collect(),
    };
    vec![topic]
}

/// TF-IDF ranking across texts-as-documents, clustered by co-occurrence.
fn tfidf_topics(texts: &[String], k: usize) -> Vec<Topic> {
    let stop_words = stop_words::get(stop_words::LANGUAGE::English);
    let params = TfIdfParams::UnprocessedDocuments(texts, &stop_words, None);
    let tfidf = TfIdf::new(params);
    let ranked: Vec<(String, f32)> = tfidf.get_ranked_word_scores(TOP_KEYWORDS);

    let mut ranked: Vec<(String, f64)> = ranked
        .into_iter()
        .filter(|(word, _)| word.len() > 2 && !DOMAIN_STOPWORDS.contains(&word.as_str()))
        .map(|(word, score)| (word, f64::from(score)))
        .collect();
    // The ranking crate iterates hash maps, so equal scores can come back in
    // any order; re-sort with an alphabetical tie-break to keep extraction
    // deterministic.
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });

    if ranked.is_empty() {
        let tokens: Vec<String> = texts.iter().flat_map(|t| tokenize(t)).collect();
        return frequency_topics(&tokens);
    }

    // Document set per keyword, for co-occurrence clustering.
    let doc_sets: Vec<HashSet<usize>> = ranked
        .iter()
        .map(|(word, _)| {
            texts
                .iter()
                .enumerate()
                .filter(|(_, text)| text.to_lowercase().contains(word.as_str()))
                .map(|(idx, _)| idx)
                .collect()
        })
        .collect();

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    for idx in 0..ranked.len() {
        let assigned = clusters.iter().position(|cluster| {
            cluster.len() < WORDS_PER_TOPIC && jaccard(&doc_sets[cluster[0]], &doc_sets[idx]) >= CLUSTER_SIMILARITY
        });
        match assigned {
            Some(i) => clusters[i].push(idx),
            None if clusters.len() < k => clusters.push(vec![idx]),
            None => {}
        }
    }

    clusters
        .into_iter()
        .map(|cluster| {
            let total: f64 = cluster.iter().map(|idx| ranked[*idx].1).sum();
            let words = cluster
                .iter()
                .map(|idx| ranked[*idx].0.clone())
                .collect::<Vec<_>>();
            let weights = if total > 0.0 {
                cluster.iter().map(|idx| ranked[*idx].1 / total).collect()
            } else {
                #[allow(clippy::cast_precision_loss)]
                let even = 1.0 / cluster.len() as f64;
                vec![even; cluster.len()]
            };
            Topic { words, weights }
        })
        .collect()
}

fn jaccard(a: &HashSet<usize>, b: &HashSet<usize>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    let ratio = a.intersection(b).count() as f64 / union as f64;
    ratio
}
