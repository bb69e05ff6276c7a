//! Keyword and emoji based emotion detection.

use std::collections::BTreeMap;

/// The six emotions tracked per item, in stable output order.
pub const EMOTIONS: &[&str] = &["anger", "disgust", "fear", "joy", "sadness", "surprise"];

const EMOTION_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "joy",
        &[
            "happy", "joy", "delighted", "thrilled", "excited", "glad", "pleased", "love",
            "wonderful", "amazing",
        ],
    ),
    (
        "sadness",
        &[
            "sad", "unhappy", "depressed", "miserable", "heartbroken", "gloomy", "disappointed",
            "upset", "crying",
        ],
    ),
    (
        "anger",
        &[
            "angry", "furious", "outraged", "annoyed", "irritated", "mad", "hate", "rage",
            "frustrated",
        ],
    ),
    (
        "fear",
        &[
            "afraid", "scared", "frightened", "terrified", "anxious", "worried", "nervous",
            "panic",
        ],
    ),
    (
        "surprise",
        &[
            "surprised", "shocked", "astonished", "amazed", "stunned", "unexpected", "wow",
        ],
    ),
    (
        "disgust",
        &["disgusted", "gross", "revolting", "nasty", "yuck", "eww", "repulsed"],
    ),
];

const EMOTION_EMOJIS: &[(&str, &[char])] = &[
    (
        "joy",
        &['😀', '😃', '😄', '😁', '😆', '😊', '😍', '🥰', '😘', '😗', '😙', '😚', '🙂', '🤗', '🤩'],
    ),
    ("sadness", &['😞', '😟', '😢', '😭', '😦', '😧', '😩', '😿']),
    ("anger", &['😠', '😡', '🤬', '😤', '👿', '💢']),
    ("fear", &['😱', '😨', '😰', '😥', '😓', '🙀']),
    ("surprise", &['😲', '😮', '😯', '😳', '😵', '🤯']),
    ("disgust", &['🤢', '🤮', '😖', '😫', '😣']),
];

/// How much more an emoji hit counts than a keyword hit.
const EMOJI_HIT_WEIGHT: f64 = 2.0;

/// Detect emotion magnitudes in a text plus its extracted emojis.
///
/// Keyword hits count 1, emoji hits count 2; the result is normalized by the
/// total hit weight so the six values sum to 1 when anything matched, and are
/// all zero otherwise. Pure function of its inputs.
#[must_use]
pub fn detect_emotions(text: &str, emojis: &[String]) -> BTreeMap<String, f64> {
    let mut scores: BTreeMap<String, f64> = EMOTIONS
        .iter()
        .map(|name| ((*name).to_string(), 0.0))
        .collect();

    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphabetic())
        .filter(|w| !w.is_empty())
        .collect();

    for (emotion, keywords) in EMOTION_KEYWORDS {
        let hits = words.iter().filter(|w| keywords.contains(*w)).count();
        if hits > 0 {
            #[allow(clippy::cast_precision_loss)]
            let add = hits as f64;
            if let Some(score) = scores.get_mut(*emotion) {
                *score += add;
            }
        }
    }

    for (emotion, table) in EMOTION_EMOJIS {
        let hits = emojis
            .iter()
            .filter_map(|e| e.chars().next())
            .filter(|c| table.contains(c))
            .count();
        if hits > 0 {
            #[allow(clippy::cast_precision_loss)]
            let add = hits as f64 * EMOJI_HIT_WEIGHT;
            if let Some(score) = scores.get_mut(*emotion) {
                *score += add;
            }
        }
    }

    let total: f64 = scores.values().sum();
    if total > 0.0 {
        for score in scores.values_mut() {
            *score /= total;
        }
    }

    scores
}
