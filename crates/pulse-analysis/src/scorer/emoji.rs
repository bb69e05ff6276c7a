//! Emoji extraction and sentiment interpretation.
//!
//! Both functions are pure: identical input always yields identical output.

use crate::types::SentimentScores;

const POSITIVE_EMOJIS: &[char] = &[
    '😀', '😃', '😄', '😁', '😆', '😊', '😍', '🥰', '😘', '😗', '😙', '😚', '🙂', '🤗', '🤩',
    '👍', '❤', '💕', '💯', '✅', '👏', '🎉', '🔥', '💪', '👌', '😎', '🤣', '😂', '😇', '👼',
];

const NEGATIVE_EMOJIS: &[char] = &[
    '😠', '😡', '🤬', '😞', '😟', '😤', '😢', '😭', '😦', '😧', '😨', '😩', '😰', '😱', '😳',
    '😵', '😖', '😣', '😫', '👎', '💔', '⛔', '❌', '🚫', '😒', '🙄', '😑', '😐', '🤢', '🤮',
];

/// Returns `true` for code points in the common emoji blocks.
fn is_emoji(c: char) -> bool {
    matches!(u32::from(c),
        0x1F300..=0x1FAFF   // symbols, pictographs, emoticons, supplement
        | 0x2600..=0x27BF   // misc symbols + dingbats
        | 0x2B00..=0x2BFF   // arrows/stars block (⭐ etc.)
    )
}

/// Extract emojis from a text, in order of appearance.
///
/// Variation selectors are dropped so `❤️` and `❤` extract identically.
#[must_use]
pub fn extract_emojis(text: &str) -> Vec<String> {
    text.chars()
        .filter(|c| is_emoji(*c))
        .map(String::from)
        .collect()
}

/// Interpret the combined sentiment of a list of emojis.
///
/// Each emoji counts as positive, negative, or (when in neither table)
/// neutral; the result is the share of each class. An empty list yields an
/// all-zero triple, which callers must treat as "no emoji signal".
#[must_use]
pub fn interpret_emojis(emojis: &[String]) -> SentimentScores {
    if emojis.is_empty() {
        return SentimentScores {
            positive: 0.0,
            neutral: 0.0,
            negative: 0.0,
        };
    }

    let mut positive = 0usize;
    let mut negative = 0usize;
    for emoji in emojis {
        let Some(c) = emoji.chars().next() else {
            continue;
        };
        if POSITIVE_EMOJIS.contains(&c) {
            positive += 1;
        } else if NEGATIVE_EMOJIS.contains(&c) {
            negative += 1;
        }
    }
    let neutral = emojis.len() - positive - negative;

    #[allow(clippy::cast_precision_loss)]
    let total = emojis.len() as f64;
    #[allow(clippy::cast_precision_loss)]
    SentimentScores {
        positive: positive as f64 / total,
        neutral: neutral as f64 / total,
        negative: negative as f64 / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_emojis() {
        assert!(extract_emojis("no emojis here, just words.").is_empty());
    }

    #[test]
    fn emojis_extract_in_order() {
        let emojis = extract_emojis("nice 👍 but also 😢 sometimes");
        assert_eq!(emojis, vec!["👍".to_string(), "😢".to_string()]);
    }

    #[test]
    fn variation_selector_is_dropped() {
        // "❤️" is U+2764 followed by U+FE0F; only the heart is extracted.
        let emojis = extract_emojis("love it \u{2764}\u{FE0F}");
        assert_eq!(emojis, vec!["\u{2764}".to_string()]);
    }

    #[test]
    fn empty_list_yields_zero_signal() {
        let scores = interpret_emojis(&[]);
        assert!((scores.sum()).abs() < 1e-9);
    }

    #[test]
    fn mixed_emojis_split_by_share() {
        let emojis: Vec<String> = ["👍", "👍", "👎", "🌀"].iter().map(|s| (*s).to_string()).collect();
        let scores = interpret_emojis(&emojis);
        assert!((scores.positive - 0.5).abs() < 1e-9);
        assert!((scores.negative - 0.25).abs() < 1e-9);
        assert!((scores.neutral - 0.25).abs() < 1e-9);
    }

    #[test]
    fn interpretation_is_deterministic() {
        let emojis: Vec<String> = ["🎉", "😭"].iter().map(|s| (*s).to_string()).collect();
        assert_eq!(interpret_emojis(&emojis), interpret_emojis(&emojis));
    }
}
