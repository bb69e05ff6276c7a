//! The `score` command: run the text scorer on one string.

use pulse_core::AppConfig;

pub async fn run_score(config: &AppConfig, text: &str) -> anyhow::Result<()> {
    let scorer = crate::analyze::build_scorer(config)?;
    let result = scorer.score(text).await;

    println!("sentiment: {}", result.sentiment);
    println!(
        "scores: positive {:.3}  neutral {:.3}  negative {:.3}",
        result.scores.positive, result.scores.neutral, result.scores.negative
    );
    println!("language: {}", result.language);
    if let Some(translated) = &result.translated_text {
        println!("translated: {translated}");
    }
    if !result.emojis.is_empty() {
        println!("emojis: {}", result.emojis.join(" "));
    }
    let mut emotions: Vec<(&String, &f64)> = result
        .emotions
        .iter()
        .filter(|(_, score)| **score > 0.0)
        .collect();
    emotions.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
    if !emotions.is_empty() {
        let rendered: Vec<String> = emotions
            .iter()
            .map(|(name, score)| format!("{name} {score:.2}"))
            .collect();
        println!("emotions: {}", rendered.join(", "));
    }
    println!("{}", result.explanation);
    Ok(())
}
