//! Integration tests for the inference and translation HTTP clients using
//! wiremock, including the fallback behavior of the full scorer chain.

use pulse_analysis::{AnalysisError, MlBackend, SentimentLabel, TextScorer, Translator};
use pulse_core::AnalysisPolicy;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend(url: &str) -> MlBackend {
    MlBackend::new(url, "test-token", 5).expect("client construction should not fail")
}

#[tokio::test]
async fn classify_parses_two_label_response() {
    let server = MockServer::start().await;
    let body = serde_json::json!([[
        { "label": "POSITIVE", "score": 0.94 },
        { "label": "NEGATIVE", "score": 0.04 }
    ]]);
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let scores = backend(&server.uri())
        .classify("loved every minute")
        .await
        .expect("should parse scores");

    assert!((scores.positive - 0.94).abs() < 1e-6);
    assert!((scores.negative - 0.04).abs() < 1e-6);
    assert!((scores.sum() - 1.0).abs() < 1e-6);
    assert_eq!(scores.label(), SentimentLabel::Positive);
}

#[tokio::test]
async fn non_2xx_status_maps_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = backend(&server.uri())
        .classify("anything")
        .await
        .expect_err("5xx must be an error");
    assert!(matches!(err, AnalysisError::Unavailable(_)));
}

#[tokio::test]
async fn malformed_payload_maps_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let err = backend(&server.uri())
        .classify("anything")
        .await
        .expect_err("garbage must be an error");
    assert!(matches!(err, AnalysisError::Unavailable(_)));
}

#[tokio::test]
async fn empty_response_array_maps_to_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let err = backend(&server.uri())
        .classify("anything")
        .await
        .expect_err("empty rows must be an error");
    assert!(matches!(err, AnalysisError::Unavailable(_)));
}

#[tokio::test]
async fn scorer_chain_falls_back_to_lexicon_when_backend_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let scorer = TextScorer::with_ml(backend(&server.uri()), AnalysisPolicy::default());
    let result = scorer.score("this is great, really the best").await;

    // The backend failed, so the deterministic lexicon labeled the text.
    assert_eq!(result.sentiment, SentimentLabel::Positive);
    assert!((result.scores.sum() - 1.0).abs() < 1e-6);
}

#[tokio::test]
async fn scorer_chain_prefers_backend_when_it_answers() {
    let server = MockServer::start().await;
    // The lexicon would call this positive; the stubbed model disagrees.
    let body = serde_json::json!([[
        { "label": "POSITIVE", "score": 0.02 },
        { "label": "NEGATIVE", "score": 0.95 }
    ]]);
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let scorer = TextScorer::with_ml(backend(&server.uri()), AnalysisPolicy::default());
    let result = scorer.score("this is great, really the best").await;
    assert_eq!(result.sentiment, SentimentLabel::Negative);
}

#[tokio::test]
async fn translator_concatenates_segments() {
    let server = MockServer::start().await;
    let body = serde_json::json!([
        [["I loved ", "me encantó ", null], ["this video", "este vídeo", null]],
        null,
        "es"
    ]);
    Mock::given(method("GET"))
        .and(path("/translate_a/single"))
        .and(query_param("sl", "es"))
        .and(query_param("tl", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let translator =
        Translator::with_base_url(5, &server.uri()).expect("client construction should not fail");
    let translated = translator
        .translate("me encantó este vídeo", "es")
        .await
        .expect("should translate");
    assert_eq!(translated, "I loved this video");
}

#[tokio::test]
async fn translator_failure_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let translator =
        Translator::with_base_url(5, &server.uri()).expect("client construction should not fail");
    let err = translator
        .translate("bonjour tout le monde", "fr")
        .await
        .expect_err("429 must be an error");
    assert!(matches!(err, AnalysisError::Unavailable(_)));
}

#[tokio::test]
async fn scorer_keeps_original_text_when_translation_fails() {
    let translate_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&translate_server)
        .await;

    let translator = Translator::with_base_url(5, &translate_server.uri())
        .expect("client construction should not fail");
    let scorer =
        TextScorer::lexicon_only(AnalysisPolicy::default()).with_translator(translator);

    // Long unambiguous Spanish so detection is reliable; translation fails,
    // so the lexicon sees the original text and finds no English keywords.
    let result = scorer
        .score("Me ha gustado muchísimo este vídeo, la explicación es clara y muy completa")
        .await;
    assert_eq!(result.language, "es");
    assert!(result.translated_text.is_none());
    assert_eq!(result.sentiment, SentimentLabel::Neutral);
}
