//! Text preprocessing and offline language detection.

use std::sync::LazyLock;

use regex::Regex;

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+|www\.\S+").expect("static regex must compile"));
static HTML_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex must compile"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex must compile"));

/// Strip URLs and HTML tags and collapse whitespace before scoring.
#[must_use]
pub fn preprocess(text: &str) -> String {
    let without_urls = URL_RE.replace_all(text, "");
    let without_tags = HTML_TAG_RE.replace_all(&without_urls, "");
    WHITESPACE_RE
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Detect the language of a text, as an ISO 639-1 code where one exists.
///
/// Very short texts and unreliable detections default to `"en"`, matching
/// the rest of the pipeline's target language.
#[must_use]
pub fn detect_language(text: &str) -> String {
    if text.trim().chars().count() < 3 {
        return "en".to_string();
    }
    match whatlang::detect(text) {
        Some(info) if info.is_reliable() => iso639_1(info.lang()).to_string(),
        _ => "en".to_string(),
    }
}

/// Map whatlang's ISO 639-3 codes to the two-letter codes the report uses,
/// falling back to the three-letter code for the long tail.
fn iso639_1(lang: whatlang::Lang) -> &'static str {
    use whatlang::Lang;
    match lang {
        Lang::Eng => "en",
        Lang::Spa => "es",
        Lang::Fra => "fr",
        Lang::Deu => "de",
        Lang::Ita => "it",
        Lang::Por => "pt",
        Lang::Rus => "ru",
        Lang::Jpn => "ja",
        Lang::Kor => "ko",
        Lang::Cmn => "zh",
        Lang::Ara => "ar",
        Lang::Hin => "hi",
        Lang::Nld => "nl",
        Lang::Tur => "tr",
        Lang::Pol => "pl",
        Lang::Ukr => "uk",
        Lang::Vie => "vi",
        Lang::Swe => "sv",
        Lang::Ind => "id",
        other => other.code(),
    }
}
