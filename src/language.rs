use serde::{Deserialize, Serialize};

/// Locale bucket a question is classified into. Drives the instruction
/// block the composer appends and every localized string the service
/// returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Arabic,
    English,
    French,
    Spanish,
    German,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::Arabic,
        Language::English,
        Language::French,
        Language::Spanish,
        Language::German,
    ];

    pub fn as_tag(&self) -> &'static str {
        match self {
            Language::Arabic => "arabic",
            Language::English => "english",
            Language::French => "french",
            Language::Spanish => "spanish",
            Language::German => "german",
        }
    }

    /// Parse an external tag. Unknown tags return `None`; callers fall
    /// back to English.
    pub fn from_tag(tag: &str) -> Option<Language> {
        match tag.trim().to_lowercase().as_str() {
            "arabic" | "ar" => Some(Language::Arabic),
            "english" | "en" => Some(Language::English),
            "french" | "fr" => Some(Language::French),
            "spanish" | "es" => Some(Language::Spanish),
            "german" | "de" => Some(Language::German),
            _ => None,
        }
    }
}

/// True for code points in the Arabic script blocks, including the
/// presentation forms used by shaped text.
fn is_arabic_char(c: char) -> bool {
    matches!(c,
        '\u{0600}'..='\u{06FF}'
        | '\u{0750}'..='\u{077F}'
        | '\u{08A0}'..='\u{08FF}'
        | '\u{FB50}'..='\u{FDFF}'
        | '\u{FE70}'..='\u{FEFF}')
}

// Diacritics that identify a language on their own. Characters shared
// between French and Spanish (é, ü) are deliberately absent; those
// inputs resolve through the word lists instead.
const FRENCH_CHARS: &[char] = &[
    'à', 'â', 'ç', 'è', 'ê', 'ë', 'î', 'ï', 'ô', 'û', 'ù', 'œ',
];
const SPANISH_CHARS: &[char] = &['á', 'í', 'ó', 'ú', 'ñ', '¿', '¡'];
const GERMAN_CHARS: &[char] = &['ä', 'ö', 'ü', 'ß'];

// Interrogatives and domain words common in questions about prayer.
const FRENCH_WORDS: &[&str] = &[
    "comment", "pourquoi", "quand", "combien", "est-ce", "quelle", "quelles",
    "prière", "prières", "ablutions",
];
const SPANISH_WORDS: &[&str] = &[
    "cómo", "como", "qué", "cuándo", "cuántas", "cuántos", "dónde", "por",
    "oración", "oraciones", "abluciones", "rezar",
];
const GERMAN_WORDS: &[&str] = &[
    "wie", "wann", "warum", "welche", "wieviele", "gebet", "gebete",
    "beten", "waschung", "gebetszeiten",
];

fn contains_word(text: &str, words: &[&str]) -> bool {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
        .any(|token| words.contains(&token))
}

/// Classify a question into a locale bucket.
///
/// Ordered battery of signals: Arabic script anywhere wins immediately
/// (so mixed-script input resolves to Arabic), then diacritic classes
/// and word lists are checked French → Spanish → German, and anything
/// left defaults to English. Pure and deterministic.
pub fn detect(text: &str) -> Language {
    if text.chars().any(is_arabic_char) {
        return Language::Arabic;
    }

    let lower = text.to_lowercase();

    if lower.chars().any(|c| FRENCH_CHARS.contains(&c)) || contains_word(&lower, FRENCH_WORDS) {
        return Language::French;
    }
    if lower.chars().any(|c| SPANISH_CHARS.contains(&c)) || contains_word(&lower, SPANISH_WORDS) {
        return Language::Spanish;
    }
    if lower.chars().any(|c| GERMAN_CHARS.contains(&c)) || contains_word(&lower, GERMAN_WORDS) {
        return Language::German;
    }

    Language::English
}
