use glossa_protocol::LexFlags;

use crate::spelling::is_vowel;

/// Why an indefinite article took its shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleReason {
    ConsonantSound,
    VowelLetter,
    SilentH,
    SoundedU,
}

impl ArticleReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleReason::ConsonantSound => "consonant-sound",
            ArticleReason::VowelLetter => "vowel-sound",
            ArticleReason::SilentH => "silent-h",
            ArticleReason::SoundedU => "sounded-u",
        }
    }
}

/// Chooses "a" or "an" for the word that follows the article. Lexicon flags
/// override the spelling heuristic.
pub fn indefinite_article(next_word: &str, flags: LexFlags) -> (&'static str, ArticleReason) {
    if flags.contains(LexFlags::SILENT_H) {
        return ("an", ArticleReason::SilentH);
    }
    if flags.contains(LexFlags::SOUNDED_U) {
        return ("a", ArticleReason::SoundedU);
    }
    match next_word.chars().next() {
        Some(c) if is_vowel(c) => ("an", ArticleReason::VowelLetter),
        _ => ("a", ArticleReason::ConsonantSound),
    }
}
