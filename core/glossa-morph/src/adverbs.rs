use glossa_protocol::AdverbClass;

const FREQUENCY: &[&str] = &["always", "usually", "often", "sometimes", "rarely", "seldom", "never", "ever"];
const TIME: &[&str] = &["today", "yesterday", "tomorrow", "now", "later", "soon", "tonight", "already", "yet"];
const PLACE: &[&str] = &["here", "there", "home", "outside", "inside", "everywhere", "abroad", "upstairs"];
const INTERROGATIVE: &[&str] = &["where", "when", "why", "how"];

/// Class of an adverb the lexicon does not know. `-ly` words count as manner.
pub fn classify(word: &str) -> Option<AdverbClass> {
    let word = word.to_ascii_lowercase();
    let word = word.as_str();
    if FREQUENCY.contains(&word) {
        Some(AdverbClass::Frequency)
    } else if TIME.contains(&word) {
        Some(AdverbClass::Time)
    } else if PLACE.contains(&word) {
        Some(AdverbClass::Place)
    } else if INTERROGATIVE.contains(&word) {
        Some(AdverbClass::Interrogative)
    } else if word.ends_with("ly") || matches!(word, "well" | "fast" | "hard") {
        Some(AdverbClass::Manner)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(classify("always"), Some(AdverbClass::Frequency));
        assert_eq!(classify("quickly"), Some(AdverbClass::Manner));
        assert_eq!(classify("yesterday"), Some(AdverbClass::Time));
        assert_eq!(classify("here"), Some(AdverbClass::Place));
        assert_eq!(classify("Where"), Some(AdverbClass::Interrogative));
        assert_eq!(classify("banana"), None);
    }
}
