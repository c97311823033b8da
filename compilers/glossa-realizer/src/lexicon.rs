use std::collections::HashMap;

use glossa_protocol::{AdverbClass, Dictionary, LexEntry, LexFlags, PartOfSpeech, PronounForms, VerbForms};
use rkyv::{AlignedVec, Deserialize};
use tracing::debug;

use crate::error::LexiconError;

const BUILTIN_LEXICON: &str = include_str!("../data/lexicon.json");

/// Read-only lemma index. One lemma may carry several entries as long as
/// their parts of speech differ ("run" the verb, "run" the noun).
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    version: u32,
    entries: HashMap<String, Vec<LexEntry>>,
}

impl Lexicon {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_dictionary(dictionary: Dictionary) -> Result<Self, LexiconError> {
        let mut entries: HashMap<String, Vec<LexEntry>> = HashMap::new();
        for entry in dictionary.entries {
            let bucket = entries.entry(entry.lemma.to_lowercase()).or_default();
            let pos = entry.kind.pos();
            if bucket.iter().any(|e| e.kind.pos() == pos) {
                return Err(LexiconError::Duplicate { id: entry.id, lemma: entry.lemma, pos: pos.as_str() });
            }
            bucket.push(entry);
        }
        debug!(version = dictionary.version, lemmas = entries.len(), "lexicon indexed");
        Ok(Self { version: dictionary.version, entries })
    }

    pub fn from_json(json: &str) -> Result<Self, LexiconError> {
        let dictionary: Dictionary = serde_json::from_str(json)?;
        Self::from_dictionary(dictionary)
    }

    /// Loads a compiled archive. The bytes are validated before use, so a
    /// truncated or foreign file is an error rather than undefined behavior.
    pub fn from_archive(bytes: &[u8]) -> Result<Self, LexiconError> {
        // rkyv needs the root aligned; a fetched buffer gives no such guarantee
        let mut aligned = AlignedVec::with_capacity(bytes.len());
        aligned.extend_from_slice(bytes);

        let archived = rkyv::check_archived_root::<Dictionary>(&aligned)
            .map_err(|e| LexiconError::Archive(format!("{:?}", e)))?;
        let dictionary: Dictionary = archived
            .deserialize(&mut rkyv::Infallible)
            .map_err(|_| LexiconError::Archive("deserialization failed".to_string()))?;
        Self::from_dictionary(dictionary)
    }

    /// The lexicon bundled with the engine.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_json(BUILTIN_LEXICON)
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry for `lemma`, whatever its part of speech.
    pub fn lookup(&self, lemma: &str) -> Option<&LexEntry> {
        self.bucket(lemma).first()
    }

    pub fn lookup_pos(&self, lemma: &str, pos: PartOfSpeech) -> Option<&LexEntry> {
        self.bucket(lemma).iter().find(|e| e.kind.pos() == pos)
    }

    pub fn verb(&self, lemma: &str) -> Option<&VerbForms> {
        self.lookup_pos(lemma, PartOfSpeech::Verb).and_then(LexEntry::verb)
    }

    pub fn pronoun(&self, lemma: &str) -> Option<&PronounForms> {
        self.lookup_pos(lemma, PartOfSpeech::Pronoun).and_then(LexEntry::pronoun)
    }

    pub fn adverb_class(&self, lemma: &str) -> Option<AdverbClass> {
        self.lookup_pos(lemma, PartOfSpeech::Adverb)
            .and_then(LexEntry::adverb)
            .map(|a| a.class)
    }

    /// Union of the flags of every entry spelled `word`.
    pub fn flags(&self, word: &str) -> LexFlags {
        self.bucket(word)
            .iter()
            .fold(LexFlags::empty(), |acc, e| acc | e.flags)
    }

    pub fn entries(&self) -> impl Iterator<Item = &LexEntry> {
        self.entries.values().flatten()
    }

    fn bucket(&self, lemma: &str) -> &[LexEntry] {
        // Fast path: most lookups are already lowercase
        match self.entries.get(lemma) {
            Some(bucket) => bucket,
            None => self
                .entries
                .get(&lemma.to_lowercase())
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::{EntryId, EntryKind, NounForms, Role};
    use rkyv::ser::{serializers::AllocSerializer, Serializer};

    fn noun(id: u32, lemma: &str, flags: LexFlags) -> LexEntry {
        LexEntry {
            id: EntryId::new(id),
            lemma: lemma.to_string(),
            flags,
            kind: EntryKind::Noun(NounForms::default()),
        }
    }

    #[test]
    fn test_builtin_lexicon_loads() {
        let lexicon = Lexicon::builtin().expect("bundled lexicon must parse");
        assert!(!lexicon.is_empty());
        assert!(lexicon.flags("hour").contains(LexFlags::SILENT_H));
        assert!(lexicon.flags("university").contains(LexFlags::SOUNDED_U));

        let give = lexicon.verb("give").expect("give is a verb");
        assert_eq!(give.valency[0].role, Role::Agent);
        assert_eq!(give.valency[2].preposition.as_deref(), Some("to"));
    }

    #[test]
    fn test_lookup_ignores_case() {
        let lexicon = Lexicon::from_dictionary(Dictionary {
            version: 1,
            entries: vec![noun(1, "Paris", LexFlags::PROPER)],
        })
        .unwrap();
        assert!(lexicon.lookup("paris").is_some());
        assert!(lexicon.lookup("PARIS").is_some());
        assert!(lexicon.lookup("london").is_none());
    }

    #[test]
    fn test_duplicate_entries_are_rejected() {
        let result = Lexicon::from_dictionary(Dictionary {
            version: 1,
            entries: vec![noun(1, "apple", LexFlags::empty()), noun(2, "apple", LexFlags::empty())],
        });
        assert!(matches!(result, Err(LexiconError::Duplicate { id, .. }) if id == EntryId::new(2)));
    }

    #[test]
    fn test_archive_roundtrip() {
        let dictionary = Dictionary {
            version: 3,
            entries: vec![noun(1, "hour", LexFlags::SILENT_H)],
        };
        let mut serializer = AllocSerializer::<256>::default();
        serializer.serialize_value(&dictionary).unwrap();
        let bytes = serializer.into_serializer().into_inner();

        let lexicon = Lexicon::from_archive(&bytes).unwrap();
        assert_eq!(lexicon.version(), 3);
        assert!(lexicon.flags("hour").contains(LexFlags::SILENT_H));
    }

    #[test]
    fn test_garbage_archive_is_an_error() {
        let result = Lexicon::from_archive(&[0xff; 7]);
        assert!(matches!(result, Err(LexiconError::Archive(_))));
    }
}
