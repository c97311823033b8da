use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::EntryId;
use crate::features::{AdverbClass, LexFlags, Number, PartOfSpeech, Person, Role};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One argument position a verb licenses. The first slot of a valency list
/// is realized as the subject.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct ValencySlot {
    pub role: Role,
    /// Governing preposition ("give X *to* Y"), if the slot is oblique.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub preposition: Option<String>,
    /// Optional slots may stay unfilled without a placeholder ("he eats").
    #[cfg_attr(feature = "serde", serde(default))]
    pub optional: bool,
}

impl ValencySlot {
    pub fn new(role: Role) -> Self {
        Self { role, preposition: None, optional: false }
    }

    pub fn oblique(role: Role, preposition: &str) -> Self {
        Self { role, preposition: Some(String::from(preposition)), optional: false }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[archive(check_bytes)]
pub struct VerbForms {
    pub valency: Vec<ValencySlot>,
    pub third_singular: Option<String>,
    pub past: Option<String>,
    pub past_participle: Option<String>,
    pub present_participle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[archive(check_bytes)]
pub struct NounForms {
    pub plural: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct PronounForms {
    pub person: Person,
    pub number: Number,
    pub objective: String,
    pub possessive: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AdverbForms {
    pub class: AdverbClass,
}

/// Part-of-speech specific payload of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "pos", rename_all = "lowercase"))]
#[archive(check_bytes)]
pub enum EntryKind {
    Verb(VerbForms),
    Noun(NounForms),
    Pronoun(PronounForms),
    Adverb(AdverbForms),
    Adjective,
    Preposition,
}

impl EntryKind {
    pub fn pos(&self) -> PartOfSpeech {
        match self {
            EntryKind::Verb(_) => PartOfSpeech::Verb,
            EntryKind::Noun(_) => PartOfSpeech::Noun,
            EntryKind::Pronoun(_) => PartOfSpeech::Pronoun,
            EntryKind::Adverb(_) => PartOfSpeech::Adverb,
            EntryKind::Adjective => PartOfSpeech::Adjective,
            EntryKind::Preposition => PartOfSpeech::Preposition,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct LexEntry {
    pub id: EntryId,
    pub lemma: String,
    #[cfg_attr(feature = "serde", serde(default = "LexFlags::empty"))]
    pub flags: LexFlags,
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: EntryKind,
}

impl LexEntry {
    pub fn verb(&self) -> Option<&VerbForms> {
        match &self.kind {
            EntryKind::Verb(forms) => Some(forms),
            _ => None,
        }
    }

    pub fn noun(&self) -> Option<&NounForms> {
        match &self.kind {
            EntryKind::Noun(forms) => Some(forms),
            _ => None,
        }
    }

    pub fn pronoun(&self) -> Option<&PronounForms> {
        match &self.kind {
            EntryKind::Pronoun(forms) => Some(forms),
            _ => None,
        }
    }

    pub fn adverb(&self) -> Option<&AdverbForms> {
        match &self.kind {
            EntryKind::Adverb(forms) => Some(forms),
            _ => None,
        }
    }
}

/// The on-disk lexicon: compiled from JSON to an rkyv archive.
#[derive(Debug, Clone, Default, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Dictionary {
    pub version: u32,
    pub entries: Vec<LexEntry>,
}
