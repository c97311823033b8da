use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

use crate::ids::ParadigmId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Case {
    Nominative = 0,
    Accusative = 1,
    Genitive = 2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Number {
    Singular = 0,
    Plural = 1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Person {
    First = 1,
    Second = 2,
    Third = 3,
}

/// Person and number of a subject, as seen by the finite verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Agreement {
    pub person: Person,
    pub number: Number,
}

impl Agreement {
    pub const THIRD_SINGULAR: Agreement = Agreement::new(Person::Third, Number::Singular);
    pub const THIRD_PLURAL: Agreement = Agreement::new(Person::Third, Number::Plural);
    pub const SECOND: Agreement = Agreement::new(Person::Second, Number::Singular);

    pub const fn new(person: Person, number: Number) -> Self {
        Self { person, number }
    }

    pub fn is_third_singular(&self) -> bool {
        self.person == Person::Third && self.number == Number::Singular
    }
}

impl Default for Agreement {
    fn default() -> Self {
        Self::THIRD_SINGULAR
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Tense {
    Past = 0,
    Present = 1,
    Future = 2,
}

impl Tense {
    pub const ALL: [Tense; 3] = [Tense::Past, Tense::Present, Tense::Future];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tense::Past => "past",
            Tense::Present => "present",
            Tense::Future => "future",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Aspect {
    Simple = 0,
    Progressive = 1,
    Perfect = 2,
    PerfectProgressive = 3,
}

impl Aspect {
    pub const ALL: [Aspect; 4] = [
        Aspect::Simple,
        Aspect::Progressive,
        Aspect::Perfect,
        Aspect::PerfectProgressive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Aspect::Simple => "simple",
            Aspect::Progressive => "progressive",
            Aspect::Perfect => "perfect",
            Aspect::PerfectProgressive => "perfectProgressive",
        }
    }

    pub fn is_perfect(&self) -> bool {
        matches!(self, Aspect::Perfect | Aspect::PerfectProgressive)
    }

    pub fn is_progressive(&self) -> bool {
        matches!(self, Aspect::Progressive | Aspect::PerfectProgressive)
    }
}

/// One cell of the tense x aspect grid. Every combination of the two closed
/// enums is a defined paradigm, so there is no way to name a thirteenth one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Paradigm {
    pub tense: Tense,
    pub aspect: Aspect,
}

impl Paradigm {
    pub const ALL: [Paradigm; 12] = {
        let mut all = [Paradigm::new(Tense::Past, Aspect::Simple); 12];
        let mut i = 0;
        while i < 12 {
            all[i] = Paradigm::new(Tense::ALL[i / 4], Aspect::ALL[i % 4]);
            i += 1;
        }
        all
    };

    pub const fn new(tense: Tense, aspect: Aspect) -> Self {
        Self { tense, aspect }
    }

    pub fn id(&self) -> ParadigmId {
        ParadigmId::new(self.tense as u32 * 4 + self.aspect as u32)
    }

    pub fn from_id(id: ParadigmId) -> Option<Self> {
        Self::ALL.get(id.index()).copied()
    }
}

impl Default for Paradigm {
    fn default() -> Self {
        Self::new(Tense::Present, Aspect::Simple)
    }
}

impl core::fmt::Display for Paradigm {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.aspect {
            Aspect::Simple => write!(f, "{}", self.tense.as_str()),
            aspect => write!(f, "{}+{}", self.tense.as_str(), aspect.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Polarity {
    #[default]
    Affirmative,
    Negative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mood {
    #[default]
    Indicative,
    Imperative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ModalKind {
    Can,
    Could,
    May,
    Might,
    Must,
    Shall,
    Should,
    Will,
    Would,
}

impl ModalKind {
    pub const ALL: [ModalKind; 9] = [
        ModalKind::Can,
        ModalKind::Could,
        ModalKind::May,
        ModalKind::Might,
        ModalKind::Must,
        ModalKind::Shall,
        ModalKind::Should,
        ModalKind::Will,
        ModalKind::Would,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModalKind::Can => "can",
            ModalKind::Could => "could",
            ModalKind::May => "may",
            ModalKind::Might => "might",
            ModalKind::Must => "must",
            ModalKind::Shall => "shall",
            ModalKind::Should => "should",
            ModalKind::Will => "will",
            ModalKind::Would => "would",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == s)
    }

    /// Past counterpart, when the modal has one.
    pub fn past(&self) -> Option<ModalKind> {
        match self {
            ModalKind::Can => Some(ModalKind::Could),
            ModalKind::May => Some(ModalKind::Might),
            ModalKind::Shall => Some(ModalKind::Should),
            ModalKind::Will => Some(ModalKind::Would),
            _ => None,
        }
    }
}

/// Semantic role of a verb argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Role {
    Agent = 0,
    Experiencer = 1,
    Possessor = 2,
    Patient = 3,
    Theme = 4,
    Stimulus = 5,
    Recipient = 6,
    Beneficiary = 7,
    Attribute = 8,
    Instrument = 9,
    Location = 10,
    Place = 11,
    Goal = 12,
    Source = 13,
}

impl Role {
    pub const ALL: [Role; 14] = [
        Role::Agent,
        Role::Experiencer,
        Role::Possessor,
        Role::Patient,
        Role::Theme,
        Role::Stimulus,
        Role::Recipient,
        Role::Beneficiary,
        Role::Attribute,
        Role::Instrument,
        Role::Location,
        Role::Place,
        Role::Goal,
        Role::Source,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Agent => "agent",
            Role::Experiencer => "experiencer",
            Role::Possessor => "possessor",
            Role::Patient => "patient",
            Role::Theme => "theme",
            Role::Stimulus => "stimulus",
            Role::Recipient => "recipient",
            Role::Beneficiary => "beneficiary",
            Role::Attribute => "attribute",
            Role::Instrument => "instrument",
            Role::Location => "location",
            Role::Place => "place",
            Role::Goal => "goal",
            Role::Source => "source",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum AdverbClass {
    Frequency = 0,
    Manner = 1,
    Place = 2,
    Time = 3,
    Interrogative = 4,
}

impl AdverbClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdverbClass::Frequency => "frequency",
            AdverbClass::Manner => "manner",
            AdverbClass::Place => "place",
            AdverbClass::Time => "time",
            AdverbClass::Interrogative => "interrogative",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        [
            AdverbClass::Frequency,
            AdverbClass::Manner,
            AdverbClass::Place,
            AdverbClass::Time,
            AdverbClass::Interrogative,
        ]
        .into_iter()
        .find(|c| c.as_str() == s)
    }

    /// Relative order of clause-final adverbs; `None` for those placed elsewhere.
    pub fn final_rank(&self) -> Option<u8> {
        match self {
            AdverbClass::Manner => Some(0),
            AdverbClass::Place => Some(1),
            AdverbClass::Time => Some(2),
            AdverbClass::Frequency | AdverbClass::Interrogative => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum PartOfSpeech {
    Noun = 0,
    Adjective = 1,
    Verb = 2,
    Adverb = 3,
    Determiner = 4,
    Preposition = 5,
    Conjunction = 6,
    Pronoun = 7,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Verb => "verb",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Determiner => "determiner",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Pronoun => "pronoun",
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct LexFlags: u32 {
        // Phonology (Bits 0-1)
        const SILENT_H = 1;
        const SOUNDED_U = 2;

        // Countability (Bits 2-4)
        const UNCOUNTABLE = 4;
        const PLURAL_ONLY = 8;
        const PROPER = 16;

        // Spelling (Bit 5)
        const DOUBLE_CONSONANT = 32;

        // Closed classes (Bit 6)
        const INTERROGATIVE = 64;
    }
}

// rkyv support for LexFlags
impl Archive for LexFlags {
    type Archived = u32;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::Fallible + ?Sized> Serialize<S> for LexFlags {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<LexFlags, D> for u32 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<LexFlags, D::Error> {
        Ok(LexFlags::from_bits_truncate(*self))
    }
}
