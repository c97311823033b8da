//! Language-neutral sentence representation handed to the engine by the
//! editing surface. Every node is plain data; missing pieces are `None` and
//! render as placeholders.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use crate::determiner::DeterminerConfig;
use crate::features::{AdverbClass, ModalKind, Paradigm, Polarity, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Conjunction {
    And,
    Or,
}

/// A conjunction plus whether it is realized as a correlative pair. A
/// negative correlative coordination reads "neither ... nor".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Coordinator {
    pub conjunction: Conjunction,
    pub correlative: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub polarity: Polarity,
}

impl Coordinator {
    pub const AND: Coordinator = Coordinator::new(Conjunction::And, false, Polarity::Affirmative);
    pub const OR: Coordinator = Coordinator::new(Conjunction::Or, false, Polarity::Affirmative);
    pub const BOTH_AND: Coordinator = Coordinator::new(Conjunction::And, true, Polarity::Affirmative);
    pub const EITHER_OR: Coordinator = Coordinator::new(Conjunction::Or, true, Polarity::Affirmative);
    pub const NEITHER_NOR: Coordinator = Coordinator::new(Conjunction::Or, true, Polarity::Negative);

    pub const fn new(conjunction: Conjunction, correlative: bool, polarity: Polarity) -> Self {
        Self { conjunction, correlative, polarity }
    }

    /// Notation name of this coordinator.
    pub fn as_str(&self) -> &'static str {
        match (self.conjunction, self.correlative, self.polarity) {
            (_, true, Polarity::Negative) => "neither-nor",
            (Conjunction::And, true, _) => "both-and",
            (Conjunction::Or, true, _) => "either-or",
            (Conjunction::And, false, _) => "and",
            (Conjunction::Or, false, _) => "or",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        [Self::AND, Self::OR, Self::BOTH_AND, Self::EITHER_OR, Self::NEITHER_NOR]
            .into_iter()
            .find(|c| c.as_str() == s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Sentence {
    Declarative { clause: Clause },
    YesNoQuestion { clause: Clause },
    WhQuestion { clause: Clause },
    ChoiceQuestion { clause: Clause },
    Imperative { clause: Clause },
    Modal { clause: Clause },
    NegatedModal { clause: Clause },
    Fact { clause: Clause },
    Conjunction { coordinator: Coordinator, clauses: Vec<Option<Clause>> },
    Conditional { condition: Option<Box<Clause>>, consequence: Option<Box<Clause>> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum SentenceKind {
    Declarative,
    YesNoQuestion,
    WhQuestion,
    ChoiceQuestion,
    Imperative,
    Modal,
    NegatedModal,
    Fact,
    Conjunction,
    Conditional,
}

impl SentenceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentenceKind::Declarative => "declarative",
            SentenceKind::YesNoQuestion => "question",
            SentenceKind::WhQuestion => "wh",
            SentenceKind::ChoiceQuestion => "choice",
            SentenceKind::Imperative => "imperative",
            SentenceKind::Modal => "modal",
            SentenceKind::NegatedModal => "not-modal",
            SentenceKind::Fact => "fact",
            SentenceKind::Conjunction => "conjunction",
            SentenceKind::Conditional => "if",
        }
    }

    pub fn terminator(&self) -> char {
        match self {
            SentenceKind::YesNoQuestion | SentenceKind::WhQuestion | SentenceKind::ChoiceQuestion => '?',
            SentenceKind::Imperative => '!',
            _ => '.',
        }
    }
}

impl Sentence {
    pub fn kind(&self) -> SentenceKind {
        match self {
            Sentence::Declarative { .. } => SentenceKind::Declarative,
            Sentence::YesNoQuestion { .. } => SentenceKind::YesNoQuestion,
            Sentence::WhQuestion { .. } => SentenceKind::WhQuestion,
            Sentence::ChoiceQuestion { .. } => SentenceKind::ChoiceQuestion,
            Sentence::Imperative { .. } => SentenceKind::Imperative,
            Sentence::Modal { .. } => SentenceKind::Modal,
            Sentence::NegatedModal { .. } => SentenceKind::NegatedModal,
            Sentence::Fact { .. } => SentenceKind::Fact,
            Sentence::Conjunction { .. } => SentenceKind::Conjunction,
            Sentence::Conditional { .. } => SentenceKind::Conditional,
        }
    }

    /// The single clause of non-logical sentence types.
    pub fn clause(&self) -> Option<&Clause> {
        match self {
            Sentence::Declarative { clause }
            | Sentence::YesNoQuestion { clause }
            | Sentence::WhQuestion { clause }
            | Sentence::ChoiceQuestion { clause }
            | Sentence::Imperative { clause }
            | Sentence::Modal { clause }
            | Sentence::NegatedModal { clause }
            | Sentence::Fact { clause } => Some(clause),
            Sentence::Conjunction { .. } | Sentence::Conditional { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Clause {
    pub paradigm: Paradigm,
    pub polarity: Polarity,
    pub modal: Option<ModalKind>,
    pub predicate: Predicate,
    pub adverbs: Vec<Adverb>,
}

impl Clause {
    pub fn new(paradigm: Paradigm, verb: VerbPhrase) -> Self {
        Self { paradigm, predicate: Predicate::Verb(verb), ..Default::default() }
    }

    pub fn negated(mut self) -> Self {
        self.polarity = Polarity::Negative;
        self
    }

    pub fn with_modal(mut self, modal: ModalKind) -> Self {
        self.modal = Some(modal);
        self
    }

    pub fn with_adverb(mut self, adverb: Adverb) -> Self {
        self.adverbs.push(adverb);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Predicate {
    #[default]
    Missing,
    Verb(VerbPhrase),
    Coordinated { coordinator: Coordinator, items: Vec<Option<VerbPhrase>> },
}

impl Predicate {
    /// The verb phrase that supplies the subject and the finite chain.
    pub fn head(&self) -> Option<&VerbPhrase> {
        match self {
            Predicate::Missing => None,
            Predicate::Verb(vp) => Some(vp),
            Predicate::Coordinated { items, .. } => items.iter().flatten().next(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct VerbPhrase {
    pub lemma: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub arguments: Vec<Argument>,
}

impl VerbPhrase {
    pub fn new(lemma: &str) -> Self {
        Self { lemma: String::from(lemma), arguments: Vec::new() }
    }

    pub fn arg(mut self, role: Role, filler: NounPhrase) -> Self {
        self.arguments.push(Argument { role, filler: Some(filler) });
        self
    }

    /// Declares a role whose filler the user has not supplied yet.
    pub fn hole(mut self, role: Role) -> Self {
        self.arguments.push(Argument { role, filler: None });
        self
    }

    pub fn argument(&self, role: Role) -> Option<&Argument> {
        self.arguments.iter().find(|a| a.role == role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Argument {
    pub role: Role,
    pub filler: Option<NounPhrase>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum NounPhrase {
    Common(CommonNoun),
    Pronoun { lemma: String },
    Literal { text: String },
    Coordinated { coordinator: Coordinator, items: Vec<Option<NounPhrase>> },
}

impl NounPhrase {
    pub fn noun(head: &str) -> Self {
        NounPhrase::Common(CommonNoun::new(head))
    }

    pub fn pronoun(lemma: &str) -> Self {
        NounPhrase::Pronoun { lemma: String::from(lemma) }
    }

    pub fn literal(text: &str) -> Self {
        NounPhrase::Literal { text: String::from(text) }
    }

    pub fn coordinated(coordinator: Coordinator, items: Vec<NounPhrase>) -> Self {
        NounPhrase::Coordinated { coordinator, items: items.into_iter().map(Some).collect() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct CommonNoun {
    pub head: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub determiners: DeterminerConfig,
    #[cfg_attr(feature = "serde", serde(default))]
    pub adjectives: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub modifiers: Vec<PrepModifier>,
}

impl CommonNoun {
    pub fn new(head: &str) -> Self {
        Self { head: String::from(head), ..Default::default() }
    }

    pub fn with_determiners(mut self, determiners: DeterminerConfig) -> Self {
        self.determiners = determiners;
        self
    }

    pub fn with_adjective(mut self, adjective: &str) -> Self {
        self.adjectives.push(String::from(adjective));
        self
    }

    pub fn with_modifier(mut self, preposition: &str, object: NounPhrase) -> Self {
        self.modifiers.push(PrepModifier { preposition: String::from(preposition), object: Some(object) });
        self
    }
}

impl From<CommonNoun> for NounPhrase {
    fn from(noun: CommonNoun) -> Self {
        NounPhrase::Common(noun)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct PrepModifier {
    pub preposition: String,
    pub object: Option<NounPhrase>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Adverb {
    pub lemma: String,
    /// Explicit class; looked up in the lexicon when absent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub class: Option<AdverbClass>,
}

impl Adverb {
    pub fn new(lemma: &str) -> Self {
        Self { lemma: String::from(lemma), class: None }
    }

    pub fn with_class(lemma: &str, class: AdverbClass) -> Self {
        Self { lemma: String::from(lemma), class: Some(class) }
    }
}
