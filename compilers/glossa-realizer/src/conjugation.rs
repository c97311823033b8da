//! The auxiliary chain of a clause.
//!
//! A chain is built from the outside in: `[modal | will] [have] [be] main`.
//! The first link is finite and agrees with the subject; every later link
//! takes the form its predecessor governs (modal/will/do: base, have: past
//! participle, be: present participle).

use glossa_morph::{be_form, finite, inflect, VerbForm};
use glossa_protocol::{
    Agreement, LexFlags, ModalKind, Mood, Number, Operation, Paradigm, Person, Polarity, StepType, Tense,
    VerbForms,
};

use crate::config::RenderConfig;
use crate::error::GrammarError;
use crate::lexicon::Lexicon;
use crate::tracker::DerivationTracker;

/// What occupies the modal position of a clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalSlot {
    Empty,
    Modal(ModalKind),
    /// A modal sentence whose modal has not been chosen yet.
    Missing,
}

impl From<Option<ModalKind>> for ModalSlot {
    fn from(modal: Option<ModalKind>) -> Self {
        modal.map_or(ModalSlot::Empty, ModalSlot::Modal)
    }
}

/// Everything the engine needs to build one chain.
#[derive(Debug, Clone, Copy)]
pub struct Conjugation<'a> {
    pub lemma: &'a str,
    pub agreement: Agreement,
    pub paradigm: Paradigm,
    pub polarity: Polarity,
    pub modal: ModalSlot,
    pub mood: Mood,
    /// Yes/no, choice and non-subject wh questions need an auxiliary to invert.
    pub question: bool,
}

impl<'a> Conjugation<'a> {
    pub fn new(lemma: &'a str, agreement: Agreement, paradigm: Paradigm) -> Self {
        Self {
            lemma,
            agreement,
            paradigm,
            polarity: Polarity::Affirmative,
            modal: ModalSlot::Empty,
            mood: Mood::Indicative,
            question: false,
        }
    }

    pub fn negated(mut self) -> Self {
        self.polarity = Polarity::Negative;
        self
    }

    pub fn with_modal(mut self, modal: ModalSlot) -> Self {
        self.modal = modal;
        self
    }

    pub fn imperative(mut self) -> Self {
        self.mood = Mood::Imperative;
        self
    }

    pub fn question(mut self) -> Self {
        self.question = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerbChain {
    pub words: Vec<String>,
    /// The first word can carry "not" and invert with the subject.
    pub auxiliary: bool,
    pub negated: bool,
    pub do_support: bool,
}

impl VerbChain {
    /// A chain standing in for a predicate that is not there yet.
    pub fn placeholder(config: &RenderConfig) -> Self {
        Self { words: vec![config.placeholder.clone()], auxiliary: false, negated: false, do_support: false }
    }

    /// Where a frequency adverb goes: after the first auxiliary (and "not"),
    /// otherwise before the lone main verb.
    pub fn adverb_index(&self) -> usize {
        match (self.auxiliary, self.negated) {
            (false, _) => 0,
            (true, false) => 1,
            (true, true) => 2,
        }
    }

    /// The main verb form, which is what a coordinated verb phrase repeats.
    pub fn main_verb(&self) -> &str {
        self.words.last().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Modal(Option<ModalKind>),
    Will,
    Have,
    Be,
    Main,
}

fn agreement_label(agreement: Agreement) -> String {
    let person = match agreement.person {
        Person::First => "1st",
        Person::Second => "2nd",
        Person::Third => "3rd",
    };
    let number = match agreement.number {
        Number::Singular => "singular",
        Number::Plural => "plural",
    };
    format!("{} person {}", person, number)
}

pub struct Conjugator<'a> {
    lexicon: &'a Lexicon,
    config: &'a RenderConfig,
}

impl<'a> Conjugator<'a> {
    pub fn new(lexicon: &'a Lexicon, config: &'a RenderConfig) -> Self {
        Self { lexicon, config }
    }

    pub fn conjugate(
        &self,
        request: &Conjugation<'_>,
        tracker: &mut DerivationTracker,
    ) -> Result<VerbChain, GrammarError> {
        let forms = self.lexicon.verb(request.lemma);
        let flags = self.lexicon.flags(request.lemma);

        if request.mood == Mood::Imperative {
            return self.imperative(request, forms, flags, tracker);
        }

        // 1. Outer to inner: modal or future, perfect, progressive, main verb
        let tense = request.paradigm.tense;
        let aspect = request.paradigm.aspect;
        let mut links = Vec::with_capacity(4);
        let mut shifted = None;
        match request.modal {
            ModalSlot::Modal(modal) => {
                let surface = match (tense, modal.past()) {
                    (Tense::Past, Some(past)) => {
                        shifted = Some((modal, past));
                        past
                    }
                    _ => modal,
                };
                links.push(Link::Modal(Some(surface)));
            }
            ModalSlot::Missing => links.push(Link::Modal(None)),
            ModalSlot::Empty if tense == Tense::Future => links.push(Link::Will),
            ModalSlot::Empty => {}
        }
        if aspect.is_perfect() {
            links.push(Link::Have);
        }
        if aspect.is_progressive() {
            links.push(Link::Be);
        }
        links.push(Link::Main);

        // 2. Surface forms: finite first link, governed forms after it
        let past = tense == Tense::Past;
        let mut words = Vec::with_capacity(links.len() + 2);
        for (i, link) in links.iter().enumerate() {
            let word = if i == 0 {
                self.finite_form(*link, request, past, forms, flags)?
            } else {
                self.governed_form(links[i - 1], *link, request.lemma, forms, flags)?
            };
            words.push(word);
        }

        // 3. One step per layer whose form differs from its input
        let base = |i: usize| self.base(links[i], request.lemma);
        for (i, link) in links.iter().enumerate() {
            let next = i + 1;
            match link {
                Link::Modal(modal) => {
                    let rule = match (shifted, modal) {
                        (Some((requested, _)), _) => requested.as_str(),
                        (None, Some(modal)) => modal.as_str(),
                        (None, None) => "missing",
                    };
                    tracker.morphology(
                        StepType::Modal,
                        rule,
                        &base(next),
                        &format!("{} {}", words[i], words[next]),
                        "modal auxiliary blocks tense marking",
                    );
                    if let Some((requested, past)) = shifted {
                        tracker.morphology(StepType::Tense, "past", requested.as_str(), past.as_str(), "past tense on a modal");
                    }
                }
                Link::Will => {
                    tracker.morphology(
                        StepType::Tense,
                        "future",
                        &base(next),
                        &format!("will {}", words[next]),
                        "future tense",
                    );
                }
                Link::Have => {
                    tracker.morphology(
                        StepType::Aspect,
                        "perfect",
                        &base(next),
                        &format!("have {}", words[next]),
                        "perfect aspect: have + past participle",
                    );
                }
                Link::Be => {
                    tracker.morphology(
                        StepType::Aspect,
                        "progressive",
                        &base(next),
                        &format!("be {}", words[next]),
                        "progressive aspect: be + present participle",
                    );
                }
                Link::Main => {}
            }
        }
        if matches!(links[0], Link::Have | Link::Be | Link::Main) {
            tracker.morphology(
                StepType::Tense,
                tense.as_str(),
                &base(0),
                &words[0],
                &format!("{} tense, {} subject", tense.as_str(), agreement_label(request.agreement)),
            );
        }

        // 4. Do-support when nothing can carry "not" or invert
        let main_be = links.len() == 1 && request.lemma == "be";
        let needs_auxiliary = request.polarity == Polarity::Negative || request.question;
        let mut do_support = false;
        if links.len() == 1 && !main_be && needs_auxiliary {
            let auxiliary = finite("do", past, request.agreement, None, LexFlags::empty())?;
            let (rule, trigger) = if request.polarity == Polarity::Negative {
                ("negation", "negation needs an auxiliary to carry 'not'")
            } else {
                ("question", "question needs an auxiliary to invert")
            };
            let before = words[0].clone();
            words = vec![auxiliary, request.lemma.to_string()];
            tracker.morphology(StepType::DoSupport, rule, &before, &words.join(" "), trigger);
            do_support = true;
        }

        let mut chain = VerbChain { words, auxiliary: links.len() > 1 || main_be || do_support, negated: false, do_support };
        self.negate(&mut chain, request.polarity, tracker);
        Ok(chain)
    }

    fn imperative(
        &self,
        request: &Conjugation<'_>,
        forms: Option<&VerbForms>,
        flags: LexFlags,
        tracker: &mut DerivationTracker,
    ) -> Result<VerbChain, GrammarError> {
        if request.modal != ModalSlot::Empty || request.paradigm != Paradigm::default() {
            tracing::debug!(lemma = request.lemma, "imperative ignores modal, tense and aspect");
        }
        let base = inflect(request.lemma, VerbForm::Base, forms, flags)?;
        let mut chain = VerbChain { words: vec![base], auxiliary: false, negated: false, do_support: false };
        if request.polarity == Polarity::Negative {
            // Even "be" takes do-support here: "Do not be late!"
            chain.words.insert(0, "do".to_string());
            tracker.morphology(
                StepType::DoSupport,
                "negation",
                request.lemma,
                &chain.words.join(" "),
                "negative imperative",
            );
            chain.auxiliary = true;
            chain.do_support = true;
        }
        self.negate(&mut chain, request.polarity, tracker);
        Ok(chain)
    }

    fn negate(&self, chain: &mut VerbChain, polarity: Polarity, tracker: &mut DerivationTracker) {
        if polarity != Polarity::Negative {
            return;
        }
        let before = chain.words.clone();
        let at = usize::from(chain.auxiliary);
        chain.words.insert(at, "not".to_string());
        chain.negated = true;
        tracker.syntax(StepType::Negation, "not-insertion", Operation::Insert, Some("not"), &before, &chain.words);
    }

    fn base(&self, link: Link, main: &str) -> String {
        match link {
            Link::Modal(Some(modal)) => modal.as_str().to_string(),
            Link::Modal(None) => self.config.placeholder.clone(),
            Link::Will => "will".to_string(),
            Link::Have => "have".to_string(),
            Link::Be => "be".to_string(),
            Link::Main => main.to_string(),
        }
    }

    fn finite_form(
        &self,
        link: Link,
        request: &Conjugation<'_>,
        past: bool,
        forms: Option<&VerbForms>,
        flags: LexFlags,
    ) -> Result<String, GrammarError> {
        Ok(match link {
            Link::Modal(_) | Link::Will => self.base(link, request.lemma),
            Link::Have => finite("have", past, request.agreement, None, LexFlags::empty())?,
            Link::Be => be_form(past, request.agreement).to_string(),
            Link::Main => finite(request.lemma, past, request.agreement, forms, flags)?,
        })
    }

    fn governed_form(
        &self,
        governor: Link,
        link: Link,
        main: &str,
        forms: Option<&VerbForms>,
        flags: LexFlags,
    ) -> Result<String, GrammarError> {
        let lemma = self.base(link, main);
        // Auxiliaries inflect from the built-in tables only
        let (forms, flags) = match link {
            Link::Main => (forms, flags),
            _ => (None, LexFlags::empty()),
        };
        let form = match governor {
            Link::Have => VerbForm::PastParticiple,
            Link::Be => VerbForm::PresentParticiple,
            Link::Modal(_) | Link::Will | Link::Main => VerbForm::Base,
        };
        Ok(inflect(&lemma, form, forms, flags)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::{Aspect, DerivationStep, StepType};

    fn conjugate(request: Conjugation<'_>) -> (VerbChain, DerivationTracker) {
        let lexicon = Lexicon::empty();
        let config = RenderConfig::default();
        let mut tracker = DerivationTracker::new();
        let chain = Conjugator::new(&lexicon, &config).conjugate(&request, &mut tracker).unwrap();
        (chain, tracker)
    }

    fn text(request: Conjugation<'_>) -> String {
        conjugate(request).0.words.join(" ")
    }

    fn he(lemma: &str, tense: Tense, aspect: Aspect) -> Conjugation<'_> {
        Conjugation::new(lemma, Agreement::THIRD_SINGULAR, Paradigm::new(tense, aspect))
    }

    #[test]
    fn test_documented_chains() {
        assert_eq!(text(he("eat", Tense::Past, Aspect::Perfect)), "had eaten");
        assert_eq!(text(he("eat", Tense::Present, Aspect::Progressive)), "is eating");
        assert_eq!(text(he("eat", Tense::Future, Aspect::PerfectProgressive)), "will have been eating");
    }

    #[test]
    fn test_full_grid_for_eat() {
        let expected = [
            "ate",
            "was eating",
            "had eaten",
            "had been eating",
            "eats",
            "is eating",
            "has eaten",
            "has been eating",
            "will eat",
            "will be eating",
            "will have eaten",
            "will have been eating",
        ];
        for (paradigm, expected) in Paradigm::ALL.iter().zip(expected) {
            let request = Conjugation::new("eat", Agreement::THIRD_SINGULAR, *paradigm);
            assert_eq!(text(request), expected, "paradigm {}", paradigm);
        }
    }

    #[test]
    fn test_layers_logged_outer_to_inner() {
        let (_, tracker) = conjugate(he("eat", Tense::Future, Aspect::PerfectProgressive));
        let rules: Vec<&str> = tracker.steps().iter().map(DerivationStep::rule).collect();
        assert_eq!(rules, vec!["future", "perfect", "progressive"]);
    }

    #[test]
    fn test_noop_tense_is_not_logged() {
        let request = Conjugation::new("eat", Agreement::THIRD_PLURAL, Paradigm::default());
        let (chain, tracker) = conjugate(request);
        assert_eq!(chain.words, vec!["eat".to_string()]);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_negation_and_do_support() {
        let they = Conjugation::new("eat", Agreement::THIRD_PLURAL, Paradigm::default()).negated();
        assert_eq!(text(they), "do not eat");
        assert_eq!(text(he("eat", Tense::Present, Aspect::Simple).negated()), "does not eat");
        assert_eq!(text(he("eat", Tense::Past, Aspect::Simple).negated()), "did not eat");

        let (chain, tracker) = conjugate(he("eat", Tense::Present, Aspect::Simple).negated());
        assert!(chain.do_support);
        let step = tracker.steps().iter().find(|s| s.step_type() == StepType::DoSupport).unwrap();
        assert_eq!(step.rule(), "negation");
    }

    #[test]
    fn test_modal_blocks_do_support() {
        let request = he("eat", Tense::Present, Aspect::Simple)
            .with_modal(ModalSlot::Modal(ModalKind::Can))
            .negated();
        let (chain, _) = conjugate(request);
        assert_eq!(chain.words.join(" "), "can not eat");
        assert!(!chain.do_support);
        assert!(!chain.words.iter().any(|w| w == "do" || w == "does"));
    }

    #[test]
    fn test_past_modal_shifts() {
        let request = he("eat", Tense::Past, Aspect::Simple).with_modal(ModalSlot::Modal(ModalKind::Can));
        assert_eq!(text(request), "could eat");
        let request = he("eat", Tense::Past, Aspect::Simple).with_modal(ModalSlot::Modal(ModalKind::Must));
        assert_eq!(text(request), "must eat");
    }

    #[test]
    fn test_modal_wins_over_future() {
        let request = he("eat", Tense::Future, Aspect::Perfect).with_modal(ModalSlot::Modal(ModalKind::Might));
        assert_eq!(text(request), "might have eaten");
    }

    #[test]
    fn test_missing_modal_renders_placeholder() {
        let request = he("eat", Tense::Present, Aspect::Simple).with_modal(ModalSlot::Missing);
        assert_eq!(text(request), "___ eat");
    }

    #[test]
    fn test_main_verb_be_is_its_own_auxiliary() {
        let (chain, _) = conjugate(he("be", Tense::Present, Aspect::Simple).negated());
        assert_eq!(chain.words.join(" "), "is not");
        assert!(chain.auxiliary);
        assert!(!chain.do_support);

        let (chain, _) = conjugate(he("be", Tense::Past, Aspect::Simple).question());
        assert_eq!(chain.words, vec!["was".to_string()]);
    }

    #[test]
    fn test_question_do_support() {
        let (chain, tracker) = conjugate(he("eat", Tense::Present, Aspect::Simple).question());
        assert_eq!(chain.words.join(" "), "does eat");
        assert_eq!(tracker.steps().last().unwrap().rule(), "question");
        // Main-verb "have" takes do-support
        assert_eq!(text(he("have", Tense::Present, Aspect::Simple).question()), "does have");
    }

    #[test]
    fn test_imperatives() {
        let you = Conjugation::new("eat", Agreement::SECOND, Paradigm::default()).imperative();
        assert_eq!(text(you), "eat");
        assert_eq!(text(you.negated()), "do not eat");
        let be = Conjugation::new("be", Agreement::SECOND, Paradigm::default()).imperative().negated();
        assert_eq!(text(be), "do not be");
    }

    #[test]
    fn test_adverb_index() {
        let (chain, _) = conjugate(he("eat", Tense::Present, Aspect::Simple));
        assert_eq!(chain.adverb_index(), 0);
        let (chain, _) = conjugate(he("eat", Tense::Present, Aspect::Simple).negated());
        assert_eq!(chain.adverb_index(), 2);
        let (chain, _) = conjugate(he("eat", Tense::Present, Aspect::Perfect));
        assert_eq!(chain.adverb_index(), 1);
    }
}
