//! Clause Orchestrator: word order for one clause.
//!
//! The clause is first laid out in declarative order as a list of
//! constituents (subject, finite auxiliary, verb group, arguments, adverbs).
//! Movement rules then reorder whole constituents, so a fronted phrase or an
//! inverted auxiliary always travels with all of its words.

use glossa_morph::adverbs;
use glossa_protocol::{
    AdverbClass, Agreement, Argument, Clause, Conjunction, Coordinator, NounPhrase, Operation, Polarity,
    Predicate, Role, StepType, ValencySlot, VerbPhrase,
};
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::conjugation::{Conjugation, Conjugator, ModalSlot, VerbChain};
use crate::coordination::coordinate;
use crate::error::GrammarError;
use crate::lexicon::Lexicon;
use crate::noun_phrase::{NounPhraseRenderer, Position, RenderedPhrase};
use crate::tracker::DerivationTracker;

/// How the sentence type treats its clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Statement,
    Question,
    Choice,
    Wh,
    Imperative,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub mode: Mode,
    /// The sentence type demands a modal (placeholder when unset).
    pub modal_required: bool,
    /// The sentence type forces negative polarity.
    pub negative: bool,
}

impl Frame {
    pub fn new(mode: Mode) -> Self {
        Self { mode, modal_required: false, negative: false }
    }

    pub fn statement() -> Self {
        Self::new(Mode::Statement)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Part {
    Subject,
    Finite,
    Verb,
    Argument(Role),
    Adverb,
    WhAdverb,
}

#[derive(Debug, Clone)]
struct Constituent {
    part: Part,
    tokens: Vec<String>,
}

impl Constituent {
    fn new(part: Part, tokens: Vec<String>) -> Self {
        Self { part, tokens }
    }
}

fn flatten(layout: &[Constituent]) -> Vec<String> {
    layout.iter().flat_map(|c| c.tokens.iter().cloned()).collect()
}

fn find(layout: &[Constituent], part: Part) -> Option<usize> {
    layout.iter().position(|c| c.part == part)
}

/// Preposition assumed for an oblique role when the verb is not in the lexicon.
fn default_preposition(role: Role) -> Option<&'static str> {
    match role {
        Role::Recipient | Role::Goal => Some("to"),
        Role::Beneficiary => Some("for"),
        Role::Instrument => Some("with"),
        Role::Location => Some("in"),
        Role::Source => Some("from"),
        _ => None,
    }
}

/// Checks that every filled role of `vp` is licensed by its lexicon valency.
/// Verbs missing from the lexicon accept any role.
pub fn check_valency(vp: &VerbPhrase, lexicon: &Lexicon) -> Result<(), GrammarError> {
    let Some(forms) = lexicon.verb(&vp.lemma).filter(|f| !f.valency.is_empty()) else {
        return Ok(());
    };
    for (i, argument) in vp.arguments.iter().enumerate() {
        if !forms.valency.iter().any(|slot| slot.role == argument.role) {
            return Err(GrammarError::UndeclaredRole { verb: vp.lemma.clone(), role: argument.role });
        }
        if vp.arguments[..i].iter().any(|a| a.role == argument.role) {
            return Err(GrammarError::DuplicateRole { verb: vp.lemma.clone(), role: argument.role });
        }
    }
    Ok(())
}

pub struct ClauseRealizer<'a> {
    lexicon: &'a Lexicon,
    config: &'a RenderConfig,
    nouns: NounPhraseRenderer<'a>,
    conjugator: Conjugator<'a>,
}

impl<'a> ClauseRealizer<'a> {
    pub fn new(lexicon: &'a Lexicon, config: &'a RenderConfig) -> Self {
        Self {
            lexicon,
            config,
            nouns: NounPhraseRenderer::new(lexicon, config),
            conjugator: Conjugator::new(lexicon, config),
        }
    }

    /// Realizes `clause` as a token sequence, without capitalization or
    /// final punctuation.
    pub fn realize(
        &self,
        clause: &Clause,
        frame: Frame,
        tracker: &mut DerivationTracker,
    ) -> Result<Vec<String>, GrammarError> {
        let Some(head) = clause.predicate.head().filter(|vp| !vp.lemma.trim().is_empty()) else {
            return Ok(vec![self.config.placeholder.clone()]);
        };
        let coordinated = match &clause.predicate {
            Predicate::Coordinated { coordinator, items } if items.len() > 1 => Some((*coordinator, items)),
            _ => None,
        };

        let valency = self.valency(head);
        let fillers = self.fill(head, &valency);
        let subject_filler = fillers[0].and_then(|a| a.filler.as_ref());
        let imperative = frame.mode == Mode::Imperative;

        // Which constituent a wh-question fronts
        let wh = frame.mode == Mode::Wh;
        let subject_wh = wh && subject_filler.is_some_and(|np| self.nouns.is_interrogative(np));
        let object_wh = if wh && !subject_wh && coordinated.is_none() {
            valency[1..].iter().zip(&fillers[1..]).find_map(|(slot, argument)| {
                let filler = argument.and_then(|a| a.filler.as_ref())?;
                self.nouns.is_interrogative(filler).then_some(slot.role)
            })
        } else {
            None
        };
        let adverbs = self.classify_adverbs(clause);
        let adverb_wh = wh
            && !subject_wh
            && object_wh.is_none()
            && adverbs.iter().any(|(_, class)| *class == AdverbClass::Interrogative);
        if wh && !subject_wh && object_wh.is_none() && !adverb_wh {
            debug!(verb = head.lemma.as_str(), "wh-question without an interrogative, inverting only");
        }

        // 1. Subject
        let subject = if imperative {
            RenderedPhrase { tokens: vec!["you".to_string()], agreement: Agreement::SECOND }
        } else {
            self.nouns.render(subject_filler, Position::Subject, tracker)?
        };

        // 2. Verb chain
        let modal = match (clause.modal, frame.modal_required) {
            (Some(modal), _) => ModalSlot::Modal(modal),
            (None, true) => ModalSlot::Missing,
            (None, false) => ModalSlot::Empty,
        };
        let mut request = Conjugation::new(&head.lemma, subject.agreement, clause.paradigm).with_modal(modal);
        if frame.negative || clause.polarity == Polarity::Negative {
            request = request.negated();
        }
        if imperative {
            request = request.imperative();
        }
        request.question = matches!(frame.mode, Mode::Question | Mode::Choice) || (wh && !subject_wh);
        let chain = self.conjugator.conjugate(&request, tracker)?;
        let finite_len = usize::from(chain.auxiliary);

        // 3. Arguments in valency order
        let mut layout = vec![Constituent::new(Part::Subject, subject.tokens)];
        if chain.auxiliary {
            layout.push(Constituent::new(Part::Finite, vec![chain.words[0].clone()]));
        }
        match coordinated {
            Some((coordinator, items)) => {
                let tokens = self.coordinated_predicate(coordinator, items, head, &chain, &request, tracker)?;
                layout.push(Constituent::new(Part::Verb, tokens));
            }
            None => {
                layout.push(Constituent::new(Part::Verb, chain.words[finite_len..].to_vec()));
                for (slot, argument) in valency[1..].iter().zip(&fillers[1..]) {
                    let fronted = object_wh == Some(slot.role);
                    if let Some(tokens) = self.argument(&head.lemma, slot, *argument, fronted, tracker)? {
                        layout.push(Constituent::new(Part::Argument(slot.role), tokens));
                    }
                }
            }
        }

        // 4. Adverbs
        self.place_adverbs(&mut layout, adverbs, adverb_wh, &chain, finite_len, tracker);

        // 5. Movement
        match frame.mode {
            Mode::Statement => {}
            Mode::Imperative => omit_subject(&mut layout, tracker),
            Mode::Question => invert(&mut layout, tracker),
            Mode::Choice => {
                self.log_alternatives(clause, head, &layout, tracker);
                invert(&mut layout, tracker);
            }
            Mode::Wh if subject_wh => {
                // Already clause-initial: nothing moves, no do-support
                let tokens = flatten(&layout);
                let moved = layout[0].tokens.join(" ");
                tracker.syntax(StepType::WhMovement, "subject", Operation::Move, Some(&moved), &tokens, &tokens);
            }
            Mode::Wh => {
                let target = match object_wh {
                    Some(role) => find(&layout, Part::Argument(role)).map(|i| (i, "object")),
                    None => find(&layout, Part::WhAdverb).map(|i| (i, "adverb")),
                };
                if let Some((index, rule)) = target {
                    front(&mut layout, index, rule, tracker);
                }
                invert(&mut layout, tracker);
            }
        }

        Ok(flatten(&layout))
    }

    fn valency(&self, vp: &VerbPhrase) -> Vec<ValencySlot> {
        if let Some(forms) = self.lexicon.verb(&vp.lemma).filter(|f| !f.valency.is_empty()) {
            return forms.valency.clone();
        }
        // Unknown verb: the supplied roles in canonical order, subject first
        let mut roles: Vec<Role> = vp.arguments.iter().map(|a| a.role).collect();
        roles.sort();
        roles.dedup();
        if roles.is_empty() {
            roles.push(Role::Agent);
        }
        roles
            .into_iter()
            .enumerate()
            .map(|(i, role)| match default_preposition(role) {
                Some(preposition) if i > 0 => ValencySlot::oblique(role, preposition),
                _ => ValencySlot::new(role),
            })
            .collect()
    }

    /// The argument filling each valency slot. Undeclared roles are dropped.
    fn fill<'v>(&self, vp: &'v VerbPhrase, valency: &[ValencySlot]) -> Vec<Option<&'v Argument>> {
        for (i, argument) in vp.arguments.iter().enumerate() {
            if !valency.iter().any(|slot| slot.role == argument.role) {
                warn!(verb = vp.lemma.as_str(), role = argument.role.as_str(), "role not in valency, dropped");
            } else if vp.arguments[..i].iter().any(|a| a.role == argument.role) {
                warn!(verb = vp.lemma.as_str(), role = argument.role.as_str(), "role filled twice, first kept");
            }
        }
        valency.iter().map(|slot| vp.argument(slot.role)).collect()
    }

    fn argument(
        &self,
        verb: &str,
        slot: &ValencySlot,
        argument: Option<&Argument>,
        fronted: bool,
        tracker: &mut DerivationTracker,
    ) -> Result<Option<Vec<String>>, GrammarError> {
        if argument.is_none() && slot.optional {
            return Ok(None);
        }
        let position = match (&slot.preposition, fronted) {
            (_, true) => Position::FrontedObject { verb },
            (Some(preposition), false) => Position::PrepObject { preposition },
            (None, false) => Position::Object { verb },
        };
        let filler = argument.and_then(|a| a.filler.as_ref());
        let rendered = self.nouns.render(filler, position, tracker)?;

        let mut tokens: Vec<String> = slot.preposition.iter().cloned().collect();
        tokens.extend(rendered.tokens);
        Ok(Some(tokens))
    }

    /// "will eat apples and drink water": the auxiliaries before the main
    /// verb are shared, each conjunct repeats only its main verb. Sharing
    /// needs every conjunct to build the same auxiliaries; otherwise ("is not
    /// happy and does not eat apples") each conjunct keeps its own chain.
    fn coordinated_predicate(
        &self,
        coordinator: Coordinator,
        items: &[Option<VerbPhrase>],
        head: &VerbPhrase,
        chain: &VerbChain,
        request: &Conjugation<'_>,
        tracker: &mut DerivationTracker,
    ) -> Result<Vec<String>, GrammarError> {
        let auxiliaries = |c: &VerbChain| c.words[..c.words.len().saturating_sub(1)].to_vec();
        let head_auxiliaries = auxiliaries(chain);
        let mut shared = true;
        for vp in items.iter().flatten().filter(|vp| !std::ptr::eq(*vp, head) && !vp.lemma.trim().is_empty()) {
            let own = Conjugation { lemma: &vp.lemma, ..*request };
            let own = self.conjugator.conjugate(&own, &mut DerivationTracker::new())?;
            shared &= auxiliaries(&own) == head_auxiliaries;
        }

        let finite_len = usize::from(chain.auxiliary);
        let split = if shared { chain.words.len().saturating_sub(1).max(finite_len) } else { finite_len };
        if !shared {
            debug!(verb = head.lemma.as_str(), "conjuncts differ in auxiliaries, not shared");
        }
        let mut tokens = chain.words[finite_len..split].to_vec();

        let conjoined = coordinate(items, coordinator, &self.config.placeholder, tracker, |vp, tracker| {
            let mut part = if std::ptr::eq(vp, head) {
                chain.words[split..].to_vec()
            } else if vp.lemma.trim().is_empty() {
                vec![self.config.placeholder.clone()]
            } else if shared {
                let own = Conjugation { lemma: &vp.lemma, ..*request };
                let main = if chain.auxiliary {
                    // The shared auxiliaries were logged with the first conjunct
                    self.conjugator.conjugate(&own, &mut DerivationTracker::new())?
                } else {
                    self.conjugator.conjugate(&own, tracker)?
                };
                vec![main.main_verb().to_string()]
            } else {
                // Only the first conjunct inverts, the rest stay declarative
                let own = Conjugation { lemma: &vp.lemma, question: false, ..*request };
                self.conjugator.conjugate(&own, tracker)?.words
            };

            // The subject slot is shared; every other slot belongs to this conjunct
            let valency = self.valency(vp);
            let fillers = self.fill(vp, &valency);
            for (slot, argument) in valency[1..].iter().zip(&fillers[1..]) {
                if let Some(argument) = self.argument(&vp.lemma, slot, *argument, false, tracker)? {
                    part.extend(argument);
                }
            }
            Ok(part)
        })?;
        tokens.extend(conjoined);
        Ok(tokens)
    }

    fn classify_adverbs(&self, clause: &Clause) -> Vec<(String, AdverbClass)> {
        clause
            .adverbs
            .iter()
            .map(|adverb| {
                let lemma = adverb.lemma.trim();
                if lemma.is_empty() {
                    return (self.config.placeholder.clone(), AdverbClass::Manner);
                }
                let class = adverb
                    .class
                    .or_else(|| self.lexicon.adverb_class(lemma))
                    .or_else(|| adverbs::classify(lemma))
                    .unwrap_or(AdverbClass::Manner);
                (lemma.to_string(), class)
            })
            .collect()
    }

    fn place_adverbs(
        &self,
        layout: &mut Vec<Constituent>,
        adverbs: Vec<(String, AdverbClass)>,
        front_interrogative: bool,
        chain: &VerbChain,
        finite_len: usize,
        tracker: &mut DerivationTracker,
    ) {
        let mut frequency = Vec::new();
        let mut finals = Vec::new();
        let mut wh_adverb = None;
        for (word, class) in adverbs {
            match class {
                AdverbClass::Frequency => frequency.push(word),
                AdverbClass::Interrogative if front_interrogative && wh_adverb.is_none() => wh_adverb = Some(word),
                _ => finals.push((word, class)),
            }
        }

        // Clause-final: manner, then place, then time; stable within a class
        let rank = |class: &AdverbClass| class.final_rank().unwrap_or(u8::MAX);
        let mut ordered = finals.clone();
        ordered.sort_by_key(|(_, class)| rank(class));
        if ordered != finals {
            let mut as_given = layout.clone();
            as_given.extend(finals.iter().map(|(w, _)| Constituent::new(Part::Adverb, vec![w.clone()])));
            let moved = ordered
                .iter()
                .zip(&finals)
                .find(|(a, b)| a != b)
                .map(|(a, _)| a.0.clone());
            layout.extend(ordered.iter().map(|(w, _)| Constituent::new(Part::Adverb, vec![w.clone()])));
            tracker.syntax(
                StepType::AdverbPlacement,
                "manner-place-time",
                Operation::Move,
                moved.as_deref(),
                &flatten(&as_given),
                &flatten(layout),
            );
        } else {
            layout.extend(finals.into_iter().map(|(w, _)| Constituent::new(Part::Adverb, vec![w])));
        }
        if let Some(word) = wh_adverb {
            layout.push(Constituent::new(Part::WhAdverb, vec![word]));
        }

        // Frequency: after the first auxiliary and "not", or before a lone main verb
        let Some(verb) = find(layout, Part::Verb) else { return };
        let mut at = chain.adverb_index().saturating_sub(finite_len).min(layout[verb].tokens.len());
        for word in frequency {
            let before = flatten(layout);
            layout[verb].tokens.insert(at, word.clone());
            at += 1;
            tracker.syntax(
                StepType::AdverbPlacement,
                "frequency",
                Operation::Insert,
                Some(&word),
                &before,
                &flatten(layout),
            );
        }
    }

    /// Choice questions name the alternatives they offer.
    fn log_alternatives(
        &self,
        clause: &Clause,
        head: &VerbPhrase,
        layout: &[Constituent],
        tracker: &mut DerivationTracker,
    ) {
        let is_choice = |c: &Coordinator| c.conjunction == Conjunction::Or;
        let part = match &clause.predicate {
            Predicate::Coordinated { coordinator, .. } if is_choice(coordinator) => Some(Part::Verb),
            _ => head.arguments.iter().find_map(|a| match &a.filler {
                Some(NounPhrase::Coordinated { coordinator, .. }) if is_choice(coordinator) => {
                    Some(Part::Argument(a.role))
                }
                _ => None,
            }),
        };
        let Some(index) = part.and_then(|p| find(layout, p)) else {
            debug!(verb = head.lemma.as_str(), "choice question without an 'or' coordination");
            return;
        };
        let tokens = flatten(layout);
        let alternatives = layout[index].tokens.join(" ");
        tracker.syntax(StepType::Choice, "alternatives", Operation::Join, Some(&alternatives), &tokens, &tokens);
    }
}

fn omit_subject(layout: &mut Vec<Constituent>, tracker: &mut DerivationTracker) {
    let Some(subject) = find(layout, Part::Subject) else { return };
    let before = flatten(layout);
    let removed = layout.remove(subject);
    tracker.syntax(
        StepType::SubjectOmission,
        "imperative",
        Operation::Delete,
        Some(&removed.tokens.join(" ")),
        &before,
        &flatten(layout),
    );
}

fn invert(layout: &mut Vec<Constituent>, tracker: &mut DerivationTracker) {
    let (Some(subject), Some(finite)) = (find(layout, Part::Subject), find(layout, Part::Finite)) else {
        return;
    };
    if finite < subject {
        return;
    }
    let before = flatten(layout);
    let auxiliary = layout.remove(finite);
    let moved = auxiliary.tokens.join(" ");
    layout.insert(subject, auxiliary);
    tracker.syntax(StepType::Inversion, "subject-auxiliary", Operation::Swap, Some(&moved), &before, &flatten(layout));
}

fn front(layout: &mut Vec<Constituent>, index: usize, rule: &str, tracker: &mut DerivationTracker) {
    let before = flatten(layout);
    let phrase = layout.remove(index);
    let moved = phrase.tokens.join(" ");
    layout.insert(0, phrase);
    tracker.syntax(StepType::WhMovement, rule, Operation::Move, Some(&moved), &before, &flatten(layout));
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::{DerivationStep, Paradigm};

    fn realize(lexicon: &Lexicon, clause: &Clause, frame: Frame) -> (String, DerivationTracker) {
        let config = RenderConfig::default();
        let mut tracker = DerivationTracker::new();
        let tokens = ClauseRealizer::new(lexicon, &config).realize(clause, frame, &mut tracker).unwrap();
        (tokens.join(" "), tracker)
    }

    fn words(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_check_valency() {
        let lexicon = Lexicon::builtin().unwrap();
        let eat = VerbPhrase::new("eat")
            .arg(Role::Agent, NounPhrase::pronoun("he"))
            .arg(Role::Patient, NounPhrase::noun("apple"));
        assert!(check_valency(&eat, &lexicon).is_ok());

        let bad = eat.clone().arg(Role::Recipient, NounPhrase::pronoun("her"));
        assert!(matches!(
            check_valency(&bad, &lexicon),
            Err(GrammarError::UndeclaredRole { role: Role::Recipient, .. })
        ));

        let twice = eat.arg(Role::Agent, NounPhrase::pronoun("she"));
        assert!(matches!(check_valency(&twice, &lexicon), Err(GrammarError::DuplicateRole { .. })));

        // Verbs outside the lexicon accept anything
        let unknown = VerbPhrase::new("zorp").arg(Role::Instrument, NounPhrase::noun("stick"));
        assert!(check_valency(&unknown, &lexicon).is_ok());
    }

    #[test]
    fn test_unknown_verb_infers_its_frame() {
        let lexicon = Lexicon::empty();
        let clause = Clause::new(
            Paradigm::default(),
            VerbPhrase::new("hand")
                .arg(Role::Recipient, NounPhrase::pronoun("he"))
                .arg(Role::Agent, NounPhrase::pronoun("she"))
                .arg(Role::Theme, NounPhrase::noun("book")),
        );
        let (text, _) = realize(&lexicon, &clause, Frame::statement());
        assert_eq!(text, "she hands a book to him");
    }

    #[test]
    fn test_optional_slots_are_omitted() {
        let lexicon = Lexicon::builtin().unwrap();
        let clause = Clause::new(Paradigm::default(), VerbPhrase::new("eat").arg(Role::Agent, NounPhrase::pronoun("they")));
        assert_eq!(realize(&lexicon, &clause, Frame::statement()).0, "they eat");

        let clause = Clause::new(Paradigm::default(), VerbPhrase::new("eat").hole(Role::Patient));
        assert_eq!(realize(&lexicon, &clause, Frame::statement()).0, "___ eats ___");
    }

    #[test]
    fn test_inversion_moves_the_whole_auxiliary() {
        let mut layout = vec![
            Constituent::new(Part::Subject, words(&["the", "dog"])),
            Constituent::new(Part::Finite, words(&["has"])),
            Constituent::new(Part::Verb, words(&["eaten"])),
        ];
        let mut tracker = DerivationTracker::new();
        invert(&mut layout, &mut tracker);
        assert_eq!(flatten(&layout), words(&["has", "the", "dog", "eaten"]));

        // Already inverted: nothing happens
        invert(&mut layout, &mut tracker);
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_fronting_keeps_prepositions_attached() {
        let mut layout = vec![
            Constituent::new(Part::Subject, words(&["you"])),
            Constituent::new(Part::Verb, words(&["went"])),
            Constituent::new(Part::Argument(Role::Goal), words(&["to", "where"])),
        ];
        let mut tracker = DerivationTracker::new();
        front(&mut layout, 2, "object", &mut tracker);
        assert_eq!(flatten(&layout), words(&["to", "where", "you", "went"]));
        let DerivationStep::Syntax(step) = &tracker.steps()[0] else { panic!("expected a syntax step") };
        assert_eq!(step.moved.as_deref(), Some("to where"));
    }

    #[test]
    fn test_missing_predicate_is_a_placeholder() {
        let lexicon = Lexicon::empty();
        let (text, tracker) = realize(&lexicon, &Clause::default(), Frame::new(Mode::Question));
        assert_eq!(text, "___");
        assert!(tracker.is_empty());
    }
}
