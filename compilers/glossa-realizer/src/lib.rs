//! AST to English realization with a step-by-step derivation log.

pub mod clause;
pub mod config;
pub mod conjugation;
pub mod coordination;
pub mod diff;
pub mod error;
pub mod lexicon;
pub mod log;
pub mod noun_phrase;
pub mod tracker;

pub use clause::{check_valency, ClauseRealizer, Frame, Mode};
pub use config::RenderConfig;
pub use conjugation::{Conjugation, Conjugator, ModalSlot, VerbChain};
pub use diff::{diff, diff_all, ChangeKind, StepChange, StepKey};
pub use error::{GrammarError, LexiconError};
pub use lexicon::Lexicon;
pub use log::LogEntry;
pub use tracker::DerivationTracker;

use glossa_protocol::{Clause, Derivation, Operation, Predicate, Sentence, StepType};
use serde::Serialize;
use tracing::{info_span, warn};

use crate::coordination::coordinate;

/// Surface text of one sentence and the derivation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSentence {
    pub text: String,
    pub derivation: Derivation,
}

/// Renders sentences against a shared, read-only lexicon. Every call builds
/// a fresh tracker, so rendering the same AST twice gives identical output.
pub struct Realizer<'a> {
    lexicon: &'a Lexicon,
    config: RenderConfig,
}

impl<'a> Realizer<'a> {
    pub fn new(lexicon: &'a Lexicon) -> Self {
        Self::with_config(lexicon, RenderConfig::default())
    }

    pub fn with_config(lexicon: &'a Lexicon, config: RenderConfig) -> Self {
        Self { lexicon, config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn render(&self, sentence: &Sentence) -> Result<RenderedSentence, GrammarError> {
        let span = info_span!("render", kind = sentence.kind().as_str());
        let _guard = span.enter();

        if self.config.strict {
            if let Some(error) = self.check(sentence).into_iter().next() {
                return Err(error);
            }
        }

        let mut tracker = DerivationTracker::new();
        let clauses = ClauseRealizer::new(self.lexicon, &self.config);
        let tokens = self.tokens(sentence, &clauses, &mut tracker)?;
        let text = punctuate(tokens, sentence.kind().terminator(), &self.config.placeholder);

        let input = glossa_notation::to_notation(sentence);
        Ok(RenderedSentence { text: text.clone(), derivation: tracker.finish(input, text) })
    }

    /// Renders every sentence. A sentence that fails becomes the incomplete
    /// marker with an empty derivation; the others are unaffected.
    pub fn render_all(&self, sentences: &[Sentence]) -> Vec<RenderedSentence> {
        sentences
            .iter()
            .enumerate()
            .map(|(index, sentence)| match self.render(sentence) {
                Ok(rendered) => rendered,
                Err(error) => {
                    warn!(index, %error, "sentence isolated");
                    let marker = self.config.incomplete_marker.clone();
                    RenderedSentence {
                        text: marker.clone(),
                        derivation: Derivation {
                            input: glossa_notation::to_notation(sentence),
                            output: marker,
                            steps: Vec::new(),
                        },
                    }
                }
            })
            .collect()
    }

    /// Valency violations in every verb phrase of `sentence`.
    pub fn check(&self, sentence: &Sentence) -> Vec<GrammarError> {
        clauses(sentence)
            .into_iter()
            .flat_map(|clause| match &clause.predicate {
                Predicate::Missing => Vec::new(),
                Predicate::Verb(vp) => vec![vp],
                Predicate::Coordinated { items, .. } => items.iter().flatten().collect(),
            })
            .filter_map(|vp| check_valency(vp, self.lexicon).err())
            .collect()
    }

    fn tokens(
        &self,
        sentence: &Sentence,
        clauses: &ClauseRealizer<'_>,
        tracker: &mut DerivationTracker,
    ) -> Result<Vec<String>, GrammarError> {
        match sentence {
            Sentence::Declarative { clause } | Sentence::Fact { clause } => {
                clauses.realize(clause, Frame::statement(), tracker)
            }
            Sentence::YesNoQuestion { clause } => clauses.realize(clause, Frame::new(Mode::Question), tracker),
            Sentence::WhQuestion { clause } => clauses.realize(clause, Frame::new(Mode::Wh), tracker),
            Sentence::ChoiceQuestion { clause } => clauses.realize(clause, Frame::new(Mode::Choice), tracker),
            Sentence::Imperative { clause } => clauses.realize(clause, Frame::new(Mode::Imperative), tracker),
            Sentence::Modal { clause } => {
                let frame = Frame { modal_required: true, ..Frame::statement() };
                clauses.realize(clause, frame, tracker)
            }
            Sentence::NegatedModal { clause } => {
                let frame = Frame { modal_required: true, negative: true, ..Frame::statement() };
                clauses.realize(clause, frame, tracker)
            }
            Sentence::Conjunction { coordinator, clauses: items } => {
                coordinate(items, *coordinator, &self.config.placeholder, tracker, |clause, tracker| {
                    clauses.realize(clause, Frame::statement(), tracker)
                })
            }
            Sentence::Conditional { condition, consequence } => {
                let mut condition = self.optional_clause(condition.as_deref(), clauses, tracker)?;
                let consequence = self.optional_clause(consequence.as_deref(), clauses, tracker)?;
                let before: Vec<String> = condition.iter().chain(&consequence).cloned().collect();
                if let Some(last) = condition.last_mut() {
                    last.push(',');
                }
                let mut tokens = vec!["if".to_string()];
                tokens.extend(condition);
                tokens.extend(consequence);
                tracker.syntax(StepType::Conditional, "if-clause", Operation::Join, Some("if"), &before, &tokens);
                Ok(tokens)
            }
        }
    }

    fn optional_clause(
        &self,
        clause: Option<&Clause>,
        clauses: &ClauseRealizer<'_>,
        tracker: &mut DerivationTracker,
    ) -> Result<Vec<String>, GrammarError> {
        match clause {
            Some(clause) => clauses.realize(clause, Frame::statement(), tracker),
            None => Ok(vec![self.config.placeholder.clone()]),
        }
    }
}

fn clauses(sentence: &Sentence) -> Vec<&Clause> {
    match sentence {
        Sentence::Conjunction { clauses, .. } => clauses.iter().flatten().collect(),
        Sentence::Conditional { condition, consequence } => {
            condition.iter().chain(consequence.iter()).map(|c| &**c).collect()
        }
        other => other.clause().into_iter().collect(),
    }
}

/// Capitalizes the first token and closes the sentence.
/// "can" directly followed by "not" is written as one word. Inverted
/// questions ("Can he not eat?") keep them apart.
fn fuse_cannot(tokens: Vec<String>) -> Vec<String> {
    let mut fused: Vec<String> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match fused.last_mut() {
            Some(last) if token == "not" && *last == "can" => last.push_str("not"),
            _ => fused.push(token),
        }
    }
    fused
}

fn punctuate(tokens: Vec<String>, terminator: char, placeholder: &str) -> String {
    let mut tokens = fuse_cannot(tokens);
    if tokens.is_empty() {
        tokens.push(placeholder.to_string());
    }
    tokens[0] = glossa_morph::capitalize(&tokens[0]);
    let mut text = tokens.join(" ");
    text.push(terminator);
    text
}
