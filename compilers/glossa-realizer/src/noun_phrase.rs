use glossa_morph::{indefinite_article, nouns, pronouns, ArticleReason};
use glossa_protocol::{
    Agreement, Case, CommonNoun, Conjunction, Determiner, DeterminerConfig, DeterminerSlot, LexFlags, NounPhrase,
    Number, PartOfSpeech, Person, StepType,
};
use glossa_solver::Resolver;
use tracing::warn;

use crate::config::RenderConfig;
use crate::coordination::coordinate;
use crate::error::GrammarError;
use crate::lexicon::Lexicon;
use crate::tracker::DerivationTracker;

/// Where a noun phrase sits in its clause; this fixes its case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position<'a> {
    Subject,
    Object { verb: &'a str },
    PrepObject { preposition: &'a str },
    /// An interrogative object that wh-movement will front.
    FrontedObject { verb: &'a str },
}

impl Position<'_> {
    fn case(&self) -> Case {
        match self {
            Position::Subject => Case::Nominative,
            _ => Case::Accusative,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPhrase {
    pub tokens: Vec<String>,
    pub agreement: Agreement,
}

/// Case forms of one pronoun, from the lexicon or the closed-class table.
struct PronounCase {
    nominative: String,
    accusative: String,
    agreement: Agreement,
    interrogative: bool,
}

pub struct NounPhraseRenderer<'a> {
    lexicon: &'a Lexicon,
    config: &'a RenderConfig,
}

impl<'a> NounPhraseRenderer<'a> {
    pub fn new(lexicon: &'a Lexicon, config: &'a RenderConfig) -> Self {
        Self { lexicon, config }
    }

    pub fn render(
        &self,
        phrase: Option<&NounPhrase>,
        position: Position<'_>,
        tracker: &mut DerivationTracker,
    ) -> Result<RenderedPhrase, GrammarError> {
        match phrase {
            None => Ok(self.placeholder()),
            Some(NounPhrase::Pronoun { lemma }) => Ok(self.pronoun(lemma, position, tracker)),
            Some(NounPhrase::Literal { text }) => {
                let tokens: Vec<String> = text.split_whitespace().map(str::to_string).collect();
                if tokens.is_empty() {
                    return Ok(self.placeholder());
                }
                Ok(RenderedPhrase { tokens, agreement: Agreement::THIRD_SINGULAR })
            }
            Some(NounPhrase::Common(noun)) => self.common(noun, tracker),
            Some(NounPhrase::Coordinated { coordinator, items }) => {
                let mut agreements = Vec::with_capacity(items.len());
                let tokens = coordinate(items, *coordinator, &self.config.placeholder, tracker, |item, tracker| {
                    let rendered = self.render(Some(item), position, tracker)?;
                    agreements.push(rendered.agreement);
                    Ok(rendered.tokens)
                })?;
                let agreement = match coordinator.conjunction {
                    Conjunction::And => {
                        let person = agreements.iter().map(|a| a.person).min().unwrap_or(Person::Third);
                        Agreement::new(person, Number::Plural)
                    }
                    // "or"/"nor" agree with the nearest conjunct; a missing one counts as 3sg
                    Conjunction::Or => match items.last() {
                        Some(Some(_)) => agreements.last().copied().unwrap_or_default(),
                        _ => Agreement::THIRD_SINGULAR,
                    },
                };
                Ok(RenderedPhrase { tokens, agreement })
            }
        }
    }

    /// True when the phrase is headed by "who", "what" and the like.
    pub fn is_interrogative(&self, phrase: &NounPhrase) -> bool {
        match phrase {
            NounPhrase::Pronoun { lemma } => self.pronoun_case(lemma).is_some_and(|p| p.interrogative),
            _ => false,
        }
    }

    fn placeholder(&self) -> RenderedPhrase {
        RenderedPhrase { tokens: vec![self.config.placeholder.clone()], agreement: Agreement::THIRD_SINGULAR }
    }

    fn pronoun_case(&self, lemma: &str) -> Option<PronounCase> {
        if let Some(entry) = self.lexicon.lookup_pos(lemma, PartOfSpeech::Pronoun) {
            let forms = entry.pronoun()?;
            return Some(PronounCase {
                nominative: entry.lemma.clone(),
                accusative: forms.objective.clone(),
                agreement: Agreement::new(forms.person, forms.number),
                interrogative: entry.flags.contains(LexFlags::INTERROGATIVE),
            });
        }
        pronouns::lookup(lemma).map(|info| PronounCase {
            nominative: info.nominative.to_string(),
            accusative: info.accusative.to_string(),
            agreement: info.agreement,
            interrogative: info.interrogative,
        })
    }

    fn pronoun(&self, lemma: &str, position: Position<'_>, tracker: &mut DerivationTracker) -> RenderedPhrase {
        if lemma.trim().is_empty() {
            return self.placeholder();
        }
        let Some(pronoun) = self.pronoun_case(lemma) else {
            // Unknown pronoun: the raw lemma, unlogged
            return RenderedPhrase { tokens: vec![lemma.to_string()], agreement: Agreement::THIRD_SINGULAR };
        };

        let surface = match position.case() {
            Case::Nominative => pronoun.nominative.clone(),
            _ => pronoun.accusative.clone(),
        };
        let (rule, trigger) = match position {
            Position::Subject => ("nominative", "subject position".to_string()),
            Position::Object { verb } => ("objective", format!("object of '{}'", verb)),
            Position::PrepObject { preposition } => ("objective", format!("object of preposition '{}'", preposition)),
            Position::FrontedObject { .. } if pronoun.interrogative => {
                ("whom", "interrogative fronted from object position".to_string())
            }
            Position::FrontedObject { verb } => ("objective", format!("object of '{}'", verb)),
        };
        tracker.morphology(StepType::Case, rule, lemma, &surface, &trigger);
        RenderedPhrase { tokens: vec![surface], agreement: pronoun.agreement }
    }

    /// Drops values that clash with a higher-ranked slot. Committed configs
    /// are always valid; this only guards hand-built ASTs.
    fn sanitize(&self, determiners: DeterminerConfig) -> DeterminerConfig {
        let resolver = Resolver::standard();
        if resolver.is_valid(&determiners) {
            return determiners;
        }
        let mut by_rank = DeterminerSlot::ALL;
        by_rank.sort_by_key(|s| std::cmp::Reverse(s.rank()));
        let mut clean = DeterminerConfig::default();
        for slot in by_rank {
            if let Some(value) = determiners.get(slot) {
                clean = resolver.commit(slot, Some(value), &clean).selections;
            }
        }
        warn!(?determiners, ?clean, "conflicting determiners dropped");
        clean
    }

    fn common(&self, noun: &CommonNoun, tracker: &mut DerivationTracker) -> Result<RenderedPhrase, GrammarError> {
        let head = noun.head.trim();
        if head.is_empty() {
            return Ok(self.placeholder());
        }

        let entry = self.lexicon.lookup(head);
        let flags = self.lexicon.flags(head);
        let forms = self.lexicon.lookup_pos(head, PartOfSpeech::Noun).and_then(|e| e.noun());
        let mut tokens: Vec<String> = Vec::new();

        // Predicative adjectives ("is happy") and proper names take no determiners
        let adjective = entry.is_some_and(|e| e.kind.pos() == PartOfSpeech::Adjective) && forms.is_none();
        let proper = flags.contains(LexFlags::PROPER) || (entry.is_none() && head.starts_with(char::is_uppercase));
        if adjective || proper {
            if !noun.determiners.is_empty() {
                tracing::debug!(head, "determiners ignored on a bare head");
            }
            tokens.extend(noun.adjectives.iter().cloned());
            tokens.push(head.to_string());
            self.modifiers(noun, &mut tokens, tracker)?;
            return Ok(RenderedPhrase { tokens, agreement: Agreement::THIRD_SINGULAR });
        }

        let mut determiners = self.sanitize(noun.determiners);
        let uncountable = flags.contains(LexFlags::UNCOUNTABLE) || determiners.is_uncountable();
        let plural_only = flags.contains(LexFlags::PLURAL_ONLY);
        let plural = plural_only || (!uncountable && determiners.requires_plural());

        // 1. Number
        let mut head_form = head.to_string();
        if plural && !plural_only {
            let (form, irregular) = nouns::plural(head, forms, flags);
            let trigger = match determiners.iter().find(Determiner::forces_plural) {
                Some(Determiner::Plural) | None => "plural marker".to_string(),
                Some(d) => format!("determiner '{}' requires a plural noun", d),
            };
            let rule = if irregular { "irregular-plural" } else { "plural" };
            tracker.morphology(StepType::Number, rule, head, &form, &trigger);
            head_form = form;
        }

        // 2. A bare singular count noun gets the indefinite article
        let bare = determiners.central.is_none()
            && determiners.post.is_none()
            && !matches!(determiners.pre, Some(Determiner::All | Determiner::Both));
        if bare && !plural && !uncountable {
            determiners.central = Some(Determiner::A);
            let rest = self.tail(noun, &head_form);
            tracker.morphology(
                StepType::Article,
                "default-indefinite",
                &rest,
                &format!("a {}", rest),
                "singular count noun needs a determiner",
            );
        }

        // 3. Determiner words, choosing a/an from the word that follows
        for slot in [DeterminerSlot::Pre, DeterminerSlot::Central, DeterminerSlot::Post] {
            let Some(value) = determiners.get(slot) else { continue };
            if value != Determiner::A {
                tokens.push(value.as_str().to_string());
                continue;
            }
            let next = determiners
                .post
                .map(|d| d.as_str().to_string())
                .or_else(|| noun.adjectives.first().cloned())
                .unwrap_or_else(|| head_form.clone());
            let (article, reason) = indefinite_article(&next, self.lexicon.flags(&next));
            // A lexicon override is logged against what the spelling alone would give
            let (heuristic, _) = indefinite_article(&next, LexFlags::empty());
            let overridden =
                matches!(reason, ArticleReason::SilentH | ArticleReason::SoundedU) && heuristic != article;
            if article != "a" || overridden {
                let from = if overridden { heuristic } else { "a" };
                let trigger = match reason {
                    ArticleReason::SilentH => format!("the 'h' of '{}' is silent", next),
                    ArticleReason::SoundedU => format!("'{}' begins with a 'y' sound", next),
                    _ => format!("'{}' begins with a vowel sound", next),
                };
                tracker.morphology(
                    StepType::Article,
                    reason.as_str(),
                    &format!("{} {}", from, next),
                    &format!("{} {}", article, next),
                    &trigger,
                );
            }
            tokens.push(article.to_string());
        }

        tokens.extend(noun.adjectives.iter().cloned());
        tokens.push(head_form);
        self.modifiers(noun, &mut tokens, tracker)?;

        let number = if plural { Number::Plural } else { Number::Singular };
        Ok(RenderedPhrase { tokens, agreement: Agreement::new(Person::Third, number) })
    }

    /// Adjectives and head, the part a determiner attaches to.
    fn tail(&self, noun: &CommonNoun, head_form: &str) -> String {
        let mut words: Vec<&str> = noun.adjectives.iter().map(String::as_str).collect();
        words.push(head_form);
        words.join(" ")
    }

    fn modifiers(
        &self,
        noun: &CommonNoun,
        tokens: &mut Vec<String>,
        tracker: &mut DerivationTracker,
    ) -> Result<(), GrammarError> {
        for modifier in &noun.modifiers {
            tokens.push(modifier.preposition.clone());
            let object = self.render(
                modifier.object.as_ref(),
                Position::PrepObject { preposition: &modifier.preposition },
                tracker,
            )?;
            tokens.extend(object.tokens);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::{Coordinator, DerivationStep};

    fn render_with(lexicon: &Lexicon, phrase: NounPhrase, position: Position<'_>) -> (RenderedPhrase, DerivationTracker) {
        let config = RenderConfig::default();
        let mut tracker = DerivationTracker::new();
        let rendered = NounPhraseRenderer::new(lexicon, &config)
            .render(Some(&phrase), position, &mut tracker)
            .unwrap();
        (rendered, tracker)
    }

    fn text(phrase: NounPhrase) -> String {
        let lexicon = Lexicon::builtin().unwrap();
        render_with(&lexicon, phrase, Position::Subject).0.tokens.join(" ")
    }

    fn noun(head: &str, determiners: &[Determiner]) -> NounPhrase {
        let config = determiners.iter().fold(DeterminerConfig::default(), |c, d| c.with(*d));
        CommonNoun::new(head).with_determiners(config).into()
    }

    #[test]
    fn test_article_selection() {
        assert_eq!(text(noun("apple", &[Determiner::A])), "an apple");
        assert_eq!(text(noun("university", &[Determiner::A])), "a university");
        assert_eq!(text(noun("hour", &[Determiner::A])), "an hour");
        assert_eq!(text(noun("banana", &[Determiner::A])), "a banana");
    }

    #[test]
    fn test_article_follows_the_next_word() {
        let phrase: NounPhrase = CommonNoun::new("apple")
            .with_determiners(DeterminerConfig::default().with(Determiner::A))
            .with_adjective("red")
            .into();
        assert_eq!(text(phrase), "a red apple");

        let phrase: NounPhrase = CommonNoun::new("man")
            .with_determiners(DeterminerConfig::default().with(Determiner::A))
            .with_adjective("honest")
            .into();
        assert_eq!(text(phrase), "an honest man");
    }

    #[test]
    fn test_article_logged_when_not_the_default() {
        let lexicon = Lexicon::builtin().unwrap();
        let (_, tracker) = render_with(&lexicon, noun("banana", &[Determiner::A]), Position::Subject);
        assert!(tracker.is_empty());
        let (_, tracker) = render_with(&lexicon, noun("apple", &[Determiner::A]), Position::Subject);
        assert_eq!(tracker.steps()[0].rule(), "vowel-sound");

        // Lexicon overrides are always on record, even when the result is "a"
        let (rendered, tracker) = render_with(&lexicon, noun("university", &[Determiner::A]), Position::Subject);
        assert_eq!(rendered.tokens.join(" "), "a university");
        let DerivationStep::Morphology(step) = &tracker.steps()[0] else { panic!("expected a morphology step") };
        assert_eq!(step.rule, "sounded-u");
        assert_eq!((step.before.as_str(), step.after.as_str()), ("an university", "a university"));

        let (_, tracker) = render_with(&lexicon, noun("hour", &[Determiner::A]), Position::Subject);
        assert_eq!(tracker.steps()[0].rule(), "silent-h");
    }

    #[test]
    fn test_bare_singular_gets_default_article() {
        let lexicon = Lexicon::builtin().unwrap();
        let (rendered, tracker) = render_with(&lexicon, NounPhrase::noun("apple"), Position::Subject);
        assert_eq!(rendered.tokens.join(" "), "an apple");
        let rules: Vec<&str> = tracker.steps().iter().map(DerivationStep::rule).collect();
        assert_eq!(rules, vec!["default-indefinite", "vowel-sound"]);

        // Uncountable and plural-generic heads stay bare
        assert_eq!(text(NounPhrase::noun("water")), "water");
        assert_eq!(text(noun("apple", &[Determiner::Plural])), "apples");
        assert_eq!(text(noun("apple", &[Determiner::Half])), "half an apple");
    }

    #[test]
    fn test_number_agreement() {
        assert_eq!(text(noun("child", &[Determiner::These])), "these children");
        assert_eq!(text(noun("box", &[Determiner::The, Determiner::Many])), "the many boxes");
        assert_eq!(text(noun("scissors", &[Determiner::The])), "the scissors");

        let lexicon = Lexicon::builtin().unwrap();
        let (rendered, tracker) = render_with(&lexicon, noun("dog", &[Determiner::Two]), Position::Subject);
        assert_eq!(rendered.agreement, Agreement::THIRD_PLURAL);
        let DerivationStep::Morphology(step) = &tracker.steps()[0] else { panic!("expected morphology") };
        assert_eq!(step.trigger, "determiner 'two' requires a plural noun");
    }

    #[test]
    fn test_proper_names_take_no_determiners() {
        assert_eq!(text(noun("Paris", &[Determiner::The])), "Paris");
        assert_eq!(text(NounPhrase::noun("Atlantis")), "Atlantis");
    }

    #[test]
    fn test_objective_case_is_logged() {
        let lexicon = Lexicon::empty();
        let (rendered, tracker) = render_with(&lexicon, NounPhrase::pronoun("he"), Position::Object { verb: "see" });
        assert_eq!(rendered.tokens, vec!["him".to_string()]);
        let DerivationStep::Morphology(step) = &tracker.steps()[0] else { panic!("expected morphology") };
        assert_eq!(step.rule, "objective");
        assert_eq!(step.trigger, "object of 'see'");

        let (rendered, tracker) =
            render_with(&lexicon, NounPhrase::pronoun("who"), Position::FrontedObject { verb: "see" });
        assert_eq!(rendered.tokens, vec!["whom".to_string()]);
        assert_eq!(tracker.steps()[0].rule(), "whom");

        // Subjects keep the nominative and log nothing
        let (rendered, tracker) = render_with(&lexicon, NounPhrase::pronoun("they"), Position::Subject);
        assert_eq!(rendered.agreement, Agreement::THIRD_PLURAL);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_coordinated_agreement() {
        let lexicon = Lexicon::builtin().unwrap();
        let pair = NounPhrase::coordinated(Coordinator::AND, vec![NounPhrase::pronoun("I"), NounPhrase::literal("John")]);
        let (rendered, _) = render_with(&lexicon, pair, Position::Subject);
        assert_eq!(rendered.tokens.join(" "), "I and John");
        assert_eq!(rendered.agreement, Agreement::new(Person::First, Number::Plural));

        let either = NounPhrase::coordinated(
            Coordinator::OR,
            vec![noun("dog", &[Determiner::Plural]), noun("cat", &[Determiner::The])],
        );
        let (rendered, _) = render_with(&lexicon, either, Position::Subject);
        assert_eq!(rendered.tokens.join(" "), "dogs or the cat");
        assert_eq!(rendered.agreement, Agreement::THIRD_SINGULAR);
    }

    #[test]
    fn test_prepositional_modifier() {
        let phrase: NounPhrase = CommonNoun::new("book")
            .with_determiners(DeterminerConfig::default().with(Determiner::The))
            .with_modifier("for", NounPhrase::pronoun("she"))
            .into();
        assert_eq!(text(phrase), "the book for her");
    }

    #[test]
    fn test_conflicting_determiners_are_dropped() {
        // Hand-built config: "every" outranks the plural marker
        let config = DeterminerConfig { central: Some(Determiner::Every), number: Some(Determiner::Plural), ..Default::default() };
        assert_eq!(text(CommonNoun::new("apple").with_determiners(config).into()), "every apple");
    }
}
