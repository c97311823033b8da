//! The compact sentence notation: `wrapper(clause(tense+aspect, verb(role:np(...))))`.
//!
//! Parsing goes through an untyped [`Expr`] tree (nom) that is then lowered
//! into the AST; the printer is the inverse.

pub mod expr;
pub mod lower;
pub mod printer;

pub use expr::{parse_expr, Arg, Expr};
pub use printer::to_notation;

use glossa_protocol::Sentence;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("syntax error at offset {offset} near '{found}'")]
    Syntax { offset: usize, found: String },

    #[error("unknown sentence type '{0}'")]
    UnknownSentence(String),

    #[error("unknown role '{0}'")]
    UnknownRole(String),

    #[error("unknown determiner '{0}'")]
    UnknownDeterminer(String),

    #[error("unknown modal '{0}'")]
    UnknownModal(String),

    #[error("unknown adverb class '{0}'")]
    UnknownAdverbClass(String),

    #[error("'{name}': expected {expected}")]
    Shape { name: String, expected: &'static str },

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<NotationError>,
    },
}

pub fn parse_sentence(source: &str) -> Result<Sentence, NotationError> {
    lower::sentence(&parse_expr(source)?)
}

/// One sentence per line. Blank lines and `#` comments are skipped.
pub fn parse_document(source: &str) -> Result<Vec<Sentence>, NotationError> {
    source
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(i, line)| {
            parse_sentence(line).map_err(|e| NotationError::Line { line: i + 1, source: Box::new(e) })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::{
        Adverb, AdverbClass, Aspect, Clause, CommonNoun, Coordinator, Determiner, DeterminerConfig, ModalKind,
        NounPhrase, Paradigm, Polarity, Predicate, Role, Tense, VerbPhrase,
    };
    use proptest::prelude::*;

    #[test]
    fn test_parse_declarative() {
        let sentence = parse_sentence(
            "declarative(clause(past+perfect, neg, eat(agent:pron(he), patient:np(apple, a, adj:red)), adv:always))",
        )
        .unwrap();
        let Sentence::Declarative { clause } = sentence else { panic!("expected a declarative") };

        assert_eq!(clause.paradigm, Paradigm::new(Tense::Past, Aspect::Perfect));
        assert_eq!(clause.polarity, Polarity::Negative);
        assert_eq!(clause.adverbs, vec![Adverb::new("always")]);

        let Predicate::Verb(vp) = &clause.predicate else { panic!("expected a verb") };
        assert_eq!(vp.lemma, "eat");
        let apple = CommonNoun::new("apple")
            .with_determiners(DeterminerConfig::default().with(Determiner::A))
            .with_adjective("red");
        assert_eq!(vp.argument(Role::Patient).unwrap().filler, Some(apple.into()));
    }

    #[test]
    fn test_missing_pieces() {
        let sentence = parse_sentence("modal(clause(present, give(agent:pron(she), theme:_, recipient:'Maria)))").unwrap();
        let clause = sentence.clause().unwrap();
        assert_eq!(clause.modal, None);
        let Predicate::Verb(vp) = &clause.predicate else { panic!("expected a verb") };
        assert_eq!(vp.argument(Role::Theme).unwrap().filler, None);
        assert_eq!(vp.argument(Role::Recipient).unwrap().filler, Some(NounPhrase::literal("Maria")));

        let sentence = parse_sentence("and(clause(present, sleep), _)").unwrap();
        let Sentence::Conjunction { coordinator, clauses } = sentence else { panic!("expected a conjunction") };
        assert_eq!(coordinator, Coordinator::AND);
        assert!(clauses[1].is_none());
    }

    #[test]
    fn test_lowering_errors() {
        assert_eq!(
            parse_sentence("shout(clause(present, eat))"),
            Err(NotationError::UnknownSentence("shout".to_string()))
        );
        assert_eq!(
            parse_sentence("declarative(clause(present, eat(chef:pron(he))))"),
            Err(NotationError::UnknownRole("chef".to_string()))
        );
        assert_eq!(
            parse_sentence("declarative(clause(present, eat(agent:np(apple, lots))))"),
            Err(NotationError::UnknownDeterminer("lots".to_string()))
        );
        assert_eq!(
            parse_sentence("modal(clause(present, modal:ought, eat))"),
            Err(NotationError::UnknownModal("ought".to_string()))
        );
        assert!(matches!(
            parse_sentence("declarative(clause(past+sideways, eat))"),
            Err(NotationError::Shape { .. })
        ));
    }

    #[test]
    fn test_document_reports_line_numbers() {
        let doc = "# greetings\ndeclarative(clause(present, sleep))\n\nquestion(clause(present, eat(\n";
        let err = parse_document(doc).unwrap_err();
        assert!(matches!(err, NotationError::Line { line: 4, .. }));

        let doc = "declarative(clause(present, sleep))\nimperative(clause(present, run))";
        assert_eq!(parse_document(doc).unwrap().len(), 2);
    }

    #[test]
    fn test_printer_canonical_form() {
        let source = "wh(clause(future+perfectProgressive, modal:might, see(experiencer:pron(you), \
                      stimulus:np(child, the, adj:happy, pp:in(np(park, the)))), adv:manner(well), adv:today))";
        let sentence = parse_sentence(source).unwrap();
        assert_eq!(to_notation(&sentence), source);
    }

    #[test]
    fn test_round_trip_of_built_ast() {
        let clause = Clause::new(
            Paradigm::new(Tense::Present, Aspect::Progressive),
            VerbPhrase::new("eat")
                .arg(
                    Role::Agent,
                    NounPhrase::coordinated(
                        Coordinator::NEITHER_NOR,
                        vec![NounPhrase::literal("New York"), NounPhrase::pronoun("I")],
                    ),
                )
                .hole(Role::Patient),
        )
        .negated()
        .with_modal(ModalKind::Can)
        .with_adverb(Adverb::with_class("quickly", AdverbClass::Manner));
        let sentence = Sentence::Conditional { condition: Some(Box::new(clause.clone())), consequence: None };

        let printed = to_notation(&sentence);
        assert_eq!(parse_sentence(&printed).unwrap(), sentence);

        let sentence = Sentence::ChoiceQuestion { clause };
        assert_eq!(parse_sentence(&to_notation(&sentence)).unwrap(), sentence);
    }

    fn any_noun_phrase() -> impl Strategy<Value = NounPhrase> {
        let leaf = prop_oneof![
            "[a-z]{1,8}".prop_map(|w| NounPhrase::noun(&w)),
            "[a-z]{1,8}".prop_map(|w| NounPhrase::pronoun(&w)),
            "[A-Z][a-z]{0,6}( [A-Z][a-z]{0,6})?".prop_map(|w| NounPhrase::literal(&w)),
            (proptest::sample::select(Determiner::ALL.to_vec()), "[a-z]{1,8}").prop_map(|(d, w)| {
                CommonNoun::new(&w).with_determiners(DeterminerConfig::default().with(d)).into()
            }),
        ];
        leaf.prop_recursive(2, 8, 3, |inner| {
            proptest::collection::vec(proptest::option::of(inner), 1..4)
                .prop_map(|items| NounPhrase::Coordinated { coordinator: Coordinator::OR, items })
        })
    }

    proptest! {
        #[test]
        fn prop_printed_notation_parses_back(
            subject in any_noun_phrase(),
            object in proptest::option::of(any_noun_phrase()),
            paradigm in (0usize..12).prop_map(|i| Paradigm::ALL[i]),
        ) {
            let mut vp = VerbPhrase::new("see").arg(Role::Experiencer, subject);
            vp.arguments.push(glossa_protocol::Argument { role: Role::Stimulus, filler: object });
            let sentence = Sentence::YesNoQuestion { clause: Clause::new(paradigm, vp) };
            prop_assert_eq!(parse_sentence(&to_notation(&sentence)).unwrap(), sentence);
        }
    }
}
