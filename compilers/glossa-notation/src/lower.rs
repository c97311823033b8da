//! Typed lowering of the parse tree into the sentence AST.

use glossa_protocol::{
    Adverb, AdverbClass, Argument, Aspect, Clause, CommonNoun, Coordinator, Determiner, ModalKind, NounPhrase,
    Paradigm, Polarity, Predicate, PrepModifier, Role, Sentence, Tense, VerbPhrase,
};

use crate::expr::{Arg, Expr};
use crate::NotationError;

fn shape(name: &str, expected: &'static str) -> NotationError {
    NotationError::Shape { name: name.to_string(), expected }
}

fn describe(expr: &Expr) -> &str {
    match expr {
        Expr::Missing => "_",
        Expr::Atom(word) => word,
        Expr::Literal(text) => text,
        Expr::Call { name, .. } => name,
    }
}

fn optional<T>(
    expr: &Expr,
    lower: impl Fn(&Expr) -> Result<T, NotationError>,
) -> Result<Option<T>, NotationError> {
    match expr {
        Expr::Missing => Ok(None),
        other => lower(other).map(Some),
    }
}

fn atom<'e>(expr: &'e Expr, context: &str) -> Result<&'e str, NotationError> {
    match expr {
        Expr::Atom(word) => Ok(word),
        _ => Err(shape(context, "a bare word")),
    }
}

pub fn sentence(expr: &Expr) -> Result<Sentence, NotationError> {
    let Expr::Call { name, args } = expr else {
        return Err(shape(describe(expr), "a sentence such as declarative(clause(...))"));
    };

    if let Some(coordinator) = Coordinator::parse(name) {
        let clauses = args
            .iter()
            .map(|arg| optional(&arg.value, clause))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Sentence::Conjunction { coordinator, clauses });
    }
    if name == "if" {
        let [condition, consequence] = args.as_slice() else {
            return Err(shape(name, "a condition and a consequence"));
        };
        return Ok(Sentence::Conditional {
            condition: optional(&condition.value, clause)?.map(Box::new),
            consequence: optional(&consequence.value, clause)?.map(Box::new),
        });
    }

    let [arg] = args.as_slice() else {
        return Err(shape(name, "exactly one clause"));
    };
    let clause = optional(&arg.value, clause)?.unwrap_or_default();
    let sentence = match name.as_str() {
        "declarative" => Sentence::Declarative { clause },
        "question" => Sentence::YesNoQuestion { clause },
        "wh" => Sentence::WhQuestion { clause },
        "choice" => Sentence::ChoiceQuestion { clause },
        "imperative" => Sentence::Imperative { clause },
        "modal" => Sentence::Modal { clause },
        "not-modal" => Sentence::NegatedModal { clause },
        "fact" => Sentence::Fact { clause },
        other => return Err(NotationError::UnknownSentence(other.to_string())),
    };
    Ok(sentence)
}

/// `past`, `present+progressive`, `future+perfectProgressive`. `None` when
/// the word does not start with a tense name.
fn paradigm(word: &str) -> Result<Option<Paradigm>, NotationError> {
    let (tense, aspect) = match word.split_once('+') {
        Some((tense, aspect)) => (tense, Some(aspect)),
        None => (word, None),
    };
    let Some(tense) = Tense::ALL.into_iter().find(|t| t.as_str() == tense) else {
        return Ok(None);
    };
    let aspect = match aspect {
        None => Aspect::Simple,
        Some(name) => Aspect::ALL
            .into_iter()
            .find(|a| a.as_str() == name)
            .ok_or_else(|| shape(word, "tense+aspect"))?,
    };
    Ok(Some(Paradigm::new(tense, aspect)))
}

fn clause(expr: &Expr) -> Result<Clause, NotationError> {
    let Expr::Call { name, args } = expr else {
        return Err(shape(describe(expr), "clause(...)"));
    };
    if name != "clause" {
        return Err(shape(name, "clause(...)"));
    }

    let mut clause = Clause::default();
    for Arg { key, value } in args {
        match (key.as_deref(), value) {
            (Some("modal"), value) => {
                let word = atom(value, "modal")?;
                let modal = ModalKind::parse(word).ok_or_else(|| NotationError::UnknownModal(word.to_string()))?;
                clause.modal = Some(modal);
            }
            (Some("adv"), value) => clause.adverbs.push(adverb(value)?),
            (Some(key), _) => return Err(shape(key, "modal: or adv: inside clause(...)")),
            (None, Expr::Atom(word)) if word == "neg" => clause.polarity = Polarity::Negative,
            (None, Expr::Atom(word)) => match paradigm(word)? {
                Some(paradigm) => clause.paradigm = paradigm,
                None => clause.predicate = Predicate::Verb(VerbPhrase::new(word)),
            },
            (None, Expr::Missing) => clause.predicate = Predicate::Missing,
            (None, value) => clause.predicate = predicate(value)?,
        }
    }
    Ok(clause)
}

/// `adv:always`, `adv:manner(well)`, `adv:_`.
fn adverb(expr: &Expr) -> Result<Adverb, NotationError> {
    match expr {
        Expr::Missing => Ok(Adverb::new("")),
        Expr::Atom(word) => Ok(Adverb::new(word)),
        Expr::Call { name, args } => {
            let class = AdverbClass::parse(name).ok_or_else(|| NotationError::UnknownAdverbClass(name.clone()))?;
            let [arg] = args.as_slice() else {
                return Err(shape(name, "one adverb"));
            };
            Ok(Adverb::with_class(atom(&arg.value, name)?, class))
        }
        Expr::Literal(text) => Err(shape(text, "an adverb")),
    }
}

fn predicate(expr: &Expr) -> Result<Predicate, NotationError> {
    if let Expr::Call { name, args } = expr {
        if let Some(coordinator) = Coordinator::parse(name) {
            let items = args
                .iter()
                .map(|arg| optional(&arg.value, verb_phrase))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Predicate::Coordinated { coordinator, items });
        }
    }
    verb_phrase(expr).map(Predicate::Verb)
}

fn verb_phrase(expr: &Expr) -> Result<VerbPhrase, NotationError> {
    let (lemma, args) = match expr {
        Expr::Atom(lemma) => (lemma, &[][..]),
        Expr::Call { name, args } => (name, args.as_slice()),
        other => return Err(shape(describe(other), "a verb phrase")),
    };

    let mut vp = VerbPhrase::new(lemma);
    for Arg { key, value } in args {
        let Some(key) = key else {
            return Err(shape(describe(value), "role:value"));
        };
        let role = Role::parse(key).ok_or_else(|| NotationError::UnknownRole(key.clone()))?;
        vp.arguments.push(Argument { role, filler: optional(value, noun_phrase)? });
    }
    Ok(vp)
}

fn noun_phrase(expr: &Expr) -> Result<NounPhrase, NotationError> {
    match expr {
        Expr::Literal(text) => Ok(NounPhrase::literal(text)),
        Expr::Atom(word) => Ok(NounPhrase::noun(word)),
        Expr::Missing => Err(shape("_", "a noun phrase")),
        Expr::Call { name, args } => {
            if let Some(coordinator) = Coordinator::parse(name) {
                let items = args
                    .iter()
                    .map(|arg| optional(&arg.value, noun_phrase))
                    .collect::<Result<Vec<_>, _>>()?;
                return Ok(NounPhrase::Coordinated { coordinator, items });
            }
            match name.as_str() {
                "pron" => {
                    let [arg] = args.as_slice() else {
                        return Err(shape(name, "one pronoun"));
                    };
                    match &arg.value {
                        Expr::Missing => Ok(NounPhrase::pronoun("")),
                        value => Ok(NounPhrase::pronoun(atom(value, name)?)),
                    }
                }
                "np" => common_noun(args).map(NounPhrase::Common),
                other => Err(shape(other, "np(...), pron(...), a literal or a coordination")),
            }
        }
    }
}

/// `np(head, determiner..., adj:word..., pp:preposition(object)...)`
fn common_noun(args: &[Arg]) -> Result<CommonNoun, NotationError> {
    let Some((head, rest)) = args.split_first() else {
        return Err(shape("np", "a head noun"));
    };
    let mut noun = match &head.value {
        Expr::Missing => CommonNoun::new(""),
        value => CommonNoun::new(atom(value, "np")?),
    };

    for Arg { key, value } in rest {
        match (key.as_deref(), value) {
            (None, value) => {
                let word = atom(value, "np")?;
                let determiner =
                    Determiner::parse(word).ok_or_else(|| NotationError::UnknownDeterminer(word.to_string()))?;
                noun.determiners = noun.determiners.with(determiner);
            }
            (Some("adj"), value) => noun.adjectives.push(atom(value, "adj")?.to_string()),
            (Some("pp"), Expr::Call { name, args }) => {
                let object = match args.as_slice() {
                    [] => None,
                    [arg] => optional(&arg.value, noun_phrase)?,
                    _ => return Err(shape(name, "one prepositional object")),
                };
                noun.modifiers.push(PrepModifier { preposition: name.clone(), object });
            }
            (Some("pp"), other) => return Err(shape(describe(other), "pp:preposition(object)")),
            (Some(key), _) => return Err(shape(key, "adj: or pp: inside np(...)")),
        }
    }
    Ok(noun)
}
