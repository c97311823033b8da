use glossa_protocol::{
    Adverb, Aspect, Clause, CommonNoun, NounPhrase, Polarity, Predicate, Sentence, VerbPhrase,
};

fn call(name: &str, args: impl IntoIterator<Item = String>) -> String {
    let args: Vec<String> = args.into_iter().collect();
    format!("{}({})", name, args.join(", "))
}

fn or_missing<T>(value: Option<&T>, print: impl Fn(&T) -> String) -> String {
    value.map_or_else(|| "_".to_string(), print)
}

/// Prints a sentence in the compact notation. The output parses back to
/// the same AST.
pub fn to_notation(sentence: &Sentence) -> String {
    match sentence {
        Sentence::Conjunction { coordinator, clauses } => call(
            coordinator.as_str(),
            clauses.iter().map(|c| or_missing(c.as_ref(), clause)),
        ),
        Sentence::Conditional { condition, consequence } => call(
            "if",
            [or_missing(condition.as_deref(), clause), or_missing(consequence.as_deref(), clause)],
        ),
        other => {
            let body = other.clause().map(clause).unwrap_or_else(|| "_".to_string());
            call(other.kind().as_str(), [body])
        }
    }
}

fn clause(clause: &Clause) -> String {
    let paradigm = match clause.paradigm.aspect {
        Aspect::Simple => clause.paradigm.tense.as_str().to_string(),
        aspect => format!("{}+{}", clause.paradigm.tense.as_str(), aspect.as_str()),
    };
    let mut items = vec![paradigm];
    if clause.polarity == Polarity::Negative {
        items.push("neg".to_string());
    }
    if let Some(modal) = clause.modal {
        items.push(format!("modal:{}", modal.as_str()));
    }
    items.push(predicate(&clause.predicate));
    items.extend(clause.adverbs.iter().map(adverb));
    call("clause", items)
}

fn predicate(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Missing => "_".to_string(),
        Predicate::Verb(vp) => verb_phrase(vp),
        Predicate::Coordinated { coordinator, items } => {
            call(coordinator.as_str(), items.iter().map(|vp| or_missing(vp.as_ref(), verb_phrase)))
        }
    }
}

fn verb_phrase(vp: &VerbPhrase) -> String {
    if vp.lemma.is_empty() {
        return "_".to_string();
    }
    if vp.arguments.is_empty() {
        return vp.lemma.clone();
    }
    let args = vp
        .arguments
        .iter()
        .map(|a| format!("{}:{}", a.role.as_str(), or_missing(a.filler.as_ref(), noun_phrase)));
    call(&vp.lemma, args)
}

fn adverb(adverb: &Adverb) -> String {
    let lemma = if adverb.lemma.is_empty() { "_" } else { adverb.lemma.as_str() };
    match adverb.class {
        Some(class) => format!("adv:{}({})", class.as_str(), lemma),
        None => format!("adv:{}", lemma),
    }
}

fn noun_phrase(phrase: &NounPhrase) -> String {
    match phrase {
        NounPhrase::Common(noun) => common_noun(noun),
        NounPhrase::Pronoun { lemma } if lemma.is_empty() => "pron(_)".to_string(),
        NounPhrase::Pronoun { lemma } => format!("pron({})", lemma),
        NounPhrase::Literal { text } => literal(text),
        NounPhrase::Coordinated { coordinator, items } => {
            call(coordinator.as_str(), items.iter().map(|np| or_missing(np.as_ref(), noun_phrase)))
        }
    }
}

fn literal(text: &str) -> String {
    let bare = !text.is_empty() && !text.chars().any(|c| c.is_whitespace() || matches!(c, ',' | '(' | ')' | '"'));
    if bare {
        format!("'{}", text)
    } else {
        format!("'\"{}\"", text)
    }
}

fn common_noun(noun: &CommonNoun) -> String {
    let head = if noun.head.is_empty() { "_".to_string() } else { noun.head.clone() };
    let mut args = vec![head];
    args.extend(noun.determiners.iter().map(|d| d.as_str().to_string()));
    args.extend(noun.adjectives.iter().map(|a| format!("adj:{}", a)));
    args.extend(noun.modifiers.iter().map(|m| {
        let object = or_missing(m.object.as_ref(), noun_phrase);
        format!("pp:{}({})", m.preposition, object)
    }));
    call("np", args)
}
