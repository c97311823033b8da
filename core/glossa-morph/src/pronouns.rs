use glossa_protocol::{Agreement, Case, Number, Person};

/// A closed-class pronoun known without any lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PronounInfo {
    pub nominative: &'static str,
    pub accusative: &'static str,
    pub genitive: &'static str,
    pub agreement: Agreement,
    pub interrogative: bool,
}

macro_rules! pronoun {
    ($nom:expr, $acc:expr, $gen:expr, $person:ident, $number:ident) => {
        pronoun!($nom, $acc, $gen, $person, $number, false)
    };
    ($nom:expr, $acc:expr, $gen:expr, $person:ident, $number:ident, $wh:expr) => {
        PronounInfo {
            nominative: $nom,
            accusative: $acc,
            genitive: $gen,
            agreement: Agreement::new(Person::$person, Number::$number),
            interrogative: $wh,
        }
    };
}

const PRONOUNS: &[PronounInfo] = &[
    pronoun!("I", "me", "my", First, Singular),
    pronoun!("you", "you", "your", Second, Singular),
    pronoun!("he", "him", "his", Third, Singular),
    pronoun!("she", "her", "her", Third, Singular),
    pronoun!("it", "it", "its", Third, Singular),
    pronoun!("we", "us", "our", First, Plural),
    pronoun!("they", "them", "their", Third, Plural),
    pronoun!("who", "whom", "whose", Third, Singular, true),
    pronoun!("what", "what", "what", Third, Singular, true),
    pronoun!("which", "which", "which", Third, Singular, true),
    pronoun!("someone", "someone", "someone's", Third, Singular),
    pronoun!("something", "something", "something's", Third, Singular),
    pronoun!("everyone", "everyone", "everyone's", Third, Singular),
    pronoun!("nobody", "nobody", "nobody's", Third, Singular),
];

/// Looks up a pronoun by any of its case forms ("me" finds "I").
pub fn lookup(word: &str) -> Option<&'static PronounInfo> {
    PRONOUNS.iter().find(|p| {
        p.nominative.eq_ignore_ascii_case(word)
            || p.accusative.eq_ignore_ascii_case(word)
            || (p.genitive.eq_ignore_ascii_case(word) && !p.interrogative)
    })
}

impl PronounInfo {
    pub fn form(&self, case: Case) -> &'static str {
        match case {
            Case::Nominative => self.nominative,
            Case::Accusative => self.accusative,
            Case::Genitive => self.genitive,
        }
    }
}
