use alloc::format;
use alloc::string::{String, ToString};

use glossa_protocol::{Agreement, LexFlags, Number, Person, VerbForms};

use crate::spelling::{double_final, ends_with_consonant_y, is_vowel, E_DROP_EXEMPT};
use crate::MorphError;

/// Inflected shapes of a verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerbForm {
    Base,
    ThirdSingular,
    Past,
    PastParticiple,
    PresentParticiple,
}

/// (lemma, past, past participle) for verbs whose past forms are not `-ed`.
const IRREGULAR: &[(&str, &str, &str)] = &[
    ("be", "was", "been"),
    ("have", "had", "had"),
    ("do", "did", "done"),
    ("go", "went", "gone"),
    ("eat", "ate", "eaten"),
    ("see", "saw", "seen"),
    ("give", "gave", "given"),
    ("take", "took", "taken"),
    ("make", "made", "made"),
    ("come", "came", "come"),
    ("become", "became", "become"),
    ("know", "knew", "known"),
    ("write", "wrote", "written"),
    ("run", "ran", "run"),
    ("read", "read", "read"),
    ("buy", "bought", "bought"),
    ("bring", "brought", "brought"),
    ("think", "thought", "thought"),
    ("teach", "taught", "taught"),
    ("catch", "caught", "caught"),
    ("find", "found", "found"),
    ("get", "got", "got"),
    ("sleep", "slept", "slept"),
    ("keep", "kept", "kept"),
    ("feel", "felt", "felt"),
    ("leave", "left", "left"),
    ("meet", "met", "met"),
    ("speak", "spoke", "spoken"),
    ("break", "broke", "broken"),
    ("choose", "chose", "chosen"),
    ("forget", "forgot", "forgotten"),
    ("drink", "drank", "drunk"),
    ("swim", "swam", "swum"),
    ("sing", "sang", "sung"),
    ("begin", "began", "begun"),
    ("win", "won", "won"),
    ("sit", "sat", "sat"),
    ("stand", "stood", "stood"),
    ("understand", "understood", "understood"),
    ("say", "said", "said"),
    ("pay", "paid", "paid"),
    ("tell", "told", "told"),
    ("sell", "sold", "sold"),
    ("hear", "heard", "heard"),
    ("hold", "held", "held"),
    ("send", "sent", "sent"),
    ("spend", "spent", "spent"),
    ("lend", "lent", "lent"),
    ("build", "built", "built"),
    ("lose", "lost", "lost"),
    ("fly", "flew", "flown"),
    ("drive", "drove", "driven"),
    ("ride", "rode", "ridden"),
    ("fall", "fell", "fallen"),
    ("grow", "grew", "grown"),
    ("throw", "threw", "thrown"),
    ("draw", "drew", "drawn"),
    ("wear", "wore", "worn"),
    ("put", "put", "put"),
    ("cut", "cut", "cut"),
    ("hit", "hit", "hit"),
    ("let", "let", "let"),
    ("set", "set", "set"),
];

fn irregular(lemma: &str) -> Option<(&'static str, &'static str)> {
    IRREGULAR
        .iter()
        .find(|(l, _, _)| *l == lemma)
        .map(|(_, past, participle)| (*past, *participle))
}

/// Generates one form of `lemma`. Lexicon forms win over the built-in
/// exception table, which wins over the spelling rules.
pub fn inflect(
    lemma: &str,
    form: VerbForm,
    forms: Option<&VerbForms>,
    flags: LexFlags,
) -> Result<String, MorphError> {
    if lemma.is_empty() {
        return Err(MorphError::EmptyStem);
    }

    if let Some(forms) = forms {
        let stored = match form {
            VerbForm::Base => None,
            VerbForm::ThirdSingular => forms.third_singular.as_ref(),
            VerbForm::Past => forms.past.as_ref(),
            VerbForm::PastParticiple => forms.past_participle.as_ref().or(forms.past.as_ref()),
            VerbForm::PresentParticiple => forms.present_participle.as_ref(),
        };
        if let Some(stored) = stored {
            return Ok(stored.clone());
        }
    }

    let generated = match form {
        VerbForm::Base => lemma.to_string(),
        VerbForm::ThirdSingular => third_singular(lemma),
        VerbForm::Past => match irregular(lemma) {
            Some((past, _)) => past.to_string(),
            None => regular_past(lemma, flags),
        },
        VerbForm::PastParticiple => match irregular(lemma) {
            Some((_, participle)) => participle.to_string(),
            None => regular_past(lemma, flags),
        },
        VerbForm::PresentParticiple => present_participle(lemma, flags),
    };
    Ok(generated)
}

fn third_singular(lemma: &str) -> String {
    match lemma {
        "be" => return "is".to_string(),
        "have" => return "has".to_string(),
        _ => {}
    }
    if ends_with_consonant_y(lemma) {
        format!("{}ies", &lemma[..lemma.len() - 1])
    } else if ["s", "x", "z", "ch", "sh", "o"].iter().any(|end| lemma.ends_with(end)) {
        format!("{}es", lemma)
    } else {
        format!("{}s", lemma)
    }
}

fn regular_past(lemma: &str, flags: LexFlags) -> String {
    if lemma.ends_with('e') {
        format!("{}d", lemma)
    } else if ends_with_consonant_y(lemma) {
        format!("{}ied", &lemma[..lemma.len() - 1])
    } else if let Some(doubled) = double_final(lemma, flags) {
        format!("{}ed", doubled)
    } else {
        format!("{}ed", lemma)
    }
}

fn present_participle(lemma: &str, flags: LexFlags) -> String {
    if let Some(stem) = lemma.strip_suffix("ie").filter(|stem| !stem.is_empty()) {
        return format!("{}ying", stem);
    }
    if lemma.len() > 2 && lemma.ends_with('e') && !E_DROP_EXEMPT.iter().any(|e| lemma.ends_with(e)) {
        let before = lemma[..lemma.len() - 1].chars().last();
        if before.is_some_and(|c| !is_vowel(c)) {
            return format!("{}ing", &lemma[..lemma.len() - 1]);
        }
    }
    if let Some(doubled) = double_final(lemma, flags) {
        return format!("{}ing", doubled);
    }
    format!("{}ing", lemma)
}

/// Finite forms of "be".
pub fn be_form(past: bool, agreement: Agreement) -> &'static str {
    match (past, agreement.person, agreement.number) {
        (false, Person::First, Number::Singular) => "am",
        (false, Person::Third, Number::Singular) => "is",
        (false, _, _) => "are",
        (true, Person::First | Person::Third, Number::Singular) => "was",
        (true, _, _) => "were",
    }
}

/// Finite form of any verb for a present or past clause.
pub fn finite(
    lemma: &str,
    past: bool,
    agreement: Agreement,
    forms: Option<&VerbForms>,
    flags: LexFlags,
) -> Result<String, MorphError> {
    if lemma == "be" {
        return Ok(be_form(past, agreement).to_string());
    }
    let form = match (past, agreement.is_third_singular()) {
        (true, _) => VerbForm::Past,
        (false, true) => VerbForm::ThirdSingular,
        (false, false) => VerbForm::Base,
    };
    inflect(lemma, form, forms, flags)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(lemma: &str, form: VerbForm) -> String {
        inflect(lemma, form, None, LexFlags::empty()).unwrap()
    }

    #[test]
    fn test_third_singular_spelling() {
        assert_eq!(form("eat", VerbForm::ThirdSingular), "eats");
        assert_eq!(form("watch", VerbForm::ThirdSingular), "watches");
        assert_eq!(form("go", VerbForm::ThirdSingular), "goes");
        assert_eq!(form("study", VerbForm::ThirdSingular), "studies");
        assert_eq!(form("play", VerbForm::ThirdSingular), "plays");
        assert_eq!(form("have", VerbForm::ThirdSingular), "has");
    }

    #[test]
    fn test_participles() {
        assert_eq!(form("eat", VerbForm::PresentParticiple), "eating");
        assert_eq!(form("make", VerbForm::PresentParticiple), "making");
        assert_eq!(form("see", VerbForm::PresentParticiple), "seeing");
        assert_eq!(form("be", VerbForm::PresentParticiple), "being");
        assert_eq!(form("die", VerbForm::PresentParticiple), "dying");
        assert_eq!(form("run", VerbForm::PresentParticiple), "running");
        assert_eq!(form("stop", VerbForm::PresentParticiple), "stopping");
        assert_eq!(form("open", VerbForm::PresentParticiple), "opening");
        assert_eq!(form("eat", VerbForm::PastParticiple), "eaten");
        assert_eq!(form("walk", VerbForm::PastParticiple), "walked");
    }

    #[test]
    fn test_regular_past() {
        assert_eq!(form("walk", VerbForm::Past), "walked");
        assert_eq!(form("like", VerbForm::Past), "liked");
        assert_eq!(form("carry", VerbForm::Past), "carried");
        assert_eq!(form("stop", VerbForm::Past), "stopped");
        assert_eq!(form("visit", VerbForm::Past), "visited");
        assert_eq!(form("ate", VerbForm::Base), "ate");
    }

    #[test]
    fn test_flagged_doubling() {
        let flagged = inflect("prefer", VerbForm::Past, None, LexFlags::DOUBLE_CONSONANT).unwrap();
        assert_eq!(flagged, "preferred");
    }

    #[test]
    fn test_lexicon_forms_win() {
        let forms = VerbForms { past: Some("dreamt".to_string()), ..Default::default() };
        assert_eq!(inflect("dream", VerbForm::Past, Some(&forms), LexFlags::empty()).unwrap(), "dreamt");
        // The past doubles as participle when none is stored
        assert_eq!(
            inflect("dream", VerbForm::PastParticiple, Some(&forms), LexFlags::empty()).unwrap(),
            "dreamt"
        );
    }

    #[test]
    fn test_be_paradigm() {
        assert_eq!(be_form(false, Agreement::new(Person::First, Number::Singular)), "am");
        assert_eq!(be_form(false, Agreement::THIRD_SINGULAR), "is");
        assert_eq!(be_form(false, Agreement::SECOND), "are");
        assert_eq!(be_form(true, Agreement::THIRD_SINGULAR), "was");
        assert_eq!(be_form(true, Agreement::THIRD_PLURAL), "were");
    }

    #[test]
    fn test_empty_stem_is_an_error() {
        assert_eq!(inflect("", VerbForm::Past, None, LexFlags::empty()), Err(MorphError::EmptyStem));
    }
}
