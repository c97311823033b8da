use alloc::format;
use alloc::string::{String, ToString};

use glossa_protocol::{LexFlags, NounForms};

use crate::spelling::ends_with_consonant_y;

const IRREGULAR_PLURALS: &[(&str, &str)] = &[
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("person", "people"),
    ("mouse", "mice"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("life", "lives"),
    ("leaf", "leaves"),
    ("wolf", "wolves"),
    ("half", "halves"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("hero", "heroes"),
    ("sheep", "sheep"),
    ("fish", "fish"),
    ("deer", "deer"),
    ("series", "series"),
];

/// Plural of a noun head, and whether it came from an exception.
pub fn plural(lemma: &str, forms: Option<&NounForms>, flags: LexFlags) -> (String, bool) {
    if flags.intersects(LexFlags::UNCOUNTABLE | LexFlags::PLURAL_ONLY | LexFlags::PROPER) {
        return (lemma.to_string(), false);
    }
    if let Some(stored) = forms.and_then(|f| f.plural.as_ref()) {
        return (stored.clone(), true);
    }
    if let Some((_, irregular)) = IRREGULAR_PLURALS.iter().find(|(l, _)| *l == lemma) {
        return (irregular.to_string(), true);
    }

    let regular = if ends_with_consonant_y(lemma) {
        format!("{}ies", &lemma[..lemma.len() - 1])
    } else if ["s", "x", "z", "ch", "sh"].iter().any(|end| lemma.ends_with(end)) {
        format!("{}es", lemma)
    } else {
        format!("{}s", lemma)
    };
    (regular, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lemma: &str) -> String {
        plural(lemma, None, LexFlags::empty()).0
    }

    #[test]
    fn test_regular_plurals() {
        assert_eq!(p("apple"), "apples");
        assert_eq!(p("box"), "boxes");
        assert_eq!(p("church"), "churches");
        assert_eq!(p("city"), "cities");
        assert_eq!(p("day"), "days");
    }

    #[test]
    fn test_exceptions() {
        assert_eq!(plural("child", None, LexFlags::empty()), ("children".to_string(), true));
        assert_eq!(p("sheep"), "sheep");
        let forms = NounForms { plural: Some("cacti".to_string()) };
        assert_eq!(plural("cactus", Some(&forms), LexFlags::empty()).0, "cacti");
    }

    #[test]
    fn test_uncountable_stays() {
        assert_eq!(plural("water", None, LexFlags::UNCOUNTABLE).0, "water");
        assert_eq!(plural("'Paris", None, LexFlags::PROPER).0, "'Paris");
    }
}
