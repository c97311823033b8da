#![no_std]

#[macro_use]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod adverbs;
pub mod nouns;
pub mod phonology;
pub mod pronouns;
pub mod spelling;
pub mod verbs;

pub use phonology::{indefinite_article, ArticleReason};
pub use pronouns::PronounInfo;
pub use spelling::capitalize;
pub use verbs::{be_form, finite, inflect, VerbForm};

use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MorphError {
    EmptyStem,
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MorphError::EmptyStem => write!(f, "cannot inflect an empty stem"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for MorphError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use glossa_protocol::LexFlags;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_safe_generation(stem in "[a-z]{2,10}") {
            // Suppletive "is"
            prop_assume!(stem != "be");
            // Every generated form keeps the first letter of the stem
            for form in [VerbForm::Base, VerbForm::ThirdSingular, VerbForm::PresentParticiple] {
                let result: String = inflect(&stem, form, None, LexFlags::empty()).unwrap();
                prop_assert!(result.starts_with(&stem[..1]));
                prop_assert!(result.len() >= stem.len() - 1);
            }
        }

        #[test]
        fn test_plural_never_shrinks(stem in "[a-z]{2,10}") {
            let (plural, _) = nouns::plural(&stem, None, LexFlags::empty());
            prop_assert!(plural.len() >= stem.len() - 1);
        }
    }
}
