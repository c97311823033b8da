use alloc::format;
use alloc::string::String;

use glossa_protocol::LexFlags;

/// Endings that keep their final `e` before `-ing` (see, dye, hoe).
pub const E_DROP_EXEMPT: &[&str] = &["ee", "ye", "oe"];

pub fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

/// `study`, `carry`, but not `play`.
pub fn ends_with_consonant_y(word: &str) -> bool {
    let mut rev = word.chars().rev();
    matches!((rev.next(), rev.next()), (Some('y'), Some(c)) if !is_vowel(c))
}

fn vowel_groups(word: &str) -> usize {
    let mut groups = 0;
    let mut in_group = false;
    for c in word.chars() {
        let vowel = is_vowel(c);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    groups
}

/// Stem with its final consonant doubled (`stop` -> `stopp`), when the
/// stem takes doubling before a vowel-initial suffix.
pub fn double_final(word: &str, flags: LexFlags) -> Option<String> {
    let last = word.chars().last()?;
    if is_vowel(last) {
        return None;
    }
    if flags.contains(LexFlags::DOUBLE_CONSONANT) {
        return Some(format!("{}{}", word, last));
    }

    let tail: alloc::vec::Vec<char> = word.chars().rev().take(3).collect();
    if tail.len() < 3 || matches!(last, 'w' | 'x' | 'y') {
        return None;
    }
    let (c1, v, c2) = (tail[2], tail[1], tail[0]);
    if !is_vowel(c1) && is_vowel(v) && !is_vowel(c2) && vowel_groups(word) == 1 {
        Some(format!("{}{}", word, last))
    } else {
        None
    }
}

/// Upper-cases the first character.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_double_final() {
        assert_eq!(double_final("run", LexFlags::empty()).as_deref(), Some("runn"));
        assert_eq!(double_final("stop", LexFlags::empty()).as_deref(), Some("stopp"));
        assert_eq!(double_final("fix", LexFlags::empty()), None);
        assert_eq!(double_final("eat", LexFlags::empty()), None);
        assert_eq!(double_final("open", LexFlags::empty()), None);
        assert_eq!(double_final("begin", LexFlags::DOUBLE_CONSONANT).as_deref(), Some("beginn"));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("the cat"), "The cat");
        assert_eq!(capitalize(""), "");
    }

    proptest! {
        #[test]
        fn test_doubling_only_repeats_last_letter(stem in "[a-z]{1,8}") {
            if let Some(doubled) = double_final(&stem, LexFlags::empty()) {
                prop_assert_eq!(doubled.len(), stem.len() + 1);
                prop_assert!(doubled.starts_with(stem.as_str()));
                prop_assert_eq!(doubled.chars().last(), stem.chars().last());
            }
        }
    }
}
