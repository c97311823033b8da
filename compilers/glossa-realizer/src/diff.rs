//! Cross-render comparison of derivations.
//!
//! Steps are grouped by `(type, rule)`. Inside a group a current step first
//! pairs with a previous step of the same effect, whatever their positions;
//! leftovers pair up as changed, and the rest are added or removed. Swapping
//! two conjuncts that carry identical steps therefore changes nothing.

use std::collections::HashMap;

use glossa_protocol::{Derivation, DerivationStep, StepType};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Unchanged,
    Changed,
    Removed,
}

/// `occurrence` numbers the step within its `(type, rule)` group of the
/// derivation it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StepKey {
    #[serde(rename = "type")]
    pub step_type: StepType,
    pub rule: String,
    pub occurrence: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepChange {
    pub key: StepKey,
    pub kind: ChangeKind,
    /// The step as it is now; `None` for removed steps.
    pub current: Option<DerivationStep>,
    /// The step as it was; `None` for added steps.
    pub previous: Option<DerivationStep>,
}

fn keyed(steps: &[DerivationStep]) -> Vec<StepKey> {
    let mut seen: HashMap<(StepType, &str), usize> = HashMap::new();
    steps
        .iter()
        .map(|step| {
            let n = seen.entry((step.step_type(), step.rule())).or_insert(0);
            let key = StepKey { step_type: step.step_type(), rule: step.rule().to_string(), occurrence: *n };
            *n += 1;
            key
        })
        .collect()
}

fn same_group(a: &DerivationStep, b: &DerivationStep) -> bool {
    a.step_type() == b.step_type() && a.rule() == b.rule()
}

/// Classifies every step of `current` against `previous`. The result lists
/// current steps in their order, followed by removed steps in their old order.
pub fn diff(current: &Derivation, previous: &Derivation) -> Vec<StepChange> {
    let (now, old) = (&current.steps, &previous.steps);
    let mut partner: Vec<Option<usize>> = vec![None; now.len()];
    let mut taken = vec![false; old.len()];

    // Identical effects pair first, then the leftovers of each group in order
    for exact in [true, false] {
        for (i, step) in now.iter().enumerate() {
            if partner[i].is_some() {
                continue;
            }
            let found = (0..old.len()).find(|&j| {
                !taken[j] && same_group(step, &old[j]) && (!exact || old[j].same_effect(step))
            });
            if let Some(j) = found {
                taken[j] = true;
                partner[i] = Some(j);
            }
        }
    }

    let now_keys = keyed(now);
    let old_keys = keyed(old);

    let mut changes: Vec<StepChange> = now
        .iter()
        .zip(now_keys)
        .zip(&partner)
        .map(|((step, key), partner)| {
            let (kind, previous) = match partner.map(|j| &old[j]) {
                None => (ChangeKind::Added, None),
                Some(prev) if prev.same_effect(step) => (ChangeKind::Unchanged, Some(prev.clone())),
                Some(prev) => (ChangeKind::Changed, Some(prev.clone())),
            };
            StepChange { key, kind, current: Some(step.clone()), previous }
        })
        .collect();

    changes.extend(old.iter().zip(old_keys).zip(&taken).filter(|(_, taken)| !**taken).map(|((step, key), _)| {
        StepChange { key, kind: ChangeKind::Removed, current: None, previous: Some(step.clone()) }
    }));
    changes
}

/// Pairs sentences by position; a sentence with no predecessor diffs against
/// an empty derivation, so every step reads as added.
pub fn diff_all(current: &[Derivation], previous: &[Derivation]) -> Vec<Vec<StepChange>> {
    let empty = Derivation::default();
    let mut result: Vec<Vec<StepChange>> = current
        .iter()
        .enumerate()
        .map(|(i, derivation)| diff(derivation, previous.get(i).unwrap_or(&empty)))
        .collect();
    // Trailing sentences that disappeared report their steps as removed
    result.extend(previous.iter().skip(current.len()).map(|gone| diff(&empty, gone)));
    result
}

/// Counts per change kind, in declaration order.
pub fn summarize(changes: &[StepChange]) -> [usize; 4] {
    let mut counts = [0; 4];
    for change in changes {
        counts[change.kind as usize] += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::MorphologyStep;

    fn morph(step_type: StepType, rule: &str, before: &str, after: &str) -> DerivationStep {
        DerivationStep::Morphology(MorphologyStep {
            step_type,
            rule: rule.to_string(),
            before: before.to_string(),
            after: after.to_string(),
            trigger: String::new(),
        })
    }

    fn derivation(steps: Vec<DerivationStep>) -> Derivation {
        Derivation { steps, ..Default::default() }
    }

    #[test]
    fn test_single_changed_step() {
        let previous = derivation(vec![
            morph(StepType::Article, "vowel-sound", "a", "an"),
            morph(StepType::Tense, "past", "eat", "ate"),
        ]);
        // Same steps in the opposite order, with a different "to" on the tense step
        let current = derivation(vec![
            morph(StepType::Tense, "past", "eat", "had"),
            morph(StepType::Article, "vowel-sound", "a", "an"),
        ]);

        let changes = diff(&current, &previous);
        assert_eq!(changes.len(), 2);
        let changed: Vec<_> = changes.iter().filter(|c| c.kind == ChangeKind::Changed).collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].key.step_type, StepType::Tense);
        assert_eq!(changed[0].key.rule, "past");
        assert_eq!(summarize(&changes), [0, 1, 1, 0]);
    }

    #[test]
    fn test_added_and_removed() {
        let previous = derivation(vec![morph(StepType::Number, "plural", "apple", "apples")]);
        let current = derivation(vec![morph(StepType::Article, "vowel-sound", "a", "an")]);

        let changes = diff(&current, &previous);
        assert_eq!(changes[0].kind, ChangeKind::Added);
        assert_eq!(changes[1].kind, ChangeKind::Removed);
        assert!(changes[1].current.is_none());
    }

    #[test]
    fn test_repeated_rules_pair_by_occurrence() {
        // Two "vowel-sound" articles; only the second differs
        let previous = derivation(vec![
            morph(StepType::Article, "vowel-sound", "a", "an"),
            morph(StepType::Article, "vowel-sound", "a", "an"),
        ]);
        let mut current = previous.clone();
        current.steps[1] = morph(StepType::Article, "vowel-sound", "a", "An");

        let changes = diff(&current, &previous);
        assert_eq!(changes[0].kind, ChangeKind::Unchanged);
        assert_eq!(changes[1].kind, ChangeKind::Changed);
        assert_eq!(changes[1].key.occurrence, 1);
    }

    #[test]
    fn test_swapped_steps_are_unchanged() {
        let previous = derivation(vec![
            morph(StepType::Case, "objective", "he", "him"),
            morph(StepType::Case, "objective", "she", "her"),
        ]);
        let current = derivation(vec![
            morph(StepType::Case, "objective", "she", "her"),
            morph(StepType::Case, "objective", "he", "him"),
        ]);
        let changes = diff(&current, &previous);
        assert_eq!(summarize(&changes), [0, 2, 0, 0]);

        // One real edit among equals pairs with the step it replaced
        let current = derivation(vec![
            morph(StepType::Case, "objective", "they", "them"),
            morph(StepType::Case, "objective", "he", "him"),
        ]);
        let changes = diff(&current, &previous);
        assert_eq!(summarize(&changes), [0, 1, 1, 0]);
        assert_eq!(changes[0].previous.as_ref().map(|p| p.rule()), Some("objective"));
    }

    #[test]
    fn test_diff_all_pads_missing_sentences() {
        let one = derivation(vec![morph(StepType::Tense, "past", "eat", "ate")]);
        let changes = diff_all(&[], &[one.clone()]);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0][0].kind, ChangeKind::Removed);

        let changes = diff_all(&[one], &[]);
        assert_eq!(changes[0][0].kind, ChangeKind::Added);
    }
}
