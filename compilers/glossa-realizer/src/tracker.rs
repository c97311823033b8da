use glossa_protocol::{Derivation, DerivationStep, MorphologyStep, Operation, StepType, SyntaxStep};
use tracing::debug;

/// Append-only accumulator for one render pass. Created by the caller,
/// threaded through every rule, and consumed into a [`Derivation`].
#[derive(Debug, Default)]
pub struct DerivationTracker {
    steps: Vec<DerivationStep>,
}

impl DerivationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a word-level change. Returns false (and records nothing) when
    /// the rule left the form untouched.
    pub fn morphology(
        &mut self,
        step_type: StepType,
        rule: &str,
        before: &str,
        after: &str,
        trigger: &str,
    ) -> bool {
        if before == after {
            return false;
        }
        debug!(step = step_type.as_str(), rule, before, after, "morphology");
        self.steps.push(DerivationStep::Morphology(MorphologyStep {
            step_type,
            rule: rule.to_string(),
            before: before.to_string(),
            after: after.to_string(),
            trigger: trigger.to_string(),
        }));
        true
    }

    /// Records a token-order change. Syntax steps are kept even when the
    /// sequence is unchanged (subject wh, omitted "you" in a fragment) so the
    /// log names every rule that fired.
    pub fn syntax(
        &mut self,
        step_type: StepType,
        rule: &str,
        operation: Operation,
        moved: Option<&str>,
        before: &[String],
        after: &[String],
    ) {
        debug!(step = step_type.as_str(), rule, ?operation, moved, "syntax");
        self.steps.push(DerivationStep::Syntax(SyntaxStep {
            step_type,
            rule: rule.to_string(),
            operation,
            moved: moved.map(str::to_string),
            before: before.to_vec(),
            after: after.to_vec(),
        }));
    }

    pub fn steps(&self) -> &[DerivationStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn finish(self, input: String, output: String) -> Derivation {
        Derivation { input, output, steps: self.steps }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_morphology_is_suppressed() {
        let mut tracker = DerivationTracker::new();
        assert!(!tracker.morphology(StepType::Tense, "present", "eat", "eat", "plural subject"));
        assert!(tracker.morphology(StepType::Tense, "present", "eat", "eats", "3rd person singular subject"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_finish_keeps_order() {
        let mut tracker = DerivationTracker::new();
        tracker.morphology(StepType::Aspect, "perfect", "eat", "have eaten", "perfect aspect");
        let words = vec!["you".to_string(), "eat".to_string()];
        tracker.syntax(StepType::SubjectOmission, "imperative", Operation::Delete, Some("you"), &words, &words[1..]);

        let derivation = tracker.finish("imperative(eat)".to_string(), "Eat!".to_string());
        assert_eq!(derivation.steps.len(), 2);
        assert_eq!(derivation.steps[0].step_type(), StepType::Aspect);
        assert_eq!(derivation.steps[1].step_type(), StepType::SubjectOmission);
    }
}
