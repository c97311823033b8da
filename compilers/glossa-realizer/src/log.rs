//! Flat `{type, rule, from, to, trigger}` view of a derivation, the shape
//! the editor's log panel reads.

use glossa_protocol::{Derivation, DerivationStep, Operation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub rule: String,
    pub from: String,
    pub to: String,
    pub trigger: String,
}

fn operation_name(operation: Operation) -> &'static str {
    match operation {
        Operation::Insert => "insert",
        Operation::Delete => "delete",
        Operation::Move => "move",
        Operation::Swap => "swap",
        Operation::Join => "join",
    }
}

impl From<&DerivationStep> for LogEntry {
    fn from(step: &DerivationStep) -> Self {
        match step {
            DerivationStep::Morphology(m) => LogEntry {
                entry_type: m.step_type.as_str().to_string(),
                rule: m.rule.clone(),
                from: m.before.clone(),
                to: m.after.clone(),
                trigger: m.trigger.clone(),
            },
            DerivationStep::Syntax(s) => {
                let trigger = match &s.moved {
                    Some(moved) => format!("{} '{}'", operation_name(s.operation), moved),
                    None => operation_name(s.operation).to_string(),
                };
                LogEntry {
                    entry_type: s.step_type.as_str().to_string(),
                    rule: s.rule.clone(),
                    from: s.before.join(" "),
                    to: s.after.join(" "),
                    trigger,
                }
            }
        }
    }
}

pub fn project(derivation: &Derivation) -> Vec<LogEntry> {
    derivation.steps.iter().map(LogEntry::from).collect()
}

/// Workspace log: every sentence's entries, in sentence order.
pub fn project_all(derivations: &[Derivation]) -> Vec<LogEntry> {
    derivations.iter().flat_map(project).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_protocol::{MorphologyStep, StepType, SyntaxStep};

    #[test]
    fn test_projection_shapes() {
        let derivation = Derivation {
            input: String::new(),
            output: String::new(),
            steps: vec![
                DerivationStep::Morphology(MorphologyStep {
                    step_type: StepType::DoSupport,
                    rule: "negation".to_string(),
                    before: "eats".to_string(),
                    after: "does eat".to_string(),
                    trigger: "negation needs an auxiliary".to_string(),
                }),
                DerivationStep::Syntax(SyntaxStep {
                    step_type: StepType::Inversion,
                    rule: "subject-auxiliary".to_string(),
                    operation: Operation::Swap,
                    moved: Some("does".to_string()),
                    before: vec!["he".to_string(), "does".to_string()],
                    after: vec!["does".to_string(), "he".to_string()],
                }),
            ],
        };

        let log = project(&derivation);
        assert_eq!(log[0].entry_type, "do-support");
        assert_eq!(log[0].to, "does eat");
        assert_eq!(log[1].from, "he does");
        assert_eq!(log[1].to, "does he");
        assert_eq!(log[1].trigger, "swap 'does'");

        let json = serde_json::to_value(&log[1]).unwrap();
        assert_eq!(json["type"], "inversion");
    }
}
