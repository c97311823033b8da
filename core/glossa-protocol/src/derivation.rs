use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Which transformation a derivation step records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StepType {
    // Morphology
    Tense,
    Aspect,
    Modal,
    Agreement,
    DoSupport,
    Article,
    Number,
    Case,

    // Syntax
    Negation,
    Inversion,
    WhMovement,
    SubjectOmission,
    AdverbPlacement,
    Coordination,
    Conditional,
    Choice,
}

impl StepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepType::Tense => "tense",
            StepType::Aspect => "aspect",
            StepType::Modal => "modal",
            StepType::Agreement => "agreement",
            StepType::DoSupport => "do-support",
            StepType::Article => "article",
            StepType::Number => "number",
            StepType::Case => "case",
            StepType::Negation => "negation",
            StepType::Inversion => "inversion",
            StepType::WhMovement => "wh-movement",
            StepType::SubjectOmission => "subject-omission",
            StepType::AdverbPlacement => "adverb-placement",
            StepType::Coordination => "coordination",
            StepType::Conditional => "conditional",
            StepType::Choice => "choice",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum StepCategory {
    Morphology,
    Syntax,
}

/// Token-level operation performed by a syntax step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Operation {
    Insert,
    Delete,
    Move,
    Swap,
    Join,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct MorphologyStep {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub step_type: StepType,
    pub rule: String,
    pub before: String,
    pub after: String,
    pub trigger: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct SyntaxStep {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub step_type: StepType,
    pub rule: String,
    pub operation: Operation,
    pub moved: Option<String>,
    pub before: Vec<String>,
    pub after: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(tag = "category", rename_all = "lowercase"))]
pub enum DerivationStep {
    Morphology(MorphologyStep),
    Syntax(SyntaxStep),
}

impl DerivationStep {
    pub fn category(&self) -> StepCategory {
        match self {
            DerivationStep::Morphology(_) => StepCategory::Morphology,
            DerivationStep::Syntax(_) => StepCategory::Syntax,
        }
    }

    pub fn step_type(&self) -> StepType {
        match self {
            DerivationStep::Morphology(step) => step.step_type,
            DerivationStep::Syntax(step) => step.step_type,
        }
    }

    pub fn rule(&self) -> &str {
        match self {
            DerivationStep::Morphology(step) => &step.rule,
            DerivationStep::Syntax(step) => &step.rule,
        }
    }

    /// True when both steps describe the same change (ignoring identity).
    pub fn same_effect(&self, other: &DerivationStep) -> bool {
        match (self, other) {
            (DerivationStep::Morphology(a), DerivationStep::Morphology(b)) => {
                a.before == b.before && a.after == b.after
            }
            (DerivationStep::Syntax(a), DerivationStep::Syntax(b)) => {
                a.operation == b.operation && a.moved == b.moved && a.before == b.before && a.after == b.after
            }
            _ => false,
        }
    }
}

/// The finished record of one render pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct Derivation {
    pub input: String,
    pub output: String,
    pub steps: Vec<DerivationStep>,
}

impl Derivation {
    pub fn by_category(&self, category: StepCategory) -> impl Iterator<Item = &DerivationStep> {
        self.steps.iter().filter(move |s| s.category() == category)
    }

    pub fn by_type(&self, step_type: StepType) -> impl Iterator<Item = &DerivationStep> {
        self.steps.iter().filter(move |s| s.step_type() == step_type)
    }

    pub fn morphology(&self) -> impl Iterator<Item = &MorphologyStep> {
        self.steps.iter().filter_map(|s| match s {
            DerivationStep::Morphology(step) => Some(step),
            DerivationStep::Syntax(_) => None,
        })
    }

    pub fn syntax(&self) -> impl Iterator<Item = &SyntaxStep> {
        self.steps.iter().filter_map(|s| match s {
            DerivationStep::Syntax(step) => Some(step),
            DerivationStep::Morphology(_) => None,
        })
    }

    pub fn find(&self, step_type: StepType, rule: &str) -> Option<&DerivationStep> {
        self.steps.iter().find(|s| s.step_type() == step_type && s.rule() == rule)
    }
}
