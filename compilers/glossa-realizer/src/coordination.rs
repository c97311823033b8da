use glossa_protocol::{Conjunction, Coordinator, Operation, Polarity, StepType};

use crate::error::GrammarError;
use crate::tracker::DerivationTracker;

/// (opening word of the correlative pair, conjunction word)
fn words(coordinator: Coordinator) -> (Option<&'static str>, &'static str) {
    let negative = coordinator.polarity == Polarity::Negative;
    match (coordinator.conjunction, coordinator.correlative, negative) {
        (_, true, true) => (Some("neither"), "nor"),
        (Conjunction::And, true, false) => (Some("both"), "and"),
        (Conjunction::Or, true, false) => (Some("either"), "or"),
        (Conjunction::And, false, _) => (None, "and"),
        (Conjunction::Or, false, _) => (None, "or"),
    }
}

fn rule(coordinator: Coordinator, count: usize) -> &'static str {
    if coordinator.correlative {
        coordinator.as_str()
    } else if count > 2 {
        "oxford-comma"
    } else {
        "pair"
    }
}

/// Joins already-rendered conjuncts: "A and B", "A, B, and C", "either A or B".
pub fn join(parts: Vec<Vec<String>>, coordinator: Coordinator) -> Vec<String> {
    let (opening, conjunction) = words(coordinator);
    let count = parts.len();
    if count < 2 {
        return parts.into_iter().flatten().collect();
    }

    let mut tokens = Vec::with_capacity(parts.iter().map(Vec::len).sum::<usize>() + count + 1);
    if let Some(opening) = opening {
        tokens.push(opening.to_string());
    }
    for (i, mut part) in parts.into_iter().enumerate() {
        if i == count - 1 {
            tokens.push(conjunction.to_string());
        }
        if count > 2 && i < count - 1 {
            if let Some(last) = part.last_mut() {
                last.push(',');
            }
        }
        tokens.extend(part);
    }
    tokens
}

/// Shared coordination for noun phrases, verb phrases and clauses. Missing
/// conjuncts render as `placeholder` so the word count stays stable.
pub fn coordinate<T, F>(
    items: &[Option<T>],
    coordinator: Coordinator,
    placeholder: &str,
    tracker: &mut DerivationTracker,
    mut render: F,
) -> Result<Vec<String>, GrammarError>
where
    F: FnMut(&T, &mut DerivationTracker) -> Result<Vec<String>, GrammarError>,
{
    if items.is_empty() {
        return Ok(vec![placeholder.to_string()]);
    }

    let mut parts = Vec::with_capacity(items.len());
    for item in items {
        let part = match item {
            Some(item) => render(item, tracker)?,
            None => vec![placeholder.to_string()],
        };
        parts.push(part);
    }
    if parts.len() == 1 {
        return Ok(parts.remove(0));
    }

    let before: Vec<String> = parts.iter().flatten().cloned().collect();
    let count = parts.len();
    let joined = join(parts, coordinator);
    let (_, conjunction) = words(coordinator);
    tracker.syntax(
        StepType::Coordination,
        rule(coordinator, count),
        Operation::Join,
        Some(conjunction),
        &before,
        &joined,
    );
    Ok(joined)
}
