use std::sync::OnceLock;

use glossa_protocol::{Determiner, DeterminerConfig, DeterminerSlot};
use tracing::debug;

use crate::graph::{Exclusion, ExclusivityGraph};

/// How long a reset reason stays visible, in milliseconds.
pub const NOTICE_TTL_MS: u64 = 1000;

/// One entry of a slot's dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminerOption {
    pub value: Determiner,
    pub enabled: bool,
    pub reason: Option<String>,
}

/// A committed value that was cleared because a higher-ranked slot changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reset {
    pub slot: DeterminerSlot,
    pub value: Determiner,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub selections: DeterminerConfig,
    pub accepted: bool,
    pub resets: Vec<Reset>,
}

/// Determiner Constraint Resolver: pure functions over an exclusivity graph.
pub struct Resolver {
    graph: ExclusivityGraph,
}

impl Resolver {
    pub fn new(graph: ExclusivityGraph) -> Self {
        Self { graph }
    }

    /// Shared resolver over the standard table, built on first use.
    pub fn standard() -> &'static Resolver {
        static STANDARD: OnceLock<Resolver> = OnceLock::new();
        STANDARD.get_or_init(|| Resolver::new(ExclusivityGraph::standard()))
    }

    pub fn graph(&self) -> &ExclusivityGraph {
        &self.graph
    }

    /// Every value of `slot`. A value is disabled when it clashes with a
    /// value committed in a higher-ranked slot; a clash with a lower-ranked
    /// one leaves it enabled and names the value it would clear.
    pub fn available_options(&self, slot: DeterminerSlot, current: &DeterminerConfig) -> Vec<DeterminerOption> {
        Determiner::values(slot)
            .map(|value| {
                if let Some((other, exclusion)) = self.blocker(slot, value, current) {
                    return DeterminerOption {
                        value,
                        enabled: false,
                        reason: Some(format!("not available with '{}': {}", other, exclusion.reason)),
                    };
                }
                let reason = self
                    .graph
                    .first_conflict(value, current)
                    .map(|(_, other, exclusion)| format!("clears '{}': {}", other, exclusion.reason));
                DeterminerOption { value, enabled: true, reason }
            })
            .collect()
    }

    /// The committed value in a higher-ranked slot that rules out `value`.
    fn blocker(
        &self,
        slot: DeterminerSlot,
        value: Determiner,
        current: &DeterminerConfig,
    ) -> Option<(Determiner, Exclusion)> {
        DeterminerSlot::ALL
            .into_iter()
            .filter(|other_slot| other_slot.rank() > slot.rank())
            .find_map(|other_slot| {
                let other = current.get(other_slot)?;
                self.graph.conflict(value, other).map(|exclusion| (other, exclusion))
            })
    }

    /// True when no two committed values exclude each other.
    pub fn is_valid(&self, selections: &DeterminerConfig) -> bool {
        selections
            .iter()
            .all(|value| self.graph.first_conflict(value, selections).is_none())
    }

    /// Writes `value` into `slot`. A value that clashes with a higher-ranked
    /// committed slot is rejected and the prior state kept; otherwise every
    /// lower-ranked value it invalidates is reset.
    pub fn commit(&self, slot: DeterminerSlot, value: Option<Determiner>, current: &DeterminerConfig) -> Commit {
        let rejected = || Commit { selections: *current, accepted: false, resets: Vec::new() };

        if let Some(value) = value {
            if value.slot() != slot {
                return rejected();
            }
            let blocked = self.blocker(slot, value, current).is_some();
            if blocked {
                debug!(slot = slot.as_str(), value = value.as_str(), "determiner commit rejected");
                return rejected();
            }
        }

        let mut selections = *current;
        selections.set(slot, value);

        // Re-validate from the highest rank down; only the lower side of a clash is cleared
        let mut by_rank = DeterminerSlot::ALL;
        by_rank.sort_by_key(|s| std::cmp::Reverse(s.rank()));

        let mut resets = Vec::new();
        for other_slot in by_rank {
            let Some(other) = selections.get(other_slot) else { continue };
            let winner = DeterminerSlot::ALL
                .into_iter()
                .filter(|s| s.rank() > other_slot.rank())
                .find_map(|s| {
                    let higher = selections.get(s)?;
                    self.graph.conflict(other, higher).map(|exclusion| (higher, exclusion))
                });
            if let Some((higher, exclusion)) = winner {
                selections.set(other_slot, None);
                let reason = format!("'{}' was cleared because '{}' {}", other, higher, exclusion.reason);
                debug!(slot = other_slot.as_str(), value = other.as_str(), %reason, "determiner reset");
                resets.push(Reset { slot: other_slot, value: other, reason });
            }
        }

        Commit { selections, accepted: true, resets }
    }
}

/// A reset reason kept on screen until `expires_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResetNotice {
    pub slot: DeterminerSlot,
    pub value: Determiner,
    pub reason: String,
    pub expires_at: u64,
}

/// Editing state of one noun phrase's determiners. Time is supplied by the
/// caller in milliseconds so the state stays deterministic.
#[derive(Debug, Clone)]
pub struct DeterminerEditor {
    selections: DeterminerConfig,
    notices: Vec<ResetNotice>,
}

impl DeterminerEditor {
    pub fn new() -> Self {
        Self { selections: DeterminerConfig::default(), notices: Vec::new() }
    }

    pub fn selections(&self) -> DeterminerConfig {
        self.selections
    }

    pub fn options(&self, slot: DeterminerSlot) -> Vec<DeterminerOption> {
        Resolver::standard().available_options(slot, &self.selections)
    }

    /// Returns whether the value was committed.
    pub fn commit(&mut self, slot: DeterminerSlot, value: Option<Determiner>, now_ms: u64) -> bool {
        let commit = Resolver::standard().commit(slot, value, &self.selections);
        self.selections = commit.selections;
        for reset in commit.resets {
            self.notices.push(ResetNotice {
                slot: reset.slot,
                value: reset.value,
                reason: reset.reason,
                expires_at: now_ms + NOTICE_TTL_MS,
            });
        }
        commit.accepted
    }

    /// Notices still inside their display window; expired ones are dropped.
    pub fn notices(&mut self, now_ms: u64) -> &[ResetNotice] {
        self.notices.retain(|n| n.expires_at > now_ms);
        &self.notices
    }
}

impl Default for DeterminerEditor {
    fn default() -> Self {
        Self::new()
    }
}
