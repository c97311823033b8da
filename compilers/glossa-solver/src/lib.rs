pub mod graph;
pub mod solver;

pub use graph::{Exclusion, ExclusivityGraph};
pub use solver::{Commit, DeterminerEditor, DeterminerOption, Reset, ResetNotice, Resolver, NOTICE_TTL_MS};

use glossa_protocol::{Determiner, DeterminerSlot};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolverError {
    #[error("unknown determiner slot '{0}'")]
    UnknownSlot(String),
    #[error("unknown determiner '{0}'")]
    UnknownDeterminer(String),
    #[error("'{value}' does not belong in the {slot} slot")]
    WrongSlot { value: String, slot: String },
}

/// Parses a (slot, value) pair coming from the editor surface. An empty or
/// "none" value clears the slot.
pub fn parse_selection(slot: &str, value: &str) -> Result<(DeterminerSlot, Option<Determiner>), SolverError> {
    let slot = DeterminerSlot::parse(slot).ok_or_else(|| SolverError::UnknownSlot(slot.to_string()))?;
    if value.is_empty() || value == "none" {
        return Ok((slot, None));
    }
    let determiner = Determiner::parse(value).ok_or_else(|| SolverError::UnknownDeterminer(value.to_string()))?;
    if determiner.slot() != slot {
        return Err(SolverError::WrongSlot { value: value.to_string(), slot: slot.as_str().to_string() });
    }
    Ok((slot, Some(determiner)))
}
