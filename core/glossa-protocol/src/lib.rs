#![no_std] // Shared by the wasm platform and native tools

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod features;

// Re-export core types for convenience
pub use ids::{EntryId, ParadigmId};
pub use features::*;

pub mod model;
pub use model::*;

pub mod determiner;
pub use determiner::{Determiner, DeterminerConfig, DeterminerSlot};

pub mod ast;
pub use ast::*;

pub mod derivation;
pub use derivation::*;
