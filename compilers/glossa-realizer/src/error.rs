use glossa_morph::MorphError;
use glossa_protocol::{EntryId, Role};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("malformed lexicon JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("lexicon archive failed validation: {0}")]
    Archive(String),

    #[error("duplicate lexicon entry '{lemma}' ({pos}) at {id}")]
    Duplicate { id: EntryId, lemma: String, pos: &'static str },
}

/// Faults raised while realizing one sentence. A render never fails for an
/// incomplete AST; these only surface for inputs no grammar rule covers.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("morphology failed: {0}")]
    Morphology(#[from] MorphError),

    #[error("role '{}' is not in the valency of '{verb}'", .role.as_str())]
    UndeclaredRole { verb: String, role: Role },

    #[error("role '{}' is filled twice for '{verb}'", .role.as_str())]
    DuplicateRole { verb: String, role: Role },
}
