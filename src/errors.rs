//! Domain-specific error types.
//!
//! Uses `thiserror` for structured error definitions rather than relying
//! solely on `anyhow` for everything.

use thiserror::Error;

/// Errors from the term lexer.
#[derive(Debug, Error)]
pub enum LexError {
    #[error("unbalanced parenthesis at byte {0}")]
    Unbalanced(usize),
}

/// Errors from the expression translator.
///
/// Every variant is unrecoverable for the current assertion: there is no
/// partial output for a malformed term, and whether one failed assertion
/// aborts the whole file is up to the caller.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("unrecognized operator: {0}")]
    UnrecognizedOperator(String),

    #[error("unresolved variable: {0}")]
    UnresolvedVariable(String),

    #[error("cannot concatenate distinct values: {0} and {1}")]
    InconsistentConcatenation(String, String),

    #[error("unsupported extraction: [{hi}:{lo}]")]
    UnsupportedExtraction { hi: u32, lo: u32 },

    #[error("malformed let binding: {0}")]
    MalformedLetBinding(String),
}
