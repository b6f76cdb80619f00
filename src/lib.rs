//! smt2hr — bitvector SMT-LIB assertions in human-readable form.
//!
//! Takes serialized assertion terms (prefix S-expressions with bit-width
//! suffixes and array-concatenation idioms, as emitted by a solver library's
//! term serializer) and renders them as readable infix text.  Two modes:
//! a cosmetic rewrite of the term (width stripping, concatenation folding,
//! parenthesis elision) and a semantic translation of the `let`-chain into
//! a single infix expression.

pub mod bindings;
pub mod errors;
pub mod frontend;
pub mod lexer;
pub mod rewriter;
pub mod stringify;
pub mod token;
pub mod translator;
