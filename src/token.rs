//! Token tree produced by the lexer.
//!
//! A serialized term is represented as a tree of atoms and parenthesis
//! groups.  This is the sole intermediate form between lexing and the
//! rewrite passes / the expression translator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of the token tree.
///
/// An `Atom` is an indivisible token (identifier, operator symbol, numeric
/// literal); its text never contains whitespace or parentheses.  A `Group`
/// corresponds to one balanced parenthesis pair in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    Atom(String),
    Group(Vec<Token>),
}

impl Token {
    /// Create an atom from a string slice.
    pub fn atom(s: &str) -> Self {
        Token::Atom(s.to_string())
    }

    /// Create a group from a list of children.
    pub fn group(children: Vec<Token>) -> Self {
        Token::Group(children)
    }

    /// Return the atom text if this is an `Atom`.
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Token::Atom(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Return the children if this is a `Group`.
    pub fn children(&self) -> Option<&[Token]> {
        match self {
            Token::Group(ch) => Some(ch.as_slice()),
            _ => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Token::Atom(_))
    }

    /// Total number of nodes in this subtree (groups included).
    pub fn count(&self) -> usize {
        match self {
            Token::Atom(_) => 1,
            Token::Group(ch) => 1 + ch.iter().map(Token::count).sum::<usize>(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::stringify::render(std::slice::from_ref(self)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_atom() {
        assert_eq!(Token::atom("x").as_atom(), Some("x"));
        assert_eq!(Token::group(vec![]).as_atom(), None);
    }

    #[test]
    fn test_children() {
        let g = Token::group(vec![Token::atom("a"), Token::atom("b")]);
        assert_eq!(g.children().map(|ch| ch.len()), Some(2));
        assert_eq!(Token::atom("a").children(), None);
    }

    #[test]
    fn test_count() {
        let g = Token::group(vec![
            Token::atom("a"),
            Token::group(vec![Token::atom("b")]),
        ]);
        assert_eq!(g.count(), 4);
    }

    #[test]
    fn test_display() {
        let g = Token::group(vec![Token::atom("a"), Token::atom("b")]);
        assert_eq!(g.to_string(), "(a b)");
    }
}
