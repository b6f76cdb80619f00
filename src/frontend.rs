//! SMT-LIB script scanning.
//!
//! Stands in for an external formula parser at the input boundary: pulls
//! the argument term out of each `assert` command and the name/type out of
//! each `declare-fun`, ignoring everything else (`set-logic`, `check-sat`,
//! `exit`, ...).  Line comments (`;` to end of line) are dropped before
//! lexing.

use crate::errors::LexError;
use crate::lexer;
use crate::stringify;
use crate::token::Token;

/// A `declare-fun` command, reduced to what the translator cares about:
/// the variable name and whether its type term mentions `Array`.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub name: String,
    pub is_array: bool,
}

/// The commands extracted from one `.smt2` script.
#[derive(Debug, Default)]
pub struct Script {
    pub declarations: Vec<Declaration>,
    /// One term per `assert` command, in file order.
    pub assertions: Vec<Token>,
}

/// Scan a whole script, keeping asserts and declarations.
pub fn parse_script(input: &str) -> Result<Script, LexError> {
    let commands = lexer::tokenize(&strip_comments(input))?;
    let mut script = Script::default();

    for command in &commands {
        let Some(ch) = command.children() else {
            continue;
        };
        match ch.first().and_then(Token::as_atom) {
            Some("assert") if ch.len() == 2 => {
                script.assertions.push(ch[1].clone());
            }
            Some("declare-fun") if ch.len() >= 2 => {
                if let Some(name) = ch[1].as_atom() {
                    let is_array = ch.last().is_some_and(mentions_array);
                    script.declarations.push(Declaration {
                        name: name.to_string(),
                        is_array,
                    });
                }
            }
            Some(other) => log::debug!("ignoring command: {other}"),
            None => {}
        }
    }

    Ok(script)
}

/// Serialize a term back to its one-line string form.
pub fn serialize_term(term: &Token) -> String {
    stringify::render(std::slice::from_ref(term))
}

fn mentions_array(token: &Token) -> bool {
    match token {
        Token::Atom(s) => s == "Array",
        Token::Group(ch) => ch.iter().any(mentions_array),
    }
}

fn strip_comments(input: &str) -> String {
    input
        .lines()
        .map(|line| line.split(';').next().unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = "\
(set-logic QF_ABV)
; input array
(declare-fun stdin () (Array (_ BitVec 32) (_ BitVec 8)))
(declare-fun k!0 () (_ BitVec 8))
(assert (= k!0 #b00000000))
(check-sat)
(exit)
";

    #[test]
    fn test_parse_script() {
        let script = parse_script(SCRIPT).unwrap();
        assert_eq!(script.declarations.len(), 2);
        assert_eq!(script.assertions.len(), 1);

        assert_eq!(script.declarations[0].name, "stdin");
        assert!(script.declarations[0].is_array);
        assert_eq!(script.declarations[1].name, "k!0");
        assert!(!script.declarations[1].is_array);
    }

    #[test]
    fn test_assert_term_round_trips() {
        let script = parse_script(SCRIPT).unwrap();
        assert_eq!(
            serialize_term(&script.assertions[0]),
            "(= k!0 #b00000000)"
        );
    }

    #[test]
    fn test_comments_stripped() {
        let script = parse_script("; (assert nope)\n(assert x)\n").unwrap();
        assert_eq!(script.assertions.len(), 1);
    }

    #[test]
    fn test_empty_script() {
        let script = parse_script("").unwrap();
        assert!(script.assertions.is_empty());
        assert!(script.declarations.is_empty());
    }
}
