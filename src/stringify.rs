//! Token tree rendering.
//!
//! Reconstructs a readable, slightly compacted S-expression: parentheses
//! hug their contents, atoms are separated by single spaces.

use crate::token::Token;

/// Render a token sequence to one display string.
///
/// Spacing rule: no space after `(` and none before `)`; a single space
/// between any other pair of neighbors.
pub fn render(tokens: &[Token]) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for t in tokens {
        flatten(t, &mut parts);
    }

    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 && parts[i - 1] != "(" && *part != ")" {
            out.push(' ');
        }
        out.push_str(part);
    }
    out
}

/// Flatten a tree into a sequence of atoms and paren markers.
fn flatten<'a>(token: &'a Token, out: &mut Vec<&'a str>) {
    match token {
        Token::Atom(s) => out.push(s.as_str()),
        Token::Group(ch) => {
            out.push("(");
            for c in ch {
                flatten(c, out);
            }
            out.push(")");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_group() {
        let toks = vec![Token::group(vec![Token::atom("a"), Token::atom("b")])];
        assert_eq!(render(&toks), "(a b)");
    }

    #[test]
    fn test_nested_group() {
        let toks = vec![Token::group(vec![
            Token::group(vec![Token::atom("a")]),
            Token::atom("b"),
        ])];
        assert_eq!(render(&toks), "((a) b)");
    }

    #[test]
    fn test_top_level_sequence() {
        let toks = vec![Token::atom("x"), Token::atom("y")];
        assert_eq!(render(&toks), "x y");
    }

    #[test]
    fn test_adjacent_groups() {
        let toks = vec![
            Token::group(vec![Token::atom("a")]),
            Token::group(vec![Token::atom("b")]),
        ];
        assert_eq!(render(&toks), "(a) (b)");
    }

    #[test]
    fn test_empty_group() {
        let toks = vec![Token::group(vec![])];
        assert_eq!(render(&toks), "()");
    }

    #[test]
    fn test_lex_render_round_trip() {
        let input = "(let ((.def_1 (select foo #b0))) .def_1)";
        let toks = crate::lexer::tokenize(input).unwrap();
        assert_eq!(render(&toks), input);
    }
}
