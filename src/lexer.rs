//! Term lexer: serialized term string → token tree.
//!
//! Scans character by character with an explicit stack of in-progress
//! groups, so nesting depth is bounded by heap memory rather than the call
//! stack (solver output can nest arbitrarily deep).

use crate::errors::LexError;
use crate::token::Token;

/// Tokenize one serialized term (or a whole sequence of them) into the
/// top-level token sequence.
///
/// Structure and atom text are preserved losslessly; spacing is not
/// (consecutive spaces collapse), since output is always re-stringified.
pub fn tokenize(input: &str) -> Result<Vec<Token>, LexError> {
    // stack[0] is the top-level sequence; each '(' pushes a new buffer.
    let mut stack: Vec<Vec<Token>> = vec![Vec::new()];
    let mut pending = String::new();

    for (pos, c) in input.char_indices() {
        match c {
            '(' => {
                flush(&mut pending, &mut stack);
                stack.push(Vec::new());
            }
            ')' => {
                flush(&mut pending, &mut stack);
                let group = stack.pop().unwrap_or_default();
                match stack.last_mut() {
                    Some(parent) => parent.push(Token::Group(group)),
                    None => return Err(LexError::Unbalanced(pos)),
                }
            }
            c if c.is_whitespace() => flush(&mut pending, &mut stack),
            c => pending.push(c),
        }
    }
    flush(&mut pending, &mut stack);

    if stack.len() != 1 {
        return Err(LexError::Unbalanced(input.len()));
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Push the in-progress atom, if any, onto the innermost open group.
fn flush(pending: &mut String, stack: &mut [Vec<Token>]) {
    if pending.is_empty() {
        return;
    }
    if let Some(top) = stack.last_mut() {
        top.push(Token::Atom(std::mem::take(pending)));
    }
}
