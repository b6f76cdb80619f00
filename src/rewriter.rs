//! Cosmetic rewrite passes over the token tree.
//!
//! Three composable tree-to-tree transforms:
//! 1. `strip_widths` — drop `_<width>` bit-size annotations.
//! 2. `fold_concats` — collapse `::` array-concatenation chains into
//!    `name[hi:lo]` range tokens.
//! 3. `elide_parens` — drop groups that wrap a single atom.
//!
//! The folder runs to a fixed point (the serializer nests concatenations
//! right-associatively, so one round cannot always see a whole chain),
//! with a round cap only to bound pathological inputs.

use crate::token::Token;

/// Bit-widths the serializer attaches as cosmetic suffixes.  Anything else
/// is left alone.
pub const RECOGNIZED_WIDTHS: [u32; 7] = [1, 8, 16, 32, 64, 128, 256];

/// Infix operator symbols the serializer can emit.  Exempt from width
/// stripping to avoid ambiguity with future operator tokens.
const INFIX_MARKERS: [&str; 7] = ["&", "<", ">", "s<", "s>", "%", "u%"];

/// Safety cap on folding rounds.  Each round can only reduce token count,
/// so convergence is expected long before this.
const MAX_FOLD_ROUNDS: usize = 32;

/// Run the full rewrite pipeline on a token sequence.
pub fn rewrite(tokens: &[Token]) -> Vec<Token> {
    let mut tokens = strip_widths(tokens);

    for round in 0..MAX_FOLD_ROUNDS {
        let next = fold_concats(&tokens);
        if next == tokens {
            log::debug!("concat folding converged after {round} rounds");
            break;
        }
        log::debug!(
            "concat fold round {round}: {} -> {} tokens",
            seq_count(&tokens),
            seq_count(&next)
        );
        tokens = next;
    }

    elide_parens(&tokens)
}

fn seq_count(tokens: &[Token]) -> usize {
    tokens.iter().map(Token::count).sum()
}

// ---------------------------------------------------------------------------
// Pass 1: bit-width stripping
// ---------------------------------------------------------------------------

/// Remove recognized `_<width>` suffixes from every atom in the tree.
pub fn strip_widths(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .map(|t| match t {
            Token::Atom(s) => Token::Atom(strip_atom(s)),
            Token::Group(ch) => Token::Group(strip_widths(ch)),
        })
        .collect()
}

fn strip_atom(text: &str) -> String {
    if text == "(" || text == ")" || INFIX_MARKERS.contains(&text) {
        return text.to_string();
    }

    // Whole-atom suffix: "5_32" → "5".
    if let Some((value, width)) = text.rsplit_once('_') {
        if is_numeric(value) && is_recognized_width(width) {
            return value.to_string();
        }
    }

    // Bracketed index annotations: "foo[2_32]" → "foo[2]".
    if text.contains('[') {
        return strip_bracket_indices(text);
    }

    text.to_string()
}

/// Strip width suffixes inside every `[...]` of a larger atom.
fn strip_bracket_indices(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        out.push_str(&rest[..=open]);
        let inner = &rest[open + 1..close];
        match inner.rsplit_once('_') {
            Some((value, width)) if is_numeric(value) && is_recognized_width(width) => {
                out.push_str(value);
            }
            _ => out.push_str(inner),
        }
        out.push(']');
        rest = &rest[close + 1..];
    }
    out.push_str(rest);
    out
}

fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn is_recognized_width(s: &str) -> bool {
    s.parse::<u32>().is_ok_and(|w| RECOGNIZED_WIDTHS.contains(&w))
}

// ---------------------------------------------------------------------------
// Pass 2: concatenation folding
// ---------------------------------------------------------------------------

/// One folding round over the tree.  Children fold before their parents,
/// so a right-associated chain flattens from the inside out.
pub fn fold_concats(tokens: &[Token]) -> Vec<Token> {
    let folded: Vec<Token> = tokens
        .iter()
        .map(|t| match t {
            Token::Group(ch) => Token::Group(fold_concats(ch)),
            atom => atom.clone(),
        })
        .collect();

    let mut out: Vec<Token> = Vec::with_capacity(folded.len());
    let mut i = 0;
    while i < folded.len() {
        if let Token::Atom(text) = &folded[i] {
            if text.ends_with("::") {
                // Incomplete chain: the rest lives in the next sibling group.
                // Merge its lone atom in and splice the group out; the next
                // round sees the flat chain.
                if let Some(Token::Group(ch)) = folded.get(i + 1) {
                    if let [Token::Atom(inner)] = ch.as_slice() {
                        out.push(Token::Atom(format!("{text}{inner}")));
                        i += 2;
                        continue;
                    }
                }
            } else if text.contains("::") {
                // Complete chain: fold into a range token, or leave the
                // whole atom untouched on any inconsistency.
                if let Some(range) = fold_chain(text) {
                    out.push(Token::Atom(range));
                    i += 1;
                    continue;
                }
            }
        }
        out.push(folded[i].clone());
        i += 1;
    }
    out
}

/// Fold a flat `name[a]::name[b]::…` chain into `name[hi:lo]`.
///
/// Every segment must index the same `name`, and indices must descend
/// contiguously (a segment's high bound is one below the running low
/// bound).  Returns `None` on any mismatch: no partial folds.
fn fold_chain(text: &str) -> Option<String> {
    let segments: Vec<&str> = text.split("::").collect();
    if segments.len() < 2 {
        return None;
    }

    let (name, hi, mut lo) = parse_segment(segments[0])?;
    for seg in &segments[1..] {
        let (seg_name, seg_hi, seg_lo) = parse_segment(seg)?;
        if seg_name != name || seg_hi.checked_add(1) != Some(lo) {
            return None;
        }
        lo = seg_lo;
    }
    Some(format!("{name}[{hi}:{lo}]"))
}

/// Parse `name[idx]` or `name[hi:lo]` into (name, hi, lo).
fn parse_segment(seg: &str) -> Option<(&str, u64, u64)> {
    let open = seg.find('[')?;
    let inner = seg.strip_suffix(']')?.get(open + 1..)?;
    let name = &seg[..open];
    if name.is_empty() {
        return None;
    }
    match inner.split_once(':') {
        Some((hi, lo)) => Some((name, hi.parse().ok()?, lo.parse().ok()?)),
        None => {
            let idx: u64 = inner.parse().ok()?;
            Some((name, idx, idx))
        }
    }
}

// ---------------------------------------------------------------------------
// Pass 3: parenthesis elision
// ---------------------------------------------------------------------------

/// Replace every group that wraps exactly one atom with that atom.
///
/// Runs bottom-up, so stacked single-child groups collapse in one pass.
pub fn elide_parens(tokens: &[Token]) -> Vec<Token> {
    tokens
        .iter()
        .map(|t| match t {
            Token::Group(ch) => {
                let mut ch = elide_parens(ch);
                if ch.len() == 1 && ch[0].is_atom() {
                    ch.remove(0)
                } else {
                    Token::Group(ch)
                }
            }
            atom => atom.clone(),
        })
        .collect()
}
