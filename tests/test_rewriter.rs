//! Rewrite pipeline tests against serialized term strings.

use smt2hr::lexer::tokenize;
use smt2hr::rewriter::{elide_parens, rewrite, strip_widths};
use smt2hr::stringify::render;
use smt2hr::token::Token;

fn clean(input: &str) -> String {
    render(&rewrite(&tokenize(input).unwrap()))
}

#[test]
fn test_width_stripping_is_selective() {
    assert_eq!(clean("5_32"), "5");
    assert_eq!(clean("5_7"), "5_7");
}

#[test]
fn test_width_stripping_is_idempotent() {
    let toks = tokenize("(= foo[2_32] (bvadd 5_32 x_7))").unwrap();
    let once = strip_widths(&toks);
    assert_eq!(strip_widths(&once), once);
}

#[test]
fn test_concat_fold_flat_case() {
    assert_eq!(
        clean("(foo[3_32]::(foo[2_32]::(foo[1_32]::foo[0_32])))"),
        "foo[3:0]"
    );
}

#[test]
fn test_concat_fold_mismatched_names() {
    let result = clean("(a[1]::(b[0]))");
    assert!(!result.contains("a[1:0]"));
    assert_eq!(result, "a[1]::b[0]");
}

#[test]
fn test_concat_fold_long_chain() {
    let input = "(s[7_8]::(s[6_8]::(s[5_8]::(s[4_8]::(s[3_8]::(s[2_8]::(s[1_8]::s[0_8])))))))";
    assert_eq!(clean(input), "s[7:0]");
}

#[test]
fn test_paren_elision() {
    let toks = vec![Token::group(vec![Token::atom("x")])];
    assert_eq!(elide_parens(&toks), vec![Token::atom("x")]);

    let untouched = tokenize("(a b)").unwrap();
    assert_eq!(elide_parens(&untouched), untouched);
}

#[test]
fn test_stringifier_spacing() {
    assert_eq!(render(&tokenize("(a b)").unwrap()), "(a b)");
    assert_eq!(render(&tokenize("((a) b)").unwrap()), "((a) b)");
}

#[test]
fn test_rewrite_preserves_ordinary_terms() {
    assert_eq!(
        clean("(= (select stdin 0) (bvadd a b))"),
        "(= (select stdin 0) (bvadd a b))"
    );
}

#[test]
fn test_rewrite_mixed_term() {
    // Width stripping and folding interact: suffixes must go first for the
    // chain segments to match.
    assert_eq!(
        clean("(= x (mem[1_8]::mem[0_8]))"),
        "(= x mem[1:0])"
    );
}
