//! Semantic translation of one assertion term into readable infix text.
//!
//! Walks the term's `let`-chain, evaluating each bound expression against
//! a fixed bitvector operator vocabulary and storing the result in the
//! binding environment.  The final non-`let` leaf, resolved against the
//! environment, is the assertion's readable form.
//!
//! Operators are a closed enumeration; any name outside it is an
//! unrecoverable `UnrecognizedOperator` for the current assertion.

use crate::bindings::{BindingEnvironment, Bound, Descriptor, SizeTable};
use crate::errors::TranslateError;
use crate::token::Token;
use primitive_types::U256;

/// Width assumed for a selected array when nothing better is known.
pub const DEFAULT_ARRAY_WIDTH: u32 = 32;

/// The recognized operator vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Select,
    Concat,
    Indexed,
    BvMul,
    BvAdd,
    BvSub,
    BvUrem,
    BvSlt,
    Eq,
    And,
}

impl Op {
    fn from_name(name: &str) -> Option<Op> {
        match name {
            "select" => Some(Op::Select),
            "concat" => Some(Op::Concat),
            "_" => Some(Op::Indexed),
            "bvmul" => Some(Op::BvMul),
            "bvadd" => Some(Op::BvAdd),
            "bvsub" => Some(Op::BvSub),
            "bvurem" => Some(Op::BvUrem),
            "bvslt" => Some(Op::BvSlt),
            "=" => Some(Op::Eq),
            "and" => Some(Op::And),
            _ => None,
        }
    }

    /// Infix rendering for the binary operators.
    fn infix(self) -> Option<&'static str> {
        match self {
            Op::BvMul => Some("*"),
            Op::BvAdd => Some("+"),
            Op::BvSub => Some("-"),
            Op::BvUrem => Some("%"),
            Op::BvSlt => Some("<"),
            Op::Eq => Some("=="),
            Op::And => Some("and"),
            _ => None,
        }
    }
}

/// Translator for one assertion.  Owns the binding environment and the
/// variable size table; instances are not reused across assertions.
#[derive(Debug)]
pub struct ExpressionTranslator {
    env: BindingEnvironment,
    sizes: SizeTable,
    default_width: u32,
}

impl Default for ExpressionTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionTranslator {
    pub fn new() -> Self {
        Self::with_default_width(DEFAULT_ARRAY_WIDTH)
    }

    /// Use `bits` as the assumed width of selected arrays.
    pub fn with_default_width(bits: u32) -> Self {
        Self {
            env: BindingEnvironment::new(),
            sizes: SizeTable::new(),
            default_width: bits,
        }
    }

    /// Bit-widths inferred for free array variables so far.
    pub fn variable_sizes(&self) -> &SizeTable {
        &self.sizes
    }

    pub fn bindings(&self) -> &BindingEnvironment {
        &self.env
    }

    /// Translate one assertion term tree into a readable infix string.
    ///
    /// A term that is not a `let`-chain at all is evaluated directly.
    pub fn translate(&mut self, term: &Token) -> Result<String, TranslateError> {
        let mut current = term;
        loop {
            let Some(ch) = current.children() else {
                break;
            };
            if ch.first().and_then(Token::as_atom) != Some("let") {
                break;
            }
            if ch.len() != 3 {
                return Err(TranslateError::MalformedLetBinding(current.to_string()));
            }

            let Some(bindings) = ch[1].children() else {
                return Err(TranslateError::MalformedLetBinding(ch[1].to_string()));
            };
            for binding in bindings {
                let Some(pair) = binding.children() else {
                    return Err(TranslateError::MalformedLetBinding(binding.to_string()));
                };
                let [Token::Atom(name), expr] = pair else {
                    return Err(TranslateError::MalformedLetBinding(binding.to_string()));
                };
                let value = self.eval(expr)?;
                log::trace!("bound {name} = {value:?}");
                self.env.bind(name, value);
            }

            current = &ch[2];
        }

        match self.eval(current)? {
            Bound::Text(text) => Ok(text),
            Bound::Op(_) => Err(TranslateError::UnresolvedVariable(current.to_string())),
        }
    }

    // -- Expression evaluation ---------------------------------------------

    fn eval(&mut self, token: &Token) -> Result<Bound, TranslateError> {
        match token {
            Token::Atom(name) => Ok(Bound::Text(self.value_of(name)?)),
            Token::Group(ch) => self.eval_group(ch),
        }
    }

    fn eval_group(&mut self, ch: &[Token]) -> Result<Bound, TranslateError> {
        let Some(head) = ch.first() else {
            return Err(TranslateError::UnrecognizedOperator("()".to_string()));
        };

        // A group head means an indexed-family descriptor being applied,
        // e.g. ((_ sign_extend 32) x).
        if let Token::Group(inner) = head {
            return self.apply_descriptor(inner, &ch[1..]);
        }

        let name = head.as_atom().unwrap_or_default();
        let Some(op) = Op::from_name(name) else {
            return Err(TranslateError::UnrecognizedOperator(name.to_string()));
        };

        match op {
            Op::Select => self.eval_select(ch),
            Op::Concat => self.eval_concat(ch),
            Op::Indexed => self.eval_indexed(ch),
            _ => self.eval_binary(op, ch),
        }
    }

    /// `(select arr idx)` — records the array's inferred width and yields
    /// the array name as the symbolic value.
    fn eval_select(&mut self, ch: &[Token]) -> Result<Bound, TranslateError> {
        let [_, arr, idx] = ch else {
            return Err(TranslateError::UnrecognizedOperator(
                Token::Group(ch.to_vec()).to_string(),
            ));
        };
        match arr {
            Token::Atom(name) => {
                let bits = self.predict_size(idx);
                self.sizes.record(name, bits);
                Ok(Bound::Text(name.clone()))
            }
            nested => Ok(Bound::Text(self.value_of_token(nested)?)),
        }
    }

    /// `(concat a b)` — only a redundant concat of the same source is
    /// supported; genuinely different operands are an error.
    fn eval_concat(&mut self, ch: &[Token]) -> Result<Bound, TranslateError> {
        let [_, a, b] = ch else {
            return Err(TranslateError::UnrecognizedOperator(
                Token::Group(ch.to_vec()).to_string(),
            ));
        };
        let a = self.value_of_token(a)?;
        let b = self.value_of_token(b)?;
        if a == b {
            Ok(Bound::Text(a))
        } else {
            Err(TranslateError::InconsistentConcatenation(a, b))
        }
    }

    /// `(_ sign_extend N)` / `(_ extract hi lo)` — yields a descriptor,
    /// consumed by the enclosing application.
    fn eval_indexed(&mut self, ch: &[Token]) -> Result<Bound, TranslateError> {
        let family = ch.get(1).and_then(Token::as_atom).unwrap_or_default();
        match family {
            "sign_extend" => {
                let bits = parse_index(ch.get(2))?;
                Ok(Bound::Op(Descriptor::SignExtend { bits }))
            }
            "extract" => {
                let hi = parse_index(ch.get(2))?;
                let lo = parse_index(ch.get(3))?;
                Ok(Bound::Op(Descriptor::Extract { hi, lo }))
            }
            other => Err(TranslateError::UnrecognizedOperator(other.to_string())),
        }
    }

    fn eval_binary(&mut self, op: Op, ch: &[Token]) -> Result<Bound, TranslateError> {
        let [_, a, b] = ch else {
            return Err(TranslateError::UnrecognizedOperator(
                Token::Group(ch.to_vec()).to_string(),
            ));
        };
        let a = self.value_of_token(a)?;
        let b = self.value_of_token(b)?;
        let sym = op.infix().unwrap_or("?");
        Ok(Bound::Text(format!("{a} {sym} {b}")))
    }

    /// Apply an indexed-family descriptor to its operand.
    fn apply_descriptor(
        &mut self,
        head: &[Token],
        args: &[Token],
    ) -> Result<Bound, TranslateError> {
        let descriptor = match self.eval_group(head)? {
            Bound::Op(d) => d,
            Bound::Text(t) => return Err(TranslateError::UnrecognizedOperator(t)),
        };
        let [arg] = args else {
            return Err(TranslateError::UnrecognizedOperator(
                Token::Group(head.to_vec()).to_string(),
            ));
        };
        let value = self.value_of_token(arg)?;

        match descriptor {
            Descriptor::SignExtend { bits } => {
                Ok(Bound::Text(format!("(int {bits})({value})")))
            }
            Descriptor::Extract { hi, lo: 0 } => {
                // hi is inclusive; the width hi + 1 can overflow u32.
                let width = hi
                    .checked_add(1)
                    .ok_or(TranslateError::UnsupportedExtraction { hi, lo: 0 })?;
                Ok(Bound::Text(format!("(int {width})({value})")))
            }
            Descriptor::Extract { hi, lo } => {
                Err(TranslateError::UnsupportedExtraction { hi, lo })
            }
        }
    }

    // -- Operand resolution ------------------------------------------------

    /// Resolve an atomic operand: a `#b` literal evaluates to its unsigned
    /// integer value, anything else must be bound in the environment.
    fn value_of(&self, name: &str) -> Result<String, TranslateError> {
        if let Some(bits) = name.strip_prefix("#b") {
            let value = U256::from_str_radix(bits, 2)
                .map_err(|_| TranslateError::UnresolvedVariable(name.to_string()))?;
            return Ok(value.to_string());
        }
        match self.env.get(name) {
            Some(Bound::Text(text)) => Ok(text.clone()),
            _ => Err(TranslateError::UnresolvedVariable(name.to_string())),
        }
    }

    fn value_of_token(&mut self, token: &Token) -> Result<String, TranslateError> {
        match token {
            Token::Atom(name) => self.value_of(name),
            Token::Group(ch) => match self.eval_group(ch)? {
                Bound::Text(text) => Ok(text),
                Bound::Op(_) => Err(TranslateError::UnrecognizedOperator(
                    Token::Group(ch.to_vec()).to_string(),
                )),
            },
        }
    }

    /// Infer the bit-width of an array from the shape of a `select` index.
    ///
    /// Placeholder inference: yields the configured default regardless of
    /// the index expression.
    fn predict_size(&self, _idx: &Token) -> u32 {
        self.default_width
    }
}

fn parse_index(token: Option<&Token>) -> Result<u32, TranslateError> {
    let text = token.and_then(Token::as_atom).unwrap_or_default();
    text.parse::<u32>()
        .map_err(|_| TranslateError::UnrecognizedOperator(text.to_string()))
}
