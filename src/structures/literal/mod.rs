//! Literals are atoms paired with a (boolean) polarity.
//!
//! Or, rather, anything which has methods for returning an atom and a polarity.
//!
//! The 'canonical' implementation of the literal trait is the [ABLiteral] structure, made of an atom (the 'a') and a boolean (the 'b').
//! In addition, the trait is implemented for [IntLiteral], an integer with sign indicating polarity, as this is the representation used in a trace.
//!
//! ```rust
//! # use otter_trace::structures::literal::{ABLiteral, IntLiteral, Literal};
//! let literal = ABLiteral::new(79, false);
//!
//! assert!(!literal.polarity());
//! assert_eq!(literal.atom(), 79);
//! assert!(literal.negate().polarity());
//!
//! assert_eq!(IntLiteral::from(literal), -79);
//! ```
//!
//! Note, a literal with negative polarity is, in the terms of a solver, a *negated* variable.
//! So, the literal `{variable: 2, negated: true}` is `ABLiteral::new(2, false)`, and is traced as `-2`.

mod ab_literal;
mod int_literal;

pub use int_literal::IntLiteral;

use crate::structures::atom::Atom;

/// Something which has methods for returning an atom and a polarity, etc.
pub trait Literal {
    /// A fresh literal, specified by pairing an atom with a boolean.
    fn new(atom: Atom, polarity: bool) -> Self;

    /// The negation of the literal.
    fn negate(&self) -> Self;

    /// The atom of the literal.
    fn atom(&self) -> Atom;

    /// The polarity of the literal.
    fn polarity(&self) -> bool;

    /// The literal in it's integer form, with sign indicating polarity.
    fn as_int(&self) -> isize;
}

/// The representation of a literal as an atom paired with a boolean.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ABLiteral {
    /// The atom of a literal.
    atom: Atom,

    /// The polarity of a literal.
    polarity: bool,
}
