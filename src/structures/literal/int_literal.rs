use crate::structures::atom::Atom;

use super::{ABLiteral, Literal};

/// The representation of a literal as an integer, with sign indicating polarity.
///
/// This is the representation of a literal within a trace.
pub type IntLiteral = i32;

impl Literal for IntLiteral {
    fn new(atom: Atom, polarity: bool) -> Self {
        match polarity {
            true => atom as IntLiteral,
            false => -(atom as IntLiteral),
        }
    }

    fn negate(&self) -> Self {
        -self
    }

    fn atom(&self) -> Atom {
        self.unsigned_abs()
    }

    fn polarity(&self) -> bool {
        self.is_positive()
    }

    fn as_int(&self) -> isize {
        *self as isize
    }
}

impl From<ABLiteral> for IntLiteral {
    fn from(value: ABLiteral) -> Self {
        IntLiteral::new(value.atom(), value.polarity())
    }
}
