//! Clauses, aka. a collection of literals, interpreted as the disjunction of those literals.
//!
//! The clause trait is implemented for vectors and slices of literals.
//!
//! ```rust
//! # use otter_trace::structures::literal::{ABLiteral, Literal};
//! # use otter_trace::structures::clause::Clause;
//! let clause = vec![ABLiteral::new(23, true),
//!                   ABLiteral::new(41, false),
//!                   ABLiteral::new(3,  false)];
//!
//! assert_eq!(clause.size(), 3);
//! assert_eq!(clause.as_dimacs(true), "23 -41 -3 0");
//! ```
//!
//! The order of literals in a clause is preserved when a clause is traced or written, as a viewer may wish to display the clause as learnt.

use std::fmt::Write;

use crate::structures::literal::Literal;

/// The clause trait.
pub trait Clause {
    /// The type of literal contained in the clause.
    type Lit: Literal;

    /// A string of the clause in DIMACS form, with the terminating `0` as optional.
    fn as_dimacs(&self, zero: bool) -> String {
        let mut dimacs = String::new();
        for literal in self.literals() {
            let _ = write!(dimacs, "{} ", literal.as_int());
        }
        match zero {
            true => dimacs.push('0'),
            false => {
                dimacs.pop();
            }
        }
        dimacs
    }

    /// An iterator over all literals in the clause, in order.
    fn literals(&self) -> impl Iterator<Item = &Self::Lit>;

    /// The number of literals in the clause.
    fn size(&self) -> usize;
}

impl<L: Literal> Clause for [L] {
    type Lit = L;

    fn literals(&self) -> impl Iterator<Item = &Self::Lit> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}

impl<L: Literal> Clause for Vec<L> {
    type Lit = L;

    fn literals(&self) -> impl Iterator<Item = &Self::Lit> {
        self.iter()
    }

    fn size(&self) -> usize {
        self.len()
    }
}
