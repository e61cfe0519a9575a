//! Key structures, such as literals and clauses.
//!
//! As with a solver, structures are made of a trait to capture the key features of the structure and an implementation of the trait.
//! A tracer only reads from a structure, and so any implementation a solver happens to use may be passed directly.
//!
//! ## Formulas
//!
//! A formula is a collection of [clauses](clause), interpreted as the conjunction of those clauses.
//! Formulas have no dedicated structure, and are written as a slice of clauses when required, e.g. by the [simplified instance writer](crate::reports::simplified).

pub mod atom;
pub mod clause;
pub mod literal;
