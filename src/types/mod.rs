//! Types used in the library.

pub mod err;
