/*!
(The external representation of) an atom (aka. a 'variable').

Each atom is a u32 *u*, numbered as in the input formula, and so:
- The first atom is `1`.
- `0` is never an atom, as `0` terminates a clause in DIMACS representation.

Atoms are written to a trace as the magnitude of a signed 32 bit integer, and so the largest atom which may be traced is [ATOM_MAX].

```rust
# use otter_trace::structures::atom::{Atom, ATOM_MAX};
let atom: Atom = 97;
assert!(atom <= ATOM_MAX);
```
*/

/// An atom, aka. a 'variable'.
pub type Atom = u32;

/// The maximum instance of an atom.
pub const ATOM_MAX: Atom = i32::MAX.unsigned_abs();

/// Whether the atom may be written to a trace.
pub fn is_traceable(atom: Atom) -> bool {
    0 < atom && atom <= ATOM_MAX
}
