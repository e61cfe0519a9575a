/*!
A writer for the simplified form of an instance.

The simplified instance is written alongside a trace, to be read by a viewer of the trace.
The instance is written as a DIMACS clause list with a single comment line noting the source of the instance:

```text
c Simplified from foo.cnf
1 -2 0
3 0
```

Atoms are written as given, without renaming or validation, and there is no problem line.

```rust
# use otter_trace::reports::simplified::SimplifiedWriter;
let mut writer = SimplifiedWriter::new(Vec::new(), "foo.cnf").unwrap();
writer.write_formula(&vec![vec![1_i32, -2], vec![3]]).unwrap();

let text = String::from_utf8(writer.into_inner()).unwrap();
assert_eq!(text, "c Simplified from foo.cnf\n1 -2 0\n3 0\n");
```
*/

use std::io::Write;

use crate::{
    misc::log::targets::{self},
    structures::clause::Clause,
    types::err::{self, ErrorKind},
};

/// Writes a simplified instance, at most once.
pub struct SimplifiedWriter<W: Write> {
    writer: W,

    /// Whether the formula has been written.
    written: bool,
}

impl<W: Write> SimplifiedWriter<W> {
    /// A writer which has written the comment line noting `source`.
    pub fn new(mut writer: W, source: &str) -> Result<Self, ErrorKind> {
        writeln!(writer, "c Simplified from {source}")?;
        Ok(SimplifiedWriter {
            writer,
            written: false,
        })
    }

    /// Writes each clause of the formula on a line, terminated by `0`.
    pub fn write_formula<'c, C: Clause + ?Sized + 'c>(
        &mut self,
        formula: impl IntoIterator<Item = &'c C>,
    ) -> Result<(), ErrorKind> {
        if self.written {
            return Err(err::SimplifiedError::AlreadyWritten.into());
        }
        self.written = true;

        let mut count = 0;
        for clause in formula {
            writeln!(self.writer, "{}", clause.as_dimacs(true))?;
            count += 1;
        }
        self.writer.flush()?;

        log::info!(target: targets::SIMPLIFIED, "Wrote {count} clauses");
        Ok(())
    }

    /// Whether the formula has been written.
    pub fn written(&self) -> bool {
        self.written
    }

    pub fn flush(&mut self) -> Result<(), std::io::Error> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
