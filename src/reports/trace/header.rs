/*!
The header of a trace.

The header holds information known only once a solve has concluded (e.g. the count of restarts), yet is written at the start of the trace.
So, a header is written in two phases:

- Reservation, when a trace is created.
  The size of the header is determined by a dry run of the [layout](Header::layout) of the header, and that many zero bytes are written.
  Events follow the reserved space.
- Patch, when a trace is finalised.
  The trace is reopened and the header is written over the reserved space by the same layout.

As both phases use the same layout the header written by the patch phase fits within the reserved space, and this is checked before any byte is written.

# Layout

The header is a sequence of 32 bit integers, in native byte order, followed by zero bytes to pad the header to a multiple of [HEADER_ALIGNMENT] bytes:

| offset | field                                           |
|--------|-------------------------------------------------|
| 0      | the size of the header, in bytes                |
| 4      | the count of restarts                           |
| 8      | `1`, if finalised (only with a finalisation flag) |

Without a finalisation flag the header is 10 bytes, and with the flag the header is 15 bytes.
In either case the size of the header is the offset of the first event.

A trace which was never finalised has a header of zero bytes, and so a size of zero.

```rust
# use otter_trace::reports::trace::header::Header;
let header = Header::placeholder(false);
assert_eq!(header.dry_run().unwrap(), 10);

let header = Header::placeholder(true);
assert_eq!(header.dry_run().unwrap(), 15);
```
*/

use std::io::{Seek, SeekFrom, Write};

use crate::{
    misc::log::targets::{self},
    types::err::{self, ErrorKind},
};

/// The size of a header is always a multiple of the header alignment.
pub const HEADER_ALIGNMENT: HeaderSize = 5;

/// The size of a header, in bytes.
pub type HeaderSize = u32;

/// Values written to the header of a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// The count of restarts during the solve.
    pub restarts: u32,

    /// Whether the header has a field to note finalisation.
    pub finalisation_flag: bool,

    /// Whether the trace was finalised.
    pub finalised: bool,
}

impl Header {
    /// A header to reserve space for, with all values unknown.
    pub fn placeholder(finalisation_flag: bool) -> Self {
        Header {
            restarts: 0,
            finalisation_flag,
            finalised: false,
        }
    }

    /// The size of the header, without writing the header.
    pub fn dry_run(&self) -> Result<HeaderSize, ErrorKind> {
        self.layout::<std::fs::File>(None)
    }

    /// Lays out the header, writing each field to `file` if some file is given.
    ///
    /// Returns the size of the header, including padding.
    pub fn layout<W: Write + Seek>(&self, mut file: Option<&mut W>) -> Result<HeaderSize, ErrorKind> {
        let field_count: HeaderSize = match self.finalisation_flag {
            true => 3,
            false => 2,
        };

        let mut size = field_count * std::mem::size_of::<i32>() as HeaderSize;
        if size % HEADER_ALIGNMENT != 0 {
            size += HEADER_ALIGNMENT - (size % HEADER_ALIGNMENT);
        }

        let Ok(restarts) = i32::try_from(self.restarts) else {
            return Err(err::HeaderError::Size.into());
        };

        let mut position: HeaderSize = 0;
        write_field(&mut file, size as i32, &mut position)?;
        write_field(&mut file, restarts, &mut position)?;
        if self.finalisation_flag {
            write_field(&mut file, self.finalised as i32, &mut position)?;
        }

        if position > size {
            return Err(err::HeaderError::Overrun {
                reserved: size,
                written: position,
            }
            .into());
        }

        if let Some(file) = file {
            if file.stream_position()? != position as u64 {
                return Err(err::HeaderError::Overrun {
                    reserved: size,
                    written: position,
                }
                .into());
            }
        }

        Ok(size)
    }

    /// Writes `size` zero bytes to `file`, where `size` is the size of the header.
    ///
    /// Returns the size of the header.
    pub fn reserve<W: Write>(&self, file: &mut W) -> Result<HeaderSize, ErrorKind> {
        let size = self.dry_run()?;
        file.write_all(&vec![0; size as usize])?;

        log::info!(target: targets::HEADER, "Reserved {size} bytes");
        Ok(size)
    }

    /// Writes the header over the first `reserved` bytes of `file`.
    ///
    /// Fails without writing if the header does not fit within the reserved bytes.
    pub fn patch<W: Write + Seek>(&self, file: &mut W, reserved: HeaderSize) -> Result<(), ErrorKind> {
        let size = self.dry_run()?;
        if size > reserved {
            log::error!(target: targets::HEADER, "Header of {size} bytes exceeds the {reserved} reserved");
            return Err(err::HeaderError::Overrun {
                reserved,
                written: size,
            }
            .into());
        }

        self.layout(Some(file))?;
        file.flush()?;

        log::info!(target: targets::HEADER, "Patched header: {self:?}");
        Ok(())
    }
}

/// Writes `data` at `position` of `file`, if some file is given, and advances `position` by the size of `data`.
fn write_field<W: Write + Seek>(
    file: &mut Option<&mut W>,
    data: i32,
    position: &mut HeaderSize,
) -> Result<(), std::io::Error> {
    if let Some(file) = file {
        file.seek(SeekFrom::Start(*position as u64))?;
        file.write_all(&data.to_ne_bytes())?;
    }
    *position += std::mem::size_of::<i32>() as HeaderSize;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::reports::trace::event::{Label, Record};

    #[test]
    fn sizes_are_aligned() {
        for flag in [false, true] {
            let size = Header::placeholder(flag).dry_run().unwrap();
            assert_eq!(size % HEADER_ALIGNMENT, 0);
            assert!(size >= 8);
        }
    }

    #[test]
    fn patch_keeps_events() {
        let header = Header::placeholder(true);
        let reserved = header.dry_run().unwrap();

        let mut bytes = vec![0; reserved as usize];
        let event = Record::new(Label::DecisionLevel, 1).to_bytes();
        bytes.extend_from_slice(&event);
        let mut cursor = Cursor::new(bytes);

        let finalised = Header {
            restarts: 3,
            finalisation_flag: true,
            finalised: true,
        };
        assert!(finalised.patch(&mut cursor, reserved).is_ok());

        let bytes = cursor.into_inner();
        assert_eq!(bytes[0..4], 15_i32.to_ne_bytes());
        assert_eq!(bytes[4..8], 3_i32.to_ne_bytes());
        assert_eq!(bytes[8..12], 1_i32.to_ne_bytes());
        assert_eq!(bytes[12..15], [0, 0, 0]);
        assert_eq!(bytes[15..], event);
    }

    #[test]
    fn patch_refuses_overrun() {
        let header = Header::placeholder(true);
        let reserved = Header::placeholder(false).dry_run().unwrap();

        let mut cursor = Cursor::new(vec![0; 20]);
        assert_eq!(
            header.patch(&mut cursor, reserved),
            Err(ErrorKind::Header(err::HeaderError::Overrun {
                reserved: 10,
                written: 15
            }))
        );
        assert!(cursor.into_inner().iter().all(|byte| *byte == 0));
    }
}
