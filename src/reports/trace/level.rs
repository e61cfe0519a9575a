/*!
The decision level invariant of a trace.

A trace records a depth-first search, and so a reader of a trace must be able to reconstruct the stack of decisions from backtrack and decision level events alone.
To ensure this, each change of decision level is checked when the event is written:
- A new decision level must be exactly one more than the current level.
- A backtrack must be to some level strictly below the current level, or to level zero.

Only the current level is required for the checks, and so the checks are constant time.

```rust
# use otter_trace::reports::trace::level::LevelTracker;
let mut levels = LevelTracker::default();

assert!(levels.new_decision_level(1).is_ok());
assert!(levels.new_decision_level(2).is_ok());
assert!(levels.new_decision_level(4).is_err());

assert!(levels.backtrack(2).is_err());
assert!(levels.backtrack(1).is_ok());
assert!(levels.backtrack(0).is_ok());
assert!(levels.backtrack(0).is_ok());
```
*/

use crate::types::err::TraceError;

/// A decision level, i.e. the number of decisions made.
pub type DecisionLevel = u32;

/// The current decision level of a trace, updated only by valid changes of level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LevelTracker {
    level: DecisionLevel,
}

impl LevelTracker {
    /// The current decision level.
    pub fn level(&self) -> DecisionLevel {
        self.level
    }

    /// Notes a backtrack to `level`, if possible.
    ///
    /// A backtrack to zero is always possible, including from zero.
    pub fn backtrack(&mut self, level: DecisionLevel) -> Result<(), TraceError> {
        if level < self.level || level == 0 {
            self.level = level;
            Ok(())
        } else {
            Err(TraceError::BacktrackLevel {
                from: self.level,
                to: level,
            })
        }
    }

    /// Notes a new decision level `level`, if possible.
    pub fn new_decision_level(&mut self, level: DecisionLevel) -> Result<(), TraceError> {
        match self.level.checked_add(1) {
            Some(next) if next == level => {
                self.level = level;
                Ok(())
            }
            _ => Err(TraceError::DecisionLevel {
                from: self.level,
                to: level,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_checks_keep_level() {
        let mut levels = LevelTracker::default();
        assert!(levels.new_decision_level(1).is_ok());
        assert!(levels.new_decision_level(2).is_ok());

        assert_eq!(
            levels.new_decision_level(4),
            Err(TraceError::DecisionLevel { from: 2, to: 4 })
        );
        assert_eq!(levels.level(), 2);

        assert_eq!(
            levels.backtrack(2),
            Err(TraceError::BacktrackLevel { from: 2, to: 2 })
        );
        assert_eq!(levels.level(), 2);
    }

    #[test]
    fn no_decision_level_repeat() {
        let mut levels = LevelTracker::default();
        assert!(levels.new_decision_level(0).is_err());
        assert!(levels.new_decision_level(1).is_ok());
        assert!(levels.new_decision_level(1).is_err());
    }
}
