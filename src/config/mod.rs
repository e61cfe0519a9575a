/*!
Configuration of a trace.

All configuration for a [Tracer](crate::reports::trace::Tracer) is contained within a [Config], and is fixed once the tracer has been created.

```rust
# use otter_trace::config::Config;
let mut config = Config::default();
assert!(config.finalisation_flag.value);

assert!(config.buffer_capacity.set(1024).is_ok());
assert!(config.buffer_capacity.set(usize::MAX).is_err());
```
*/

mod config_option;
pub use config_option::ConfigOption;

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Capacity of the buffers placed over the trace and simplified instance files.
    pub buffer_capacity: ConfigOption<usize>,

    /// Include a flag in the header of a trace, set only when the trace is finalised.
    ///
    /// Without the flag a trace which was never finalised and a finalised trace without restarts may only be distinguished by a header size of zero.
    pub finalisation_flag: ConfigOption<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            buffer_capacity: ConfigOption {
                name: "buffer_capacity",
                min: 0,
                max: 16 * 1024 * 1024,
                value: 8 * 1024,
            },

            finalisation_flag: ConfigOption {
                name: "finalisation_flag",
                min: false,
                max: true,
                value: true,
            },
        }
    }
}
