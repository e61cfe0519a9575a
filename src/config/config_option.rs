use crate::types::err::ConfigError;

/// A configurable value, with bounds.
#[derive(Clone, Debug)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: Clone + PartialOrd> ConfigOption<T> {
    pub fn min_max(&self) -> (T, T) {
        (self.min.clone(), self.max.clone())
    }

    /// Sets the value of the option, if the value is within the bounds of the option.
    pub fn set(&mut self, value: T) -> Result<(), ConfigError> {
        match self.min <= value && value <= self.max {
            true => {
                self.value = value;
                Ok(())
            }
            false => Err(ConfigError::OutOfRange(self.name)),
        }
    }
}
