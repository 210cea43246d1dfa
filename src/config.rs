use crate::{Error, IntLongMap, Result};

/// Initial slot count used when none is given.
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor used when none is given.
pub const DEFAULT_LOAD_FACTOR: f64 = 0.5;

/// Construction options for [`IntLongMap`]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// Initial number of slots
    #[doc(hidden)]
    pub capacity: usize,

    /// Ratio of occupied slots that triggers growth
    #[doc(hidden)]
    pub load_factor: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl Config {
    /// Creates a config with the default capacity (16) and load factor (0.5).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the initial capacity.
    ///
    /// Must be greater than zero.
    #[must_use]
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the load factor.
    ///
    /// The map doubles its capacity before an insert whenever
    /// `size >= load_factor * capacity`. Must be in `(0, 1]`.
    #[must_use]
    pub fn load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = load_factor;
        self
    }

    /// Checks that both parameters are in range.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the capacity is zero, or the load
    /// factor is not in `(0, 1]` (NaN included).
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidArgument(
                "initial capacity cannot be zero or negative",
            ));
        }

        // Written as a negated range check so that NaN is rejected too
        if !(self.load_factor > 0.0 && self.load_factor <= 1.0) {
            return Err(Error::InvalidArgument(
                "load factor must be greater than 0 and less than or equal to 1",
            ));
        }

        Ok(())
    }

    /// Validates the config and allocates an empty map.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if validation fails.
    pub fn build(self) -> Result<IntLongMap> {
        self.validate()?;

        if self != Self::default() {
            log::debug!(
                "creating map with capacity={} load_factor={}",
                self.capacity,
                self.load_factor,
            );
        }

        Ok(IntLongMap::from_config(self))
    }
}
