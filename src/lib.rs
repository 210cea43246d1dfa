//! # int-long-map
//!
//! A hash map from `i32` keys to nullable `i64` values, using open addressing
//! with linear probing.
//!
//! Null values are permitted, null keys are not. With the default load factor
//! (0.5) the expected number of probes is 3/2 for a search hit and 5/2 for a
//! search miss.
//!
//! ## Example
//!
//! ```rust
//! use int_long_map::IntLongMap;
//!
//! let mut map = IntLongMap::new();
//! assert_eq!(map.put(42, -42).unwrap(), None);
//! assert_eq!(map.put(42, 7).unwrap(), Some(-42));
//!
//! assert_eq!(map.get(42).unwrap(), Some(7));
//! assert_eq!(map.get(19).unwrap(), None);
//! assert_eq!(map.size(), 1);
//! ```

#![deny(unsafe_code)]

mod config;
mod error;

pub use config::{Config, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use error::{Error, Result};

// =============================================================================
// Slot storage
// =============================================================================

/// Outcome of walking a probe chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Probe {
    /// Slot holding the searched key.
    Hit(usize),
    /// First empty slot on the chain.
    Vacant(usize),
    /// Every slot was visited without a hit or a vacancy (only possible when
    /// the load factor is 1 and the table is full).
    Exhausted,
}

/// Two parallel arrays: `keys[i] == None` marks slot `i` empty.
///
/// Both arrays always have the same length, which is the map's capacity.
/// Growing replaces the whole `Slots` value, so keys, values and capacity
/// change together.
#[derive(Clone)]
struct Slots {
    keys: Box<[Option<i32>]>,
    values: Box<[Option<i64>]>,
}

impl Slots {
    fn new(capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            keys: vec![None; capacity].into_boxed_slice(),
            values: vec![None; capacity].into_boxed_slice(),
        }
    }

    #[inline]
    fn capacity(&self) -> usize {
        self.keys.len()
    }

    /// Home slot of `key`: the low 31 bits reduced modulo the capacity.
    #[inline]
    fn hash(&self, key: i32) -> usize {
        (key & i32::MAX) as usize % self.capacity()
    }

    /// Walks forward from the home slot of `key`, wrapping at the end, for at
    /// most one full ring.
    fn probe(&self, key: i32) -> Probe {
        let capacity = self.capacity();
        let mut i = self.hash(key);

        for _ in 0..capacity {
            match self.keys[i] {
                None => return Probe::Vacant(i),
                Some(k) if k == key => return Probe::Hit(i),
                Some(_) => i = (i + 1) % capacity,
            }
        }

        Probe::Exhausted
    }

    #[inline]
    fn occupy(&mut self, idx: usize, key: i32, value: Option<i64>) {
        debug_assert!(self.keys[idx].is_none());
        self.keys[idx] = Some(key);
        self.values[idx] = value;
    }

    /// Occupied slots in slot order.
    fn entries(&self) -> impl Iterator<Item = (i32, Option<i64>)> + '_ {
        self.keys
            .iter()
            .zip(self.values.iter())
            .filter_map(|(k, v)| k.map(|k| (k, *v)))
    }
}

// =============================================================================
// IntLongMap
// =============================================================================

/// An open addressing hash map from `i32` keys to nullable `i64` values.
///
/// Keys and values are passed as anything convertible into `Option`, so both
/// `map.put(1, 10)` and `map.put(1, None)` work. A `None` key is rejected
/// with [`Error::NullKey`] and leaves the map untouched.
///
/// A stored `None` value and a missing key both read back as `None` from
/// [`IntLongMap::get`]; callers that need to tell them apart must track that
/// themselves.
///
/// There is no removal, so probe chains never contain holes.
#[derive(Clone)]
pub struct IntLongMap {
    slots: Slots,
    size: usize,
    load_factor: f64,
}

impl IntLongMap {
    /// Creates an empty map with the default capacity (16) and load factor (0.5).
    #[must_use]
    pub fn new() -> Self {
        Self::from_config(Config::default())
    }

    /// Creates an empty map with the given capacity and the default load
    /// factor (0.5).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Config::new().capacity(capacity).build()
    }

    /// Creates an empty map with the given capacity and load factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `capacity` is zero, or
    /// `load_factor` is not in `(0, 1]`.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f64) -> Result<Self> {
        Config::new()
            .capacity(capacity)
            .load_factor(load_factor)
            .build()
    }

    /// Allocates storage for an already validated config.
    pub(crate) fn from_config(config: Config) -> Self {
        Self {
            slots: Slots::new(config.capacity),
            size: 0,
            load_factor: config.load_factor,
        }
    }

    /// Number of key-value pairs in the map.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Current number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    #[inline]
    pub fn load_factor(&self) -> f64 {
        self.load_factor
    }

    /// Heap bytes held by the slot arrays.
    pub fn memory_usage(&self) -> usize {
        self.capacity()
            * (std::mem::size_of::<Option<i32>>() + std::mem::size_of::<Option<i64>>())
    }

    /// Maps `value` to `key`, returning the value previously mapped to it.
    ///
    /// If `size >= load_factor * capacity` before the entry is written, the
    /// capacity is doubled first. The check runs for every put, including ones
    /// that only replace the value of an existing key.
    ///
    /// Returns `None` for a fresh key, and also when the replaced value was
    /// itself `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullKey`] if `key` is `None`.
    pub fn put(
        &mut self,
        key: impl Into<Option<i32>>,
        value: impl Into<Option<i64>>,
    ) -> Result<Option<i64>> {
        let key = key.into().ok_or(Error::NullKey)?;
        let value = value.into();

        if self.size as f64 >= self.load_factor * self.capacity() as f64 {
            self.resize(self.capacity() * 2);
        }

        loop {
            match self.slots.probe(key) {
                Probe::Hit(idx) => {
                    return Ok(std::mem::replace(&mut self.slots.values[idx], value));
                }
                Probe::Vacant(idx) => {
                    self.slots.occupy(idx, key, value);
                    self.size += 1;
                    return Ok(None);
                }
                // The growth check above always leaves a vacancy
                Probe::Exhausted => self.resize(self.capacity() * 2),
            }
        }
    }

    /// Returns the value mapped to `key`, or `None` on a search miss.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NullKey`] if `key` is `None`.
    pub fn get(&self, key: impl Into<Option<i32>>) -> Result<Option<i64>> {
        let key = key.into().ok_or(Error::NullKey)?;

        Ok(match self.slots.probe(key) {
            Probe::Hit(idx) => self.slots.values[idx],
            Probe::Vacant(_) | Probe::Exhausted => None,
        })
    }

    /// Rebuilds the slot arrays at `new_capacity`, reinserting every entry in
    /// old slot order, then swaps them in.
    fn resize(&mut self, new_capacity: usize) {
        debug_assert!(new_capacity >= self.size);

        log::trace!(
            "growing map from {} to {new_capacity} slots ({} entries)",
            self.capacity(),
            self.size,
        );

        let mut resized = Slots::new(new_capacity);

        for (key, value) in self.slots.entries() {
            match resized.probe(key) {
                Probe::Vacant(idx) => resized.occupy(idx, key, value),
                // Keys are unique and the new table has room for all of them
                Probe::Hit(_) | Probe::Exhausted => {
                    debug_assert!(false, "rehash of key {key} found no vacant slot");
                }
            }
        }

        self.slots = resized;
    }
}

impl Default for IntLongMap {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IntLongMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntLongMap")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("load_factor", &self.load_factor)
            .finish()
    }
}


#[cfg(test)]
mod proptests;
