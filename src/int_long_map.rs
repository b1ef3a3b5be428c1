use alloc::boxed::Box;
use alloc::vec;
use core::fmt::Debug;

#[cfg(any(test, feature = "stats"))]
use crate::stats::DebugStats;
#[cfg(any(test, feature = "stats"))]
use crate::stats::ProbeHistogram;

/// Key value marking an empty slot.
///
/// Keys and values live in separate flat arrays, so the key array alone
/// carries occupancy. Reserving one key value avoids a parallel tag array.
const EMPTY: i32 = i32::MIN;

/// Number of slots allocated by [`IntLongHashMap::new`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Load factor used by [`IntLongHashMap::new`] and
/// [`IntLongHashMap::with_capacity`].
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Largest slot count a table can allocate; the value array bounds it.
const MAX_CAPACITY: usize = isize::MAX as usize / core::mem::size_of::<i64>();

/// Number of populated slots at which the next `put` grows the table.
///
/// `max(1, min(floor(capacity * load_factor), capacity - 1))`. Load factors
/// outside `(0, 1)` are clamped by the outer `min`/`max`, and `NaN` behaves
/// like zero.
#[inline(always)]
fn grow_threshold(capacity: usize, load_factor: f32) -> usize {
    // float -> int `as` casts truncate toward zero and saturate, which is the
    // floor we want for the non-negative products that matter here.
    let scaled = (capacity as f64 * f64::from(load_factor)) as usize;
    scaled.min(capacity.saturating_sub(1)).max(1)
}

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        use core::hash::BuildHasher;

        const MIX_SEED: u64 = 0x243f_6a88_85a3_08d3;

        #[inline(always)]
        fn mix(key: i32) -> u64 {
            foldhash::fast::FixedState::with_seed(MIX_SEED).hash_one(key)
        }
    } else {
        /// Folds the high bits of the key into the low bits so keys that only
        /// differ above the modulus still spread across slots.
        #[inline(always)]
        fn mix(key: i32) -> u64 {
            let key = key as u32;
            u64::from(key ^ (key >> 15))
        }
    }
}

/// Maps `key` to its home slot in a table of `capacity` slots.
#[inline(always)]
fn home_index(key: i32, capacity: usize) -> usize {
    debug_assert!(capacity > 0);
    (mix(key) % capacity as u64) as usize
}

/// Result of scanning for a key.
enum Probe {
    /// The slot holds the key.
    Occupied(usize),
    /// The key is absent and this is the first empty slot on its probe path.
    Vacant(usize),
    /// Every slot was visited without finding the key or an empty slot.
    Exhausted,
}

/// A hash map from `i32` keys to `i64` values using open addressing with
/// linear probing.
///
/// Keys and values are stored in two flat, equal-length arrays; there is no
/// per-entry allocation and no boxing. The table grows by doubling whenever
/// the number of stored keys reaches a threshold derived from the load
/// factor.
///
/// ## Limitations
///
/// - [`i32::MIN`] ([`RESERVED_KEY`]) marks empty slots and cannot be used as
///   a key.
/// - [`get`] reports absence with [`ABSENT`] ([`i64::MIN`]); use [`contains`]
///   or [`find`] if that value may be stored.
/// - Entries cannot be removed and the map cannot be iterated.
///
/// ## Example
///
/// ```rust
/// use int_long_map::IntLongHashMap;
///
/// let mut map = IntLongHashMap::new();
/// map.put(123, 11111);
/// map.put(321, 2222222222);
///
/// assert_eq!(map.get(123), 11111);
/// assert_eq!(map.get(42), IntLongHashMap::ABSENT);
/// assert!(map.contains(321));
/// assert_eq!(map.len(), 2);
/// ```
///
/// [`RESERVED_KEY`]: IntLongHashMap::RESERVED_KEY
/// [`ABSENT`]: IntLongHashMap::ABSENT
/// [`get`]: IntLongHashMap::get
/// [`contains`]: IntLongHashMap::contains
/// [`find`]: IntLongHashMap::find
#[derive(Clone)]
pub struct IntLongHashMap {
    keys: Box<[i32]>,
    values: Box<[i64]>,

    populated: usize,
    max_populated: usize,
    load_factor: f32,
}

impl Debug for IntLongHashMap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        struct Entries<'a>(&'a IntLongHashMap);

        impl Debug for Entries<'_> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_map().entries(self.0.occupied()).finish()
            }
        }

        f.debug_struct("IntLongHashMap")
            .field("populated", &self.populated)
            .field("capacity", &self.capacity())
            .field("max_populated", &self.max_populated)
            .field("load_factor", &self.load_factor)
            .field("entries", &Entries(self))
            .finish()
    }
}

impl Default for IntLongHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl IntLongHashMap {
    /// The key value reserved to mark empty slots. Never store it.
    pub const RESERVED_KEY: i32 = EMPTY;

    /// Returned by [`get`](Self::get) when the key has no value.
    pub const ABSENT: i64 = i64::MIN;

    /// Creates an empty map with 16 slots and a load factor of 0.75.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use int_long_map::IntLongHashMap;
    /// #
    /// let map = IntLongHashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty map with `capacity` slots and a load factor of 0.75.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty map with exactly `capacity` slots.
    ///
    /// The capacity is not rounded; any size works with the modulo index
    /// reduction. A capacity of 0 is raised to 1. The load factor is not
    /// validated: values outside `(0, 1)` are clamped by the growth
    /// threshold, which always lies in `[1, capacity - 1]` for tables of two
    /// or more slots. With a load factor of zero or less, every `put` into a
    /// non-empty map doubles the capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use int_long_map::IntLongHashMap;
    /// #
    /// let mut map = IntLongHashMap::with_capacity_and_load_factor(10, 0.5);
    /// assert_eq!(map.capacity(), 10);
    ///
    /// for key in 0..5 {
    ///     map.put(key, i64::from(key) * 10);
    /// }
    /// assert_eq!(map.capacity(), 10);
    ///
    /// // The sixth key crosses the threshold of 5 and doubles the table.
    /// map.put(5, 50);
    /// assert_eq!(map.capacity(), 20);
    /// ```
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        let capacity = capacity.max(1);

        Self {
            keys: vec![EMPTY; capacity].into_boxed_slice(),
            values: vec![0; capacity].into_boxed_slice(),
            populated: 0,
            max_populated: grow_threshold(capacity, load_factor),
            load_factor,
        }
    }

    /// Returns the number of keys stored in the map.
    ///
    /// Updating an existing key does not change the length.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots currently allocated.
    pub fn capacity(&self) -> usize {
        self.keys.len()
    }

    /// Returns the load factor the map was created with.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Returns the length at which the next [`put`](Self::put) grows the
    /// table.
    pub fn max_populated(&self) -> usize {
        self.max_populated
    }

    /// Associates `value` with `key`, replacing any previous value.
    ///
    /// The growth check runs before the key is looked up, so a `put` that
    /// only updates an existing key can still grow the table.
    ///
    /// `key` must not be [`RESERVED_KEY`](Self::RESERVED_KEY). Debug builds
    /// panic on it; release builds ignore the write.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use int_long_map::IntLongHashMap;
    /// #
    /// let mut map = IntLongHashMap::new();
    /// map.put(7, 1);
    /// map.put(7, 2);
    ///
    /// assert_eq!(map.get(7), 2);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn put(&mut self, key: i32, value: i64) {
        debug_assert_ne!(key, EMPTY, "i32::MIN is reserved for empty slots");
        if key == EMPTY {
            return;
        }

        if self.populated >= self.max_populated {
            self.grow();
        }

        match self.probe(key) {
            Probe::Occupied(index) => {
                self.values[index] = value;
            }
            Probe::Vacant(index) => {
                self.keys[index] = key;
                self.values[index] = value;
                self.populated += 1;
            }
            // Without growth, populated < max_populated <= capacity. With it,
            // populated <= old capacity < new capacity.
            Probe::Exhausted => unreachable!("no vacant slot after growth check"),
        }
    }

    /// Returns the value stored for `key`, or [`ABSENT`](Self::ABSENT).
    ///
    /// A stored `i64::MIN` is indistinguishable from absence here; use
    /// [`find`](Self::find) or [`contains`](Self::contains) instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use int_long_map::IntLongHashMap;
    /// #
    /// let mut map = IntLongHashMap::new();
    /// map.put(1, 100);
    ///
    /// assert_eq!(map.get(1), 100);
    /// assert_eq!(map.get(2), IntLongHashMap::ABSENT);
    /// ```
    #[inline]
    pub fn get(&self, key: i32) -> i64 {
        self.find(key).unwrap_or(Self::ABSENT)
    }

    /// Returns the value stored for `key`, if any.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use int_long_map::IntLongHashMap;
    /// #
    /// let mut map = IntLongHashMap::new();
    /// map.put(1, i64::MIN);
    ///
    /// assert_eq!(map.find(1), Some(i64::MIN));
    /// assert_eq!(map.find(2), None);
    /// ```
    #[inline]
    pub fn find(&self, key: i32) -> Option<i64> {
        match self.probe(key) {
            Probe::Occupied(index) => Some(self.values[index]),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Returns `true` if a value is stored for `key`.
    #[inline]
    pub fn contains(&self, key: i32) -> bool {
        matches!(self.probe(key), Probe::Occupied(_))
    }

    /// Grows the table until `additional` more keys can be inserted without
    /// triggering growth.
    ///
    /// Does nothing when no allocatable capacity satisfies the request, which
    /// is always the case for a load factor of zero or less and for tiny
    /// positive ones.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use int_long_map::IntLongHashMap;
    /// #
    /// let mut map = IntLongHashMap::new();
    /// map.reserve(100);
    /// assert!(map.max_populated() > 100);
    ///
    /// let capacity = map.capacity();
    /// for key in 0..100 {
    ///     map.put(key, 0);
    /// }
    /// assert_eq!(map.capacity(), capacity);
    /// ```
    pub fn reserve(&mut self, additional: usize) {
        if self.load_factor.is_nan() || self.load_factor <= 0.0 {
            return;
        }

        let required = self.populated.saturating_add(additional);
        if grow_threshold(self.keys.len(), self.load_factor) > required {
            return;
        }

        // The threshold exceeds `required` only once both
        // floor(capacity * lf) and capacity - 1 do.
        let wanted = ((required as f64 + 1.0) / f64::from(self.load_factor))
            .max(required as f64 + 2.0);
        if wanted > MAX_CAPACITY as f64 {
            return;
        }

        let mut capacity = self.keys.len();
        while grow_threshold(capacity, self.load_factor) <= required {
            match capacity.checked_mul(2) {
                Some(next) if next <= MAX_CAPACITY => capacity = next,
                _ => return,
            }
        }

        self.rehash(capacity);
    }

    /// Scans from the home slot of `key`, wrapping at the end of the table.
    ///
    /// Visits at most `capacity` slots, so a miss terminates even in a table
    /// with no empty slot.
    #[inline]
    fn probe(&self, key: i32) -> Probe {
        if key == EMPTY {
            return Probe::Exhausted;
        }

        let capacity = self.keys.len();
        let mut index = home_index(key, capacity);
        for _ in 0..capacity {
            let slot = self.keys[index];
            if slot == key {
                return Probe::Occupied(index);
            }
            if slot == EMPTY {
                return Probe::Vacant(index);
            }

            index += 1;
            if index == capacity {
                index = 0;
            }
        }

        Probe::Exhausted
    }

    #[cold]
    #[inline(never)]
    fn grow(&mut self) {
        let capacity = self
            .keys
            .len()
            .checked_mul(2)
            .expect("capacity overflow");
        self.rehash(capacity);
    }

    /// Moves every stored pair into fresh arrays of `capacity` slots.
    ///
    /// The new arrays are filled completely before they replace the old ones.
    /// Pairs are placed directly, bypassing `put`, so the count is untouched.
    fn rehash(&mut self, capacity: usize) {
        debug_assert!(capacity > self.populated);

        let mut keys = vec![EMPTY; capacity].into_boxed_slice();
        let mut values = vec![0; capacity].into_boxed_slice();

        for (key, value) in self.occupied() {
            let mut index = home_index(key, capacity);
            while keys[index] != EMPTY {
                debug_assert_ne!(keys[index], key, "duplicate key during rehash");
                index += 1;
                if index == capacity {
                    index = 0;
                }
            }
            keys[index] = key;
            values[index] = value;
        }

        self.keys = keys;
        self.values = values;
        self.max_populated = grow_threshold(capacity, self.load_factor);
    }

    fn occupied(&self) -> impl Iterator<Item = (i32, i64)> + '_ {
        self.keys
            .iter()
            .copied()
            .zip(self.values.iter().copied())
            .filter(|&(key, _)| key != EMPTY)
    }

    /// Distance of the occupied slot at `index` from its home slot.
    #[cfg(any(test, feature = "stats"))]
    fn probe_length(&self, index: usize) -> usize {
        let capacity = self.keys.len();
        let home = home_index(self.keys[index], capacity);
        (index + capacity - home) % capacity
    }

    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Bin `n` counts the keys stored `n` slots past their home slot.
    #[cfg(any(test, feature = "stats"))]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mut bins = alloc::vec::Vec::new();
        for index in 0..self.keys.len() {
            if self.keys[index] == EMPTY {
                continue;
            }
            let length = self.probe_length(index);
            if bins.len() <= length {
                bins.resize(length + 1, 0);
            }
            bins[length] += 1;
        }

        ProbeHistogram { bins }
    }

    /// Returns utilization and probe statistics for the current table state.
    #[cfg(any(test, feature = "stats"))]
    pub fn debug_stats(&self) -> DebugStats {
        let capacity = self.keys.len();

        let mut occupied_slots = 0;
        let mut total_probe = 0;
        let mut longest_probe = 0;
        for index in 0..capacity {
            if self.keys[index] == EMPTY {
                continue;
            }
            let length = self.probe_length(index);
            occupied_slots += 1;
            total_probe += length;
            longest_probe = longest_probe.max(length);
        }

        let slot_bytes = core::mem::size_of::<i32>() + core::mem::size_of::<i64>();

        DebugStats {
            populated: self.populated,
            capacity,
            max_populated: self.max_populated,
            occupied_slots,
            load: self.populated as f64 / capacity as f64,
            longest_probe,
            mean_probe: if occupied_slots == 0 {
                0.0
            } else {
                total_probe as f64 / occupied_slots as f64
            },
            total_bytes: capacity * slot_bytes,
            wasted_bytes: (capacity - occupied_slots) * slot_bytes,
        }
    }
}

impl Extend<(i32, i64)> for IntLongHashMap {
    fn extend<T: IntoIterator<Item = (i32, i64)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl FromIterator<(i32, i64)> for IntLongHashMap {
    fn from_iter<T: IntoIterator<Item = (i32, i64)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}
