//! Table: open-addressing string map with linear probing and FNV-1a hashing.

use crate::error::AllocError;
use crate::fnv::FnvBuildHasher;
use crate::iter::{Cursor, Iter, IterMut};
use core::fmt;
use core::hash::{BuildHasher, Hasher};

/// Smallest slot count a table ever has.
pub const MIN_CAPACITY: usize = 16;

#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub(crate) key: Box<str>,
    pub(crate) hash: u64,
    pub(crate) value: V,
}

pub(crate) type Slot<V> = Option<Entry<V>>;

/// A hash table from owned string keys to values of type `V`.
///
/// Keys are copied on first insertion and owned by the table until it is
/// dropped. There is no removal; the table only grows, doubling whenever an
/// insertion would push the load factor above one half.
pub struct Table<V, S = FnvBuildHasher> {
    hasher: S,
    slots: Vec<Slot<V>>, // len is the capacity, always a power of two
    count: usize,
}

impl<V> Table<V> {
    /// Empty table with `MIN_CAPACITY` slots. Aborts on allocation failure,
    /// as `Vec::with_capacity` does; use `try_new` to observe the failure.
    pub fn new() -> Self {
        Self::with_hasher(FnvBuildHasher)
    }

    /// Create an empty `MIN_CAPACITY` table, reporting a failed slot-array
    /// allocation instead of aborting.
    ///
    /// ```
    /// let t = strmap::Table::<u32>::try_new().unwrap();
    /// assert_eq!(t.capacity(), strmap::MIN_CAPACITY);
    /// assert!(t.is_empty());
    /// ```
    pub fn try_new() -> Result<Self, AllocError> {
        Self::try_with_hasher(FnvBuildHasher)
    }

    /// Empty table sized so that `n` entries fit without growing.
    pub fn try_with_capacity(n: usize) -> Result<Self, AllocError> {
        Self::try_with_capacity_and_hasher(n, FnvBuildHasher)
    }
}

impl<V> Default for Table<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> Table<V, S>
where
    S: BuildHasher,
{
    /// Empty `MIN_CAPACITY` table hashing keys with `hasher`.
    pub fn with_hasher(hasher: S) -> Self {
        let mut slots = Vec::with_capacity(MIN_CAPACITY);
        slots.resize_with(MIN_CAPACITY, || None);
        Self {
            hasher,
            slots,
            count: 0,
        }
    }

    /// Fallible form of `with_hasher`.
    pub fn try_with_hasher(hasher: S) -> Result<Self, AllocError> {
        Self::try_with_capacity_and_hasher(0, hasher)
    }

    pub fn try_with_capacity_and_hasher(n: usize, hasher: S) -> Result<Self, AllocError> {
        let capacity = capacity_for(n).ok_or(AllocError::CapacityOverflow)?;
        let slots = empty_slots(capacity).map_err(|e| {
            tracing::debug!(capacity, error = %e, "table allocation failed");
            e
        })?;
        Ok(Self {
            hasher,
            slots,
            count: 0,
        })
    }

    /// Hash of the raw key bytes; no length prefix or terminator is mixed in.
    fn make_hash(&self, key: &str) -> u64 {
        let mut h = self.hasher.build_hasher();
        h.write(key.as_bytes());
        h.finish()
    }

    /// Index of the slot holding `key`, or of the first empty slot on its
    /// probe sequence. Terminates because the load factor stays below one.
    fn probe(&self, hash: u64, key: &str) -> usize {
        let mask = self.slots.len() - 1;
        let mut index = hash as usize & mask;
        loop {
            match &self.slots[index] {
                None => return index,
                Some(e) if e.hash == hash && *e.key == *key => return index,
                Some(_) => index = (index + 1) & mask,
            }
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots. Always a power of two, at least `MIN_CAPACITY`.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Value stored under `key`, or `None` if it was never set.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Like `get`, also returning the table's own copy of the key.
    pub fn get_key_value(&self, key: &str) -> Option<(&str, &V)> {
        let index = self.probe(self.make_hash(key), key);
        self.slots[index].as_ref().map(|e| (&*e.key, &e.value))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.probe(self.make_hash(key), key);
        self.slots[index].as_mut().map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Associate `value` with `key`, returning the table's copy of the key.
    ///
    /// An existing key keeps its storage and only the value is replaced;
    /// otherwise the key is copied. The returned string's address is stable
    /// for as long as the table lives, growth included.
    ///
    /// On `Err` the table holds exactly the entries it held before the call.
    pub fn set(&mut self, key: &str, value: V) -> Result<&str, AllocError> {
        if 2 * (self.count + 1) > self.slots.len() {
            self.grow()?;
        }

        let hash = self.make_hash(key);
        let index = self.probe(hash, key);
        let slot = &mut self.slots[index];
        let entry = match slot.take() {
            Some(mut entry) => {
                entry.value = value;
                entry
            }
            None => {
                // Copy before touching the slot so a failure leaves it empty.
                let key = copy_key(key).map_err(|e| {
                    tracing::debug!(len = key.len(), error = %e, "key copy failed");
                    e
                })?;
                self.count += 1;
                Entry { key, hash, value }
            }
        };
        Ok(&*slot.insert(entry).key)
    }

    /// Double the slot array, moving every entry by its cached hash.
    fn grow(&mut self) -> Result<(), AllocError> {
        let old = self.slots.len();
        let capacity = old.checked_mul(2).ok_or(AllocError::CapacityOverflow)?;
        let mut slots = empty_slots(capacity).map_err(|e| {
            tracing::debug!(from = old, to = capacity, error = %e, "table growth failed");
            e
        })?;

        let mask = capacity - 1;
        for entry in self.slots.drain(..).flatten() {
            let mut index = entry.hash as usize & mask;
            while slots[index].is_some() {
                index = (index + 1) & mask;
            }
            slots[index] = Some(entry);
        }
        self.slots = slots;

        tracing::trace!(from = old, to = capacity, len = self.count, "table grown");
        Ok(())
    }

    /// Cursor positioned before the first entry. See `Cursor::advance`.
    pub fn cursor(&self) -> Cursor<'_, V> {
        Cursor::new(&self.slots)
    }

    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.slots, self.count)
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut::new(&mut self.slots, self.count)
    }

    pub(crate) fn into_parts(self) -> (Vec<Slot<V>>, usize) {
        (self.slots, self.count)
    }
}

impl<V, S> fmt::Debug for Table<V, S>
where
    V: fmt::Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

fn capacity_for(n: usize) -> Option<usize> {
    let wanted = n.checked_mul(2)?.checked_next_power_of_two()?;
    Some(wanted.max(MIN_CAPACITY))
}

fn empty_slots<V>(capacity: usize) -> Result<Vec<Slot<V>>, AllocError> {
    let mut slots = Vec::new();
    slots.try_reserve_exact(capacity)?;
    slots.resize_with(capacity, || None);
    Ok(slots)
}

fn copy_key(key: &str) -> Result<Box<str>, AllocError> {
    let mut owned = String::new();
    owned.try_reserve_exact(key.len())?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}
