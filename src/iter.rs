//! Iteration over a `Table` in slot order.
//!
//! Slot order is an artifact of hashing and probing: it is neither insertion
//! order nor sorted order. Every form here borrows (or consumes) the table,
//! so the table cannot be mutated while an iteration is in progress.

use crate::table::{Slot, Table};
use core::hash::BuildHasher;
use core::iter::FusedIterator;

/// Explicit cursor over a table's entries.
///
/// Starts before the first entry; each successful `advance` exposes the next
/// occupied slot through `key` and `value`.
pub struct Cursor<'a, V> {
    slots: &'a [Slot<V>],
    index: Option<usize>,
    current: Option<(&'a str, &'a V)>,
}

impl<'a, V> Cursor<'a, V> {
    pub(crate) fn new(slots: &'a [Slot<V>]) -> Self {
        Self {
            slots,
            index: None,
            current: None,
        }
    }

    /// Move to the next entry and return `true`, or return `false` once the
    /// slots are exhausted. After `false`, `key` and `value` are `None` and
    /// further calls keep returning `false`.
    pub fn advance(&mut self) -> bool {
        let start = self.index.map_or(0, |i| i + 1);
        for (i, slot) in self.slots.iter().enumerate().skip(start) {
            if let Some(e) = slot {
                self.index = Some(i);
                self.current = Some((&*e.key, &e.value));
                return true;
            }
        }
        self.index = Some(self.slots.len());
        self.current = None;
        false
    }

    pub fn key(&self) -> Option<&'a str> {
        self.current.map(|(k, _)| k)
    }

    pub fn value(&self) -> Option<&'a V> {
        self.current.map(|(_, v)| v)
    }
}

/// Iterator over `(&str, &V)` pairs.
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(slots: &'a [Slot<V>], len: usize) -> Self {
        Self {
            slots: slots.iter(),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(e) = slot {
                self.remaining -= 1;
                return Some((&*e.key, &e.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Iterator over `(&str, &mut V)` pairs.
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> IterMut<'a, V> {
    pub(crate) fn new(slots: &'a mut [Slot<V>], len: usize) -> Self {
        Self {
            slots: slots.iter_mut(),
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some(e) = slot {
                self.remaining -= 1;
                return Some((&*e.key, &mut e.value));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

/// Owning iterator yielding the table's key copies as `String`s.
pub struct IntoIter<V> {
    slots: std::vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        let e = self.slots.by_ref().flatten().next()?;
        self.remaining -= 1;
        Some((e.key.into_string(), e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}

impl<V, S: BuildHasher> IntoIterator for Table<V, S> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> IntoIter<V> {
        let (slots, remaining) = self.into_parts();
        IntoIter {
            slots: slots.into_iter(),
            remaining,
        }
    }
}

impl<'a, V, S: BuildHasher> IntoIterator for &'a Table<V, S> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

impl<'a, V, S: BuildHasher> IntoIterator for &'a mut Table<V, S> {
    type Item = (&'a str, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> IterMut<'a, V> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use crate::Table;
    use std::collections::BTreeSet;

    fn filled(n: usize) -> Table<usize> {
        let mut t = Table::new();
        for i in 0..n {
            t.set(&format!("key-{}", i), i).unwrap();
        }
        t
    }

    /// Invariant: A cursor over an empty table never yields.
    #[test]
    fn cursor_on_empty_table() {
        let t: Table<i32> = Table::new();
        let mut c = t.cursor();
        assert!(c.key().is_none());
        assert!(!c.advance());
        assert!(c.key().is_none());
        assert!(c.value().is_none());
    }

    /// Invariant: 100 inserted keys are each visited exactly once.
    #[test]
    fn cursor_visits_each_entry_once() {
        let t = filled(100);
        assert_eq!(t.len(), 100);

        let mut seen = Vec::new();
        let mut c = t.cursor();
        while c.advance() {
            let k = c.key().unwrap();
            assert_eq!(t.get(k), c.value());
            seen.push(k.to_string());
        }
        let unique: BTreeSet<String> = seen.iter().cloned().collect();
        let expected: BTreeSet<String> = (0..100).map(|i| format!("key-{}", i)).collect();
        assert_eq!(seen.len(), 100, "no entry visited twice");
        assert_eq!(unique, expected);
    }

    /// Invariant: An exhausted cursor stays exhausted.
    #[test]
    fn cursor_is_fused() {
        let t = filled(3);
        let mut c = t.cursor();
        let mut n = 0;
        while c.advance() {
            n += 1;
        }
        assert_eq!(n, 3);
        assert!(!c.advance());
        assert!(!c.advance());
        assert!(c.value().is_none());
    }

    /// Invariant: Cursor and `iter` walk the slots in the same order.
    #[test]
    fn cursor_order_matches_iter_order() {
        let t = filled(20);
        let mut c = t.cursor();
        let mut it = t.iter();
        while c.advance() {
            assert_eq!(it.next(), Some((c.key().unwrap(), c.value().unwrap())));
        }
        assert!(it.next().is_none());
    }

    /// Invariant: `iter` reports an exact length that counts down.
    #[test]
    fn iter_exact_size() {
        let t = filled(10);
        let mut it = t.iter();
        assert_eq!(it.len(), 10);
        it.next();
        assert_eq!(it.len(), 9);
        assert_eq!(it.count(), 9);
    }

    /// Invariant: `iter_mut` writes are visible to later lookups.
    #[test]
    fn iter_mut_updates_values() {
        let mut t = filled(10);
        for (_k, v) in t.iter_mut() {
            *v += 100;
        }
        for i in 0..10 {
            assert_eq!(t.get(&format!("key-{}", i)), Some(&(i + 100)));
        }
        for (_k, v) in &mut t {
            *v = 0;
        }
        assert!((&t).into_iter().all(|(_, v)| *v == 0));
    }

    /// Invariant: Consuming iteration hands out every key and value.
    #[test]
    fn into_iter_yields_owned_pairs() {
        let t = filled(25);
        let it = t.into_iter();
        assert_eq!(it.len(), 25);
        let mut pairs: Vec<(String, usize)> = it.collect();
        pairs.sort_by_key(|(_, v)| *v);
        for (i, (k, v)) in pairs.into_iter().enumerate() {
            assert_eq!(k, format!("key-{}", i));
            assert_eq!(v, i);
        }
    }
}
